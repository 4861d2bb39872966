use std::collections::BTreeMap;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use rusty_realty::dashboard::ColumnView;
use rusty_realty::data::filter::ScatterPoint;
use rusty_realty::data::model::RawValue;

use crate::color::{ColorMap, MUTED, column_color};
use crate::ui::format::fmt_num;

// ---------------------------------------------------------------------------
// Histogram of one column
// ---------------------------------------------------------------------------

/// Render a column's histogram as bars centred on each bin midpoint.
pub fn histogram_chart(ui: &mut Ui, view: &ColumnView) {
    ui.label(RichText::new(format!("Distribution of {}", view.column.label())).color(MUTED));

    if view.bins.is_empty() {
        ui.label("No values for this selection.");
        return;
    }

    let color = column_color(view.column);
    let bars: Vec<Bar> = view
        .bins
        .iter()
        .map(|bin| {
            let width = 2.0 * (bin.midpoint - bin.lower_bound);
            Bar::new(bin.midpoint, bin.count as f64)
                .width(width * 0.95)
                .name(format!("from {}", fmt_num(bin.lower_bound, 0)))
        })
        .collect();

    Plot::new(("histogram", view.column.label()))
        .height(300.0)
        .x_axis_label(view.column.label())
        .y_axis_label("Listings")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color).name("Frequency"));
        });
}

// ---------------------------------------------------------------------------
// Price vs. area scatter
// ---------------------------------------------------------------------------

/// Render price against area, one series per room label.
pub fn scatter_plot(ui: &mut Ui, points: &[ScatterPoint], color_map: Option<&ColorMap>) {
    let mut series: BTreeMap<Option<&RawValue>, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        series
            .entry(p.rooms.as_ref())
            .or_default()
            .push([p.area_m2, p.price_usd]);
    }

    Plot::new("price_vs_area")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label("Area (m²)")
        .y_axis_label("Price (USD)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (rooms, coords) in series {
                let color = color_map.map_or(MUTED, |cm| cm.color_for(rooms));
                let name = match rooms {
                    Some(v) => format!("{v} rooms"),
                    None => "unknown rooms".to_string(),
                };
                let pts: PlotPoints = coords.into_iter().collect();
                plot_ui.points(Points::new(pts).radius(3.0).color(color).name(name));
            }
        });

    ui.label(RichText::new(format!("{} listings plotted", points.len())).color(MUTED));
}
