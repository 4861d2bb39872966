use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use rusty_realty::dashboard::{ColumnView, MAX_BINS};
use rusty_realty::data::filter::RoomFilter;
use rusty_realty::data::model::{Column, PropertyType};
use rusty_realty::stats::SummaryStatistics;

use crate::color::{ACCENT, ACCENT2, MUTED};
use crate::state::{AppState, ChartMode};
use crate::ui::format::{fmt_area, fmt_num, fmt_usd};
use crate::ui::{finance, plot};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ui.strong("Property type");
    let mut property_type = state.property_type;
    egui::ComboBox::from_id_salt("property_type")
        .selected_text(property_type.label())
        .show_ui(ui, |ui: &mut Ui| {
            for pt in PropertyType::ALL {
                ui.selectable_value(&mut property_type, pt, pt.label());
            }
        });
    if property_type != state.property_type {
        state.set_property_type(property_type);
    }
    ui.add_space(8.0);

    let Some(table) = &state.table else {
        ui.label("No listings loaded.");
        return;
    };

    ui.strong("Rooms");
    let options = table.room_options.clone();
    let mut selected = state.inputs.room_filter.clone();
    egui::ComboBox::from_id_salt("rooms")
        .selected_text(selected.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, RoomFilter::All, "All");
            for value in options {
                let label = value.to_string();
                ui.selectable_value(&mut selected, RoomFilter::Only(value), label);
            }
        });
    state.set_room_filter(selected);
    ui.add_space(8.0);

    ui.separator();
    ui.strong("Charts");
    let mut refresh = false;
    refresh |= ui
        .checkbox(&mut state.inputs.remove_outliers, "Remove area outliers (IQR)")
        .changed();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Histogram bins");
        refresh |= ui
            .add(DragValue::new(&mut state.inputs.histogram_bins).range(1..=MAX_BINS))
            .changed();
    });
    if refresh {
        state.refresh_market();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open listings…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.load_current();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(market)) = (&state.table, &state.market) {
            ui.label(format!(
                "{}: {} listings loaded, {} visible",
                state.property_type,
                table.len(),
                market.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Statistics, charts and calculators.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Real-estate market dashboard").strong());
            ui.add_space(12.0);

            let placeholder = match &state.market {
                None => Some("Open a listing file to start  (File → Open listings…)"),
                Some(market) if market.is_empty() => Some("No listings match the current selection."),
                Some(_) => None,
            };
            match placeholder {
                Some(text) => {
                    ui.label(text);
                }
                None => {
                    stats_section(ui, state);
                    ui.add_space(16.0);
                    chart_section(ui, state);
                }
            }

            ui.add_space(16.0);
            finance::finance_section(ui, state);
        });
}

fn stats_section(ui: &mut Ui, state: &AppState) {
    let Some(market) = &state.market else {
        return;
    };
    ui.heading(RichText::new("Descriptive statistics").color(ACCENT));
    ui.separator();

    ui.columns(market.columns.len(), |cols: &mut [Ui]| {
        for (ui, view) in cols.iter_mut().zip(&market.columns) {
            stat_card(ui, view);
        }
    });
}

/// One stat card. Nothing is rendered for a column without values.
fn stat_card(ui: &mut Ui, view: &ColumnView) {
    let Some(stats) = &view.summary else {
        return;
    };
    let fmt: fn(f64) -> String = match view.column {
        Column::PriceUsd | Column::PricePerM2 => fmt_usd,
        Column::AreaM2 => fmt_area,
    };

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(view.column.label()).small().color(MUTED));
        egui::Grid::new(("stat_card", view.column.label()))
            .num_columns(2)
            .striped(true)
            .show(ui, |ui: &mut Ui| {
                for (key, value, color) in stat_rows(stats, fmt) {
                    ui.label(RichText::new(key).color(MUTED));
                    let text = RichText::new(value).strong();
                    ui.label(match color {
                        Some(c) => text.color(c),
                        None => text,
                    });
                    ui.end_row();
                }
            });
    });
}

fn stat_rows(
    s: &SummaryStatistics,
    fmt: fn(f64) -> String,
) -> [(&'static str, String, Option<Color32>); 8] {
    [
        ("Count", fmt_num(s.count as f64, 0), None),
        ("Mean", fmt(s.mean), Some(ACCENT)),
        ("Std. deviation", fmt(s.std), None),
        ("Minimum", fmt(s.min), None),
        ("25%", fmt(s.q25), None),
        ("Median", fmt(s.median), Some(ACCENT2)),
        ("75%", fmt(s.q75), None),
        ("Maximum", fmt(s.max), None),
    ]
}

fn chart_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Charts").color(ACCENT));
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for mode in ChartMode::ALL {
            ui.selectable_value(&mut state.chart_mode, mode, mode.label());
        }
    });
    ui.add_space(8.0);

    let Some(market) = &state.market else {
        return;
    };
    match state.chart_mode {
        ChartMode::Histogram(column) => {
            if let Some(view) = market.column(column) {
                plot::histogram_chart(ui, view);
            }
        }
        ChartMode::PriceVsArea => {
            plot::scatter_plot(ui, &market.scatter, state.color_map.as_ref());
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} listings", state.property_type))
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(path);
    }
}
