use eframe::egui::{self, DragValue, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use rusty_realty::dashboard::MAX_YEARS;
use rusty_realty::finance::CashFlow;

use crate::color::{ACCENT, MUTED};
use crate::state::AppState;
use crate::ui::format::{fmt_num, fmt_pyg};

// ---------------------------------------------------------------------------
// Finance calculators
// ---------------------------------------------------------------------------

/// Render both calculators. Inputs changes recompute `state.finance`.
pub fn finance_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Financial calculators").color(ACCENT));
    ui.separator();

    let mut changed = false;

    egui::CollapsingHeader::new(RichText::new("Rent discounting (Guaraníes)").strong())
        .id_salt("annuity_calc")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("annuity_inputs")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    let inputs = &mut state.inputs.annuity;
                    ui.label("Annual rent (₲)");
                    changed |= ui
                        .add(DragValue::new(&mut inputs.annual_rent).speed(100_000.0).range(0.0..=f64::MAX))
                        .changed();
                    ui.end_row();

                    ui.label("Years");
                    changed |= ui
                        .add(DragValue::new(&mut inputs.years).speed(1).range(0..=MAX_YEARS))
                        .changed();
                    ui.end_row();

                    ui.label("Annual discount rate (%)");
                    changed |= ui
                        .add(DragValue::new(&mut inputs.discount_rate_pct).speed(0.5).range(0.0..=100.0))
                        .changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            let summary = &state.finance.annuity;
            ui.horizontal(|ui: &mut Ui| {
                metric(ui, "Nominal total (₲)", &fmt_pyg(summary.total_nominal));
                ui.add_space(24.0);
                metric(ui, "Present value (₲)", &fmt_pyg(summary.present_value));
            });

            if !summary.flows.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new("Annual flows and discounted value").italics().color(MUTED));
                flow_table(ui, &summary.flows);
            }
        });

    ui.add_space(8.0);

    egui::CollapsingHeader::new(RichText::new("Required rent for a property").strong())
        .id_salt("rent_calc")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("rent_inputs")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    let inputs = &mut state.inputs.rent;
                    ui.label("Property price (₲)");
                    changed |= ui
                        .add(DragValue::new(&mut inputs.price).speed(1_000_000.0).range(0.0..=f64::MAX))
                        .changed();
                    ui.end_row();

                    ui.label("Target yield (%)");
                    changed |= ui
                        .add(DragValue::new(&mut inputs.target_yield_pct).speed(0.25).range(0.0..=100.0))
                        .changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            let rent = state.finance.rent;
            ui.horizontal(|ui: &mut Ui| {
                metric(ui, "Required annual rent (₲)", &fmt_pyg(rent.annual));
                ui.add_space(24.0);
                metric(ui, "Required monthly rent (₲)", &fmt_pyg(rent.monthly));
            });
            ui.label(
                RichText::new("Required annual rent = property price × target yield.")
                    .italics()
                    .color(MUTED),
            );
        });

    if changed {
        state.refresh_finance();
    }
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().color(MUTED));
        ui.label(RichText::new(value).size(20.0).strong());
    });
}

fn flow_table(ui: &mut Ui, flows: &[CashFlow]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .max_scroll_height(280.0)
        .column(TableColumn::auto())
        .columns(TableColumn::remainder(), 3)
        .header(20.0, |mut header| {
            for title in ["Year", "Flow (₲)", "Discount factor", "Discounted flow (₲)"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for flow in flows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(flow.year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_pyg(flow.nominal_flow));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_num(flow.discount_factor, 6));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_pyg(flow.discounted_flow));
                    });
                });
            }
        });
}
