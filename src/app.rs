use eframe::egui;

use rusty_realty::config::DashboardConfig;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RealtyApp {
    pub state: AppState,
}

impl RealtyApp {
    /// Build the app and load the configured sheet for the initial property type.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_current();
        Self { state }
    }
}

impl eframe::App for RealtyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: stats, charts, calculators ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
