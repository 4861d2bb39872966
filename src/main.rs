mod app;
mod color;
mod state;
mod ui;

use app::RealtyApp;
use eframe::egui;
use rusty_realty::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::discover().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {e:#}");
        DashboardConfig::default()
    });
    let window = config.window;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Realty – Market Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(RealtyApp::new(config)))),
    )
}
