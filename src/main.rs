mod app;
mod color;
mod state;
mod ui;

use app::OpsDeskApp;
use eframe::egui;
use opsdesk::config::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load settings, using defaults: {e:#}");
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OpsDesk – Admin Console",
        options,
        Box::new(move |_cc| Ok(Box::new(OpsDeskApp::new(config)))),
    )
}
