use eframe::egui;
use opsdesk::config::Config;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OpsDeskApp {
    pub state: AppState,
}

impl OpsDeskApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::new(config, chrono::Local::now().date_naive()),
        }
    }
}

impl eframe::App for OpsDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, tabs, export ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::record_table(ui, &mut self.state);
        });
    }
}
