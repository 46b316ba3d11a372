use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use opsdesk::data::entity::STATUS_FIELD;
use opsdesk::Value;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Record table (central panel)
// ---------------------------------------------------------------------------

/// Render the visible records of the active entity.
pub fn record_table(ui: &mut Ui, state: &mut AppState) {
    if state.records().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!(
                "No {} loaded  (File → Open data file…)",
                state.active.label().to_lowercase()
            ));
        });
        return;
    }

    let mut to_delete: Option<Value> = None;
    {
        let records = state.records();
        let columns = &state.columns;
        let visible = &state.visible_indices;
        let color_map = &state.color_map;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(48.0).clip(true), columns.len())
            .column(Column::remainder().at_least(60.0))
            .header(22.0, |mut header| {
                for col in columns {
                    header.col(|ui| {
                        ui.strong(&col.header);
                    });
                }
                header.col(|_| {});
            })
            .body(|body| {
                body.rows(20.0, visible.len(), |mut row| {
                    let rec = &records[visible[row.index()]];
                    for col in columns {
                        row.col(|ui| {
                            let text = col.cell(rec);
                            if col.source() == Some(STATUS_FIELD) {
                                let color = color_map
                                    .as_ref()
                                    .map_or(Color32::GRAY, |cm| cm.color_for(&text));
                                ui.label(RichText::new(text).color(color).strong());
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                    row.col(|ui| {
                        if ui.small_button("Delete").clicked() {
                            to_delete = rec.id().cloned();
                        }
                    });
                });
            });
    }

    if let Some(id) = to_delete {
        state.delete_record(&id);
    }
}
