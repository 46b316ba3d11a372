use eframe::egui::{self, Color32, RichText, Ui};
use opsdesk::{Entity, Selection};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Free-text search ----
    ui.strong("Search");
    let mut search = state.criteria().search_text.clone();
    let hint = format!("{}…", state.active.search_fields().join(", "));
    if ui
        .add(egui::TextEdit::singleline(&mut search).hint_text(hint))
        .changed()
    {
        state.set_search(search);
    }
    ui.add_space(8.0);

    // ---- Status dropdown ----
    ui.strong("Status");
    let current = state.status_selection();
    let current_text = match &current {
        Selection::All => "All".to_string(),
        Selection::Only(s) => s.clone(),
    };
    egui::ComboBox::from_id_salt("status_filter")
        .selected_text(current_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_all(), "All").clicked() {
                state.set_status(Selection::All);
            }
            for option in state.status_options() {
                let selected = matches!(&current, Selection::Only(s) if *s == option);
                if ui.selectable_label(selected, &option).clicked() {
                    state.set_status(Selection::Only(option));
                }
            }
        });
    ui.add_space(8.0);

    // ---- Date filter ----
    ui.strong("Date");
    let mut enabled = state.date_filter().is_some();
    let label = format!("Only one day ({})", state.active.date_field());
    if ui.checkbox(&mut enabled, label).changed() {
        state.set_date_filter(enabled.then_some(state.picked_date));
    }
    if let Some(active_date) = state.date_filter() {
        let mut date = active_date;
        ui.add(egui_extras::DatePickerButton::new(&mut date));
        if date != active_date {
            state.picked_date = date;
            state.set_date_filter(Some(date));
        }
    }
    ui.add_space(8.0);

    ui.separator();
    if ui.button("Clear filters").clicked() {
        state.clear_filters();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export folder…").clicked() {
                pick_export_dir(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for entity in Entity::ALL {
            if ui
                .selectable_label(state.active == entity, entity.label())
                .clicked()
                && state.active != entity
            {
                state.set_active(entity);
            }
        }

        ui.separator();

        ui.label(format!(
            "{} records, {} visible",
            state.records().len(),
            state.visible_indices.len()
        ));

        ui.separator();

        if ui.button("Export visible…").clicked() {
            export_dialog(state, true);
        }
        if ui.button("Export all…").clicked() {
            export_dialog(state, false);
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} data", state.active.label()))
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match state.load_into_active(&path) {
        Ok(()) => {
            let entity = state.active;
            state.config.data_files.insert(entity, path);
            save_config(state);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn pick_export_dir(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Export folder");
    if let Some(dir) = &state.config.export_dir {
        dialog = dialog.set_directory(dir);
    }
    if let Some(dir) = dialog.pick_folder() {
        state.config.export_dir = Some(dir);
        save_config(state);
    }
}

fn export_dialog(state: &mut AppState, visible_only: bool) {
    let today = chrono::Local::now().date_naive();
    let mut dialog = rfd::FileDialog::new()
        .set_title(format!("Export {}", state.active.label()))
        .add_filter("CSV", &["csv"])
        .set_file_name(state.export_file_name(today));
    if let Some(dir) = &state.config.export_dir {
        dialog = dialog.set_directory(dir);
    }

    let Some(path) = dialog.save_file() else {
        return;
    };
    match state.export_to(&path, visible_only) {
        Ok(rows) => {
            state.status_message = Some(format!("Exported {rows} rows to {}", path.display()));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn save_config(state: &mut AppState) {
    if let Err(e) = state.config.save() {
        log::warn!("Failed to save settings: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
