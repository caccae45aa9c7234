use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{month_name, MonthSelection, WorldBoundaries};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dashboard) = state.dashboard.as_mut() else {
        ui.label("No catalog loaded.");
        return;
    };

    // ---- Month selector ----
    ui.strong("Month");
    let mut selection = dashboard.selection;
    egui::ComboBox::from_id_salt("month_filter")
        .selected_text(selector_label(selection))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selection, MonthSelection::All, selector_label(MonthSelection::All));
            for month in 1..=12u8 {
                ui.selectable_value(&mut selection, MonthSelection::Month(month), month_name(month));
            }
        });
    if selection != dashboard.selection {
        dashboard.set_selection(selection);
    }

    ui.separator();

    // ---- Overlays ----
    ui.checkbox(&mut dashboard.map.show_density, "Seismicity density");

    ui.add_space(8.0);
    ui.label(format!(
        "{} of {} events shown",
        dashboard.visible.len(),
        dashboard.catalog.len()
    ));
}

fn selector_label(selection: MonthSelection) -> &'static str {
    match selection {
        MonthSelection::All => "All months",
        MonthSelection::Month(month) => month_name(month),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns true when a new catalog was
/// installed this frame.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, world: &WorldBoundaries) -> bool {
    let mut loaded = false;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalog…").clicked() {
                loaded = open_file_dialog(state, world);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.dashboard {
            Some(dashboard) => {
                ui.label(format!(
                    "{} events loaded, {} visible",
                    dashboard.catalog.len(),
                    dashboard.visible.len()
                ));
            }
            None => {
                ui.label("No catalog loaded.");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    loaded
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Pick and load a catalog CSV. A failed load keeps the current dashboard
/// and surfaces the error in the top bar.
pub fn open_file_dialog(state: &mut AppState, world: &WorldBoundaries) -> bool {
    let file = rfd::FileDialog::new()
        .set_title("Open earthquake catalog")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_catalog(&path) {
            Ok(catalog) => {
                state.set_catalog(catalog, world);
                return true;
            }
            Err(e) => {
                log::error!("Failed to load catalog: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
    false
}
