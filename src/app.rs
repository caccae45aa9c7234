use eframe::egui;

use crate::data::model::{Catalog, WorldBoundaries};
use crate::state::AppState;
use crate::ui::histogram_panel::RangeFormat;
use crate::ui::map_panel::DensityLayer;
use crate::ui::{histogram_panel, line_panel, map_panel, panels, scatter_panel};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Share of the central panel height given to the map; the two chart rows
/// split the rest evenly.
const MAP_HEIGHT_FRACTION: f32 = 0.44;

pub struct RustyRichterApp {
    pub state: AppState,
    world: WorldBoundaries,
    density: Option<DensityLayer>,
}

impl RustyRichterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, catalog: Catalog, world: WorldBoundaries) -> Self {
        // The charts draw black strokes and labels; keep the light theme.
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let mut state = AppState::default();
        state.set_catalog(catalog, &world);
        Self {
            state,
            world,
            density: None,
        }
    }
}

impl eframe::App for RustyRichterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let loaded = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &mut self.state, &self.world))
            .inner;
        if loaded {
            // The texture belongs to the previous catalog's marker set.
            self.density = None;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map on top, charts in two rows below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dashboard) = self.state.dashboard.as_ref() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a catalog to begin  (File → Open catalog…)");
                });
                return;
            };

            let width = ui.available_width();
            let map_height = ui.available_height() * MAP_HEIGHT_FRACTION;
            ui.allocate_ui(egui::vec2(width, map_height), |ui: &mut egui::Ui| {
                map_panel::world_map(ui, dashboard, &mut self.density);
            });

            let row_height = ui.available_height() / 2.0;
            ui.allocate_ui(egui::vec2(width, row_height), |ui: &mut egui::Ui| {
                ui.columns(2, |columns: &mut [egui::Ui]| {
                    line_panel::counts_line(&mut columns[0], &dashboard.line);
                    scatter_panel::depth_scatter(&mut columns[1], &dashboard.scatter);
                });
            });
            ui.allocate_ui(egui::vec2(width, ui.available_height()), |ui: &mut egui::Ui| {
                ui.columns(2, |columns: &mut [egui::Ui]| {
                    histogram_panel::histogram(
                        &mut columns[0],
                        "magnitude_histogram",
                        &dashboard.magnitude_histogram,
                        RangeFormat::Plain,
                    );
                    histogram_panel::histogram(
                        &mut columns[1],
                        "depth_histogram",
                        &dashboard.depth_histogram,
                        RangeFormat::TwoDecimals,
                    );
                });
            });
        });
    }
}
