use eframe::egui::Ui;
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use crate::charts::scatter::ScatterPlot;
use crate::color::{MagnitudeBand, BANDS};

// ---------------------------------------------------------------------------
// Depth vs magnitude scatter
// ---------------------------------------------------------------------------

const POINT_RADIUS: f32 = 4.0;

/// Render the depth/magnitude scatter. The axes stay fixed to the full
/// catalog extent, so points visibly thin out as the selection narrows.
pub fn depth_scatter(ui: &mut Ui, scatter: &ScatterPlot) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&scatter.title);
    });

    let (x_min, mut x_max) = scatter.x_domain;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let (y_min, mut y_max) = scatter.y_domain;
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    Plot::new("depth_scatter")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Depth (km)")
        .y_axis_label("Magnitude")
        .label_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            for band in BANDS {
                let positions: Vec<[f64; 2]> = scatter
                    .points
                    .iter()
                    .filter(|point| MagnitudeBand::classify(point.magnitude) == Some(band))
                    .map(|point| [point.depth, point.magnitude])
                    .collect();
                if positions.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(positions))
                        .color(band.color())
                        .radius(POINT_RADIUS)
                        .shape(MarkerShape::Circle),
                );
            }
        });
}
