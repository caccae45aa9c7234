use eframe::egui::{
    vec2, Color32, ColorImage, Id, Pos2, RichText, Stroke, TextureHandle, TextureOptions, Ui, Vec2,
};
use egui_plot::{
    Corner, Legend, Line, MarkerShape, Plot, PlotImage, PlotPoint, PlotPoints, Points, Polygon,
};

use crate::charts::map_view::{MapView, MARKER_RADIUS};
use crate::color::{self, BANDS, UNCLASSIFIED};
use crate::data::density::DensityGrid;
use crate::data::geo;
use crate::state::Dashboard;
use crate::ui::{hover_popup, PICK_RADIUS};

// ---------------------------------------------------------------------------
// World map panel
// ---------------------------------------------------------------------------

/// Horizontal resolution of the density grid.
const DENSITY_COLS: usize = 240;
/// Smoothing bandwidth in projected units, roughly 2.5 degrees at the
/// equator.
const DENSITY_BANDWIDTH: f64 = 0.15;

const SPHERE_OUTLINE: Color32 = Color32::from_gray(120);
const GRATICULE: Color32 = Color32::from_gray(222);
const LAND_FILL: Color32 = Color32::from_gray(232);
const LAND_STROKE: Color32 = Color32::from_gray(160);

/// Density overlay texture cached across frames. Rebuilding it every frame
/// would redo the grid binning and blur for an unchanged marker set, so the
/// cache keys on [`MapView::density_rev`].
pub struct DensityLayer {
    revision: u64,
    center: PlotPoint,
    size: Vec2,
    texture: TextureHandle,
}

/// Render the world map: landmass, graticule, one magnitude-colored marker
/// per event, and the optional seismicity density overlay underneath.
pub fn world_map(ui: &mut Ui, dashboard: &Dashboard, cache: &mut Option<DensityLayer>) {
    let map = &dashboard.map;

    if map.show_density {
        let stale = cache
            .as_ref()
            .map_or(true, |layer| layer.revision != map.density_rev);
        if stale {
            *cache = Some(build_density_layer(ui, map));
        }
    }

    let ([x_min, y_min], [x_max, y_max]) = geo::sphere_bounds();

    let response = Plot::new("world_map")
        .data_aspect(1.0)
        .show_grid(false)
        .show_axes(false)
        .show_x(false)
        .show_y(false)
        .include_x(x_min)
        .include_x(x_max)
        .include_y(y_min)
        .include_y(y_max)
        .legend(Legend::default().position(Corner::LeftTop))
        .label_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            if map.show_density {
                if let Some(layer) = cache.as_ref() {
                    plot_ui.image(PlotImage::new(
                        layer.texture.id(),
                        layer.center,
                        layer.size,
                    ));
                }
            }

            plot_ui.line(
                Line::new(PlotPoints::from(map.sphere.clone()))
                    .color(SPHERE_OUTLINE)
                    .width(1.0),
            );
            for arc in &map.graticule {
                plot_ui.line(
                    Line::new(PlotPoints::from(arc.clone()))
                        .color(GRATICULE)
                        .width(0.5),
                );
            }
            for ring in &map.land_rings {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(ring.clone()))
                        .fill_color(LAND_FILL)
                        .stroke(Stroke::new(0.5, LAND_STROKE)),
                );
            }

            // One series per band so the legend always lists all four
            // classes, even when a band is empty this month.
            for band in BANDS {
                let positions: Vec<[f64; 2]> = map
                    .markers
                    .values()
                    .filter(|marker| marker.band == Some(band))
                    .filter_map(|marker| marker.position)
                    .collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(positions))
                        .color(band.color())
                        .radius(MARKER_RADIUS)
                        .shape(MarkerShape::Circle)
                        .name(band.label()),
                );
            }
            let unclassified: Vec<[f64; 2]> = map
                .markers
                .values()
                .filter(|marker| marker.band.is_none())
                .filter_map(|marker| marker.position)
                .collect();
            if !unclassified.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(unclassified))
                        .color(UNCLASSIFIED)
                        .radius(MARKER_RADIUS)
                        .shape(MarkerShape::Circle),
                );
            }
        });

    // Marker popup, tinted with the band color like the marker itself.
    let Some(pointer) = response.response.hover_pos() else {
        return;
    };
    let mut nearest: Option<(f32, usize, Pos2)> = None;
    for marker in map.markers.values() {
        let Some([x, y]) = marker.position else {
            continue;
        };
        let screen = response
            .transform
            .position_from_point(&PlotPoint::new(x, y));
        let dist = screen.distance(pointer);
        if dist <= PICK_RADIUS && nearest.as_ref().map_or(true, |(best, ..)| dist < *best) {
            nearest = Some((dist, marker.record_idx, screen));
        }
    }
    if let Some((_, record_idx, screen)) = nearest {
        let record = &dashboard.catalog.records[record_idx];
        hover_popup(
            ui.ctx(),
            Id::new("map_marker_popup"),
            screen,
            Some(color::magnitude_color(record.magnitude)),
            |ui: &mut Ui| {
                ui.label(RichText::new(&record.place).strong().color(Color32::BLACK));
                if let Some(time) = record.time {
                    ui.label(
                        RichText::new(format!("Date: {}", time.format("%Y-%m-%d")))
                            .color(Color32::BLACK),
                    );
                }
                ui.label(
                    RichText::new(format!("Magnitude: {}", record.magnitude))
                        .color(Color32::BLACK),
                );
                ui.label(
                    RichText::new(format!("Depth: {} km", record.depth)).color(Color32::BLACK),
                );
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Density texture
// ---------------------------------------------------------------------------

fn build_density_layer(ui: &Ui, map: &MapView) -> DensityLayer {
    let grid = DensityGrid::compute(
        map.marker_positions(),
        geo::sphere_bounds(),
        DENSITY_COLS,
        DENSITY_BANDWIDTH,
    );
    let texture = ui.ctx().load_texture(
        "seismicity_density",
        density_image(&grid),
        TextureOptions::LINEAR,
    );
    let ([x_min, y_min], [x_max, y_max]) = grid.extent();
    DensityLayer {
        revision: map.density_rev,
        center: PlotPoint::new((x_min + x_max) / 2.0, (y_min + y_max) / 2.0),
        size: vec2((x_max - x_min) as f32, (y_max - y_min) as f32),
        texture,
    }
}

/// Paint the grid into an image, white-to-red with alpha following the
/// normalized density. Grid rows grow upward, image rows downward.
fn density_image(grid: &DensityGrid) -> ColorImage {
    let mut image = ColorImage::new([grid.cols, grid.rows], Color32::TRANSPARENT);
    if grid.max_value <= 0.0 {
        return image;
    }
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let t = grid.value_at(col, row) / grid.max_value;
            image.pixels[(grid.rows - 1 - row) * grid.cols + col] = color::density_color(t);
        }
    }
    image
}
