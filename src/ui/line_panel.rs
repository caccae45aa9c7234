use chrono::{Datelike, Months};
use eframe::egui::{vec2, Color32, Id, Pos2, RichText, Ui};
use egui_plot::{
    GridInput, GridMark, Line, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, Points,
};

use crate::charts::line_graph::{date_from_day, day_number, BucketMode, BucketPoint, LineGraph};
use crate::ui::{hover_popup, PICK_RADIUS};

// ---------------------------------------------------------------------------
// Event counts over time
// ---------------------------------------------------------------------------

const DOT_FILL: Color32 = Color32::from_rgb(0xfb, 0x8b, 0x24);
const DOT_RADIUS: f32 = 5.0;
/// Upper bound on custom grid marks per axis.
const MAX_MARKS: usize = 400;

/// Render the earthquake counts line. The x axis ticks at calendar
/// boundaries, month starts across the year or days within one month.
pub fn counts_line(ui: &mut Ui, graph: &LineGraph) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&graph.title);
    });

    let (x_min, mut x_max) = graph.x_domain;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let y_max = graph.y_max;
    let mode = graph.mode;

    let response = Plot::new("counts_line")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Date")
        .y_axis_label("Number of Earthquakes")
        .x_grid_spacer(move |input| date_grid(input, mode))
        .x_axis_formatter(move |mark, _range| date_label(mark.value, mode))
        .y_axis_formatter(|mark, _range| count_label(mark.value))
        .label_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x_min, 0.0],
                [x_max, y_max * 1.05],
            ));
            let series: Vec<[f64; 2]> = graph
                .points
                .iter()
                .map(|point| [point.x, point.count as f64])
                .collect();
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .color(Color32::BLACK)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .color(DOT_FILL)
                    .radius(DOT_RADIUS)
                    .shape(MarkerShape::Circle),
            );
        });

    let Some(pointer) = response.response.hover_pos() else {
        return;
    };
    let mut nearest: Option<(f32, &BucketPoint, Pos2)> = None;
    for point in &graph.points {
        let screen = response
            .transform
            .position_from_point(&PlotPoint::new(point.x, point.count as f64));
        let dist = screen.distance(pointer);
        if dist <= PICK_RADIUS + DOT_RADIUS
            && nearest.as_ref().map_or(true, |(best, ..)| dist < *best)
        {
            nearest = Some((dist, point, screen));
        }
    }
    if let Some((_, point, screen)) = nearest {
        let heading = match graph.mode {
            BucketMode::Monthly => point.date.format("%B").to_string(),
            BucketMode::Daily => point.date.format("%d %B").to_string(),
        };
        hover_popup(
            ui.ctx(),
            Id::new("counts_popup"),
            screen - vec2(0.0, 10.0),
            None,
            |ui: &mut Ui| {
                ui.label(RichText::new(heading).strong());
                ui.label(format!("Count: {}", point.count));
            },
        );
    }
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Grid marks at calendar boundaries: month starts across the year, every
/// day within one month.
fn date_grid(input: GridInput, mode: BucketMode) -> Vec<GridMark> {
    let (lo, hi) = input.bounds;
    let mut marks = Vec::new();
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return marks;
    }
    match mode {
        BucketMode::Monthly => {
            let Some(start) = date_from_day(lo.floor()) else {
                return marks;
            };
            let mut month = match start.with_day(1) {
                Some(first) if day_number(first) >= lo => Some(first),
                Some(first) => first.checked_add_months(Months::new(1)),
                None => None,
            };
            while let Some(first) = month {
                let value = day_number(first);
                if value > hi || marks.len() >= MAX_MARKS {
                    break;
                }
                marks.push(GridMark {
                    value,
                    step_size: 30.0,
                });
                month = first.checked_add_months(Months::new(1));
            }
        }
        BucketMode::Daily => {
            let mut day = lo.ceil();
            while day <= hi && marks.len() < MAX_MARKS {
                marks.push(GridMark {
                    value: day,
                    step_size: 1.0,
                });
                day += 1.0;
            }
        }
    }
    marks
}

fn date_label(day: f64, mode: BucketMode) -> String {
    match date_from_day(day) {
        Some(date) => match mode {
            BucketMode::Monthly => date.format("%B").to_string(),
            BucketMode::Daily => date.format("%d").to_string(),
        },
        None => String::new(),
    }
}

/// Counts are whole numbers; leave fractional grid lines unlabeled.
fn count_label(value: f64) -> String {
    if value >= 0.0 && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
