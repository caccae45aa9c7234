use eframe::egui::{Align2, Color32, Id, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotBounds, PlotPoint, Text, VLine};

use crate::charts::histogram::{Bin, Histogram};
use crate::color::HISTOGRAM_FILL;
use crate::ui::hover_popup;

// ---------------------------------------------------------------------------
// Histogram panel
// ---------------------------------------------------------------------------

/// How a bin range reads in the hover popup. Magnitude edges are already
/// round, depth edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFormat {
    Plain,
    TwoDecimals,
}

impl RangeFormat {
    fn describe(self, bin: &Bin) -> String {
        match self {
            RangeFormat::Plain => format!("{} - {}", bin.lo, bin.hi),
            RangeFormat::TwoDecimals => format!("{:.2} - {:.2}", bin.lo, bin.hi),
        }
    }
}

/// Render one histogram: green bars, a count label over every bar, and a
/// red mean marker.
pub fn histogram(ui: &mut Ui, id: &str, histogram: &Histogram, format: RangeFormat) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&histogram.title);
    });

    let (x_min, mut x_max) = histogram.x_domain;
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let y_max = histogram.y_max;

    let response = Plot::new(id)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(histogram.x_label)
        .y_axis_label("Frequency")
        .y_axis_formatter(|mark, _range| frequency_label(mark.value))
        .label_formatter(|_, _| String::new())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x_min, 0.0],
                [x_max, y_max * 1.15],
            ));

            let bars: Vec<Bar> = histogram
                .bins
                .iter()
                .map(|bin| {
                    Bar::new(bin.center(), bin.count as f64)
                        .width(bin.width() * 0.97)
                        .fill(HISTOGRAM_FILL)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));

            // Count label over every bar, zeroes included.
            for bin in &histogram.bins {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(bin.center(), bin.count as f64 + y_max * 0.02),
                        RichText::new(bin.count.to_string())
                            .small()
                            .color(Color32::BLACK),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }

            if let Some(mean) = histogram.mean {
                plot_ui.vline(VLine::new(mean).color(Color32::RED).width(2.0));
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(mean, y_max * 1.02),
                        RichText::new(format!("Mean: {mean:.2}"))
                            .strong()
                            .color(Color32::RED),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });

    // Popup over a hovered bar with its count and value range.
    let Some(pointer) = response.response.hover_pos() else {
        return;
    };
    let value = response.transform.value_from_position(pointer);
    let hovered = histogram.bins.iter().enumerate().find(|(i, bin)| {
        let last = *i + 1 == histogram.bins.len();
        let in_x = value.x >= bin.lo && (value.x < bin.hi || (last && value.x <= bin.hi));
        in_x && bin.count > 0 && value.y >= 0.0 && value.y <= bin.count as f64
    });
    if let Some((_, bin)) = hovered {
        let top = response
            .transform
            .position_from_point(&PlotPoint::new(bin.center(), bin.count as f64));
        hover_popup(
            ui.ctx(),
            Id::new(("histogram_popup", id)),
            top,
            None,
            |ui: &mut Ui| {
                ui.label(RichText::new(format!("Count: {}", bin.count)).strong());
                ui.label(format!("Range: {}", format.describe(bin)));
            },
        );
    }
}

/// Frequencies are whole numbers; leave fractional grid lines unlabeled.
fn frequency_label(value: f64) -> String {
    if value >= 0.0 && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
