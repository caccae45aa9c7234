//! Depth vs magnitude scatter plot.
//!
//! Axis domains are padded from the FULL catalog at construction and never
//! follow the month filter, so points visibly drop out instead of the axes
//! rescaling under the viewer.

use crate::data::model::{Catalog, MonthSelection};

/// Fractional padding applied to the depth (x) extent.
const DEPTH_PADDING: f64 = 0.002;
/// Fractional padding applied to the magnitude (y) extent.
const MAGNITUDE_PADDING: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub depth: f64,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
}

impl ScatterPlot {
    /// Fixes the axis domains from the whole catalog; `update` never
    /// touches them again.
    pub fn new(catalog: &Catalog) -> Self {
        let (depth_lo, depth_hi) = catalog.depth_extent;
        let depth_pad = (depth_hi - depth_lo) * DEPTH_PADDING;
        let (mag_lo, mag_hi) = catalog.magnitude_extent;
        let mag_pad = (mag_hi - mag_lo) * MAGNITUDE_PADDING;
        ScatterPlot {
            title: format!("Earthquake Magnitude vs Depth - {}", catalog.year),
            points: Vec::new(),
            x_domain: (depth_lo - depth_pad, depth_hi + depth_pad),
            y_domain: (mag_lo - mag_pad, mag_hi + mag_pad),
        }
    }

    /// Replaces the visible points and the title's month suffix. Points
    /// with a NaN depth or magnitude have no position and are skipped.
    pub fn update(&mut self, catalog: &Catalog, visible: &[usize], selection: MonthSelection) {
        self.title = format!(
            "Earthquake Magnitude vs Depth - {}",
            selection.title_suffix(catalog.year)
        );
        self.points.clear();
        for &idx in visible {
            if let Some(record) = catalog.records.get(idx) {
                if record.depth.is_finite() && record.magnitude.is_finite() {
                    self.points.push(ScatterPoint {
                        depth: record.depth,
                        magnitude: record.magnitude,
                    });
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
