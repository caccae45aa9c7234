use eframe::egui::Color32;
use palette::{Mix, Srgb};

// ---------------------------------------------------------------------------
// Magnitude bands – threshold color scale for event markers
// ---------------------------------------------------------------------------

/// Threshold buckets for magnitude coloring. Boundaries are inclusive on
/// the upper side: a magnitude of exactly 5.0 is `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeBand {
    /// Below 5.
    Light,
    /// 5 up to (not including) 6.
    Moderate,
    /// 6 up to (not including) 7.
    Strong,
    /// 7 and above.
    Major,
}

/// All bands in legend order.
pub const BANDS: [MagnitudeBand; 4] = [
    MagnitudeBand::Light,
    MagnitudeBand::Moderate,
    MagnitudeBand::Strong,
    MagnitudeBand::Major,
];

/// Fallback for events whose magnitude failed to parse.
pub const UNCLASSIFIED: Color32 = Color32::GRAY;

/// Fill color shared by both histograms; same green as the `Light` band.
pub const HISTOGRAM_FILL: Color32 = Color32::from_rgb(0x73, 0xa9, 0x42);

impl MagnitudeBand {
    /// Band for a magnitude, or `None` when the magnitude is not finite.
    pub fn classify(magnitude: f64) -> Option<Self> {
        if !magnitude.is_finite() {
            return None;
        }
        Some(if magnitude >= 7.0 {
            MagnitudeBand::Major
        } else if magnitude >= 6.0 {
            MagnitudeBand::Strong
        } else if magnitude >= 5.0 {
            MagnitudeBand::Moderate
        } else {
            MagnitudeBand::Light
        })
    }

    pub fn color(self) -> Color32 {
        match self {
            MagnitudeBand::Light => HISTOGRAM_FILL,
            MagnitudeBand::Moderate => Color32::from_rgb(0xff, 0xd8, 0x19),
            MagnitudeBand::Strong => Color32::from_rgb(0xfb, 0x8b, 0x24),
            MagnitudeBand::Major => Color32::from_rgb(0xff, 0x00, 0x00),
        }
    }

    /// Legend label, phrased around the threshold boundaries.
    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBand::Light => "< 5",
            MagnitudeBand::Moderate => "≥ 5",
            MagnitudeBand::Strong => "≥ 6",
            MagnitudeBand::Major => "≥ 7",
        }
    }
}

/// Marker color for a magnitude, gray when unclassifiable.
pub fn magnitude_color(magnitude: f64) -> Color32 {
    MagnitudeBand::classify(magnitude).map_or(UNCLASSIFIED, MagnitudeBand::color)
}

// ---------------------------------------------------------------------------
// Density ramp – white-to-red, transparent where empty
// ---------------------------------------------------------------------------

/// Color for a normalized density value `t` in `[0, 1]`. Alpha rises with
/// `t` so empty cells stay invisible over the basemap.
pub fn density_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let low: Srgb<f32> = Srgb::new(1.0, 0.96, 0.94);
    let high: Srgb<f32> = Srgb::new(0.70, 0.05, 0.10);
    let mixed: Srgb<f32> = Srgb::from_linear(low.into_linear().mix(high.into_linear(), t));
    Color32::from_rgba_unmultiplied(
        (mixed.red * 255.0).round() as u8,
        (mixed.green * 255.0).round() as u8,
        (mixed.blue * 255.0).round() as u8,
        (t * 200.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_on_the_upper_side() {
        assert_eq!(MagnitudeBand::classify(4.99), Some(MagnitudeBand::Light));
        assert_eq!(MagnitudeBand::classify(5.0), Some(MagnitudeBand::Moderate));
        assert_eq!(MagnitudeBand::classify(5.99), Some(MagnitudeBand::Moderate));
        assert_eq!(MagnitudeBand::classify(6.0), Some(MagnitudeBand::Strong));
        assert_eq!(MagnitudeBand::classify(7.0), Some(MagnitudeBand::Major));
        assert_eq!(MagnitudeBand::classify(9.5), Some(MagnitudeBand::Major));
    }

    #[test]
    fn non_finite_magnitudes_are_unclassified() {
        assert_eq!(MagnitudeBand::classify(f64::NAN), None);
        assert_eq!(MagnitudeBand::classify(f64::INFINITY), None);
        assert_eq!(magnitude_color(f64::NAN), UNCLASSIFIED);
    }

    #[test]
    fn band_colors_match_the_scale() {
        assert_eq!(magnitude_color(4.2), Color32::from_rgb(0x73, 0xa9, 0x42));
        assert_eq!(magnitude_color(6.1), Color32::from_rgb(0xfb, 0x8b, 0x24));
        assert_eq!(magnitude_color(7.5), Color32::from_rgb(0xff, 0x00, 0x00));
    }

    #[test]
    fn legend_labels_are_ordered() {
        let labels: Vec<&str> = BANDS.iter().map(|band| band.label()).collect();
        assert_eq!(labels, vec!["< 5", "≥ 5", "≥ 6", "≥ 7"]);
    }

    #[test]
    fn density_ramp_fades_in() {
        assert_eq!(density_color(0.0).a(), 0);
        assert!(density_color(1.0).a() > density_color(0.5).a());
        // High densities are red-dominant.
        let hot = density_color(1.0);
        assert!(hot.r() > hot.g() && hot.r() > hot.b());
        // Out-of-range input clamps instead of panicking.
        assert_eq!(density_color(-3.0), density_color(0.0));
        assert_eq!(density_color(7.0), density_color(1.0));
    }
}
