//! Shared histogram model for the magnitude and depth panels.
//!
//! Unlike the map, histograms are not reconciled: every selection change
//! rebuilds them from scratch and the panel reassigns the whole struct.

use crate::data::stats;

/// Depth bin width and default deepest edge, in km. Subduction-zone events
/// bottom out near 650 km; deeper catalogs extend the edge list in further
/// 50 km steps.
const DEPTH_STEP_KM: f64 = 50.0;
const DEPTH_MAX_KM: f64 = 650.0;

/// One bar: counts values in `[lo, hi)`, except the last bar which also
/// takes values equal to its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// A fully built histogram, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub x_label: &'static str,
    pub bins: Vec<Bin>,
    pub x_domain: (f64, f64),
    /// Niced upper y bound; at least 1 so an empty chart keeps its frame.
    pub y_max: f64,
    /// Mean of the values that were binned, `None` when there were none.
    pub mean: Option<f64>,
}

impl Histogram {
    /// Magnitude histogram: the domain is the niced extent of the current
    /// subset, split into roughly eleven equal bins. The domain follows the
    /// selection, so a quiet month zooms in on its own magnitude range.
    pub fn magnitudes(values: impl IntoIterator<Item = f64>, title: String) -> Self {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let domain = match stats::finite_extent(values.iter().copied()) {
            Some((lo, hi)) if lo < hi => stats::nice(lo, hi, 10.0),
            // A single distinct value still gets a visible bar.
            Some((v, _)) => stats::nice(v - 0.5, v + 0.5, 10.0),
            None => (0.0, 1.0),
        };
        let edges = tick_edges(domain.0, domain.1, 11.0);
        let bins = fill_bins(&values, &edges);
        Self::assemble(title, "Magnitude", bins, domain, &values)
    }

    /// Depth histogram: fixed 50 km bins from the surface down. Negative
    /// depths are excluded before binning, and the mean is taken over the
    /// same filtered values.
    pub fn depths(values: impl IntoIterator<Item = f64>, title: String) -> Self {
        let values: Vec<f64> = values
            .into_iter()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .collect();
        let mut deepest_edge = DEPTH_MAX_KM;
        if let Some((_, max)) = stats::finite_extent(values.iter().copied()) {
            while deepest_edge < max {
                deepest_edge += DEPTH_STEP_KM;
            }
        }
        let edge_count = (deepest_edge / DEPTH_STEP_KM).round() as usize + 1;
        let edges: Vec<f64> = (0..edge_count).map(|i| i as f64 * DEPTH_STEP_KM).collect();
        let bins = fill_bins(&values, &edges);
        Self::assemble(title, "Depth (km)", bins, (0.0, deepest_edge), &values)
    }

    fn assemble(
        title: String,
        x_label: &'static str,
        bins: Vec<Bin>,
        x_domain: (f64, f64),
        values: &[f64],
    ) -> Self {
        let tallest = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        let (_, y_max) = stats::nice(0.0, tallest.max(1) as f64, 10.0);
        Histogram {
            title,
            x_label,
            bins,
            x_domain,
            y_max,
            mean: stats::mean(values.iter().copied()),
        }
    }
}

/// Bin edges for a niced `[lo, hi]` domain: the domain endpoints plus the
/// interior ticks, so every value inside the domain lands in exactly one bin.
fn tick_edges(lo: f64, hi: f64, count: f64) -> Vec<f64> {
    let mut edges = vec![lo];
    for tick in stats::ticks(lo, hi, count) {
        if tick > lo && tick < hi {
            edges.push(tick);
        }
    }
    edges.push(hi);
    edges
}

fn fill_bins(values: &[f64], edges: &[f64]) -> Vec<Bin> {
    let mut bins: Vec<Bin> = edges
        .windows(2)
        .map(|pair| Bin {
            lo: pair[0],
            hi: pair[1],
            count: 0,
        })
        .collect();
    if bins.is_empty() {
        return bins;
    }
    let last = bins.len() - 1;
    let (domain_lo, domain_hi) = (edges[0], edges[edges.len() - 1]);
    for &value in values {
        if value < domain_lo || value > domain_hi {
            continue;
        }
        let idx = bins
            .iter()
            .position(|bin| value < bin.hi)
            .unwrap_or(last);
        bins[idx].count += 1;
    }
    bins
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn total(histogram: &Histogram) -> usize {
        histogram.bins.iter().map(|bin| bin.count).sum()
    }

    #[test]
    fn magnitude_bins_cover_the_niced_extent() {
        let histogram =
            Histogram::magnitudes([4.2, 6.1, 7.5], "Histogram of Magnitudes - 2023".into());
        // nice(4.2, 7.5) = (4.0, 7.5), ticked every 0.5.
        assert_eq!(histogram.x_domain, (4.0, 7.5));
        assert_eq!(histogram.bins.len(), 7);
        assert_eq!(histogram.bins[0].lo, 4.0);
        assert_eq!(histogram.bins[6].hi, 7.5);

        // 4.2 → [4.0, 4.5), 6.1 → [6.0, 6.5), 7.5 → closed last bin.
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[4].count, 1);
        assert_eq!(histogram.bins[6].count, 1);
        assert_eq!(total(&histogram), 3);

        let mean = histogram.mean.unwrap();
        assert!((mean - 17.8 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn magnitude_counts_sum_to_the_finite_values() {
        let values = [4.0, 4.4, 5.1, 5.1, 6.3, f64::NAN, 7.9, 8.0];
        let histogram = Histogram::magnitudes(values, String::new());
        assert_eq!(total(&histogram), 7);
    }

    #[test]
    fn single_valued_magnitudes_still_bin() {
        let histogram = Histogram::magnitudes([5.0, 5.0, 5.0], String::new());
        assert_eq!(histogram.x_domain, (4.5, 5.5));
        assert_eq!(total(&histogram), 3);
        assert_eq!(histogram.mean, Some(5.0));
    }

    #[test]
    fn empty_magnitudes_yield_an_empty_frame() {
        let histogram = Histogram::magnitudes([f64::NAN], String::new());
        assert_eq!(histogram.x_domain, (0.0, 1.0));
        assert_eq!(total(&histogram), 0);
        assert_eq!(histogram.mean, None);
        assert_eq!(histogram.y_max, 1.0);
    }

    #[test]
    fn depth_bins_are_fixed_fifty_km_steps() {
        let histogram =
            Histogram::depths([-5.0, 10.0, 60.0, 620.0], "Histogram of Depths - 2023".into());
        assert_eq!(histogram.x_domain, (0.0, 650.0));
        assert_eq!(histogram.bins.len(), 13);
        assert_eq!(histogram.bins[0], Bin { lo: 0.0, hi: 50.0, count: 1 });
        assert_eq!(histogram.bins[1].count, 1);
        assert_eq!(histogram.bins[12], Bin { lo: 600.0, hi: 650.0, count: 1 });
        // The negative depth is dropped entirely, including from the mean.
        assert_eq!(total(&histogram), 3);
        let mean = histogram.mean.unwrap();
        assert!((mean - 230.0).abs() < 1e-12);
    }

    #[test]
    fn depths_beyond_650_extend_the_edges() {
        let histogram = Histogram::depths([10.0, 700.0], String::new());
        assert_eq!(histogram.x_domain, (0.0, 700.0));
        assert_eq!(histogram.bins.len(), 14);
        assert_eq!(histogram.bins[13], Bin { lo: 650.0, hi: 700.0, count: 1 });
        assert_eq!(total(&histogram), 2);
    }

    #[test]
    fn depth_on_an_edge_goes_to_the_upper_bin() {
        let histogram = Histogram::depths([50.0], String::new());
        assert_eq!(histogram.bins[0].count, 0);
        assert_eq!(histogram.bins[1].count, 1);
        // Exactly on the deepest edge lands in the closed last bin.
        let histogram = Histogram::depths([650.0], String::new());
        assert_eq!(histogram.bins[12].count, 1);
    }

    #[test]
    fn y_max_is_niced_above_the_tallest_bar() {
        let values: Vec<f64> = std::iter::repeat(25.0).take(37).collect();
        let histogram = Histogram::depths(values, String::new());
        assert_eq!(histogram.bins[0].count, 37);
        assert_eq!(histogram.y_max, 40.0);
    }
}
