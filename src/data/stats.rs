//! Numeric helpers shared by the charts: tick generation, axis nicing,
//! extents, and means. All of them skip non-finite values, and tick
//! boundaries always land on a power of ten times 1, 2, or 5 so the
//! histograms bin on round numbers.

const E10: f64 = 7.071_067_811_865_476;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = 1.414_213_562_373_095_1;

/// Tick parameters for `[start, stop]` split into roughly `count` steps:
/// first and last tick index plus the increment. Increments below one are
/// returned as a negative denominator so callers can divide instead of
/// multiplying by an inexact reciprocal.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let denom = 10f64.powf(-power) / factor;
        i1 = (start * denom).round();
        i2 = (stop * denom).round();
        if i1 / denom < start {
            i1 += 1.0;
        }
        if i2 / denom > stop {
            i2 -= 1.0;
        }
        inc = -denom;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// The rounded step size `[start, stop]` would be ticked at.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

/// Round values covering `[start, stop]`, ordered from `start` towards
/// `stop`. Degenerate ranges produce a single tick.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if i2 < i1 || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let idx = if reverse { i2 - i as f64 } else { i1 + i as f64 };
        out.push(if inc < 0.0 { idx / -inc } else { idx * inc });
    }
    out
}

/// Expands `[start, stop]` outward to round tick boundaries, the way the
/// chart axes do before binning.
pub fn nice(start: f64, stop: f64, count: f64) -> (f64, f64) {
    let (mut lo, mut hi) = (start, stop);
    let swapped = hi < lo;
    if swapped {
        std::mem::swap(&mut lo, &mut hi);
    }
    let mut prestep = f64::NAN;
    // Converges almost always on the second pass; ten is the safety cap.
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if step == prestep {
            break;
        } else if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        prestep = step;
    }
    if swapped {
        (hi, lo)
    } else {
        (lo, hi)
    }
}

/// Minimum and maximum of the finite values, or `None` when there are none.
pub fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;
    for value in values {
        if !value.is_finite() {
            continue;
        }
        extent = Some(match extent {
            None => (value, value),
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
        });
    }
    extent
}

/// Arithmetic mean of the finite values, or `None` when there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for value in values {
        if value.is_finite() {
            sum += value;
            n += 1;
        }
    }
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ticks_unit_interval() {
        let t = ticks(0.0, 1.0, 10.0);
        assert_eq!(t.len(), 11);
        for (i, value) in t.iter().enumerate() {
            assert_close(*value, i as f64 / 10.0);
        }
    }

    #[test]
    fn ticks_integer_steps() {
        assert_eq!(ticks(0.0, 620.0, 10.0), vec![
            0.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0,
            600.0
        ]);
    }

    #[test]
    fn ticks_handles_reversed_and_degenerate_ranges() {
        let forward = ticks(0.0, 1.0, 10.0);
        let mut backward = ticks(1.0, 0.0, 10.0);
        backward.reverse();
        assert_eq!(forward, backward);

        assert_eq!(ticks(3.5, 3.5, 10.0), vec![3.5]);
        assert!(ticks(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn tick_increment_snaps_to_round_steps() {
        assert_close(tick_increment(0.0, 620.0, 10.0), 50.0);
        assert_close(tick_increment(0.0, 100.0, 10.0), 10.0);
        // Sub-unit steps come back as negative denominators.
        assert_close(tick_increment(0.0, 1.0, 10.0), -10.0);
        assert_close(tick_increment(4.0, 7.5, 11.0), -2.0);
    }

    #[test]
    fn nice_expands_to_round_bounds() {
        assert_eq!(nice(0.13, 0.87, 10.0), (0.1, 0.9));
        assert_eq!(nice(0.0, 620.0, 10.0), (0.0, 650.0));
        assert_eq!(nice(4.2, 7.5, 10.0), (4.0, 7.5));
        // Already-nice bounds are left alone.
        assert_eq!(nice(0.0, 100.0, 10.0), (0.0, 100.0));
    }

    #[test]
    fn finite_extent_skips_nan() {
        assert_eq!(finite_extent([1.0, f64::NAN, -2.0, 5.0]), Some((-2.0, 5.0)));
        assert_eq!(finite_extent([f64::NAN, f64::INFINITY]), None);
        assert_eq!(finite_extent([]), None);
    }

    #[test]
    fn mean_skips_nan() {
        assert_close(mean([2.0, 4.0, f64::NAN]).unwrap(), 3.0);
        assert!(mean([f64::NAN]).is_none());
        assert!(mean([]).is_none());
    }
}
