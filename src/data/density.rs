//! Kernel density estimation for the seismicity heat layer.
//!
//! Events are binned onto a coarse grid over the projected map plane,
//! then smoothed with three box blurs per axis. Three iterated box blurs
//! approximate a Gaussian kernel of the configured bandwidth, which is
//! how d3-contour computes its density fields. The result is rendered as
//! a texture rather than as contour polygons.

/// A smoothed event-density field over the projected map plane.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    pub cols: usize,
    pub rows: usize,
    /// Grid origin in plot coordinates (min x, min y).
    pub origin: [f64; 2],
    /// Edge length of one square cell in plot coordinates.
    pub cell_size: f64,
    /// Row-major values, row 0 at the origin.
    pub values: Vec<f64>,
    pub max_value: f64,
}

impl DensityGrid {
    /// Accumulate `points` over `bounds` and smooth with a kernel of
    /// `bandwidth` (in plot units). `cols` fixes the horizontal resolution;
    /// rows follow from the aspect ratio. Non-finite and out-of-bounds
    /// points are skipped.
    pub fn compute(
        points: impl IntoIterator<Item = [f64; 2]>,
        bounds: ([f64; 2], [f64; 2]),
        cols: usize,
        bandwidth: f64,
    ) -> Self {
        let (min, max) = bounds;
        let cols = cols.max(1);
        let width = (max[0] - min[0]).max(f64::EPSILON);
        let height = (max[1] - min[1]).max(f64::EPSILON);
        let cell_size = width / cols as f64;
        let rows = ((height / cell_size).ceil() as usize).max(1);

        let mut values = vec![0.0; cols * rows];
        for [x, y] in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let col = (x - min[0]) / cell_size;
            let row = (y - min[1]) / cell_size;
            if col < 0.0 || row < 0.0 {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            if col < cols && row < rows {
                values[row * cols + col] += 1.0;
            }
        }

        let radius = ((bandwidth / cell_size).round() as usize).max(1);
        for _ in 0..3 {
            blur_rows(&mut values, cols, rows, radius);
        }
        for _ in 0..3 {
            blur_cols(&mut values, cols, rows, radius);
        }

        let max_value = values.iter().copied().fold(0.0f64, f64::max);
        DensityGrid {
            cols,
            rows,
            origin: min,
            cell_size,
            values,
            max_value,
        }
    }

    pub fn value_at(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Full extent of the grid in plot coordinates.
    pub fn extent(&self) -> ([f64; 2], [f64; 2]) {
        (
            self.origin,
            [
                self.origin[0] + self.cols as f64 * self.cell_size,
                self.origin[1] + self.rows as f64 * self.cell_size,
            ],
        )
    }
}

/// One box-blur pass along each row. The divisor stays constant at the
/// edges (cells outside the grid count as zero), so interior mass is
/// conserved exactly.
fn blur_rows(values: &mut [f64], cols: usize, rows: usize, radius: usize) {
    let norm = 1.0 / (2 * radius + 1) as f64;
    let mut line = vec![0.0; cols];
    for row in 0..rows {
        let offset = row * cols;
        line.copy_from_slice(&values[offset..offset + cols]);
        for col in 0..cols {
            let lo = col.saturating_sub(radius);
            let hi = (col + radius + 1).min(cols);
            let sum: f64 = line[lo..hi].iter().sum();
            values[offset + col] = sum * norm;
        }
    }
}

/// One box-blur pass along each column.
fn blur_cols(values: &mut [f64], cols: usize, rows: usize, radius: usize) {
    let norm = 1.0 / (2 * radius + 1) as f64;
    let mut line = vec![0.0; rows];
    for col in 0..cols {
        for row in 0..rows {
            line[row] = values[row * cols + col];
        }
        for row in 0..rows {
            let lo = row.saturating_sub(radius);
            let hi = (row + radius + 1).min(rows);
            let sum: f64 = line[lo..hi].iter().sum();
            values[row * cols + col] = sum * norm;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ([f64; 2], [f64; 2]) = ([0.0, 0.0], [10.0, 10.0]);

    #[test]
    fn empty_input_is_all_zero() {
        let grid = DensityGrid::compute(std::iter::empty(), BOUNDS, 20, 1.0);
        assert_eq!(grid.cols, 20);
        assert_eq!(grid.rows, 20);
        assert_eq!(grid.max_value, 0.0);
        assert!(grid.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn interior_impulse_conserves_mass() {
        let grid = DensityGrid::compute([[5.0, 5.0]], BOUNDS, 21, 0.5);
        let total: f64 = grid.values.iter().sum();
        assert!(
            (total - 1.0).abs() < 1e-9,
            "blur should conserve interior mass, got {total}"
        );
    }

    #[test]
    fn impulse_peaks_at_its_own_cell() {
        let grid = DensityGrid::compute([[5.2, 5.2]], BOUNDS, 21, 0.5);
        let (mut peak_col, mut peak_row, mut peak) = (0, 0, 0.0);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                if grid.value_at(col, row) > peak {
                    peak = grid.value_at(col, row);
                    peak_col = col;
                    peak_row = row;
                }
            }
        }
        // 5.2 / (10/21) lands in cell 10.
        assert_eq!((peak_col, peak_row), (10, 10));
        assert!(peak > 0.0);
    }

    #[test]
    fn blur_is_symmetric_around_the_impulse() {
        // Cell size is exactly 0.5 here, so the impulse lands in cell (10, 10).
        let grid = DensityGrid::compute([[5.0, 5.0]], BOUNDS, 20, 1.0);
        let (col, row) = (10, 10);
        for offset in 1..4 {
            let left = grid.value_at(col - offset, row);
            let right = grid.value_at(col + offset, row);
            assert!((left - right).abs() < 1e-12);
            let below = grid.value_at(col, row - offset);
            let above = grid.value_at(col, row + offset);
            assert!((below - above).abs() < 1e-12);
        }
    }

    #[test]
    fn out_of_bounds_and_nan_points_are_skipped() {
        let points = [
            [f64::NAN, 5.0],
            [5.0, f64::INFINITY],
            [-1.0, 5.0],
            [5.0, 11.0],
        ];
        let grid = DensityGrid::compute(points, BOUNDS, 20, 1.0);
        assert_eq!(grid.max_value, 0.0);
    }

    #[test]
    fn two_impulses_double_the_mass() {
        let grid = DensityGrid::compute([[3.0, 3.0], [7.0, 7.0]], BOUNDS, 21, 0.5);
        let total: f64 = grid.values.iter().sum();
        assert!((total - 2.0).abs() < 1e-9);
    }

    #[test]
    fn extent_covers_the_bounds() {
        let grid = DensityGrid::compute(std::iter::empty(), BOUNDS, 20, 1.0);
        let (lo, hi) = grid.extent();
        assert_eq!(lo, [0.0, 0.0]);
        assert!(hi[0] >= 10.0 && hi[1] >= 10.0);
    }
}
