//! Equal Earth projection plus the reference geometry drawn under the
//! event markers (sphere outline and graticule).
//!
//! The projection is the Šavrič-Patterson-Jenny polynomial form. It is
//! equal-area, so the density layer computed over projected coordinates
//! keeps its meaning per unit of map area.

const A1: f64 = 1.340_264;
const A2: f64 = -0.081_106;
const A3: f64 = 0.000_893;
const A4: f64 = 0.003_796;
/// sin(60°), the latitude scaling constant.
const M: f64 = 0.866_025_403_784_438_6;

/// Spacing of the graticule lines in degrees.
const GRATICULE_STEP: f64 = 10.0;
/// Sampling interval along projected lines in degrees.
const SAMPLE_STEP: f64 = 2.0;

/// Projects a lon/lat pair (degrees) onto the Equal Earth plane. Returns
/// `None` for non-finite input so NaN coordinates never reach the plot.
pub fn equal_earth(lon_deg: f64, lat_deg: f64) -> Option<[f64; 2]> {
    if !lon_deg.is_finite() || !lat_deg.is_finite() {
        return None;
    }
    let lambda = lon_deg.to_radians();
    let phi = lat_deg.to_radians();
    let theta = (M * phi.sin()).asin();
    let t2 = theta * theta;
    let t6 = t2 * t2 * t2;
    let x = lambda * theta.cos()
        / (M * (A1 + 3.0 * A2 * t2 + t6 * (7.0 * A3 + 9.0 * A4 * t2)));
    let y = theta * (A1 + A2 * t2 + t6 * (A3 + A4 * t2));
    Some([x, y])
}

/// Closed outline of the projected sphere. Equal Earth flattens each pole
/// into a line segment, so the outline walks the west edge, the north
/// polar line, the east edge, and the south polar line.
pub fn sphere_outline() -> Vec<[f64; 2]> {
    let mut outline = Vec::new();
    walk(&mut outline, [-180.0, -90.0], [-180.0, 90.0]);
    walk(&mut outline, [-180.0, 90.0], [180.0, 90.0]);
    walk(&mut outline, [180.0, 90.0], [180.0, -90.0]);
    walk(&mut outline, [180.0, -90.0], [-180.0, -90.0]);
    outline
}

/// Meridians and parallels at 10-degree spacing, projected. Parallels stop
/// at ±80° so the polar lines stay clean.
pub fn graticule() -> Vec<Vec<[f64; 2]>> {
    let mut lines = Vec::new();
    let mut lon = -180.0;
    while lon <= 180.0 {
        let mut line = Vec::new();
        walk(&mut line, [lon, -80.0], [lon, 80.0]);
        lines.push(line);
        lon += GRATICULE_STEP;
    }
    let mut lat = -80.0;
    while lat <= 80.0 {
        let mut line = Vec::new();
        walk(&mut line, [-180.0, lat], [180.0, lat]);
        lines.push(line);
        lat += GRATICULE_STEP;
    }
    lines
}

/// Projected bounding box of the full sphere, as (min, max) corners. The
/// density grid and the initial map bounds are anchored to this.
pub fn sphere_bounds() -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY, f64::INFINITY];
    let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
    for [x, y] in sphere_outline() {
        min[0] = min[0].min(x);
        min[1] = min[1].min(y);
        max[0] = max[0].max(x);
        max[1] = max[1].max(y);
    }
    (min, max)
}

/// Appends the projected lon/lat line from `from` to `to` (inclusive),
/// sampled every couple of degrees. Only axis-aligned spans are needed.
fn walk(out: &mut Vec<[f64; 2]>, from: [f64; 2], to: [f64; 2]) {
    let span_lon = to[0] - from[0];
    let span_lat = to[1] - from[1];
    let steps = (span_lon.abs().max(span_lat.abs()) / SAMPLE_STEP).ceil().max(1.0);
    let n = steps as usize;
    for i in 0..=n {
        let t = i as f64 / steps;
        if let Some(point) = equal_earth(from[0] + span_lon * t, from[1] + span_lat * t) {
            out.push(point);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn origin_maps_to_origin() {
        let [x, y] = equal_earth(0.0, 0.0).unwrap();
        assert_close(x, 0.0, 1e-12);
        assert_close(y, 0.0, 1e-12);
    }

    #[test]
    fn known_reference_points() {
        // Antimeridian on the equator: x = pi / (M * A1).
        let [x, y] = equal_earth(180.0, 0.0).unwrap();
        assert_close(x, 2.7066, 1e-3);
        assert_close(y, 0.0, 1e-12);

        // North pole height.
        let [_, y] = equal_earth(0.0, 90.0).unwrap();
        assert_close(y, 1.3174, 1e-3);
    }

    #[test]
    fn projection_is_point_symmetric() {
        let [x1, y1] = equal_earth(57.0, 33.0).unwrap();
        let [x2, y2] = equal_earth(-57.0, -33.0).unwrap();
        assert_close(x1, -x2, 1e-12);
        assert_close(y1, -y2, 1e-12);
    }

    #[test]
    fn poles_flatten_to_lines() {
        // Two longitudes at the pole must project to different x values.
        let [x1, _] = equal_earth(-120.0, 90.0).unwrap();
        let [x2, _] = equal_earth(120.0, 90.0).unwrap();
        assert!(x1 < 0.0 && x2 > 0.0);
    }

    #[test]
    fn nan_input_is_rejected() {
        assert!(equal_earth(f64::NAN, 10.0).is_none());
        assert!(equal_earth(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn sphere_outline_is_closed() {
        let outline = sphere_outline();
        assert!(outline.len() > 100);
        let first = outline.first().unwrap();
        let last = outline.last().unwrap();
        assert_close(first[0], last[0], 1e-9);
        assert_close(first[1], last[1], 1e-9);
    }

    #[test]
    fn sphere_bounds_contain_every_projected_point() {
        let (min, max) = sphere_bounds();
        assert!(min[0] < 0.0 && max[0] > 0.0);
        assert!(min[1] < 0.0 && max[1] > 0.0);
        for lon in [-180.0, -90.0, 0.0, 90.0, 180.0] {
            for lat in [-90.0, -45.0, 0.0, 45.0, 90.0] {
                let [x, y] = equal_earth(lon, lat).unwrap();
                assert!(x >= min[0] - 1e-9 && x <= max[0] + 1e-9);
                assert!(y >= min[1] - 1e-9 && y <= max[1] + 1e-9);
            }
        }
    }

    #[test]
    fn graticule_covers_the_globe() {
        let lines = graticule();
        // 37 meridians plus 17 parallels.
        assert_eq!(lines.len(), 54);
        assert!(lines.iter().all(|line| line.len() > 10));
    }
}
