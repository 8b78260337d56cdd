use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Scattered samples and the regular query grid
// ---------------------------------------------------------------------------

/// One scattered sample: two independent coordinates and a dependent value
/// (here a population fraction, but nothing in the resampler assumes [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Rectangular mesh of query coordinates, the outer product of two axis
/// vectors.  Nodes may lie outside the convex hull of the scattered input;
/// those resolve to `None` rather than an extrapolated number.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl RegularGrid {
    pub fn from_axes(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        RegularGrid { xs, ys }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of nodes along x.
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of nodes along y.
    pub fn height(&self) -> usize {
        self.ys.len()
    }
}

/// `count` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| start + (stop - start) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Interpolated values on a [`RegularGrid`], row-major over y then x.
/// `None` marks a node outside the convex hull of the scattered input —
/// explicitly undefined, never a silent zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GridValues {
    width: usize,
    values: Vec<Option<f64>>,
}

impl GridValues {
    /// Value at grid node (`ix` along x, `iy` along y).
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        self.values[iy * self.width + ix]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    /// Row-major backing slice.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Triangulation-based linear interpolation
// ---------------------------------------------------------------------------

/// Acceptance slack for barycentric coordinates, so hull edges and the
/// sample points themselves evaluate instead of falling into the gap
/// between adjacent triangles.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Reconstruct a value on every node of `grid` from scattered `samples` by
/// Delaunay triangulation and barycentric linear evaluation.
///
/// Properties:
/// * deterministic — identical inputs give bit-identical output, there is
///   no randomized component;
/// * a query at a sample's own coordinate reproduces that sample's value
///   (up to floating-point round-off);
/// * nodes outside the convex hull resolve to `None`;
/// * values are passed through unclamped — out-of-[0, 1] results near
///   sparse regions are the rendering layer's concern.
///
/// Exact duplicate coordinates keep their first value.  Fewer than 3
/// distinct points, or an all-collinear cloud, cannot define a surface and
/// is a fatal [`AnalysisError::DegenerateScatterInput`].
pub fn interpolate(
    samples: &[ScatterSample],
    grid: &RegularGrid,
) -> Result<GridValues, AnalysisError> {
    // Exact-duplicate coordinates would break the triangulation; first wins.
    let mut points: Vec<ScatterSample> = Vec::with_capacity(samples.len());
    for s in samples {
        if !points.iter().any(|p| p.x == s.x && p.y == s.y) {
            points.push(*s);
        }
    }

    if points.len() < 3 {
        return Err(AnalysisError::DegenerateScatterInput {
            points: points.len(),
            reason: "fewer than 3 distinct points",
        });
    }
    if !has_noncollinear_triple(&points) {
        return Err(AnalysisError::DegenerateScatterInput {
            points: points.len(),
            reason: "all points are collinear",
        });
    }

    let triangles = delaunay(&points);

    let mut values = Vec::with_capacity(grid.width() * grid.height());
    for &qy in grid.ys() {
        for &qx in grid.xs() {
            values.push(evaluate(&points, &triangles, qx, qy));
        }
    }

    Ok(GridValues {
        width: grid.width(),
        values,
    })
}

fn has_noncollinear_triple(points: &[ScatterSample]) -> bool {
    let a = points[0];
    let b = match points.iter().find(|p| p.x != a.x || p.y != a.y) {
        Some(p) => *p,
        None => return false,
    };
    let extent = points.iter().fold(0.0_f64, |acc, p| {
        acc.max((p.x - a.x).abs()).max((p.y - a.y).abs())
    });
    let threshold = 1e-12 * (1.0 + extent * extent);
    points
        .iter()
        .any(|p| ((b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)).abs() > threshold)
}

/// Evaluate one query point: first triangle whose barycentric coordinates
/// are all non-negative (within tolerance) wins.  Adjacent triangles agree
/// on shared edges, so the choice does not affect the value.
fn evaluate(points: &[ScatterSample], triangles: &[[usize; 3]], qx: f64, qy: f64) -> Option<f64> {
    for t in triangles {
        let (a, b, c) = (points[t[0]], points[t[1]], points[t[2]]);
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det == 0.0 {
            continue;
        }
        let l1 = ((b.y - c.y) * (qx - c.x) + (c.x - b.x) * (qy - c.y)) / det;
        let l2 = ((c.y - a.y) * (qx - c.x) + (a.x - c.x) * (qy - c.y)) / det;
        let l3 = 1.0 - l1 - l2;
        if l1 >= -EDGE_TOLERANCE && l2 >= -EDGE_TOLERANCE && l3 >= -EDGE_TOLERANCE {
            return Some(l1 * a.value + l2 * b.value + l3 * c.value);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Bowyer–Watson Delaunay triangulation
// ---------------------------------------------------------------------------

/// Triangulate the point cloud; returned triples index into `points`.
///
/// Incremental insertion into a super-triangle enclosing the whole cloud.
/// Insertion order is the input order, so the result is deterministic.
fn delaunay(points: &[ScatterSample]) -> Vec<[usize; 3]> {
    let n = points.len();

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let span = (max_x - min_x).max(max_y - min_y).max(1.0);
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;

    // Super-triangle vertices, far outside the data (virtual indices n..n+2).
    let sup = [
        (cx - 20.0 * span, cy - span),
        (cx + 20.0 * span, cy - span),
        (cx, cy + 20.0 * span),
    ];
    let coord = |i: usize| -> (f64, f64) {
        if i < n {
            (points[i].x, points[i].y)
        } else {
            sup[i - n]
        }
    };

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for p in 0..n {
        let (px, py) = coord(p);

        // Triangles whose circumcircle contains the new point.
        let mut bad: Vec<usize> = Vec::new();
        for (ti, t) in triangles.iter().enumerate() {
            if in_circumcircle(coord(t[0]), coord(t[1]), coord(t[2]), (px, py)) {
                bad.push(ti);
            }
        }

        // Boundary of the cavity: edges owned by exactly one bad triangle.
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for &ti in &bad {
            let t = triangles[ti];
            for (u, v) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                let key = (u.min(v), u.max(v));
                if let Some(pos) = boundary.iter().position(|&k| k == key) {
                    boundary.remove(pos);
                } else {
                    boundary.push(key);
                }
            }
        }

        for ti in bad.into_iter().rev() {
            triangles.swap_remove(ti);
        }
        for (u, v) in boundary {
            triangles.push([u, v, p]);
        }
    }

    // Drop everything still attached to the super-triangle.
    triangles.retain(|t| t.iter().all(|&v| v < n));
    triangles
}

/// Whether `p` lies strictly inside the circumcircle of triangle `(a, b, c)`.
fn in_circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64), p: (f64, f64)) -> bool {
    let (ax, ay) = (a.0 - p.0, a.1 - p.1);
    let (bx, by) = (b.0 - p.0, b.1 - p.1);
    let (cx, cy) = (c.0 - p.0, c.1 - p.1);

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    // The in-circle determinant's sign depends on the triangle's winding.
    let orientation = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
    if orientation > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64, y: f64, value: f64) -> ScatterSample {
        ScatterSample { x, y, value }
    }

    fn plane(x: f64, y: f64) -> f64 {
        2.0 * x + 3.0 * y + 1.0
    }

    fn plane_samples() -> Vec<ScatterSample> {
        [
            (0.0, 0.0),
            (4.0, 0.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (2.0, 1.0),
            (1.0, 3.0),
        ]
        .into_iter()
        .map(|(x, y)| s(x, y, plane(x, y)))
        .collect()
    }

    #[test]
    fn linear_interpolation_is_exact_on_a_plane() {
        let grid = RegularGrid::from_axes(linspace(0.0, 4.0, 9), linspace(0.0, 4.0, 9));
        let values = interpolate(&plane_samples(), &grid).unwrap();
        for (iy, &y) in grid.ys().iter().enumerate() {
            for (ix, &x) in grid.xs().iter().enumerate() {
                let got = values.get(ix, iy).expect("grid node inside the hull");
                assert!(
                    (got - plane(x, y)).abs() < 1e-9,
                    "node ({x}, {y}): got {got}, want {}",
                    plane(x, y)
                );
            }
        }
    }

    #[test]
    fn sample_coordinates_reproduce_their_own_values() {
        let samples = vec![
            s(0.0, 0.0, 0.1),
            s(3.0, 0.0, 0.9),
            s(0.0, 3.0, 0.4),
            s(3.0, 3.0, 0.6),
        ];
        let grid = RegularGrid::from_axes(vec![0.0, 3.0], vec![0.0, 3.0]);
        let values = interpolate(&samples, &grid).unwrap();
        assert!((values.get(0, 0).unwrap() - 0.1).abs() < 1e-12);
        assert!((values.get(1, 0).unwrap() - 0.9).abs() < 1e-12);
        assert!((values.get(0, 1).unwrap() - 0.4).abs() < 1e-12);
        assert!((values.get(1, 1).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn nodes_outside_the_hull_are_undefined_not_zero() {
        let samples = vec![
            s(0.0, 0.0, 0.2),
            s(1.0, 0.0, 0.2),
            s(0.0, 1.0, 0.2),
            s(1.0, 1.0, 0.2),
        ];
        let grid = RegularGrid::from_axes(vec![0.5, 5.0], vec![0.5, 5.0]);
        let values = interpolate(&samples, &grid).unwrap();
        assert!(values.get(0, 0).is_some());
        assert_eq!(values.get(1, 0), None);
        assert_eq!(values.get(0, 1), None);
        assert_eq!(values.get(1, 1), None);
    }

    #[test]
    fn interpolation_is_deterministic() {
        let samples = plane_samples();
        let grid = RegularGrid::from_axes(linspace(0.0, 4.0, 7), linspace(0.0, 4.0, 5));
        let a = interpolate(&samples, &grid).unwrap();
        let b = interpolate(&samples, &grid).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fewer_than_three_points_is_fatal() {
        let grid = RegularGrid::from_axes(vec![0.0], vec![0.0]);
        let err = interpolate(&[s(0.0, 0.0, 1.0), s(1.0, 1.0, 2.0)], &grid).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateScatterInput { points: 2, .. }
        ));
    }

    #[test]
    fn duplicate_points_do_not_fake_a_surface() {
        let grid = RegularGrid::from_axes(vec![0.0], vec![0.0]);
        let samples = vec![s(0.0, 0.0, 1.0), s(0.0, 0.0, 1.0), s(1.0, 1.0, 2.0)];
        let err = interpolate(&samples, &grid).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateScatterInput { points: 2, .. }
        ));
    }

    #[test]
    fn collinear_points_are_fatal() {
        let grid = RegularGrid::from_axes(vec![0.0], vec![0.0]);
        let samples = vec![
            s(0.0, 0.0, 1.0),
            s(1.0, 1.0, 2.0),
            s(2.0, 2.0, 3.0),
            s(3.0, 3.0, 4.0),
        ];
        let err = interpolate(&samples, &grid).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateScatterInput { points: 4, .. }
        ));
    }

    #[test]
    fn out_of_range_values_pass_through_unclamped() {
        // fractions slightly above 1 must not be clamped by the resampler
        let samples = vec![
            s(0.0, 0.0, 1.2),
            s(2.0, 0.0, 1.2),
            s(1.0, 2.0, 1.2),
        ];
        let grid = RegularGrid::from_axes(vec![1.0], vec![0.5]);
        let values = interpolate(&samples, &grid).unwrap();
        assert!((values.get(0, 0).unwrap() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn linspace_endpoints_are_inclusive() {
        let v = linspace(1.0, 3.0, 5);
        assert_eq!(v, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
        assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
