use nalgebra::Vector2;

/// Numerical tolerance for parallelism predicates.
pub(crate) const EPS: f64 = 1e-9;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed triangle area via the cross product of the two edge vectors, ×0.5.
///
/// Positive for a→b→c counterclockwise, negative for clockwise. Summed over a
/// fan from vertex 0 this gives the signed polygon area.
#[inline]
pub fn triangle_area(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    0.5 * cross(b - a, c - a)
}

/// Intersection of two infinite lines in parametric form.
///
/// Returns `None` when the directions are parallel (determinant ≈ 0).
pub fn line_line_intersection(
    origin_a: Vector2<f64>,
    dir_a: Vector2<f64>,
    origin_b: Vector2<f64>,
    dir_b: Vector2<f64>,
) -> Option<Vector2<f64>> {
    let det = cross(dir_a, dir_b);
    if det.abs() < EPS {
        return None;
    }
    let t = cross(origin_b - origin_a, dir_b) / det;
    Some(origin_a + dir_a * t)
}

/// Nearest forward intersection of a ray with a polygon boundary.
///
/// Each polygon edge is treated as a finite segment against the infinite
/// forward ray (`t >= 0`, `s ∈ [0, 1]`). Among all hits the one nearest to
/// `origin` along the ray wins; exact ties keep the first edge in traversal
/// order. For a convex polygon at most one forward crossing is expected per
/// side, but degenerate or incident inputs only ever yield some valid hit,
/// never a panic.
pub fn line_poly_intersection(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    points: &[Vector2<f64>],
) -> Option<Vector2<f64>> {
    let n = points.len();
    let mut best: Option<(f64, Vector2<f64>)> = None;
    for i in 0..n {
        let p = points[i];
        let edge = points[(i + 1) % n] - p;
        let det = cross(dir, edge);
        if det.abs() < EPS {
            continue;
        }
        let diff = p - origin;
        let t = cross(diff, edge) / det;
        let s = cross(diff, dir) / det;
        if t < 0.0 || !(0.0..=1.0).contains(&s) {
            continue;
        }
        if best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, origin + dir * t));
        }
    }
    best.map(|(_, hit)| hit)
}
