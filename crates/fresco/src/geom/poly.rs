use nalgebra::Vector2;
use rand::Rng;

use super::intersect::{line_line_intersection, triangle_area, EPS};
use crate::error::Error;

#[inline]
fn lerp(a: Vector2<f64>, b: Vector2<f64>, t: f64) -> Vector2<f64> {
    a + (b - a) * t
}

/// Mutable ordered ring of vertices representing one convex cell.
///
/// Invariants:
/// - At least 3 vertices, wound clockwise from the top-left (see module doc).
/// - The point list is only ever replaced wholesale; replacement recomputes
///   the cached area. There are no partial vertex edits.
#[derive(Clone, Debug)]
pub struct ConvexPoly {
    points: Vec<Vector2<f64>>,
    area: f64,
}

impl ConvexPoly {
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        debug_assert!(points.len() >= 3, "polygon needs at least 3 vertices");
        let area = fan_area(&points);
        Self { points, area }
    }

    /// Axis-aligned rectangle covering a canvas of the given full size,
    /// centered on the origin, clockwise from the top-left corner.
    pub fn canvas(size: Vector2<f64>) -> Self {
        let (hx, hy) = (size.x * 0.5, size.y * 0.5);
        Self::new(vec![
            Vector2::new(-hx, hy),
            Vector2::new(hx, hy),
            Vector2::new(hx, -hy),
            Vector2::new(-hx, -hy),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    /// Replace the whole vertex ring; the cached area is recomputed.
    pub fn set_points(&mut self, points: Vec<Vector2<f64>>) {
        debug_assert!(points.len() >= 3, "polygon needs at least 3 vertices");
        self.area = fan_area(&points);
        self.points = points;
    }

    /// Polygon area (magnitude of the fan-triangulated signed sum).
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Length of the shortest boundary edge.
    pub fn shortest_edge(&self) -> f64 {
        let n = self.points.len();
        let mut shortest = f64::INFINITY;
        for i in 0..n {
            shortest = shortest.min((self.points[(i + 1) % n] - self.points[i]).norm());
        }
        shortest
    }

    /// Arithmetic mean of the vertices (not the area centroid); used as the
    /// ray origin for adjacency tests.
    pub fn centroid(&self) -> Vector2<f64> {
        let sum = self
            .points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p);
        sum / self.points.len() as f64
    }

    /// Split along a chord between interpolated points on two distinct edges.
    ///
    /// `new_a = lerp(p[edge_a], p[edge_a + 1], delta_a)` and likewise for
    /// `edge_b`. The left polygon keeps the ring's head and tail around the
    /// chord, the right polygon takes the span between the two edges:
    ///
    /// - left:  `[0..=edge_a] + new_a + new_b + [edge_b+1..]`
    /// - right: `new_a + [edge_a+1..=edge_b] + new_b`
    ///
    /// Requires `edge_a < edge_b < n`. Children with fewer than 3 vertices
    /// are not rejected here; the generator's constraints take care of that.
    pub fn split(
        &self,
        edge_a: usize,
        delta_a: f64,
        edge_b: usize,
        delta_b: f64,
    ) -> Result<(ConvexPoly, ConvexPoly), Error> {
        let n = self.points.len();
        if edge_a >= edge_b || edge_b >= n {
            return Err(Error::DegenerateGeometry(
                "split edges must be distinct and in range",
            ));
        }
        let new_a = lerp(self.points[edge_a], self.points[(edge_a + 1) % n], delta_a);
        let new_b = lerp(self.points[edge_b], self.points[(edge_b + 1) % n], delta_b);

        let mut left = Vec::with_capacity(n - (edge_b - edge_a) + 2);
        left.extend_from_slice(&self.points[..=edge_a]);
        left.push(new_a);
        left.push(new_b);
        left.extend_from_slice(&self.points[edge_b + 1..]);

        let mut right = Vec::with_capacity(edge_b - edge_a + 2);
        right.push(new_a);
        right.extend_from_slice(&self.points[edge_a + 1..=edge_b]);
        right.push(new_b);

        Ok((ConvexPoly::new(left), ConvexPoly::new(right)))
    }

    /// Split along a randomly chosen pair of edges.
    ///
    /// `edge_a` is uniform in `[0, n)`. Square mode forces the opposite-ish
    /// edge `(edge_a + 2) % n` (roughly rectangular children when n = 4);
    /// otherwise `edge_b = (edge_a + uniform(1, n)) % n`. Indices are swapped
    /// so that `edge_a < edge_b` before splitting.
    pub fn random_split<R: Rng>(
        &self,
        square: bool,
        delta_a: f64,
        delta_b: f64,
        rng: &mut R,
    ) -> Result<(ConvexPoly, ConvexPoly), Error> {
        let n = self.points.len();
        let mut edge_a = rng.gen_range(0..n);
        let mut edge_b = if square {
            (edge_a + 2) % n
        } else {
            (edge_a + rng.gen_range(1..n)) % n
        };
        if edge_b < edge_a {
            std::mem::swap(&mut edge_a, &mut edge_b);
        }
        self.split(edge_a, delta_a, edge_b, delta_b)
    }

    /// Offset the outline inward by a fixed distance.
    ///
    /// For each vertex, both adjacent edges are shifted along their
    /// normalized right-hand normals (inward for the clockwise winding) and
    /// the offset lines intersected to produce the new vertex. A zero-length
    /// edge or parallel adjacent edges is `DegenerateGeometry`.
    pub fn inset(&self, distance: f64) -> Result<ConvexPoly, Error> {
        let n = self.points.len();
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.points[(i + n - 1) % n];
            let cur = self.points[i];
            let next = self.points[(i + 1) % n];

            let pre = cur - prev;
            let post = next - cur;
            let pre_offset = right_normal(pre)? * distance;
            let post_offset = right_normal(post)? * distance;

            let vertex =
                line_line_intersection(prev + pre_offset, pre, cur + post_offset, post)
                    .ok_or(Error::DegenerateGeometry("adjacent inset edges are parallel"))?;
            out.push(vertex);
        }
        Ok(ConvexPoly::new(out))
    }
}

/// Fan-triangulated area from vertex 0, returned as a magnitude. The ring is
/// clockwise, so the raw signed sum is negative.
fn fan_area(points: &[Vector2<f64>]) -> f64 {
    let mut area = 0.0;
    for i in 2..points.len() {
        area += triangle_area(points[0], points[i - 1], points[i]);
    }
    area.abs()
}

/// Unit normal 90° clockwise of `v`: `(y, -x) / |v|`.
fn right_normal(v: Vector2<f64>) -> Result<Vector2<f64>, Error> {
    let len = v.norm();
    if len < EPS {
        return Err(Error::DegenerateGeometry("zero-length edge"));
    }
    Ok(Vector2::new(v.y, -v.x) / len)
}
