//! 2D geometry kernel for canvas partitioning.
//!
//! Purpose
//! - Ray/line intersection primitives and the vertex-ring convex polygon
//!   (`ConvexPoly`) that the generator splits and the adjacency builder ray
//!   tests against.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`.
//! - Polygon vertices are wound clockwise starting from the top-left corner;
//!   edge `i` connects vertex `i` to vertex `(i + 1) % n`. Split semantics
//!   depend on this winding. Convexity is assumed, not validated: every
//!   polygon here is produced by splitting a convex polygon.

mod intersect;
mod poly;

pub use intersect::{line_line_intersection, line_poly_intersection, triangle_area};
pub use poly::ConvexPoly;
