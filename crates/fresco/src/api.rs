//! Curated re-export surface.
//!
//! Prefer these re-exports for consistency across callers; the module paths
//! remain available for anything not listed here.

// Geometry kernel
pub use crate::geom::{line_line_intersection, line_poly_intersection, triangle_area, ConvexPoly};
// Generation
pub use crate::generator::{generate, generate_with_retries, GeneratorCfg, SeedToken};
// Colors
pub use crate::color::{pick_colors, ColorOption};
// Painting and navigation graph
pub use crate::adjacency::Direction;
pub use crate::painting::{
    Cell, CellId, Neighbor, PaintOutcome, Painting, PaintingCfg, PaletteId, PaletteNode,
};
// Rule tables
pub use crate::rules::{
    apply_color_blind_set, select_color_blind_set, ColorBlindSet, ColorSwap, Edgework, Indicator,
    PortType, Selection, COLOR_BLIND_SETS,
};
