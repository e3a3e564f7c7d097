//! Procedural painting core.
//!
//! Purpose
//! - Partition a square canvas into convex polygonal cells by recursive random
//!   splitting with rejection constraints, assign colors under a bounded
//!   repetition cap, and link cells (plus palette nodes) into a 4-way
//!   directional navigation graph.
//! - Derive each cell's required final color from environmental edgework via a
//!   fixed, deterministic rule table.
//!
//! The crate is single-threaded by design: one painting generation is an
//! independent computation producing a fresh cell set, consumable as an
//! immutable snapshot (mutation happens only through `Painting::paint`).

pub mod adjacency;
pub mod api;
pub mod color;
pub mod error;
pub mod generator;
pub mod geom;
pub mod painting;
pub mod rules;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::adjacency::Direction;
    pub use crate::color::{pick_colors, ColorOption};
    pub use crate::error::Error;
    pub use crate::generator::{generate, generate_with_retries, GeneratorCfg, SeedToken};
    pub use crate::geom::ConvexPoly;
    pub use crate::painting::{
        Cell, CellId, Neighbor, PaintOutcome, Painting, PaintingCfg, PaletteId, PaletteNode,
    };
    pub use crate::rules::{
        select_color_blind_set, ColorBlindSet, Edgework, Indicator, PortType, Selection,
        COLOR_BLIND_SETS,
    };
    pub use nalgebra::Vector2 as Vec2;
}
