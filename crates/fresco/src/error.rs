//! Crate error taxonomy.
//!
//! Both variants are local and recoverable: `GenerationExhausted` by retrying
//! the whole generation with a fresh budget, `DegenerateGeometry` by fixing
//! the caller-supplied geometry. There is no fatal class in the core; retry
//! ceilings are caller policy.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The split attempt budget ran out before reaching the target cell
    /// count. Never partial: the caller retries from scratch.
    #[error("attempt budget exhausted before reaching the target cell count")]
    GenerationExhausted,

    /// Zero-length edge or parallel-line intersection failure during inset or
    /// split. A defect in the input geometry, surfaced rather than tolerated.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}
