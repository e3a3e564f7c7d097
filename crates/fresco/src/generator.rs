//! Painting generator: recursive random convex splitting under rejection
//! constraints.
//!
//! Model
//! - Start from the canvas rectangle. Repeatedly take the largest polygon and
//!   retry random splits of it until a candidate pair satisfies the area and
//!   edge-length minimums; every rejection burns one unit of a shared attempt
//!   budget. Exhausting the budget fails the whole generation; there is no
//!   partial result to resume from.
//! - Determinism uses a `SeedToken` `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::geom::ConvexPoly;

/// Generation parameters. Defaults match a unit canvas split into 8 cells
/// with no rejection constraints and a budget of 100 attempts.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorCfg {
    /// Full canvas size; the root polygon spans ±size/2 around the origin.
    pub canvas: Vector2<f64>,
    /// Target number of cells.
    pub cell_count: usize,
    /// Force opposite-edge splits with mirrored deltas (roughly rectangular
    /// children).
    pub square: bool,
    /// Both children of an accepted split must have at least this area.
    pub min_area: f64,
    /// Both children must have no edge shorter than this.
    pub min_edge: f64,
    /// Bounds for the split interpolation fractions, within [0, 1].
    pub delta_min: f64,
    pub delta_max: f64,
    /// Shared rejection budget for one generation.
    pub attempts: u32,
}

impl Default for GeneratorCfg {
    fn default() -> Self {
        Self {
            canvas: Vector2::new(1.0, 1.0),
            cell_count: 8,
            square: false,
            min_area: 0.0,
            min_edge: 0.0,
            delta_min: 0.0,
            delta_max: 1.0,
            attempts: 100,
        }
    }
}

/// Token to make generations reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedToken {
    pub seed: u64,
    pub index: u64,
}

impl SeedToken {
    /// SplitMix64-style mixing, cheap and stable.
    pub fn rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Partition the canvas into `cfg.cell_count` convex polygons.
///
/// Returns `GenerationExhausted` when the attempt budget runs out first; the
/// caller retries from scratch with a fresh budget (see
/// [`generate_with_retries`]). With `cell_count <= 1` the canvas rectangle is
/// returned unchanged.
pub fn generate<R: Rng>(cfg: &GeneratorCfg, rng: &mut R) -> Result<Vec<ConvexPoly>, Error> {
    let mut polys = vec![ConvexPoly::canvas(cfg.canvas)];
    let mut budget = cfg.attempts;

    while budget > 0 && polys.len() < cfg.cell_count {
        // Largest area first; ties keep the earliest polygon in list order.
        let target = largest_area_index(&polys);

        while budget > 0 {
            let delta_a = rng.gen_range(cfg.delta_min..=cfg.delta_max);
            let delta_b = if cfg.square {
                1.0 - delta_a
            } else {
                rng.gen_range(cfg.delta_min..=cfg.delta_max)
            };
            let (left, right) = polys[target].random_split(cfg.square, delta_a, delta_b, rng)?;

            if left.area().min(right.area()) >= cfg.min_area
                && left.shortest_edge() >= cfg.min_edge
                && right.shortest_edge() >= cfg.min_edge
            {
                tracing::trace!(
                    poly = target,
                    count = polys.len() + 1,
                    budget,
                    "accepted split"
                );
                polys[target].set_points(left.points().to_vec());
                polys.push(right);
                break;
            }
            budget -= 1;
        }
    }

    if budget > 0 {
        Ok(polys)
    } else {
        tracing::debug!(
            reached = polys.len(),
            target = cfg.cell_count,
            "attempt budget exhausted"
        );
        Err(Error::GenerationExhausted)
    }
}

/// Bounded retry combinator around [`generate`].
///
/// Replaces an unbounded retry-until-success loop at the call site: after
/// `max_retries` failed generations (at least one is always attempted) the
/// last `GenerationExhausted` is returned. Unsatisfiable constraints (e.g.
/// `min_area` above `canvas area / cell_count`) therefore terminate instead
/// of livelocking.
pub fn generate_with_retries<R: Rng>(
    cfg: &GeneratorCfg,
    max_retries: u32,
    rng: &mut R,
) -> Result<Vec<ConvexPoly>, Error> {
    let mut last = Error::GenerationExhausted;
    for attempt in 0..max_retries.max(1) {
        match generate(cfg, rng) {
            Ok(polys) => return Ok(polys),
            Err(err) => {
                tracing::debug!(attempt, "generation attempt failed");
                last = err;
            }
        }
    }
    Err(last)
}

fn largest_area_index(polys: &[ConvexPoly]) -> usize {
    let mut best = 0;
    for (i, poly) in polys.iter().enumerate().skip(1) {
        if poly.area() > polys[best].area() {
            best = i;
        }
    }
    best
}
