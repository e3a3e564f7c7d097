//! The painting: cell arena, palette nodes, and the paint-operation contract.
//!
//! `Painting::generate` runs the whole pipeline (polygon generation with
//! bounded retries, color picks, inset outlines, both adjacency passes) and
//! hands back a snapshot that only ever changes through [`Painting::paint`].

use nalgebra::Vector2;
use rand::Rng;

use crate::adjacency::{link_cells, link_palette, Direction};
use crate::color::{pick_colors, ColorOption};
use crate::error::Error;
use crate::generator::{generate_with_retries, GeneratorCfg};
use crate::geom::ConvexPoly;

/// Index of a cell in its painting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId(pub usize);

/// Index of a palette node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaletteId(pub usize);

/// A directional neighbor: another cell, or a palette node at the canvas edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbor {
    Cell(CellId),
    Palette(PaletteId),
}

/// One generated cell: an inset, render-ready outline plus paint state and
/// the four optional adjacency slots (indexed by `Direction::index`).
///
/// `final_color == None` is the free-choice state: the cell may be resolved
/// to any color other than its current one.
#[derive(Clone, Debug)]
pub struct Cell {
    pub index: usize,
    pub outline: ConvexPoly,
    pub color: ColorOption,
    pub final_color: Option<ColorOption>,
    pub neighbors: [Option<Neighbor>; 4],
}

impl Cell {
    pub fn neighbor(&self, dir: Direction) -> Option<Neighbor> {
        self.neighbors[dir.index()]
    }

    /// A cell is complete once its color has reached its final color.
    pub fn is_complete(&self) -> bool {
        self.final_color == Some(self.color)
    }
}

/// Fixed color control at a canvas edge. Only Down- and Left-facing nodes are
/// linked into the cell graph; other directions never receive a link.
#[derive(Clone, Debug)]
pub struct PaletteNode {
    pub color: ColorOption,
    pub anchor: Vector2<f64>,
    pub direction: Direction,
    pub link: Option<CellId>,
}

impl PaletteNode {
    pub fn new(color: ColorOption, anchor: Vector2<f64>, direction: Direction) -> Self {
        Self {
            color,
            anchor,
            direction,
            link: None,
        }
    }
}

/// Full painting configuration: generation parameters plus the visual border
/// and the color-pick bounds.
#[derive(Clone, Debug)]
pub struct PaintingCfg {
    pub generator: GeneratorCfg,
    /// Visual border between cells; each polygon is inset by half of it.
    pub border_width: f64,
    /// Colors available to the picker.
    pub palette: Vec<ColorOption>,
    /// Cap on how often one color may repeat across the picked cells.
    pub max_color_repetition: usize,
    /// Ceiling on whole-generation retries after `GenerationExhausted`.
    pub max_generation_retries: u32,
}

impl Default for PaintingCfg {
    fn default() -> Self {
        Self {
            generator: GeneratorCfg::default(),
            border_width: 0.01,
            palette: ColorOption::ALL.to_vec(),
            max_color_repetition: 2,
            max_generation_retries: 32,
        }
    }
}

/// Outcome of one paint attempt, consumed by the interaction layer to decide
/// strike/pass signaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The cell took the chosen color (and its final color, when free-choice).
    Accepted,
    /// The chosen color is not the cell's required final color.
    WrongColor,
    /// The cell is already at its final color.
    AlreadyComplete,
    /// No palette color was active, or the cell reference did not resolve.
    Invalid,
}

impl PaintOutcome {
    /// Whether the interaction layer should issue a strike. Invalid attempts
    /// are refused without one.
    pub fn is_strike(self) -> bool {
        matches!(self, PaintOutcome::WrongColor | PaintOutcome::AlreadyComplete)
    }
}

/// A generated painting: cells plus the palette nodes linked into the graph.
#[derive(Clone, Debug)]
pub struct Painting {
    cells: Vec<Cell>,
    palette: Vec<PaletteNode>,
}

impl Painting {
    /// Generate a complete painting.
    ///
    /// Polygon generation retries up to `cfg.max_generation_retries` times;
    /// every accepted polygon is inset by half the border width, colored, and
    /// linked into the adjacency graph together with `palette_nodes`.
    pub fn generate<R: Rng>(
        cfg: &PaintingCfg,
        palette_nodes: Vec<PaletteNode>,
        rng: &mut R,
    ) -> Result<Painting, Error> {
        tracing::debug!(cells = cfg.generator.cell_count, "generating painting");
        let polys = generate_with_retries(&cfg.generator, cfg.max_generation_retries, rng)?;
        let colors = pick_colors(&cfg.palette, cfg.max_color_repetition, polys.len(), rng);
        debug_assert_eq!(colors.len(), polys.len(), "palette must be non-empty");

        let mut cells = Vec::with_capacity(polys.len());
        for (index, (poly, color)) in polys.iter().zip(colors).enumerate() {
            let outline = poly.inset(cfg.border_width * 0.5)?;
            tracing::debug!(cell = index + 1, color = %color, "cell generated");
            cells.push(Cell {
                index,
                outline,
                color,
                final_color: None,
                neighbors: [None; 4],
            });
        }

        let mut palette = palette_nodes;
        link_cells(&mut cells);
        link_palette(&mut cells, &mut palette);
        Ok(Painting { cells, palette })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn palette(&self) -> &[PaletteNode] {
        &self.palette
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Attempt to paint one cell with the currently active palette color.
    ///
    /// Free-choice cells accept any color other than their current one and
    /// lock it in as their final color; fixed cells accept exactly their
    /// final color. See [`PaintOutcome`] for the refusal cases.
    pub fn paint(&mut self, id: CellId, active: Option<ColorOption>) -> PaintOutcome {
        let Some(cell) = self.cells.get_mut(id.0) else {
            return PaintOutcome::Invalid;
        };
        let Some(chosen) = active else {
            tracing::debug!(cell = cell.index + 1, "paint attempt with no active color");
            return PaintOutcome::Invalid;
        };

        match cell.final_color {
            None => {
                if chosen == cell.color {
                    tracing::debug!(cell = cell.index + 1, "cell is already complete");
                    PaintOutcome::AlreadyComplete
                } else {
                    tracing::debug!(cell = cell.index + 1, color = %chosen, "painting cell");
                    cell.color = chosen;
                    cell.final_color = Some(chosen);
                    PaintOutcome::Accepted
                }
            }
            Some(final_color) => {
                if cell.color == final_color {
                    tracing::debug!(cell = cell.index + 1, "cell is already complete");
                    PaintOutcome::AlreadyComplete
                } else if chosen != final_color {
                    tracing::debug!(
                        cell = cell.index + 1,
                        chosen = %chosen,
                        expected = %final_color,
                        "wrong final color"
                    );
                    PaintOutcome::WrongColor
                } else {
                    tracing::debug!(cell = cell.index + 1, color = %chosen, "painting cell");
                    cell.color = chosen;
                    PaintOutcome::Accepted
                }
            }
        }
    }

    /// Every cell has reached its final color. Cells still in the free-choice
    /// state are unsolved by definition.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(Cell::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SeedToken;

    fn free_cell(color: ColorOption) -> Painting {
        Painting {
            cells: vec![Cell {
                index: 0,
                outline: ConvexPoly::canvas(Vector2::new(1.0, 1.0)),
                color,
                final_color: None,
                neighbors: [None; 4],
            }],
            palette: Vec::new(),
        }
    }

    #[test]
    fn free_choice_rejects_current_color() {
        let mut painting = free_cell(ColorOption::Red);
        let outcome = painting.paint(CellId(0), Some(ColorOption::Red));
        assert_eq!(outcome, PaintOutcome::AlreadyComplete);
        assert!(outcome.is_strike());
        assert_eq!(painting.cells()[0].final_color, None);
    }

    #[test]
    fn free_choice_accepts_any_other_color() {
        let mut painting = free_cell(ColorOption::Red);
        assert_eq!(
            painting.paint(CellId(0), Some(ColorOption::Blue)),
            PaintOutcome::Accepted
        );
        let cell = &painting.cells()[0];
        assert_eq!(cell.color, ColorOption::Blue);
        assert_eq!(cell.final_color, Some(ColorOption::Blue));
        assert!(painting.is_solved());
    }

    #[test]
    fn fixed_cell_paint_flow() {
        let mut painting = free_cell(ColorOption::Red);
        painting.cells_mut()[0].final_color = Some(ColorOption::Green);
        assert!(!painting.is_solved());

        let wrong = painting.paint(CellId(0), Some(ColorOption::Blue));
        assert_eq!(wrong, PaintOutcome::WrongColor);
        assert!(wrong.is_strike());

        assert_eq!(
            painting.paint(CellId(0), Some(ColorOption::Green)),
            PaintOutcome::Accepted
        );
        assert!(painting.is_solved());
        assert_eq!(
            painting.paint(CellId(0), Some(ColorOption::Green)),
            PaintOutcome::AlreadyComplete
        );
    }

    #[test]
    fn no_active_color_is_refused_without_strike() {
        let mut painting = free_cell(ColorOption::Red);
        let outcome = painting.paint(CellId(0), None);
        assert_eq!(outcome, PaintOutcome::Invalid);
        assert!(!outcome.is_strike());
        assert_eq!(
            painting.paint(CellId(99), Some(ColorOption::Red)),
            PaintOutcome::Invalid
        );
    }

    #[test]
    fn generate_produces_linked_inset_cells() {
        let cfg = PaintingCfg {
            generator: GeneratorCfg {
                cell_count: 6,
                min_area: 0.02,
                min_edge: 0.05,
                delta_min: 0.2,
                delta_max: 0.8,
                attempts: 10_000,
                ..GeneratorCfg::default()
            },
            ..PaintingCfg::default()
        };
        let nodes = vec![
            PaletteNode::new(ColorOption::Red, Vector2::new(0.0, 1.0), Direction::Down),
            PaletteNode::new(ColorOption::Blue, Vector2::new(1.0, 0.0), Direction::Left),
        ];
        let mut rng = SeedToken { seed: 21, index: 4 }.rng();
        let painting = Painting::generate(&cfg, nodes, &mut rng).expect("painting");

        assert_eq!(painting.cells().len(), 6);
        // Inset shrinks every cell strictly below its source polygon's area,
        // so the outlines cannot tile the full canvas anymore.
        let total: f64 = painting.cells().iter().map(|c| c.outline.area()).sum();
        assert!(total < 1.0);
        // With more than one cell everyone has at least one neighbor.
        for cell in painting.cells() {
            assert!(cell.neighbors.iter().any(|n| n.is_some()));
        }
        // Both canvas-edge nodes find some cell to link to.
        for node in painting.palette() {
            assert!(node.link.is_some());
        }
    }
}
