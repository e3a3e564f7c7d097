//! Directional adjacency between cells and palette nodes.
//!
//! Purpose
//! - Build the sparse directed graph used for 4-way navigation: for each cell
//!   a ray is cast from its outline centroid in every cardinal direction and
//!   the nearest intersected cell becomes the neighbor on that side; palette
//!   nodes are then linked in from the canvas edges.
//!
//! The graph is non-symmetric by construction: palette nodes are one-way
//! sources except for the opposite-side back-link, and any side with no hit
//! simply stays unlinked.

use nalgebra::Vector2;

use crate::geom::line_poly_intersection;
use crate::painting::{Cell, CellId, Neighbor, PaletteId, PaletteNode};

/// Cardinal navigation direction. `unit()` follows the canvas axes:
/// up/down = ±Y, left/right = ∓X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn unit(self) -> Vector2<f64> {
        match self {
            Direction::Up => Vector2::new(0.0, 1.0),
            Direction::Down => Vector2::new(0.0, -1.0),
            Direction::Left => Vector2::new(-1.0, 0.0),
            Direction::Right => Vector2::new(1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Slot in a cell's neighbor array.
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Cell-to-cell pass: every cell gets, per direction, the other cell whose
/// boundary the centroid ray hits nearest (squared distance; ties keep the
/// earlier cell). Sides without a hit stay `None`.
pub(crate) fn link_cells(cells: &mut [Cell]) {
    for i in 0..cells.len() {
        let center = cells[i].outline.centroid();
        for dir in Direction::ALL {
            let mut best: Option<(f64, usize)> = None;
            for (j, other) in cells.iter().enumerate() {
                if j == i {
                    continue;
                }
                if let Some(hit) = line_poly_intersection(center, dir.unit(), other.outline.points())
                {
                    let dist = (hit - center).norm_squared();
                    if best.map_or(true, |(b, _)| dist < b) {
                        best = Some((dist, j));
                    }
                }
            }
            cells[i].neighbors[dir.index()] = best.map(|(_, j)| Neighbor::Cell(CellId(j)));
        }
    }
}

/// Palette pass: nodes facing Down or Left cast a ray from their anchor and
/// link to the nearest hit cell; other directions never get a link. The cell
/// back-links to the node on the opposite side only if that side is still
/// free, so cell-to-cell neighbors always win.
pub(crate) fn link_palette(cells: &mut [Cell], palette: &mut [PaletteNode]) {
    for (pi, node) in palette.iter_mut().enumerate() {
        match node.direction {
            Direction::Down | Direction::Left => {}
            _ => continue,
        }
        let mut best: Option<(f64, usize)> = None;
        for (j, cell) in cells.iter().enumerate() {
            if let Some(hit) =
                line_poly_intersection(node.anchor, node.direction.unit(), cell.outline.points())
            {
                let dist = (hit - node.anchor).norm_squared();
                if best.map_or(true, |(b, _)| dist < b) {
                    best = Some((dist, j));
                }
            }
        }
        if let Some((_, j)) = best {
            node.link = Some(CellId(j));
            let back = node.direction.opposite().index();
            if cells[j].neighbors[back].is_none() {
                cells[j].neighbors[back] = Some(Neighbor::Palette(PaletteId(pi)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorOption;
    use crate::geom::ConvexPoly;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> ConvexPoly {
        ConvexPoly::new(vec![
            Vector2::new(x0, y1),
            Vector2::new(x1, y1),
            Vector2::new(x1, y0),
            Vector2::new(x0, y0),
        ])
    }

    fn cell(index: usize, outline: ConvexPoly) -> Cell {
        Cell {
            index,
            outline,
            color: ColorOption::Black,
            final_color: None,
            neighbors: [None; 4],
        }
    }

    #[test]
    fn side_by_side_cells_link_horizontally_only() {
        let mut cells = vec![
            cell(0, rect(-1.0, 0.0, -0.1, 1.0)),
            cell(1, rect(0.1, 0.0, 1.0, 1.0)),
        ];
        link_cells(&mut cells);

        assert_eq!(
            cells[0].neighbors[Direction::Right.index()],
            Some(Neighbor::Cell(CellId(1)))
        );
        assert_eq!(
            cells[1].neighbors[Direction::Left.index()],
            Some(Neighbor::Cell(CellId(0)))
        );
        for dir in [Direction::Up, Direction::Down] {
            assert_eq!(cells[0].neighbors[dir.index()], None);
            assert_eq!(cells[1].neighbors[dir.index()], None);
        }
        assert_eq!(cells[0].neighbors[Direction::Left.index()], None);
        assert_eq!(cells[1].neighbors[Direction::Right.index()], None);
    }

    #[test]
    fn nearest_cell_wins_per_direction() {
        let mut cells = vec![
            cell(0, rect(-1.0, 0.0, -0.6, 1.0)),
            cell(1, rect(-0.5, 0.0, -0.1, 1.0)),
            cell(2, rect(0.1, 0.0, 1.0, 1.0)),
        ];
        link_cells(&mut cells);
        // From the rightmost cell, the middle one is the nearest on the left.
        assert_eq!(
            cells[2].neighbors[Direction::Left.index()],
            Some(Neighbor::Cell(CellId(1)))
        );
    }

    #[test]
    fn palette_node_links_and_back_links() {
        let mut cells = vec![
            cell(0, rect(-1.0, -1.0, 1.0, 0.0)),
            cell(1, rect(-1.0, 0.1, 1.0, 1.0)),
        ];
        link_cells(&mut cells);
        // Top cell already has a downward neighbor, but its up side is free.
        let mut palette = vec![
            PaletteNode::new(ColorOption::Red, Vector2::new(0.0, 2.0), Direction::Down),
            PaletteNode::new(ColorOption::Blue, Vector2::new(2.0, 0.5), Direction::Up),
        ];
        link_palette(&mut cells, &mut palette);

        assert_eq!(palette[0].link, Some(CellId(1)));
        assert_eq!(
            cells[1].neighbors[Direction::Up.index()],
            Some(Neighbor::Palette(PaletteId(0)))
        );
        // The cell-to-cell link below stays untouched.
        assert_eq!(
            cells[1].neighbors[Direction::Down.index()],
            Some(Neighbor::Cell(CellId(0)))
        );
        // Up-facing nodes never participate.
        assert_eq!(palette[1].link, None);
    }

    #[test]
    fn occupied_side_is_not_overwritten() {
        // Bottom cell spans the full width; the top cell leaves the left part
        // of the canvas open so a ray at x = -0.75 reaches the bottom cell.
        let mut cells = vec![
            cell(0, rect(-1.0, -1.0, 1.0, 0.0)),
            cell(1, rect(-0.5, 0.1, 1.0, 1.0)),
        ];
        link_cells(&mut cells);
        assert_eq!(
            cells[0].neighbors[Direction::Up.index()],
            Some(Neighbor::Cell(CellId(1)))
        );

        let mut palette = vec![PaletteNode::new(
            ColorOption::Green,
            Vector2::new(-0.75, 2.0),
            Direction::Down,
        )];
        link_palette(&mut cells, &mut palette);
        assert_eq!(palette[0].link, Some(CellId(0)));
        // The up side already points at the top cell and must stay that way.
        assert_eq!(
            cells[0].neighbors[Direction::Up.index()],
            Some(Neighbor::Cell(CellId(1)))
        );
    }
}
