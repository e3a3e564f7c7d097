//! Generate one painting, select the active remap set, and solve it.
//!
//! Usage:
//!   cargo run -p fresco --example paint_demo -- [seed]
//!
//! Prints the generated cells, the selected color-blind set, and the paint
//! sequence that drives the painting to the solved state.

use fresco::api::{
    apply_color_blind_set, select_color_blind_set, CellId, ColorOption, Direction, Edgework,
    Indicator, PaintOutcome, Painting, PaintingCfg, PaletteNode, PortType, SeedToken,
    COLOR_BLIND_SETS,
};
use fresco::Vec2;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2026);

    let cfg = PaintingCfg::default();
    let palette_nodes: Vec<PaletteNode> = ColorOption::ALL
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            // Half the controls above the canvas facing down, half to the
            // right facing left.
            if i % 2 == 0 {
                PaletteNode::new(color, Vec2::new(-0.5 + i as f64 * 0.1, 0.6), Direction::Down)
            } else {
                PaletteNode::new(color, Vec2::new(0.6, 0.5 - i as f64 * 0.1), Direction::Left)
            }
        })
        .collect();

    let tok = SeedToken { seed, index: 0 };
    let mut painting = match Painting::generate(&cfg, palette_nodes, &mut tok.rng()) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("generation failed: {err}");
            return;
        }
    };

    println!("painting with {} cells (seed {seed}):", painting.cells().len());
    for cell in painting.cells() {
        println!(
            "  cell #{}: {} ({} vertices, area {:.4})",
            cell.index + 1,
            cell.color,
            cell.outline.points().len(),
            cell.outline.area(),
        );
    }

    let edgework = Edgework {
        batteries: 2,
        indicators: vec![Indicator::new("SIG", true), Indicator::new("CLR", false)],
        ports: vec![PortType::Dvi, PortType::Serial],
    };
    let selection = select_color_blind_set(&edgework, &COLOR_BLIND_SETS);
    match selection.set() {
        Some(set) => println!("active set: {}", set.name),
        None => println!("active set: free choice"),
    }
    apply_color_blind_set(&selection, &mut painting);

    // Drive every cell to its final color, as a forced solve would.
    for id in 0..painting.cells().len() {
        let cell_id = CellId(id);
        let target = match painting.cells()[id].final_color {
            Some(color) => color,
            None => {
                let current = painting.cells()[id].color;
                match ColorOption::ALL.iter().copied().find(|&c| c != current) {
                    Some(other) => other,
                    None => continue,
                }
            }
        };
        let outcome = painting.paint(cell_id, Some(target));
        println!("  paint #{} with {target}: {outcome:?}", id + 1);
        assert!(matches!(
            outcome,
            PaintOutcome::Accepted | PaintOutcome::AlreadyComplete
        ));
    }
    println!("solved: {}", painting.is_solved());
}
