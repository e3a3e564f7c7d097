use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use fresco::api::{
    select_color_blind_set, ColorOption, Direction, Edgework, GeneratorCfg, Indicator, Neighbor,
    Painting, PaintingCfg, PaletteNode, PortType, SeedToken, COLOR_BLIND_SETS,
};
use fresco::Vec2;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Painting generation and rule-table runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate one painting and print it as JSON
    Generate {
        #[arg(long, default_value_t = 8)]
        cells: usize,
        #[arg(long)]
        square: bool,
        #[arg(long, default_value_t = 0.0)]
        min_area: f64,
        #[arg(long, default_value_t = 0.0)]
        min_edge: f64,
        #[arg(long, default_value_t = 100)]
        attempts: u32,
        #[arg(long, default_value_t = 0.01)]
        border: f64,
        #[arg(long, default_value_t = 2)]
        repetition: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Run the color-blind rule selector against edgework flags
    Rules {
        #[arg(long, default_value_t = 0)]
        batteries: u32,
        /// Indicator label; prefix with '*' for a lit indicator (e.g. "*CLR")
        #[arg(long)]
        indicator: Vec<String>,
        /// Port name: dvi, parallel, ps2, rj45, serial, rca
        #[arg(long)]
        port: Vec<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            cells,
            square,
            min_area,
            min_edge,
            attempts,
            border,
            repetition,
            seed,
        } => generate(
            cells, square, min_area, min_edge, attempts, border, repetition, seed,
        ),
        Action::Rules {
            batteries,
            indicator,
            port,
        } => rules(batteries, indicator, port),
    }
}

#[allow(clippy::too_many_arguments)]
fn generate(
    cells: usize,
    square: bool,
    min_area: f64,
    min_edge: f64,
    attempts: u32,
    border: f64,
    repetition: usize,
    seed: u64,
) -> Result<()> {
    tracing::info!(cells, square, seed, "generate");
    let cfg = PaintingCfg {
        generator: GeneratorCfg {
            cell_count: cells,
            square,
            min_area,
            min_edge,
            attempts,
            ..GeneratorCfg::default()
        },
        border_width: border,
        max_color_repetition: repetition,
        ..PaintingCfg::default()
    };
    let palette_nodes: Vec<PaletteNode> = ColorOption::ALL
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            if i % 2 == 0 {
                PaletteNode::new(color, Vec2::new(-0.5 + i as f64 * 0.1, 0.6), Direction::Down)
            } else {
                PaletteNode::new(color, Vec2::new(0.6, 0.5 - i as f64 * 0.1), Direction::Left)
            }
        })
        .collect();

    let tok = SeedToken { seed, index: 0 };
    let painting = Painting::generate(&cfg, palette_nodes, &mut tok.rng())?;

    let cells_json: Vec<_> = painting
        .cells()
        .iter()
        .map(|cell| {
            let outline: Vec<_> = cell
                .outline
                .points()
                .iter()
                .map(|p| serde_json::json!([p.x, p.y]))
                .collect();
            let neighbors: Vec<_> = Direction::ALL
                .iter()
                .map(|dir| match cell.neighbor(*dir) {
                    Some(Neighbor::Cell(id)) => serde_json::json!(format!("cell:{}", id.0)),
                    Some(Neighbor::Palette(id)) => {
                        serde_json::json!(format!("palette:{}", id.0))
                    }
                    None => serde_json::Value::Null,
                })
                .collect();
            serde_json::json!({
                "index": cell.index,
                "color": cell.color.name(),
                "rgb": cell.color.rgb(),
                "outline": outline,
                "neighbors": neighbors,
            })
        })
        .collect();
    let palette_json: Vec<_> = painting
        .palette()
        .iter()
        .map(|node| {
            serde_json::json!({
                "color": node.color.name(),
                "direction": format!("{:?}", node.direction),
                "link": node.link.map(|id| id.0),
            })
        })
        .collect();
    let doc = serde_json::json!({
        "seed": seed,
        "cells": cells_json,
        "palette": palette_json,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn rules(batteries: u32, indicators: Vec<String>, ports: Vec<String>) -> Result<()> {
    tracing::info!(batteries, "rules");
    let indicators = indicators
        .into_iter()
        .map(|raw| match raw.strip_prefix('*') {
            Some(label) => Indicator::new(label, true),
            None => Indicator::new(raw, false),
        })
        .collect();
    let ports = ports
        .iter()
        .map(|name| parse_port(name))
        .collect::<Result<Vec<_>>>()?;
    let edgework = Edgework {
        batteries,
        indicators,
        ports,
    };

    let selection = select_color_blind_set(&edgework, &COLOR_BLIND_SETS);
    let doc = match selection.set() {
        Some(set) => {
            let swaps: Vec<_> = set
                .swaps
                .iter()
                .map(|s| serde_json::json!({ "from": s.from.name(), "to": s.to.name() }))
                .collect();
            serde_json::json!({ "set": set.name, "swaps": swaps })
        }
        None => serde_json::json!({ "set": serde_json::Value::Null, "free_choice": true }),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn parse_port(name: &str) -> Result<PortType> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "dvi" => PortType::Dvi,
        "parallel" => PortType::Parallel,
        "ps2" => PortType::Ps2,
        "rj45" => PortType::Rj45,
        "serial" => PortType::Serial,
        "rca" | "stereo-rca" => PortType::StereoRca,
        other => bail!("unknown port type: {other}"),
    })
}
