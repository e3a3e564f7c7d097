//! Color-blind remap tables and the deterministic rule selector.
//!
//! Purpose
//! - Pick the active remap set (or the free-choice mode) from environmental
//!   edgework, then derive every cell's required final color from it.
//!
//! The selection is a pure decision procedure, first match wins: the special
//! port/indicator case, then name-length rule A, then indicator-character
//! rule B (ambiguous scores fall through), then the fixed default set.

use std::collections::HashSet;

use crate::color::ColorOption;
use crate::painting::Painting;

/// Port types recognized on the edgework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortType {
    Dvi,
    Parallel,
    Ps2,
    Rj45,
    Serial,
    StereoRca,
}

/// One labeled indicator; `lit` marks the "on" state that the special case
/// and rule B consult.
#[derive(Clone, Debug)]
pub struct Indicator {
    pub label: String,
    pub lit: bool,
}

impl Indicator {
    pub fn new(label: impl Into<String>, lit: bool) -> Self {
        Self {
            label: label.into(),
            lit,
        }
    }
}

/// Read-only environmental signals consumed by the selector.
#[derive(Clone, Debug, Default)]
pub struct Edgework {
    pub batteries: u32,
    pub indicators: Vec<Indicator>,
    pub ports: Vec<PortType>,
}

impl Edgework {
    pub fn battery_count(&self) -> usize {
        self.batteries as usize
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn port_count(&self, port: PortType) -> usize {
        self.ports.iter().filter(|&&p| p == port).count()
    }

    pub fn total_port_count(&self) -> usize {
        self.ports.len()
    }

    pub fn lit_indicator_labels(&self) -> impl Iterator<Item = &str> {
        self.indicators
            .iter()
            .filter(|i| i.lit)
            .map(|i| i.label.as_str())
    }
}

/// Ordered color swap inside a remap set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSwap {
    pub from: ColorOption,
    pub to: ColorOption,
}

/// Named remap table; colors without a swap entry map to themselves.
#[derive(Clone, Copy, Debug)]
pub struct ColorBlindSet {
    pub name: &'static str,
    pub swaps: &'static [ColorSwap],
}

impl ColorBlindSet {
    /// First matching swap wins; identity otherwise.
    pub fn remap(&self, color: ColorOption) -> ColorOption {
        self.swaps
            .iter()
            .find(|s| s.from == color)
            .map_or(color, |s| s.to)
    }
}

const fn swap(from: ColorOption, to: ColorOption) -> ColorSwap {
    ColorSwap { from, to }
}

/// The three fixed remap sets, named after real color-vision deficiencies.
pub const COLOR_BLIND_SETS: [ColorBlindSet; 3] = [
    ColorBlindSet {
        name: "Protanomaly",
        swaps: &[
            swap(ColorOption::Black, ColorOption::Red),
            swap(ColorOption::Brown, ColorOption::Green),
            swap(ColorOption::Orange, ColorOption::Red),
            swap(ColorOption::Blue, ColorOption::Red),
            swap(ColorOption::Green, ColorOption::Orange),
            swap(ColorOption::Purple, ColorOption::Pink),
            swap(ColorOption::Pink, ColorOption::Purple),
        ],
    },
    ColorBlindSet {
        name: "Deuteranomaly",
        swaps: &[
            swap(ColorOption::Red, ColorOption::Green),
            swap(ColorOption::Blue, ColorOption::Pink),
            swap(ColorOption::Green, ColorOption::Yellow),
            swap(ColorOption::Yellow, ColorOption::Green),
            swap(ColorOption::Pink, ColorOption::Grey),
            swap(ColorOption::Purple, ColorOption::Brown),
            swap(ColorOption::Brown, ColorOption::Purple),
        ],
    },
    ColorBlindSet {
        name: "Tritanopia",
        swaps: &[
            swap(ColorOption::Blue, ColorOption::Grey),
            swap(ColorOption::Grey, ColorOption::Blue),
            swap(ColorOption::Purple, ColorOption::Black),
            swap(ColorOption::Black, ColorOption::Purple),
            swap(ColorOption::Green, ColorOption::Blue),
            swap(ColorOption::Orange, ColorOption::Red),
            swap(ColorOption::Red, ColorOption::Orange),
        ],
    },
];

/// The default set chosen when every rule falls through.
const FALLBACK_SET_NAME: &str = "Protanomaly";

/// Outcome of the rule procedure.
#[derive(Clone, Copy, Debug)]
pub enum Selection<'a> {
    Set(&'a ColorBlindSet),
    /// No remap: every cell may be resolved to any color other than its own.
    FreeChoice,
}

impl<'a> Selection<'a> {
    pub fn set(&self) -> Option<&'a ColorBlindSet> {
        match *self {
            Selection::Set(set) => Some(set),
            Selection::FreeChoice => None,
        }
    }
}

/// Run the decision procedure over `sets` (normally [`COLOR_BLIND_SETS`]).
///
/// `sets` must be non-empty; an empty slice degenerates to free choice.
pub fn select_color_blind_set<'a>(
    edgework: &Edgework,
    sets: &'a [ColorBlindSet],
) -> Selection<'a> {
    // Special case: 2 DVI + 1 RJ-45 + lit CLR means no remap at all.
    let clr_lit = edgework
        .lit_indicator_labels()
        .any(|label| label.eq_ignore_ascii_case("CLR"));
    if edgework.port_count(PortType::Dvi) == 2
        && edgework.port_count(PortType::Rj45) == 1
        && clr_lit
    {
        tracing::debug!("special rule matched: free choice");
        return Selection::FreeChoice;
    }

    // Rule A: unique name-length match against the edgework total.
    let total = edgework.battery_count()
        + edgework.indicator_count()
        + edgework.total_port_count()
        + 2;
    tracing::debug!(
        total,
        batteries = edgework.battery_count(),
        indicators = edgework.indicator_count(),
        ports = edgework.total_port_count(),
        "rule A total"
    );
    let mut matches = sets.iter().filter(|s| s.name.len() == total);
    match (matches.next(), matches.next()) {
        (Some(set), None) => {
            tracing::debug!(set = set.name, "rule A matched");
            return Selection::Set(set);
        }
        _ => tracing::debug!("no match for rule A"),
    }

    // Rule B: score names by lit-indicator characters; a tied maximum is
    // ambiguous and falls through.
    let indicator_chars: HashSet<char> = edgework
        .lit_indicator_labels()
        .flat_map(|label| label.chars())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let mut best: Option<&ColorBlindSet> = None;
    let mut best_score = 0;
    let mut tied = false;
    for set in sets {
        let score = set
            .name
            .chars()
            .filter(|c| indicator_chars.contains(&c.to_ascii_uppercase()))
            .count();
        tracing::debug!(set = set.name, score, "rule B score");
        if best.is_none() || score > best_score {
            best = Some(set);
            best_score = score;
            tied = false;
        } else if score == best_score {
            tied = true;
        }
    }
    match best {
        Some(set) if !tied => {
            tracing::debug!(set = set.name, "rule B matched");
            return Selection::Set(set);
        }
        _ => tracing::debug!("no match for rule B (duplicate scores)"),
    }

    // Fallback: the fixed default set.
    let fallback = sets
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(FALLBACK_SET_NAME))
        .or_else(|| sets.first());
    match fallback {
        Some(set) => {
            tracing::debug!(set = set.name, "fallback matched");
            Selection::Set(set)
        }
        None => Selection::FreeChoice,
    }
}

/// Write each cell's required final color from the selection: the swap target
/// (identity without a matching entry) for a selected set, or cleared for
/// free choice.
pub fn apply_color_blind_set(selection: &Selection<'_>, painting: &mut Painting) {
    for cell in painting.cells_mut() {
        match selection.set() {
            Some(set) => {
                let target = set.remap(cell.color);
                tracing::debug!(
                    cell = cell.index + 1,
                    from = %cell.color,
                    to = %target,
                    "final color"
                );
                cell.final_color = Some(target);
            }
            None => {
                tracing::debug!(
                    cell = cell.index + 1,
                    from = %cell.color,
                    "free choice: any other color"
                );
                cell.final_color = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edgework(batteries: u32, indicators: &[(&str, bool)], ports: &[PortType]) -> Edgework {
        Edgework {
            batteries,
            indicators: indicators
                .iter()
                .map(|&(label, lit)| Indicator::new(label, lit))
                .collect(),
            ports: ports.to_vec(),
        }
    }

    #[test]
    fn special_case_yields_free_choice() {
        let ew = edgework(
            1,
            &[("CLR", true)],
            &[PortType::Dvi, PortType::Dvi, PortType::Rj45],
        );
        assert!(select_color_blind_set(&ew, &COLOR_BLIND_SETS).set().is_none());

        // An unlit CLR does not trigger it; rule A total is 1+1+3+2 = 7,
        // matching no set name, and rule B ties at zero, so the fallback wins.
        let ew = edgework(
            1,
            &[("CLR", false)],
            &[PortType::Dvi, PortType::Dvi, PortType::Rj45],
        );
        let selection = select_color_blind_set(&ew, &COLOR_BLIND_SETS);
        assert_eq!(selection.set().map(|s| s.name), Some("Protanomaly"));
    }

    #[test]
    fn rule_a_matches_unique_name_length() {
        // batteries 3 + indicators 2 + ports 5 + 2 = 12; only the fixture's
        // 12-character name qualifies.
        const FIXTURE: [ColorBlindSet; 3] = [
            ColorBlindSet {
                name: "Monochromacy",
                swaps: &[],
            },
            COLOR_BLIND_SETS[0],
            COLOR_BLIND_SETS[2],
        ];
        let ew = edgework(
            3,
            &[("FRK", false), ("BOB", false)],
            &[
                PortType::Serial,
                PortType::Serial,
                PortType::Parallel,
                PortType::Ps2,
                PortType::StereoRca,
            ],
        );
        let selection = select_color_blind_set(&ew, &FIXTURE);
        assert_eq!(selection.set().map(|s| s.name), Some("Monochromacy"));
    }

    #[test]
    fn rule_a_skips_duplicate_name_lengths() {
        const FIXTURE: [ColorBlindSet; 3] = [
            ColorBlindSet {
                name: "Monochromacy",
                swaps: &[],
            },
            ColorBlindSet {
                name: "Achromatopia",
                swaps: &[],
            },
            COLOR_BLIND_SETS[0],
        ];
        // Total 12 matches the first two sets, so rule A must fall through
        // instead of taking the first; rule B ties at zero with no lit
        // indicators, leaving the Protanomaly fallback.
        let ew = edgework(
            3,
            &[("FRK", false), ("BOB", false)],
            &[
                PortType::Serial,
                PortType::Serial,
                PortType::Parallel,
                PortType::Ps2,
                PortType::StereoRca,
            ],
        );
        let selection = select_color_blind_set(&ew, &FIXTURE);
        assert_eq!(selection.set().map(|s| s.name), Some("Protanomaly"));
    }

    #[test]
    fn rule_b_unique_maximum_wins_and_counts_duplicates() {
        // Lit "SIG": Tritanopia contains I twice, the other names score zero.
        // Rule A total is 0+1+0+2 = 3, matching nothing.
        let ew = edgework(0, &[("SIG", true)], &[]);
        let selection = select_color_blind_set(&ew, &COLOR_BLIND_SETS);
        assert_eq!(selection.set().map(|s| s.name), Some("Tritanopia"));
    }

    #[test]
    fn rule_b_tie_falls_back_to_protanomaly() {
        // Lit "FRK": every set name contains exactly one R, a three-way tie.
        let ew = edgework(0, &[("FRK", true)], &[]);
        let selection = select_color_blind_set(&ew, &COLOR_BLIND_SETS);
        assert_eq!(selection.set().map(|s| s.name), Some("Protanomaly"));
    }

    #[test]
    fn remap_falls_back_to_identity() {
        let set = &COLOR_BLIND_SETS[0];
        assert_eq!(set.remap(ColorOption::Black), ColorOption::Red);
        assert_eq!(set.remap(ColorOption::Yellow), ColorOption::Yellow);
    }

    #[test]
    fn apply_writes_final_colors_and_free_choice_clears_them() {
        use crate::adjacency::Direction;
        use crate::generator::{GeneratorCfg, SeedToken};
        use crate::painting::{Painting, PaintingCfg, PaletteNode};
        use nalgebra::Vector2;

        let cfg = PaintingCfg {
            generator: GeneratorCfg {
                cell_count: 4,
                attempts: 10_000,
                ..GeneratorCfg::default()
            },
            ..PaintingCfg::default()
        };
        let nodes = vec![PaletteNode::new(
            ColorOption::Red,
            Vector2::new(0.0, 1.0),
            Direction::Down,
        )];
        let mut rng = SeedToken { seed: 8, index: 1 }.rng();
        let mut painting = Painting::generate(&cfg, nodes, &mut rng).expect("painting");

        let set = &COLOR_BLIND_SETS[1];
        apply_color_blind_set(&Selection::Set(set), &mut painting);
        for cell in painting.cells() {
            assert_eq!(cell.final_color, Some(set.remap(cell.color)));
        }

        apply_color_blind_set(&Selection::FreeChoice, &mut painting);
        for cell in painting.cells() {
            assert_eq!(cell.final_color, None);
        }
    }
}
