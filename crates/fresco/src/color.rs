//! Cell colors and the bounded-repetition color picker.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed palette of paintable colors. The RGB binding is a static table,
/// never mutated at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorOption {
    Black,
    Grey,
    Red,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    White,
}

impl ColorOption {
    pub const ALL: [ColorOption; 11] = [
        ColorOption::Black,
        ColorOption::Grey,
        ColorOption::Red,
        ColorOption::Brown,
        ColorOption::Orange,
        ColorOption::Yellow,
        ColorOption::Green,
        ColorOption::Blue,
        ColorOption::Purple,
        ColorOption::Pink,
        ColorOption::White,
    ];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            ColorOption::Black => [23, 23, 23],
            ColorOption::Grey => [176, 176, 176],
            ColorOption::Red => [255, 0, 0],
            ColorOption::Brown => [77, 33, 0],
            ColorOption::Orange => [255, 121, 0],
            ColorOption::Yellow => [245, 248, 56],
            ColorOption::Green => [40, 229, 42],
            ColorOption::Blue => [0, 55, 255],
            ColorOption::Purple => [84, 42, 144],
            ColorOption::Pink => [215, 106, 221],
            ColorOption::White => [250, 250, 250],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ColorOption::Black => "Black",
            ColorOption::Grey => "Grey",
            ColorOption::Red => "Red",
            ColorOption::Brown => "Brown",
            ColorOption::Orange => "Orange",
            ColorOption::Yellow => "Yellow",
            ColorOption::Green => "Green",
            ColorOption::Blue => "Blue",
            ColorOption::Purple => "Purple",
            ColorOption::Pink => "Pink",
            ColorOption::White => "White",
        }
    }

    /// Case-insensitive name lookup; accepts the "gray" spelling.
    pub fn from_name(name: &str) -> Option<ColorOption> {
        if name.eq_ignore_ascii_case("gray") {
            return Some(ColorOption::Grey);
        }
        ColorOption::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Perceptual-luma test, used to pick a contrasting label color.
    pub fn is_light(self) -> bool {
        let [r, g, b] = self.rgb();
        let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        luma / 255.0 > 0.5
    }
}

impl fmt::Display for ColorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw `count` colors from `palette`, each color capped at `max_repetition`
/// occurrences per pool pass.
///
/// The working pool is the palette repeated `max_repetition` times, shuffled;
/// draws come off the pool until it runs dry, at which point it is refilled
/// and reshuffled. For `count <= max_repetition * palette.len()` no color can
/// therefore appear more than `max_repetition` times. An empty palette or a
/// zero cap yields an empty result.
pub fn pick_colors<R: Rng>(
    palette: &[ColorOption],
    max_repetition: usize,
    count: usize,
    rng: &mut R,
) -> Vec<ColorOption> {
    let mut picked = Vec::with_capacity(count);
    if palette.is_empty() || max_repetition == 0 {
        return picked;
    }
    let mut pool: Vec<ColorOption> = Vec::with_capacity(palette.len() * max_repetition);
    while picked.len() < count {
        if pool.is_empty() {
            for _ in 0..max_repetition {
                pool.extend_from_slice(palette);
            }
            pool.shuffle(rng);
        }
        if let Some(color) = pool.pop() {
            picked.push(color);
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn repetition_cap_holds_within_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        for count in [1, 5, 11, 22] {
            let picked = pick_colors(&ColorOption::ALL, 2, count, &mut rng);
            assert_eq!(picked.len(), count);
            let mut tally: HashMap<ColorOption, usize> = HashMap::new();
            for color in picked {
                *tally.entry(color).or_default() += 1;
            }
            assert!(tally.values().all(|&n| n <= 2), "count {count}: {tally:?}");
        }
    }

    #[test]
    fn oversized_request_refills_pool() {
        let mut rng = StdRng::seed_from_u64(12);
        let palette = [ColorOption::Red, ColorOption::Blue];
        let picked = pick_colors(&palette, 1, 5, &mut rng);
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|c| palette.contains(c)));
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(13);
        assert!(pick_colors(&[], 2, 4, &mut rng).is_empty());
        assert!(pick_colors(&ColorOption::ALL, 0, 4, &mut rng).is_empty());
    }

    #[test]
    fn name_round_trip_and_gray_alias() {
        for color in ColorOption::ALL {
            assert_eq!(ColorOption::from_name(color.name()), Some(color));
        }
        assert_eq!(ColorOption::from_name("gray"), Some(ColorOption::Grey));
        assert_eq!(ColorOption::from_name("GREY"), Some(ColorOption::Grey));
        assert_eq!(ColorOption::from_name("mauve"), None);
    }

    #[test]
    fn luma_split() {
        assert!(ColorOption::White.is_light());
        assert!(ColorOption::Yellow.is_light());
        assert!(!ColorOption::Black.is_light());
        assert!(!ColorOption::Blue.is_light());
    }
}
