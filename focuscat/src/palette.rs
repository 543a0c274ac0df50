//! Soft sentence colors.

use egui::ecolor::Hsva;
use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0xFF, 0x6B, 0x6B),
    Color32::from_rgb(0xFF, 0xD9, 0x3D),
    Color32::from_rgb(0x6B, 0xCB, 0x77),
    Color32::from_rgb(0x4D, 0x96, 0xFF),
    Color32::from_rgb(0xFF, 0x9C, 0xEE),
    Color32::from_rgb(0xA3, 0xE4, 0xDB),
    Color32::from_rgb(0xFF, 0xB2, 0x6B),
    Color32::from_rgb(0xB9, 0x83, 0xFF),
    Color32::from_rgb(0xFF, 0xC7, 0xC7),
    Color32::from_rgb(0x7D, 0xE5, 0xED),
];

/// Palette walk step. Coprime with the palette length, so neighbouring
/// indices never share a color and every color is visited.
const STRIDE: usize = 3;

const VALUE_SPREAD: f32 = 0.18;
const MIN_VALUE: f32 = 0.55;
const HUE_JITTER: f32 = 0.03;

/// Maps sentence indices to palette colors, starting from a random offset
/// chosen once per session.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    offset: usize,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::with_offset(rand::thread_rng().gen_range(0..PALETTE.len()))
    }

    pub fn with_offset(offset: usize) -> Self {
        Self { offset: offset % PALETTE.len() }
    }

    /// Pick a new random starting color.
    pub fn reshuffle(&mut self) {
        let n = PALETTE.len();
        self.offset = (self.offset + rand::thread_rng().gen_range(1..n)) % n;
    }

    pub fn color_for(&self, index: usize) -> Color32 {
        let n = PALETTE.len();
        let step = (index % n) * STRIDE;
        PALETTE[(self.offset + step) % n]
    }
}

/// Stable seed for a normalized sentence.
pub fn sentence_seed(normalized: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    normalized.hash(&mut hasher);
    hasher.finish()
}

/// `len` colors brightening left to right around `base`, with a small hue
/// drift picked from `seed`. Always returns at least one color.
pub fn gradient(base: Color32, len: usize, seed: u64) -> Vec<Color32> {
    let [r, g, b, _] = base.to_array();
    let hsv = Hsva::from_rgb([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]);

    let mut rng = StdRng::seed_from_u64(seed);
    let jitter = rng.gen::<f32>() * 2.0 * HUE_JITTER - HUE_JITTER;

    let count = len.max(1);
    let span = count.saturating_sub(1).max(1) as f32;
    (0..count)
        .map(|i| {
            let t = (i as f32 / span) * 2.0 - 1.0;
            let value = (hsv.v + VALUE_SPREAD * t).clamp(MIN_VALUE, 1.0);
            let hue = (hsv.h + jitter * t).rem_euclid(1.0);
            let [r, g, b] = Hsva::new(hue, hsv.s, value, 1.0).to_rgb();
            Color32::from_rgb(to_byte(r), to_byte(g), to_byte(b))
        })
        .collect()
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_any_index() {
        let assigner = ColorAssigner::with_offset(7);
        for index in [0, 1, 9, 10, 11, 1_000_003, usize::MAX - 1, usize::MAX] {
            assert!(PALETTE.contains(&assigner.color_for(index)));
        }
    }

    #[test]
    fn test_neighbours_differ() {
        for offset in 0..PALETTE.len() {
            let assigner = ColorAssigner::with_offset(offset);
            for index in 0..50 {
                assert_ne!(assigner.color_for(index), assigner.color_for(index + 1));
            }
        }
    }

    #[test]
    fn test_walk_visits_whole_palette() {
        let assigner = ColorAssigner::new();
        let mut seen: Vec<Color32> = (0..PALETTE.len()).map(|i| assigner.color_for(i)).collect();
        seen.sort_by_key(|c| c.to_array());
        seen.dedup();
        assert_eq!(seen.len(), PALETTE.len());
    }

    #[test]
    fn test_reshuffle_moves_offset() {
        let mut assigner = ColorAssigner::with_offset(2);
        let before = assigner.color_for(0);
        assigner.reshuffle();
        assert_ne!(assigner.color_for(0), before);
    }

    #[test]
    fn test_gradient_is_deterministic() {
        let base = Color32::from_rgb(0x4D, 0x96, 0xFF);
        assert_eq!(gradient(base, 12, 123), gradient(base, 12, 123));
        assert_eq!(gradient(base, 12, 123).len(), 12);
    }

    #[test]
    fn test_gradient_edge_lengths() {
        let base = PALETTE[0];
        assert_eq!(gradient(base, 0, 1).len(), 1);
        assert_eq!(gradient(base, 1, 1).len(), 1);
    }

    #[test]
    fn test_gradient_brightens() {
        let colors = gradient(PALETTE[3], 20, 9);
        let brightness = |c: &Color32| {
            let [r, g, b, _] = c.to_array();
            r.max(g).max(b)
        };
        assert!(brightness(colors.last().unwrap()) >= brightness(&colors[0]));
    }

    #[test]
    fn test_sentence_seed_stable() {
        assert_eq!(sentence_seed("hello world"), sentence_seed("hello world"));
        assert_ne!(sentence_seed("hello world"), sentence_seed("hello there"));
    }
}
