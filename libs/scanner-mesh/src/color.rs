//! # Color Assignment
//!
//! Maps an element or module weight to the RGBA color of its solid.
//!
//! Exactly one [`ColorMode`] is active per run. Weighted channels are
//! narrowed to 8 bits by truncation with wrap-around, so weights outside
//! `[0, 1]` produce wrapped colors rather than clamped ones.

use std::ops::Range;

use config::constants::EngineConfig;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::efficiency::ElementWeights;
use crate::mesh::Rgba;

/// How solids are colored for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Independent uniform RGB per solid, for checking placements.
    Random,
    /// Base color scaled by the element or module efficiency.
    Efficiency,
    /// Base color on every solid.
    Default,
}

impl ColorMode {
    /// Picks the mode: random overrides efficiency, which overrides default.
    pub fn resolve(random_color: bool, weights: &ElementWeights) -> Self {
        if random_color {
            Self::Random
        } else if weights.is_neutral() {
            Self::Default
        } else {
            Self::Efficiency
        }
    }
}

/// Narrows a scaled channel to 8 bits, truncating toward zero and keeping
/// the low byte.
///
/// ```rust
/// use scanner_mesh::color::narrow_channel;
///
/// assert_eq!(narrow_channel(127.9), 127);
/// assert_eq!(narrow_channel(300.0), 44);
/// assert_eq!(narrow_channel(-1.0), 255);
/// ```
pub fn narrow_channel(value: f64) -> u8 {
    (value.trunc() as i64) as u8
}

/// Hands out solid colors for one run.
pub struct ColorAssigner {
    mode: ColorMode,
    base: [u8; 3],
    alpha: u8,
    rng: Box<dyn RngCore>,
}

impl ColorAssigner {
    /// Creates an assigner. A seed makes random mode reproducible; without
    /// one, colors come from the thread RNG.
    pub fn new(mode: ColorMode, config: &EngineConfig, seed: Option<u64>) -> Self {
        let rng: Box<dyn RngCore> = match seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };
        Self {
            mode,
            base: config.base_color,
            alpha: config.alpha,
            rng,
        }
    }

    /// The active mode.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Color of element instance `index`.
    pub fn element_color(&mut self, weights: &ElementWeights, index: usize) -> Rgba {
        match self.mode {
            ColorMode::Random => self.random(),
            ColorMode::Efficiency => match weights.element(index) {
                Some(weight) => self.scaled(weight),
                None => self.base(),
            },
            ColorMode::Default => self.base(),
        }
    }

    /// Color of the module whose elements occupy `elements`.
    pub fn module_color(&mut self, weights: &ElementWeights, elements: Range<usize>) -> Rgba {
        match self.mode {
            ColorMode::Random => self.random(),
            ColorMode::Efficiency => match weights.mean(elements) {
                Some(weight) => self.scaled(weight),
                None => self.base(),
            },
            ColorMode::Default => self.base(),
        }
    }

    fn random(&mut self) -> Rgba {
        [
            self.rng.gen_range(0..=255u8),
            self.rng.gen_range(0..=255u8),
            self.rng.gen_range(0..=255u8),
            self.alpha,
        ]
    }

    fn scaled(&self, weight: f64) -> Rgba {
        let [r, g, b] = self.base;
        [
            narrow_channel(f64::from(r) * weight),
            narrow_channel(f64::from(g) * weight),
            narrow_channel(f64::from(b) * weight),
            self.alpha,
        ]
    }

    fn base(&self) -> Rgba {
        let [r, g, b] = self.base;
        [r, g, b, self.alpha]
    }
}

impl std::fmt::Debug for ColorAssigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorAssigner")
            .field("mode", &self.mode)
            .field("base", &self.base)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> ElementWeights {
        ElementWeights::PerElement(vec![1.0, 0.5, 0.0, 2.0])
    }

    #[test]
    fn test_mode_priority() {
        let weighted = weights();
        assert_eq!(ColorMode::resolve(true, &weighted), ColorMode::Random);
        assert_eq!(
            ColorMode::resolve(true, &ElementWeights::Neutral),
            ColorMode::Random
        );
        assert_eq!(ColorMode::resolve(false, &weighted), ColorMode::Efficiency);
        assert_eq!(
            ColorMode::resolve(false, &ElementWeights::Neutral),
            ColorMode::Default
        );
    }

    #[test]
    fn test_default_color_is_base_with_alpha() {
        let mut colors = ColorAssigner::new(ColorMode::Default, &EngineConfig::default(), None);
        assert_eq!(colors.element_color(&weights(), 1), [255, 40, 40, 50]);
        assert_eq!(colors.module_color(&weights(), 0..4), [255, 40, 40, 50]);
    }

    #[test]
    fn test_element_efficiency_scales_base() {
        let mut colors =
            ColorAssigner::new(ColorMode::Efficiency, &EngineConfig::default(), None);
        let w = weights();
        assert_eq!(colors.element_color(&w, 0), [255, 40, 40, 50]);
        assert_eq!(colors.element_color(&w, 1), [127, 20, 20, 50]);
        assert_eq!(colors.element_color(&w, 2), [0, 0, 0, 50]);
    }

    #[test]
    fn test_out_of_range_weight_wraps() {
        let mut colors =
            ColorAssigner::new(ColorMode::Efficiency, &EngineConfig::default(), None);
        // 510 & 0xff = 254, 80 stays 80
        assert_eq!(colors.element_color(&weights(), 3), [254, 80, 80, 50]);
    }

    #[test]
    fn test_module_color_uses_mean_of_range() {
        let mut colors =
            ColorAssigner::new(ColorMode::Efficiency, &EngineConfig::default(), None);
        // mean(1.0, 0.5, 0.0) = 0.5
        assert_eq!(colors.module_color(&weights(), 0..3), [127, 20, 20, 50]);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let config = EngineConfig::default();
        let mut a = ColorAssigner::new(ColorMode::Random, &config, Some(7));
        let mut b = ColorAssigner::new(ColorMode::Random, &config, Some(7));
        let w = ElementWeights::Neutral;
        let first: Vec<Rgba> = (0..16).map(|k| a.element_color(&w, k)).collect();
        let second: Vec<Rgba> = (0..16).map(|k| b.element_color(&w, k)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|c| c[3] == 50));
        assert!(first.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn test_random_ignores_weights() {
        let mut colors =
            ColorAssigner::new(ColorMode::Random, &EngineConfig::default(), Some(1));
        let color = colors.module_color(&weights(), 0..4);
        assert_eq!(color[3], 50);
    }

    #[test]
    fn test_narrow_channel_wraps() {
        assert_eq!(narrow_channel(0.0), 0);
        assert_eq!(narrow_channel(255.0), 255);
        assert_eq!(narrow_channel(256.0), 0);
        assert_eq!(narrow_channel(-0.5), 0);
        assert_eq!(narrow_channel(f64::NAN), 0);
    }
}
