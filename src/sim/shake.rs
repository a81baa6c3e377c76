//! Camera shake accumulator

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::config::ShakeConfig;

/// Bounded, geometrically decaying shake magnitude
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraShake {
    power: f32,
}

impl CameraShake {
    /// Add an impulse, capped at `config.max`
    pub fn bump(&mut self, amount: f32, config: &ShakeConfig) {
        self.power = (self.power + amount).min(config.max);
    }

    /// Apply one tick of decay
    pub fn update(&mut self, config: &ShakeConfig) {
        self.power *= config.decay;
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Random render offset proportional to the current magnitude
    pub fn offset(&self, config: &ShakeConfig, rng: &mut dyn RandomSource) -> Vec2 {
        if self.power < config.threshold {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.range(-self.power, self.power),
            rng.range(-self.power, self.power),
        )
    }
}
