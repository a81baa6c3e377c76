//! Countdown timer

use serde::{Deserialize, Serialize};

/// Countdown that is ready once its remaining time reaches zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// A cooldown that becomes ready after `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    /// Advance by `dt` seconds, never going below zero
    #[inline]
    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Overwrite the remaining time
    #[inline]
    pub fn set(&mut self, duration: f32) {
        self.remaining = duration;
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Decay a linear timer by `dt`, floored at zero
#[inline]
pub fn decay_timer(value: f32, dt: f32) -> f32 {
    (value - dt).max(0.0)
}
