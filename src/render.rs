//! Renderable descriptors
//!
//! The simulation never draws. Each entity exposes a [`Renderable`] and the
//! game state bundles them into a [`Frame`] that an external renderer reads
//! after the tick has finished.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA colours for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 0.82, 0.0, 1.0];
    pub const ORANGE: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
    pub const RED: [f32; 4] = [0.86, 0.24, 0.24, 1.0];
    pub const BLUE: [f32; 4] = [0.35, 0.75, 1.0, 1.0];
    pub const CYAN: [f32; 4] = [0.31, 0.9, 0.9, 1.0];
    pub const GREEN: [f32; 4] = [0.31, 0.86, 0.47, 1.0];
    pub const PURPLE: [f32; 4] = [0.75, 0.47, 1.0, 1.0];
}

/// Geometric primitive the renderer should draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled circle
    Circle { radius: f32 },
    /// Isosceles triangle inscribed in a `2 * half_size` square
    Triangle { half_size: f32, pointing_up: bool },
    /// Centered text label
    Text { text: String },
}

/// Draw layer, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Enemies,
    Boss,
    Projectiles,
    PowerUps,
    Effects,
    Player,
    Overlay,
}

/// Read-only presentation data for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub shape: Shape,
    pub pos: Vec2,
    pub color: [f32; 4],
    /// Secondary colour (outline, inner ring)
    pub accent: Option<[f32; 4]>,
    /// Health bar fill in `[0, 1]`, if the entity shows one
    pub health: Option<f32>,
    pub layer: Layer,
}

impl Renderable {
    pub fn new(shape: Shape, pos: Vec2, color: [f32; 4], layer: Layer) -> Self {
        Self {
            shape,
            pos,
            color,
            accent: None,
            health: None,
            layer,
        }
    }

    pub fn with_accent(mut self, accent: [f32; 4]) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn with_health(mut self, fraction: f32) -> Self {
        self.health = Some(fraction.clamp(0.0, 1.0));
        self
    }
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub rapid_remaining: f32,
    pub shield_remaining: f32,
    /// Boss health fraction while a boss is on screen
    pub boss_health: Option<f32>,
    pub elapsed: f32,
    pub paused: bool,
    pub game_over: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Camera offset applied to the entity layer
    pub shake_offset: Vec2,
    /// Sorted back to front by layer
    pub renderables: Vec<Renderable>,
    pub hud: Hud,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped() {
        let r = Renderable::new(Shape::Circle { radius: 4.0 }, Vec2::ZERO, colors::RED, Layer::Enemies)
            .with_health(-0.5);
        assert_eq!(r.health, Some(0.0));
        let r = r.with_health(3.0);
        assert_eq!(r.health, Some(1.0));
    }

    #[test]
    fn layers_order_back_to_front() {
        assert!(Layer::Enemies < Layer::Projectiles);
        assert!(Layer::Effects < Layer::Player);
        assert!(Layer::Player < Layer::Overlay);
    }
}
