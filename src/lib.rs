//! Air Combat - simulation core of a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Tick loop, entities, boss state machine, spawn director, collisions
//! - `config`: Data-driven game balance
//! - `render`: Renderable descriptors handed to an external renderer
//! - `session`: Fixed timestep driver around the tick
//! - `autopilot`: Demo pilot used by the headless binary

pub mod autopilot;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod sim;

pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use session::Session;

use glam::Vec2;

/// Loop timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the session will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp each axis of `pos` into the rectangle `[min, max]`
#[inline]
pub fn clamp_to_rect(pos: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(pos.x.max(min.x).min(max.x), pos.y.max(min.y).min(max.y))
}
