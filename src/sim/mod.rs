//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, polls devices
//! or sleeps:
//! - Time only advances through [`tick`]
//! - Randomness only comes from an injected [`RandomSource`]
//! - Rendering collaborators read [`GameState::frame`] after the tick

pub mod boss;
pub mod collision;
pub mod entity;
pub mod event;
pub mod player;
pub mod registry;
pub mod rng;
pub mod shake;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use boss::{Boss, BossPhase};
pub use collision::{Aabb, resolve_collisions};
pub use entity::{
    AdvanceCtx, Allegiance, Behavior, Effect, Enemy, FloatingText, Lifecycle, PowerUp, PowerUpKind,
    Projectile,
};
pub use event::GameEvent;
pub use player::{HitSource, Player};
pub use registry::EntityRegistry;
pub use rng::{FixedRandom, RandomSource, SimRng};
pub use shake::CameraShake;
pub use spawn::{SpawnDirector, boss_gate_open, spawn_interval};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};
pub use timer::{Cooldown, decay_timer};
