//! Per-tick game events

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::PowerUpKind;
use super::player::HitSource;

/// Something notable that happened during a tick
///
/// Events are cleared at the start of every tick; consumers (logging, audio,
/// tests) read them right after the tick returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { pos: Vec2 },
    EnemyDestroyed { pos: Vec2, score: u64 },
    BossSpawned,
    /// Boss finished its entry and started attacking
    BossEngaged,
    BossDefeated { pos: Vec2 },
    PlayerHit { source: HitSource, hp_lost: bool, hp: u32 },
    PowerUpDropped { kind: PowerUpKind, pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    Paused,
    Resumed,
    GameOver { score: u64, elapsed: f32 },
}
