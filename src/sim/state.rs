//! Game state and session-wide bookkeeping

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::player::Player;
use super::registry::EntityRegistry;
use super::rng::{RandomSource, SimRng};
use super::shake::CameraShake;
use super::spawn::SpawnDirector;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::render::{Frame, Hud, Renderable};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until the pause command is issued again
    Paused,
    /// Terminal; only quit is honoured
    GameOver,
}

/// Complete state of one play session
#[derive(Debug)]
pub struct GameState {
    pub(super) config: SimConfig,
    pub phase: GamePhase,
    /// Simulated seconds of unpaused play
    pub elapsed: f32,
    /// Simulated ticks of unpaused play
    pub time_ticks: u64,
    pub player: Player,
    pub registry: EntityRegistry,
    pub director: SpawnDirector,
    pub shake: CameraShake,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Box<dyn RandomSource>,
}

impl GameState {
    /// Fresh session driven by a seeded PCG stream
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, Box::new(SimRng::new(seed)))
    }

    /// Fresh session driven by an arbitrary random source
    pub fn with_rng(config: SimConfig, rng: Box<dyn RandomSource>) -> Self {
        let player = Player::new(&config.player, &config.arena);
        let director = SpawnDirector::new(&config.spawn);
        Self {
            config,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            time_ticks: 0,
            player,
            registry: EntityRegistry::new(),
            director,
            shake: CameraShake::default(),
            events: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Start over with the same configuration
    ///
    /// The random stream is not rewound; a restarted session continues from
    /// where the previous one left off.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.player = Player::new(&self.config.player, &self.config.arena);
        self.registry = EntityRegistry::new();
        self.director = SpawnDirector::new(&self.config.spawn);
        self.shake = CameraShake::default();
        self.events.clear();
        log::info!("Session reset");
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.player.score(),
            hp: self.player.hp(),
            max_hp: self.player.max_hp,
            rapid_remaining: self.player.rapid_remaining,
            shield_remaining: self.player.shield_remaining,
            boss_health: self.registry.boss.as_ref().map(|b| b.health_fraction()),
            elapsed: self.elapsed,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }

    /// Snapshot everything a renderer needs, back to front
    ///
    /// `rng` only feeds the shake offset, so presentation never perturbs the
    /// simulation stream.
    pub fn frame(&self, rng: &mut dyn RandomSource) -> Frame {
        let mut renderables: Vec<Renderable> = Vec::with_capacity(self.registry.len() + 1);
        self.registry.renderables(&mut renderables);
        if !self.is_game_over() {
            renderables.push(self.player.renderable());
        }
        renderables.sort_by_key(|r| r.layer);

        Frame {
            shake_offset: self.shake.offset(&self.config.shake, rng),
            renderables,
            hud: self.hud(),
        }
    }

    /// Check the state-wide invariants that must hold between ticks
    pub fn check_invariants(&self) -> Result<(), SimError> {
        let p = &self.player;
        if p.hp() > p.max_hp {
            return Err(SimError::PlayerHpOutOfRange {
                hp: p.hp(),
                max: p.max_hp,
            });
        }

        let timers = [
            ("invulnerable", p.invulnerable),
            ("rapid_remaining", p.rapid_remaining),
            ("shield_remaining", p.shield_remaining),
            ("fire_cooldown", p.fire.remaining()),
            ("elapsed", self.elapsed),
        ];
        if let Some(&(name, value)) = timers.iter().find(|(_, v)| *v < 0.0) {
            return Err(SimError::NegativeTimer { name, value });
        }

        self.registry.check_invariants()
    }
}
