//! Spawn director: enemy pacing with a difficulty ramp, and the boss gate

use super::boss::Boss;
use super::entity::Enemy;
use super::event::GameEvent;
use super::registry::EntityRegistry;
use super::rng::RandomSource;
use super::timer::Cooldown;
use crate::config::{SimConfig, SpawnConfig};
use crate::error::SimError;

/// Seconds until the next enemy for a session `elapsed` seconds old
///
/// Shrinks linearly with time until the ramp cap is reached, and never drops
/// below `min_interval`.
pub fn spawn_interval(config: &SpawnConfig, elapsed: f32) -> f32 {
    let ramp = (elapsed.max(0.0) / config.ramp_period).min(config.ramp_cap);
    (config.base_interval - ramp).max(config.min_interval)
}

/// Whether a boss should enter this tick
pub fn boss_gate_open(config: &SpawnConfig, elapsed: f32, score: u64, boss_alive: bool) -> bool {
    !boss_alive
        && elapsed > config.boss_min_time
        && (score > config.boss_score_threshold || elapsed > config.boss_forced_time)
}

/// Schedules enemy spawns and boss entry
#[derive(Debug, Clone)]
pub struct SpawnDirector {
    cooldown: Cooldown,
}

impl SpawnDirector {
    pub fn new(config: &SpawnConfig) -> Self {
        Self {
            cooldown: Cooldown::new(config.initial_delay),
        }
    }

    /// Seconds until the next enemy spawn
    pub fn next_spawn_in(&self) -> f32 {
        self.cooldown.remaining()
    }

    /// Advance one tick, spawning into `registry` as needed
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        score: u64,
        config: &SimConfig,
        registry: &mut EntityRegistry,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), SimError> {
        self.cooldown.update(dt);
        if self.cooldown.ready() {
            self.cooldown.set(spawn_interval(&config.spawn, elapsed));

            let arena = &config.arena;
            let x = rng.range(arena.side_margin, arena.width - arena.side_margin);
            let enemy = Enemy::spawn(x, &config.enemy, rng);
            let pos = enemy.pos;
            registry.add_enemy(enemy);
            events.push(GameEvent::EnemySpawned { pos });
            log::debug!("Enemy spawned at x={:.0}, next in {:.2}s", x, self.cooldown.remaining());
        }

        if boss_gate_open(&config.spawn, elapsed, score, registry.has_boss()) {
            registry.spawn_boss(Boss::new(&config.boss, &config.arena))?;
            events.push(GameEvent::BossSpawned);
            log::info!("Boss spawned at t={:.1}s (score {})", elapsed, score);
        }

        Ok(())
    }
}
