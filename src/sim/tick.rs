//! Fixed timestep simulation tick
//!
//! Order within a tick: player (and fire), spawn director, every entity
//! category, collision resolution, terminal check, shake decay.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::entity::Effect;
use super::event::GameEvent;
use super::state::{GamePhase, GameState};
use crate::error::SimError;

/// Input commands for a single tick
///
/// Missing keys deserialize to `false`, i.e. no input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Slow, precise movement
    pub precision: bool,
    /// Fire held
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// End the session at this tick boundary (one-shot)
    pub quit: bool,
}

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Paused,
    /// Terminal; nothing changes until [`GameState::reset`]
    GameOver,
    Quit,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<TickOutcome, SimError> {
    if input.quit {
        log::info!("Quit requested at t={:.1}s", state.elapsed);
        return Ok(TickOutcome::Quit);
    }
    state.events.clear();

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return Ok(TickOutcome::Paused),
        GamePhase::GameOver => return Ok(TickOutcome::GameOver),
        GamePhase::Playing => {}
    }

    let config = &state.config;
    let rng = &mut *state.rng;

    state.player.update(dt, input, &config.player, &config.arena);
    if input.fire {
        let mut shots = Vec::new();
        if state.player.try_fire(&config.player, &mut shots) {
            for shot in shots {
                state.registry.add_projectile(shot);
            }
        }
    }

    state.elapsed += dt;
    state.time_ticks += 1;

    state.director.update(
        dt,
        state.elapsed,
        state.player.score(),
        config,
        &mut state.registry,
        rng,
        &mut state.events,
    )?;
    state.registry.advance_all(dt, config, rng, &mut state.events);
    resolve_collisions(
        &mut state.player,
        &mut state.registry,
        &mut state.shake,
        config,
        rng,
        &mut state.events,
    );

    if state.player.is_dead() {
        enter_game_over(state);
    }

    state.shake.update(&state.config.shake);
    state.check_invariants()?;

    Ok(if state.is_game_over() {
        TickOutcome::GameOver
    } else {
        TickOutcome::Running
    })
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;

    let cfg = &state.config.effects;
    let spread = cfg.game_over_spread;
    for _ in 0..cfg.game_over_explosions {
        let offset = Vec2::new(
            state.rng.range(-spread, spread),
            state.rng.range(-spread, spread),
        );
        state.registry.add_effect(Effect::death(state.player.pos + offset, cfg));
    }

    let score = state.player.score();
    state.events.push(GameEvent::GameOver {
        score,
        elapsed: state.elapsed,
    });
    log::info!("Game over: score {} after {:.1}s", score, state.elapsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::SIM_DT;
    use crate::sim::entity::{Enemy, Projectile};
    use crate::sim::rng::FixedRandom;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::with_rng(SimConfig::default(), Box::new(FixedRandom::constant(0.5)))
    }

    fn pause() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_advances_time() {
        let mut s = state();
        assert_eq!(tick(&mut s, &TickInput::default(), SIM_DT), Ok(TickOutcome::Running));
        assert_eq!(s.time_ticks, 1);
        assert!((s.elapsed - SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_tick_fire_spawns_triple_shot() {
        let mut s = state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT).unwrap();
        assert_eq!(s.registry.friendly.len(), 3);
        // Fired before entities advance, so the shots already moved this tick
        let y0 = s.player.pos.y - s.player.radius;
        assert!(s.registry.friendly.iter().all(|p| p.pos.y < y0));

        tick(&mut s, &input, SIM_DT).unwrap();
        assert_eq!(s.registry.friendly.len(), 3);
    }

    #[test]
    fn test_tick_pause() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), SIM_DT).unwrap();

        assert_eq!(tick(&mut s, &pause(), SIM_DT), Ok(TickOutcome::Paused));
        assert_eq!(s.phase, GamePhase::Paused);
        assert_eq!(s.events, vec![GameEvent::Paused]);
        let ticks = s.time_ticks;

        for _ in 0..30 {
            assert_eq!(tick(&mut s, &TickInput::default(), SIM_DT), Ok(TickOutcome::Paused));
        }
        assert_eq!(s.time_ticks, ticks);

        assert_eq!(tick(&mut s, &pause(), SIM_DT), Ok(TickOutcome::Running));
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.events, vec![GameEvent::Resumed]);
        assert_eq!(s.time_ticks, ticks + 1);
    }

    #[test]
    fn test_quit_in_any_phase() {
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        let mut s = state();
        assert_eq!(tick(&mut s, &quit, SIM_DT), Ok(TickOutcome::Quit));
        assert_eq!(s.time_ticks, 0);

        s.phase = GamePhase::Paused;
        assert_eq!(tick(&mut s, &quit, SIM_DT), Ok(TickOutcome::Quit));
        s.phase = GamePhase::GameOver;
        assert_eq!(tick(&mut s, &quit, SIM_DT), Ok(TickOutcome::Quit));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut s = state();
        s.player.set_hp(1);
        let pos = s.player.pos;
        s.registry
            .add_projectile(Projectile::hostile(pos, Vec2::ZERO, 1, 5.0));

        assert_eq!(tick(&mut s, &TickInput::default(), SIM_DT), Ok(TickOutcome::GameOver));
        assert_eq!(s.player.hp(), 0);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(matches!(s.events.last(), Some(GameEvent::GameOver { .. })));
        // Player hit flash plus the game-over burst
        assert_eq!(s.registry.effects.len(), 11);

        let ticks = s.time_ticks;
        let enemies = s.registry.enemies.len();
        let fire = TickInput {
            fire: true,
            pause: true,
            ..Default::default()
        };
        for _ in 0..600 {
            assert_eq!(tick(&mut s, &fire, SIM_DT), Ok(TickOutcome::GameOver));
        }
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.hp(), 0);
        assert_eq!(s.player.score(), 0);
        assert_eq!(s.time_ticks, ticks);
        assert_eq!(s.registry.enemies.len(), enemies);
        assert!(s.registry.friendly.is_empty());
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let mut s = state();
        s.player.set_hp(0);
        tick(&mut s, &TickInput::default(), SIM_DT).unwrap();
        assert!(s.is_game_over());

        s.reset();
        assert_eq!(tick(&mut s, &TickInput::default(), SIM_DT), Ok(TickOutcome::Running));
    }

    #[test]
    fn test_enemy_killed_by_player_fire() {
        let mut s = state();
        let config = s.config().clone();
        let mut enemy = Enemy::spawn(s.player.pos.x, &config.enemy, &mut FixedRandom::constant(0.5));
        enemy.pos.y = s.player.pos.y - 300.0;
        enemy.hp = 1;
        enemy.fire.set(100.0);
        s.registry.add_enemy(enemy);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut s, &input, SIM_DT).unwrap();
        }
        assert_eq!(s.player.score(), 10);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(SimConfig::default(), 99_999);
        let mut b = GameState::new(SimConfig::default(), 99_999);
        let input = TickInput {
            fire: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..900 {
            let ra = tick(&mut a, &input, SIM_DT);
            let rb = tick(&mut b, &input, SIM_DT);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.player.score(), b.player.score());
        assert_eq!(a.player.hp(), b.player.hp());
        assert_eq!(a.registry.len(), b.registry.len());
        let xs_a: Vec<f32> = a.registry.enemies.iter().map(|e| e.pos.x).collect();
        let xs_b: Vec<f32> = b.registry.enemies.iter().map(|e| e.pos.x).collect();
        assert_eq!(xs_a, xs_b);
    }

    fn input_from_bits(bits: u8) -> TickInput {
        TickInput {
            up: bits & 1 != 0,
            down: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
            precision: bits & 16 != 0,
            fire: bits & 32 != 0,
            pause: false,
            quit: false,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn invariants_hold_across_random_play(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any::<u8>(), 100..400),
        ) {
            let mut config = SimConfig::default();
            // Bring the boss in almost immediately
            config.spawn.boss_min_time = 0.0;
            config.spawn.boss_forced_time = 0.1;
            let mut s = GameState::new(config, seed);

            let mut last_elapsed = 0.0;
            let mut last_score = 0;
            for bits in inputs {
                let outcome = tick(&mut s, &input_from_bits(bits), SIM_DT);
                prop_assert!(outcome.is_ok());
                prop_assert!(s.player.hp() <= s.player.max_hp);
                prop_assert!(s.player.shield_remaining >= 0.0);
                prop_assert!(s.player.rapid_remaining >= 0.0);
                prop_assert!(s.player.invulnerable >= 0.0);
                prop_assert!(s.elapsed >= last_elapsed);
                prop_assert!(s.player.score() >= last_score);
                let bosses = s.events.iter().filter(|e| **e == GameEvent::BossSpawned).count();
                prop_assert!(bosses <= 1);
                last_elapsed = s.elapsed;
                last_score = s.player.score();
            }
        }
    }
}
