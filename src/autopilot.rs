//! Demo pilot
//!
//! Derives a [`TickInput`] from the current state so the headless binary can
//! play unattended. It only reads the state; the tick stays the single
//! writer.

use glam::Vec2;

use crate::sim::{GameState, TickInput};

/// Vertical look-ahead above the player for incoming fire
const THREAT_WINDOW: f32 = 220.0;
/// Threats closer than this switch to precision movement
const CLOSE_THREAT: f32 = 60.0;
/// Horizontal dead zone when lining up under a target
const ALIGN_TOLERANCE: f32 = 8.0;
/// Preferred height above the bottom of the play area
const CRUISE_HEIGHT: f32 = 100.0;

/// Pick this tick's input for `state`
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    let player = &state.player;
    let registry = &state.registry;
    let arena = &state.config().arena;

    // Anything that would hit the hitbox soon: hostile shots in the lane
    // above, and enemies about to ram
    let lane = |pos: Vec2, radius: f32| {
        let dy = player.pos.y - pos.y;
        (pos.x - player.pos.x).abs() < player.radius + radius + 4.0
            && dy > -player.radius
            && dy < THREAT_WINDOW
    };
    let threat = registry
        .hostile
        .iter()
        .filter(|p| lane(p.pos, p.radius))
        .map(|p| p.pos)
        .chain(
            registry
                .enemies
                .iter()
                .filter(|e| lane(e.pos, e.radius))
                .map(|e| e.pos),
        )
        .min_by(|a, b| {
            a.distance_squared(player.pos)
                .total_cmp(&b.distance_squared(player.pos))
        });

    if let Some(threat) = threat {
        // Sidestep away from the threat, unless the wall is in the way
        let min = arena.play_min();
        let max = arena.play_max();
        let mut go_right = threat.x <= player.pos.x;
        if go_right && player.pos.x >= max.x - player.radius {
            go_right = false;
        } else if !go_right && player.pos.x <= min.x + player.radius {
            go_right = true;
        }
        input.right = go_right;
        input.left = !go_right;
        input.precision = threat.distance(player.pos) < CLOSE_THREAT;
        return input;
    }

    // Safe: grab the nearest power-up
    let pickup = registry.power_ups.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .total_cmp(&b.pos.distance_squared(player.pos))
    });
    if let Some(pickup) = pickup {
        steer_toward(&mut input, player.pos, pickup.pos);
        return input;
    }

    // Otherwise line up under the closest enemy (or the boss) at cruise height
    let target_x = registry
        .enemies
        .iter()
        .map(|e| e.pos)
        .chain(registry.boss.iter().map(|b| b.pos))
        .min_by(|a, b| {
            a.distance_squared(player.pos)
                .total_cmp(&b.distance_squared(player.pos))
        })
        .map(|p| p.x);
    let cruise = Vec2::new(
        target_x.unwrap_or(arena.width / 2.0),
        arena.play_max().y - CRUISE_HEIGHT,
    );
    steer_toward(&mut input, player.pos, cruise);
    input
}

fn steer_toward(input: &mut TickInput, from: Vec2, to: Vec2) {
    let delta = to - from;
    input.left = delta.x < -ALIGN_TOLERANCE;
    input.right = delta.x > ALIGN_TOLERANCE;
    input.up = delta.y < -ALIGN_TOLERANCE;
    input.down = delta.y > ALIGN_TOLERANCE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::{Enemy, FixedRandom, PowerUp, Projectile, RandomSource};

    fn state() -> GameState {
        GameState::with_rng(SimConfig::default(), Box::new(FixedRandom::constant(0.5)))
    }

    fn rng() -> impl RandomSource {
        FixedRandom::constant(0.5)
    }

    #[test]
    fn always_fires() {
        let s = state();
        assert!(autopilot_input(&s).fire);
    }

    #[test]
    fn sidesteps_incoming_fire() {
        let mut s = state();
        let pos = s.player.pos + Vec2::new(-6.0, -120.0);
        s.registry
            .add_projectile(Projectile::hostile(pos, Vec2::new(0.0, 320.0), 1, 5.0));

        let input = autopilot_input(&s);
        assert!(input.right && !input.left);
        assert!(!input.precision);
    }

    #[test]
    fn close_threat_uses_precision() {
        let mut s = state();
        let pos = s.player.pos + Vec2::new(5.0, -30.0);
        s.registry
            .add_projectile(Projectile::hostile(pos, Vec2::new(0.0, 320.0), 1, 5.0));

        let input = autopilot_input(&s);
        assert!(input.left && input.precision);
    }

    #[test]
    fn wall_forces_the_other_way() {
        let mut s = state();
        let max = s.config().arena.play_max();
        s.player.pos.x = max.x;
        let pos = s.player.pos + Vec2::new(-4.0, -100.0);
        s.registry
            .add_projectile(Projectile::hostile(pos, Vec2::new(0.0, 320.0), 1, 5.0));

        let input = autopilot_input(&s);
        assert!(input.left);
    }

    #[test]
    fn collects_power_ups_when_safe() {
        let mut s = state();
        let config = s.config().clone();
        let pos = s.player.pos + Vec2::new(200.0, 0.0);
        s.registry
            .add_power_up(PowerUp::drop_at(pos, &config.power_up, &mut rng()));

        let input = autopilot_input(&s);
        assert!(input.right && !input.left);
    }

    #[test]
    fn lines_up_under_nearest_enemy() {
        let mut s = state();
        let config = s.config().clone();
        let mut enemy = Enemy::spawn(100.0, &config.enemy, &mut rng());
        enemy.pos.y = 300.0;
        s.registry.add_enemy(enemy);

        let input = autopilot_input(&s);
        assert!(input.left && !input.right);
    }
}
