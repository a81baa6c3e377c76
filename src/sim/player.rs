//! Player controller: movement, firing, timers and damage intake

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Projectile;
use super::tick::TickInput;
use super::timer::{Cooldown, decay_timer};
use crate::clamp_to_rect;
use crate::config::{ArenaConfig, PlayerConfig};
use crate::render::{Layer, Renderable, Shape, colors};

/// What struck the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    /// Hostile projectile; gated by invulnerability
    Projectile,
    /// Enemy collision; always applies
    Ram,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub max_hp: u32,
    /// Seconds during which projectile hits are ignored
    pub invulnerable: f32,
    pub fire: Cooldown,
    pub rapid_remaining: f32,
    pub shield_remaining: f32,
    hp: u32,
    /// Only ever increases
    score: u64,
}

impl Player {
    pub fn new(config: &PlayerConfig, arena: &ArenaConfig) -> Self {
        Self {
            pos: Vec2::new(arena.width / 2.0, arena.height - config.spawn_height),
            vel: Vec2::ZERO,
            radius: config.radius,
            max_hp: config.max_hp,
            invulnerable: 0.0,
            fire: Cooldown::default(),
            rapid_remaining: 0.0,
            shield_remaining: 0.0,
            hp: config.max_hp,
            score: 0,
        }
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Set hit points directly, clamped to `max_hp`
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Restore hit points without exceeding the maximum
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Move and tick down timers
    pub fn update(&mut self, dt: f32, input: &TickInput, config: &PlayerConfig, arena: &ArenaConfig) {
        let speed = if input.precision {
            config.precision_speed
        } else {
            config.speed
        };

        let mut dir = Vec2::ZERO;
        if input.left {
            dir.x -= 1.0;
        }
        if input.right {
            dir.x += 1.0;
        }
        if input.up {
            dir.y -= 1.0;
        }
        if input.down {
            dir.y += 1.0;
        }
        self.vel = dir.normalize_or_zero() * speed;
        self.pos = clamp_to_rect(self.pos + self.vel * dt, arena.play_min(), arena.play_max());

        self.fire.update(dt);
        self.invulnerable = decay_timer(self.invulnerable, dt);
        self.rapid_remaining = decay_timer(self.rapid_remaining, dt);
        self.shield_remaining = decay_timer(self.shield_remaining, dt);
    }

    /// Current fire interval, shortened while rapid fire is active
    pub fn fire_interval(&self, config: &PlayerConfig) -> f32 {
        if self.rapid_remaining > 0.0 {
            config.fire_interval * config.rapid_multiplier
        } else {
            config.fire_interval
        }
    }

    /// Fire a triple shot if the cooldown allows it
    ///
    /// Returns true if projectiles were pushed to `out`.
    pub fn try_fire(&mut self, config: &PlayerConfig, out: &mut Vec<Projectile>) -> bool {
        if !self.fire.ready() {
            return false;
        }
        self.fire.set(self.fire_interval(config));

        for dx in config.shot_offsets {
            out.push(Projectile::friendly(
                self.pos + Vec2::new(dx, -self.radius),
                Vec2::new(dx * config.shot_skew, -config.shot_speed),
                config.shot_damage,
                config.shot_radius,
            ));
        }
        true
    }

    /// Apply one hit; the shield absorbs it if any shield time remains
    ///
    /// Returns true if hit points were lost. Invulnerability is reset either
    /// way; gating on it is the caller's job.
    pub fn take_hit(&mut self, source: HitSource, config: &PlayerConfig) -> bool {
        let (shield_cost, recovery) = match source {
            HitSource::Projectile => (config.projectile_shield_cost, config.projectile_invulnerability),
            HitSource::Ram => (config.ram_shield_cost, config.ram_invulnerability),
        };

        let hp_lost = if self.shield_remaining > 0.0 {
            self.shield_remaining = (self.shield_remaining - shield_cost).max(0.0);
            false
        } else {
            self.hp = self.hp.saturating_sub(1);
            true
        };
        self.invulnerable = recovery;
        hp_lost
    }

    pub fn renderable(&self) -> Renderable {
        let r = Renderable::new(
            Shape::Triangle {
                half_size: self.radius,
                pointing_up: true,
            },
            self.pos,
            colors::BLUE,
            Layer::Player,
        )
        .with_health(self.hp as f32 / self.max_hp.max(1) as f32);
        if self.shield_remaining > 0.0 {
            r.with_accent(colors::CYAN)
        } else {
            r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> (Player, PlayerConfig, ArenaConfig) {
        let config = PlayerConfig::default();
        let arena = ArenaConfig::default();
        (Player::new(&config, &arena), config, arena)
    }

    #[test]
    fn spawns_centered_near_bottom_with_full_hp() {
        let (p, _, _) = player();
        assert_eq!(p.pos, Vec2::new(450.0, 1060.0));
        assert_eq!(p.hp(), 5);
        assert_eq!(p.score(), 0);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let (mut p, config, arena) = player();
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        p.update(0.1, &input, &config, &arena);
        assert!((p.vel.length() - config.speed).abs() < 1e-3);
    }

    #[test]
    fn precision_modifier_slows_movement() {
        let (mut p, config, arena) = player();
        let input = TickInput {
            left: true,
            precision: true,
            ..Default::default()
        };
        p.update(0.1, &input, &config, &arena);
        assert!((p.vel.x + config.precision_speed).abs() < 1e-3);
        assert!((p.pos.x - (450.0 - 26.0)).abs() < 1e-3);
    }

    #[test]
    fn position_is_clamped_to_play_area() {
        let (mut p, config, arena) = player();
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            p.update(0.1, &input, &config, &arena);
        }
        assert_eq!(p.pos, Vec2::new(40.0, 150.0));
    }

    #[test]
    fn fires_three_projectiles_with_spread() {
        let (mut p, config, _) = player();
        let mut out = Vec::new();
        assert!(p.try_fire(&config, &mut out));
        assert_eq!(out.len(), 3);
        assert!(out[0].vel.x < 0.0 && out[1].vel.x == 0.0 && out[2].vel.x > 0.0);
        assert!(out.iter().all(|s| s.vel.y == -config.shot_speed));
        assert!(!p.try_fire(&config, &mut out));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn rapid_fire_shortens_interval() {
        let (mut p, config, _) = player();
        p.rapid_remaining = 2.0;
        let mut out = Vec::new();
        p.try_fire(&config, &mut out);
        assert!((p.fire.remaining() - 0.16 * 0.45).abs() < 1e-6);
    }

    #[test]
    fn shield_absorbs_projectile_and_clamps_at_zero() {
        let (mut p, config, _) = player();
        p.shield_remaining = 0.2;
        assert!(!p.take_hit(HitSource::Projectile, &config));
        assert_eq!(p.shield_remaining, 0.0);
        assert_eq!(p.hp(), 5);
        assert_eq!(p.invulnerable, config.projectile_invulnerability);
    }

    #[test]
    fn unshielded_hit_costs_one_hp() {
        let (mut p, config, _) = player();
        assert!(p.take_hit(HitSource::Ram, &config));
        assert_eq!(p.hp(), 4);
        assert_eq!(p.invulnerable, config.ram_invulnerability);
    }

    #[test]
    fn heal_never_exceeds_max() {
        let (mut p, _, _) = player();
        p.set_hp(4);
        p.heal(2);
        assert_eq!(p.hp(), 5);
        p.set_hp(99);
        assert_eq!(p.hp(), 5);
    }

    proptest! {
        #[test]
        fn timers_never_negative(
            invuln in 0.0f32..2.0,
            rapid in 0.0f32..8.0,
            shield in 0.0f32..8.0,
            dts in prop::collection::vec(0.0f32..0.5, 1..40),
        ) {
            let (mut p, config, arena) = player();
            p.invulnerable = invuln;
            p.rapid_remaining = rapid;
            p.shield_remaining = shield;
            for dt in dts {
                p.update(dt, &TickInput::default(), &config, &arena);
                prop_assert!(p.invulnerable >= 0.0);
                prop_assert!(p.rapid_remaining >= 0.0);
                prop_assert!(p.shield_remaining >= 0.0);
            }
        }

        #[test]
        fn hp_stays_in_bounds(hits in prop::collection::vec(any::<bool>(), 0..20), heals in 0u32..10) {
            let (mut p, config, _) = player();
            for ram in hits {
                let source = if ram { HitSource::Ram } else { HitSource::Projectile };
                p.take_hit(source, &config);
                prop_assert!(p.hp() <= p.max_hp);
            }
            p.heal(heals);
            prop_assert!(p.hp() <= p.max_hp);
        }
    }
}
