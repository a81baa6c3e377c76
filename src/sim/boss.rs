//! Boss state machine
//!
//! `Entering -> Fighting -> Defeated`. Damage is applied by the collision
//! resolver; the boss only reacts to its hit points reaching zero.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{AdvanceCtx, Behavior, Effect, Lifecycle, Projectile};
use super::event::GameEvent;
use super::rng::RandomSource;
use super::timer::Cooldown;
use crate::config::{ArenaConfig, BossConfig};
use crate::polar_to_cartesian;
use crate::render::{Layer, Renderable, Shape, colors};

/// Boss phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending into view; cannot attack yet
    Entering,
    /// Swaying and firing radial bursts
    Fighting,
    /// Terminal; the boss is removed this tick
    Defeated,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub radius: f32,
    pub phase: BossPhase,
    /// Horizontal position the boss sways toward
    pub target_x: f32,
    pub attack: Cooldown,
}

impl Boss {
    pub fn new(config: &BossConfig, arena: &ArenaConfig) -> Self {
        Self {
            pos: Vec2::new(arena.width / 2.0, config.entry_y),
            hp: config.hp,
            max_hp: config.hp,
            radius: config.radius,
            phase: BossPhase::Entering,
            target_x: arena.width / 2.0,
            attack: Cooldown::new(config.attack_interval),
        }
    }

    /// Whether friendly projectiles can still hit it
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.phase != BossPhase::Defeated && self.hp > 0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.hp as f32 / self.max_hp.max(1) as f32).clamp(0.0, 1.0)
    }

    fn sway(&mut self, dt: f32, config: &BossConfig, arena: &ArenaConfig, rng: &mut dyn RandomSource) {
        if (self.pos.x - self.target_x).abs() < config.target_tolerance {
            self.target_x = rng.range(config.sway_margin, arena.width - config.sway_margin);
        }
        let dir = (self.target_x - self.pos.x).signum();
        self.pos.x += dir * config.speed * dt;
    }

    /// Evenly spaced ring of hostile projectiles with a little angular jitter
    fn burst(&self, config: &BossConfig, rng: &mut dyn RandomSource, out: &mut Vec<Projectile>) {
        let count = config.burst_count.max(1);
        let step = TAU / count as f32;
        for i in 0..count {
            let angle = i as f32 * step + rng.range(-config.burst_jitter, config.burst_jitter);
            out.push(
                Projectile::hostile(
                    self.pos,
                    polar_to_cartesian(config.burst_speed, angle),
                    config.shot_damage,
                    config.shot_radius,
                )
                .with_color(colors::ORANGE),
            );
        }
    }

    fn explode(&mut self, ctx: &mut AdvanceCtx<'_>) {
        let cfg = &ctx.config.boss;
        self.phase = BossPhase::Defeated;
        for _ in 0..cfg.death_explosions {
            let offset = Vec2::new(
                ctx.rng.range(-cfg.death_spread.x, cfg.death_spread.x),
                ctx.rng.range(-cfg.death_spread.y, cfg.death_spread.y),
            );
            ctx.effects.push(Effect::death(self.pos + offset, &ctx.config.effects));
        }
        ctx.events.push(GameEvent::BossDefeated { pos: self.pos });
        log::info!("Boss defeated at ({:.0}, {:.0})", self.pos.x, self.pos.y);
    }
}

impl Behavior for Boss {
    fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        if self.phase == BossPhase::Defeated {
            return Lifecycle::Expired;
        }
        if self.hp <= 0 {
            self.explode(ctx);
            return Lifecycle::Expired;
        }

        let cfg = &ctx.config.boss;
        match self.phase {
            BossPhase::Entering => {
                self.pos.y += cfg.entry_speed * dt;
                if self.pos.y >= cfg.fight_y {
                    self.phase = BossPhase::Fighting;
                    ctx.events.push(GameEvent::BossEngaged);
                    log::info!("Boss engaged");
                }
            }
            BossPhase::Fighting => {
                self.sway(dt, cfg, &ctx.config.arena, ctx.rng);
                self.attack.update(dt);
                if self.attack.ready() {
                    self.attack.set(cfg.attack_interval);
                    self.burst(cfg, ctx.rng, ctx.spawned);
                }
            }
            BossPhase::Defeated => {}
        }
        Lifecycle::Alive
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Circle { radius: self.radius },
            self.pos,
            colors::PURPLE,
            Layer::Boss,
        )
        .with_health(self.health_fraction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::entity::Allegiance;
    use crate::sim::rng::FixedRandom;

    struct Scratch {
        config: SimConfig,
        rng: FixedRandom,
        spawned: Vec<Projectile>,
        effects: Vec<Effect>,
        events: Vec<GameEvent>,
    }

    impl Scratch {
        fn new(rng: FixedRandom) -> Self {
            Self {
                config: SimConfig::default(),
                rng,
                spawned: Vec::new(),
                effects: Vec::new(),
                events: Vec::new(),
            }
        }

        fn step(&mut self, boss: &mut Boss, dt: f32) -> Lifecycle {
            let mut ctx = AdvanceCtx {
                config: &self.config,
                rng: &mut self.rng,
                spawned: &mut self.spawned,
                effects: &mut self.effects,
                events: &mut self.events,
            };
            boss.advance(dt, &mut ctx)
        }
    }

    fn boss(s: &Scratch) -> Boss {
        Boss::new(&s.config.boss, &s.config.arena)
    }

    #[test]
    fn enters_then_fights() {
        let mut s = Scratch::new(FixedRandom::constant(0.5));
        let mut b = boss(&s);
        assert_eq!(b.phase, BossPhase::Entering);
        // -120 -> 200 at 100 units/s takes 3.2s
        for _ in 0..31 {
            s.step(&mut b, 0.1);
        }
        assert_eq!(b.phase, BossPhase::Entering);
        assert!(s.spawned.is_empty());
        s.step(&mut b, 0.1);
        s.step(&mut b, 0.1);
        assert_eq!(b.phase, BossPhase::Fighting);
        assert_eq!(s.events, vec![GameEvent::BossEngaged]);
    }

    #[test]
    fn fires_radial_burst_when_attack_ready() {
        let mut s = Scratch::new(FixedRandom::constant(0.5));
        let mut b = boss(&s);
        b.phase = BossPhase::Fighting;
        b.pos.y = 200.0;
        b.attack.set(0.0);
        s.step(&mut b, 0.01);

        assert_eq!(s.spawned.len(), 14);
        for shot in &s.spawned {
            assert_eq!(shot.allegiance(), Allegiance::Hostile);
            assert!((shot.vel.length() - 260.0).abs() < 1e-2);
        }
        // Zero jitter with a 0.5 sample: first shot points straight right
        assert!(s.spawned[0].vel.y.abs() < 1e-3);
        assert!((b.attack.remaining() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn resamples_target_inside_sway_range() {
        let mut s = Scratch::new(FixedRandom::constant(0.0));
        let mut b = boss(&s);
        b.phase = BossPhase::Fighting;
        b.attack.set(100.0);
        s.step(&mut b, 0.01);
        assert_eq!(b.target_x, 120.0);
        let x = b.pos.x;
        s.step(&mut b, 0.1);
        assert!(b.pos.x < x);
    }

    #[test]
    fn defeat_emits_explosions_and_expires() {
        let mut s = Scratch::new(FixedRandom::constant(0.5));
        let mut b = boss(&s);
        b.phase = BossPhase::Fighting;
        b.hp = 0;
        assert_eq!(s.step(&mut b, 0.01), Lifecycle::Expired);
        assert_eq!(b.phase, BossPhase::Defeated);
        assert_eq!(s.effects.len(), 8);
        assert!(matches!(s.events[0], GameEvent::BossDefeated { .. }));
        assert_eq!(s.step(&mut b, 0.01), Lifecycle::Expired);
        assert_eq!(s.effects.len(), 8);
    }

    #[test]
    fn never_changes_hit_points() {
        let mut s = Scratch::new(FixedRandom::cycle(vec![0.1, 0.9, 0.4]));
        let mut b = boss(&s);
        for _ in 0..600 {
            s.step(&mut b, 1.0 / 60.0);
        }
        assert_eq!(b.hp, b.max_hp);
        assert!(b.is_targetable());
    }
}
