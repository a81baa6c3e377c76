//! Transient entities and their per-tick behavior
//!
//! Every non-player entity implements [`Behavior`]: the registry advances it
//! once per tick and drops it as soon as it reports [`Lifecycle::Expired`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::rng::RandomSource;
use super::timer::Cooldown;
use crate::config::{EffectConfig, EnemyConfig, PowerUpConfig, SimConfig};
use crate::render::{Layer, Renderable, Shape, colors};

/// Whether an entity survives the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Everything an entity may touch while advancing
pub struct AdvanceCtx<'a> {
    pub config: &'a SimConfig,
    pub rng: &'a mut dyn RandomSource,
    /// Projectiles fired this tick, added to the registry after the pass
    pub spawned: &'a mut Vec<Projectile>,
    /// Effects emitted this tick
    pub effects: &'a mut Vec<Effect>,
    pub events: &'a mut Vec<GameEvent>,
}

/// Per-tick update and presentation capability
pub trait Behavior {
    fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx<'_>) -> Lifecycle;
    fn renderable(&self) -> Renderable;
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allegiance {
    /// Fired by the player
    Friendly,
    /// Fired by an enemy or the boss
    Hostile,
}

/// A bullet in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub radius: f32,
    pub color: [f32; 4],
    /// Fixed at construction
    allegiance: Allegiance,
}

impl Projectile {
    pub fn new(allegiance: Allegiance, pos: Vec2, vel: Vec2, damage: i32, radius: f32) -> Self {
        let color = match allegiance {
            Allegiance::Friendly => colors::YELLOW,
            Allegiance::Hostile => colors::RED,
        };
        Self {
            id: 0,
            pos,
            vel,
            damage,
            radius,
            color,
            allegiance,
        }
    }

    pub fn friendly(pos: Vec2, vel: Vec2, damage: i32, radius: f32) -> Self {
        Self::new(Allegiance::Friendly, pos, vel, damage, radius)
    }

    pub fn hostile(pos: Vec2, vel: Vec2, damage: i32, radius: f32) -> Self {
        Self::new(Allegiance::Hostile, pos, vel, damage, radius)
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn allegiance(&self) -> Allegiance {
        self.allegiance
    }
}

impl Behavior for Projectile {
    fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        self.pos += self.vel * dt;
        let arena = &ctx.config.arena;
        if arena.is_outside(self.pos, arena.projectile_margin) {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Circle { radius: self.radius },
            self.pos,
            self.color,
            Layer::Projectiles,
        )
    }
}

/// A regular enemy descending toward the bottom of the screen
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Sampled once at spawn
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub radius: f32,
    pub fire: Cooldown,
}

impl Enemy {
    /// Roll a new enemy at horizontal position `x`, just above the screen
    pub fn spawn(x: f32, config: &EnemyConfig, rng: &mut dyn RandomSource) -> Self {
        let speed = rng.range(config.min_speed, config.max_speed);
        let first_shot = rng.range(config.first_shot_min, config.first_shot_max);
        Self {
            id: 0,
            pos: Vec2::new(x, config.spawn_y),
            speed,
            hp: config.hp,
            max_hp: config.hp,
            radius: config.radius,
            fire: Cooldown::new(first_shot),
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

impl Behavior for Enemy {
    fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        let cfg = &ctx.config.enemy;
        self.pos.y += self.speed * dt;

        self.fire.update(dt);
        if self.fire.ready() {
            self.fire.set(ctx.rng.range(cfg.reload_min, cfg.reload_max));
            ctx.spawned.push(Projectile::hostile(
                self.pos + Vec2::new(0.0, self.radius),
                Vec2::new(0.0, cfg.shot_speed),
                cfg.shot_damage,
                cfg.shot_radius,
            ));
        }

        let arena = &ctx.config.arena;
        if self.pos.y > arena.height + arena.enemy_exit_margin {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Triangle {
                half_size: self.radius,
                pointing_up: false,
            },
            self.pos,
            colors::RED,
            Layer::Enemies,
        )
        .with_health(self.hp as f32 / self.max_hp.max(1) as f32)
    }
}

/// Power-up flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs hits instead of hit points
    Shield,
    /// Shortens the fire interval
    Rapid,
    /// Restores hit points
    Heal,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Rapid, PowerUpKind::Heal];

    pub fn color(self) -> [f32; 4] {
        match self {
            PowerUpKind::Shield => colors::CYAN,
            PowerUpKind::Rapid => colors::PURPLE,
            PowerUpKind::Heal => colors::GREEN,
        }
    }
}

/// A falling pickup dropped by a destroyed enemy
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub remaining: f32,
    pub radius: f32,
}

impl PowerUp {
    /// Roll a random kind and drift at `pos`
    pub fn drop_at(pos: Vec2, config: &PowerUpConfig, rng: &mut dyn RandomSource) -> Self {
        let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
        let vel = Vec2::new(
            rng.range(-config.drift, config.drift),
            rng.range(config.fall_min, config.fall_max),
        );
        Self {
            id: 0,
            kind,
            pos,
            vel,
            remaining: config.lifetime,
            radius: config.radius,
        }
    }
}

impl Behavior for PowerUp {
    fn advance(&mut self, dt: f32, ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        let cfg = &ctx.config.power_up;
        self.remaining -= dt;
        self.pos += self.vel * dt;
        self.vel.y = (self.vel.y + cfg.gravity * dt).min(cfg.max_fall_speed);

        let arena = &ctx.config.arena;
        if self.remaining <= 0.0 || self.pos.y > arena.height + arena.power_up_exit_margin {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Circle { radius: self.radius },
            self.pos,
            self.kind.color(),
            Layer::PowerUps,
        )
        .with_accent(colors::WHITE)
    }
}

/// Expanding explosion flash
#[derive(Debug, Clone)]
pub struct Effect {
    pub pos: Vec2,
    pub remaining: f32,
    pub duration: f32,
    pub max_radius: f32,
    pub color: [f32; 4],
}

impl Effect {
    pub fn explosion(pos: Vec2, color: [f32; 4], duration: f32, config: &EffectConfig) -> Self {
        Self {
            pos,
            remaining: duration,
            duration,
            max_radius: config.explosion_radius,
            color,
        }
    }

    /// Full-size death explosion
    pub fn death(pos: Vec2, config: &EffectConfig) -> Self {
        Self::explosion(pos, colors::ORANGE, config.explosion_duration, config)
    }

    /// Short impact flash
    pub fn hit(pos: Vec2, color: [f32; 4], config: &EffectConfig) -> Self {
        Self::explosion(pos, color, config.hit_duration, config)
    }

    /// Current radius; grows as the effect runs out
    pub fn radius(&self) -> f32 {
        let p = self.remaining.max(0.0) / self.duration.max(f32::EPSILON);
        self.max_radius * (1.0 - p)
    }
}

impl Behavior for Effect {
    fn advance(&mut self, dt: f32, _ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Circle {
                radius: self.radius(),
            },
            self.pos,
            self.color,
            Layer::Effects,
        )
        .with_accent(colors::YELLOW)
    }
}

/// Rising text label ("+10", "SHIELD", ...)
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub color: [f32; 4],
    pub remaining: f32,
    pub vel: Vec2,
}

impl FloatingText {
    pub fn new(pos: Vec2, text: impl Into<String>, color: [f32; 4], config: &EffectConfig) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            remaining: config.text_lifetime,
            vel: Vec2::new(0.0, -config.text_rise_speed),
        }
    }
}

impl Behavior for FloatingText {
    fn advance(&mut self, dt: f32, _ctx: &mut AdvanceCtx<'_>) -> Lifecycle {
        self.remaining -= dt;
        self.pos += self.vel * dt;
        if self.remaining <= 0.0 {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }

    fn renderable(&self) -> Renderable {
        Renderable::new(
            Shape::Text {
                text: self.text.clone(),
            },
            self.pos,
            self.color,
            Layer::Overlay,
        )
    }
}
