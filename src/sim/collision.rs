//! Collision detection and resolution
//!
//! Runs once per tick after every entity has moved, in a fixed order:
//! 1. friendly projectiles vs the boss
//! 2. friendly projectiles vs enemies (one shot may hit several)
//! 3. hostile projectiles vs the player (at most one per tick)
//! 4. enemies ramming the player
//! 5. power-up pickups

use glam::Vec2;

use super::entity::{Effect, FloatingText, PowerUp, PowerUpKind};
use super::event::GameEvent;
use super::player::{HitSource, Player};
use super::registry::EntityRegistry;
use super::rng::RandomSource;
use super::shake::CameraShake;
use crate::config::SimConfig;
use crate::render::colors;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square of side `2 * half_extent` centered on `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        let half = Vec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Half-open containment: the max edges are outside
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Resolve every interaction for this tick
pub fn resolve_collisions(
    player: &mut Player,
    registry: &mut EntityRegistry,
    shake: &mut CameraShake,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    resolve_friendly_fire(player, registry, shake, config, rng, events);
    resolve_hostile_fire(player, registry, shake, config, events);
    resolve_ramming(player, registry, shake, config, events);
    resolve_pickups(player, registry, shake, config, events);
}

/// Steps 1 and 2: each friendly projectile is tested against the boss first,
/// then against the full set of overlapping enemies
fn resolve_friendly_fire(
    player: &mut Player,
    registry: &mut EntityRegistry,
    shake: &mut CameraShake,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let enemies = &mut registry.enemies;
    let boss = &mut registry.boss;
    let effects = &mut registry.effects;
    let texts = &mut registry.texts;
    let mut drops: Vec<PowerUp> = Vec::new();

    registry.friendly.retain(|shot| {
        let boss_hit = boss.as_mut().filter(|b| {
            b.is_targetable() && Aabb::around(b.pos, b.radius).contains_point(shot.pos)
        });
        if let Some(boss) = boss_hit {
            boss.hp -= shot.damage;
            effects.push(Effect::hit(shot.pos, colors::YELLOW, &config.effects));
            player.add_score(config.boss.hit_score);
            shake.bump(config.shake.boss_hit, &config.shake);
            return false;
        }

        let mut hit_any = false;
        for enemy in enemies.iter_mut().filter(|e| !e.is_dead()) {
            if !Aabb::around(enemy.pos, enemy.radius).contains_point(shot.pos) {
                continue;
            }
            hit_any = true;
            enemy.hp -= shot.damage;
            effects.push(Effect::hit(shot.pos, colors::ORANGE, &config.effects));

            if enemy.is_dead() {
                let score = config.enemy.kill_score;
                player.add_score(score);
                texts.push(FloatingText::new(
                    enemy.pos,
                    format!("+{score}"),
                    colors::YELLOW,
                    &config.effects,
                ));
                shake.bump(config.shake.enemy_kill, &config.shake);
                events.push(GameEvent::EnemyDestroyed {
                    pos: enemy.pos,
                    score,
                });

                if rng.chance(config.power_up.drop_chance) {
                    let drop = PowerUp::drop_at(enemy.pos, &config.power_up, rng);
                    events.push(GameEvent::PowerUpDropped {
                        kind: drop.kind,
                        pos: drop.pos,
                    });
                    log::debug!("{:?} power-up dropped", drop.kind);
                    drops.push(drop);
                }
            }
        }
        !hit_any
    });

    enemies.retain(|e| !e.is_dead());
    for drop in drops {
        registry.add_power_up(drop);
    }
}

/// Step 3: the first overlapping hostile projectile, unless invulnerable
fn resolve_hostile_fire(
    player: &mut Player,
    registry: &mut EntityRegistry,
    shake: &mut CameraShake,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    if player.invulnerable > 0.0 {
        return;
    }
    let hitbox = Aabb::around(player.pos, player.radius);
    let Some(index) = registry.hostile.iter().position(|p| hitbox.contains_point(p.pos)) else {
        return;
    };

    let shot = registry.hostile.remove(index);
    let hp_lost = player.take_hit(HitSource::Projectile, &config.player);
    registry.add_effect(Effect::explosion(
        shot.pos,
        colors::RED,
        config.effects.player_hit_duration,
        &config.effects,
    ));
    let impulse = if hp_lost {
        config.shake.player_hit
    } else {
        config.shake.shield_hit
    };
    shake.bump(impulse, &config.shake);
    events.push(GameEvent::PlayerHit {
        source: HitSource::Projectile,
        hp_lost,
        hp: player.hp(),
    });
    log::debug!("Player hit by projectile (hp {}, shield {:.2})", player.hp(), player.shield_remaining);
}

/// Step 4: every overlapping enemy rams; not gated by invulnerability
fn resolve_ramming(
    player: &mut Player,
    registry: &mut EntityRegistry,
    shake: &mut CameraShake,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    let hitbox = Aabb::around(player.pos, player.radius);
    let mut rammed = Vec::new();
    registry.enemies.retain(|e| {
        if hitbox.intersects(&Aabb::around(e.pos, e.radius)) {
            rammed.push(e.pos);
            false
        } else {
            true
        }
    });

    for pos in rammed {
        let hp_lost = player.take_hit(HitSource::Ram, &config.player);
        registry.add_effect(Effect::death(pos, &config.effects));
        shake.bump(config.shake.ram, &config.shake);
        events.push(GameEvent::PlayerHit {
            source: HitSource::Ram,
            hp_lost,
            hp: player.hp(),
        });
        log::debug!("Player rammed (hp {})", player.hp());
    }
}

/// Step 5: consume every overlapping power-up
fn resolve_pickups(
    player: &mut Player,
    registry: &mut EntityRegistry,
    shake: &mut CameraShake,
    config: &SimConfig,
    events: &mut Vec<GameEvent>,
) {
    let hitbox = Aabb::around(player.pos, player.radius);
    let mut collected = Vec::new();
    registry.power_ups.retain(|p| {
        if hitbox.intersects(&Aabb::around(p.pos, p.radius)) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    let cfg = &config.power_up;
    for kind in collected {
        let label = match kind {
            PowerUpKind::Shield => {
                player.shield_remaining += cfg.shield_duration;
                "SHIELD".to_string()
            }
            PowerUpKind::Rapid => {
                player.rapid_remaining += cfg.rapid_duration;
                "RAPID FIRE".to_string()
            }
            PowerUpKind::Heal => {
                player.heal(cfg.heal_amount);
                format!("+{} HP", cfg.heal_amount)
            }
        };
        registry.add_text(FloatingText::new(player.pos, label, kind.color(), &config.effects));
        shake.bump(config.shake.pickup, &config.shake);
        events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {:?}", kind);
    }
}
