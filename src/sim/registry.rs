//! Categorized storage for every live non-player entity

use super::boss::Boss;
use super::entity::{
    AdvanceCtx, Allegiance, Behavior, Effect, Enemy, FloatingText, Lifecycle, PowerUp, Projectile,
};
use super::event::GameEvent;
use super::rng::RandomSource;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::render::Renderable;

/// Live entities grouped by category
///
/// Groups are unordered. Entities leave a group only through their own
/// [`Behavior::advance`] or through the collision resolver.
#[derive(Debug)]
pub struct EntityRegistry {
    pub enemies: Vec<Enemy>,
    /// At most one
    pub boss: Option<Boss>,
    pub friendly: Vec<Projectile>,
    pub hostile: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub effects: Vec<Effect>,
    pub texts: Vec<FloatingText>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            boss: None,
            friendly: Vec::new(),
            hostile: Vec::new(),
            power_ups: Vec::new(),
            effects: Vec::new(),
            texts: Vec::new(),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Store a projectile in the group matching its allegiance
    pub fn add_projectile(&mut self, mut projectile: Projectile) -> u32 {
        let id = self.next_entity_id();
        projectile.id = id;
        match projectile.allegiance() {
            Allegiance::Friendly => self.friendly.push(projectile),
            Allegiance::Hostile => self.hostile.push(projectile),
        }
        id
    }

    pub fn add_enemy(&mut self, mut enemy: Enemy) -> u32 {
        let id = self.next_entity_id();
        enemy.id = id;
        self.enemies.push(enemy);
        id
    }

    pub fn add_power_up(&mut self, mut power_up: PowerUp) -> u32 {
        let id = self.next_entity_id();
        power_up.id = id;
        self.power_ups.push(power_up);
        id
    }

    pub fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn add_text(&mut self, text: FloatingText) {
        self.texts.push(text);
    }

    #[inline]
    pub fn has_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Install the boss; fails if one is already alive
    pub fn spawn_boss(&mut self, boss: Boss) -> Result<(), SimError> {
        if self.boss.is_some() {
            return Err(SimError::BossAlreadyPresent);
        }
        self.boss = Some(boss);
        Ok(())
    }

    /// Advance every entity one tick and drop the expired ones
    pub fn advance_all(
        &mut self,
        dt: f32,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
        events: &mut Vec<GameEvent>,
    ) {
        let mut spawned = Vec::new();
        let mut effects = Vec::new();
        let boss_expired = {
            let mut ctx = AdvanceCtx {
                config,
                rng,
                spawned: &mut spawned,
                effects: &mut effects,
                events,
            };
            advance_group(&mut self.friendly, dt, &mut ctx);
            advance_group(&mut self.hostile, dt, &mut ctx);
            advance_group(&mut self.enemies, dt, &mut ctx);
            advance_group(&mut self.power_ups, dt, &mut ctx);
            advance_group(&mut self.effects, dt, &mut ctx);
            advance_group(&mut self.texts, dt, &mut ctx);
            self.boss
                .as_mut()
                .is_some_and(|boss| boss.advance(dt, &mut ctx) == Lifecycle::Expired)
        };
        if boss_expired {
            self.boss = None;
        }

        for projectile in spawned {
            self.add_projectile(projectile);
        }
        self.effects.extend(effects);
    }

    /// Append a descriptor for every entity
    pub fn renderables(&self, out: &mut Vec<Renderable>) {
        out.extend(self.enemies.iter().map(Behavior::renderable));
        out.extend(self.boss.iter().map(Behavior::renderable));
        out.extend(self.friendly.iter().map(Behavior::renderable));
        out.extend(self.hostile.iter().map(Behavior::renderable));
        out.extend(self.power_ups.iter().map(Behavior::renderable));
        out.extend(self.effects.iter().map(Behavior::renderable));
        out.extend(self.texts.iter().map(Behavior::renderable));
    }

    /// Verify that every projectile sits in the group of its allegiance
    pub fn check_invariants(&self) -> Result<(), SimError> {
        if let Some(p) = self.friendly.iter().find(|p| p.allegiance() != Allegiance::Friendly) {
            return Err(SimError::AllegianceMismatch {
                group: "friendly",
                found: p.allegiance(),
            });
        }
        if let Some(p) = self.hostile.iter().find(|p| p.allegiance() != Allegiance::Hostile) {
            return Err(SimError::AllegianceMismatch {
                group: "hostile",
                found: p.allegiance(),
            });
        }
        Ok(())
    }

    /// Total number of live entities (excluding the player)
    pub fn len(&self) -> usize {
        self.enemies.len()
            + usize::from(self.boss.is_some())
            + self.friendly.len()
            + self.hostile.len()
            + self.power_ups.len()
            + self.effects.len()
            + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn advance_group<T: Behavior>(group: &mut Vec<T>, dt: f32, ctx: &mut AdvanceCtx<'_>) {
    group.retain_mut(|entity| entity.advance(dt, ctx) == Lifecycle::Alive);
}
