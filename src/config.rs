//! Game balance configuration
//!
//! Every tunable lives here and is injected into the simulation at
//! construction. Sections deserialize with defaults, so a JSON file only needs
//! the values it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Screen and play-area geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Projectiles further than this outside the screen are dropped
    pub projectile_margin: f32,
    /// Enemies are dropped once this far below the screen
    pub enemy_exit_margin: f32,
    /// Power-ups are dropped once this far below the screen
    pub power_up_exit_margin: f32,
    /// Player keep-out from the left and right edges
    pub side_margin: f32,
    /// Reserved HUD strip at the top the player cannot enter
    pub hud_height: f32,
    pub bottom_margin: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 1200.0,
            projectile_margin: 40.0,
            enemy_exit_margin: 40.0,
            power_up_exit_margin: 50.0,
            side_margin: 40.0,
            hud_height: 150.0,
            bottom_margin: 40.0,
        }
    }
}

impl ArenaConfig {
    /// Top-left corner of the player's play area
    pub fn play_min(&self) -> Vec2 {
        Vec2::new(self.side_margin, self.hud_height)
    }

    /// Bottom-right corner of the player's play area
    pub fn play_max(&self) -> Vec2 {
        Vec2::new(self.width - self.side_margin, self.height - self.bottom_margin)
    }

    /// True if `pos` is further than `margin` outside the screen on any side
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin || pos.x > self.width + margin || pos.y < -margin || pos.y > self.height + margin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Speed while the precision modifier is held
    pub precision_speed: f32,
    pub radius: f32,
    pub max_hp: u32,
    /// Distance of the spawn point above the bottom of the screen
    pub spawn_height: f32,
    pub fire_interval: f32,
    /// Fire interval multiplier while rapid fire is active
    pub rapid_multiplier: f32,
    pub shot_speed: f32,
    pub shot_damage: i32,
    pub shot_radius: f32,
    /// Horizontal offsets of the three barrels
    pub shot_offsets: [f32; 3],
    /// Horizontal velocity per unit of barrel offset
    pub shot_skew: f32,
    pub projectile_invulnerability: f32,
    pub ram_invulnerability: f32,
    pub projectile_shield_cost: f32,
    pub ram_shield_cost: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 480.0,
            precision_speed: 260.0,
            radius: 22.0,
            max_hp: 5,
            spawn_height: 140.0,
            fire_interval: 0.16,
            rapid_multiplier: 0.45,
            shot_speed: 900.0,
            shot_damage: 1,
            shot_radius: 5.0,
            shot_offsets: [-14.0, 0.0, 14.0],
            shot_skew: 8.0,
            projectile_invulnerability: 0.5,
            ram_invulnerability: 0.6,
            projectile_shield_cost: 0.35,
            ram_shield_cost: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    pub radius: f32,
    pub hp: i32,
    /// Spawn height (negative = above the visible area)
    pub spawn_y: f32,
    pub first_shot_min: f32,
    pub first_shot_max: f32,
    pub reload_min: f32,
    pub reload_max: f32,
    pub shot_speed: f32,
    pub shot_radius: f32,
    pub shot_damage: i32,
    pub kill_score: u64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            min_speed: 110.0,
            max_speed: 220.0,
            radius: 18.0,
            hp: 2,
            spawn_y: -40.0,
            first_shot_min: 0.8,
            first_shot_max: 1.6,
            reload_min: 1.1,
            reload_max: 2.0,
            shot_speed: 320.0,
            shot_radius: 5.0,
            shot_damage: 1,
            kill_score: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub hp: i32,
    /// Horizontal sway speed while fighting
    pub speed: f32,
    pub radius: f32,
    pub attack_interval: f32,
    pub entry_y: f32,
    pub entry_speed: f32,
    /// Vertical position at which the boss starts fighting
    pub fight_y: f32,
    /// Sway targets stay this far from the screen edges
    pub sway_margin: f32,
    pub target_tolerance: f32,
    pub burst_count: u32,
    /// Max angular jitter per burst projectile (radians)
    pub burst_jitter: f32,
    pub burst_speed: f32,
    pub shot_radius: f32,
    pub shot_damage: i32,
    pub hit_score: u64,
    pub death_explosions: u32,
    pub death_spread: Vec2,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            hp: 120,
            speed: 120.0,
            radius: 80.0,
            attack_interval: 0.9,
            entry_y: -120.0,
            entry_speed: 100.0,
            fight_y: 200.0,
            sway_margin: 120.0,
            target_tolerance: 10.0,
            burst_count: 14,
            burst_jitter: 0.05,
            burst_speed: 260.0,
            shot_radius: 6.0,
            shot_damage: 1,
            hit_score: 2,
            death_explosions: 8,
            death_spread: Vec2::new(60.0, 40.0),
        }
    }
}

/// Spawn director pacing and boss gate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub initial_delay: f32,
    pub base_interval: f32,
    pub min_interval: f32,
    /// Largest amount the ramp can shave off the base interval
    pub ramp_cap: f32,
    /// Seconds of play per unit of interval reduction
    pub ramp_period: f32,
    /// The boss never appears before this much elapsed time
    pub boss_min_time: f32,
    pub boss_score_threshold: u64,
    /// Past this elapsed time the boss appears regardless of score
    pub boss_forced_time: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_delay: 1.0,
            base_interval: 0.55,
            min_interval: 0.25,
            ramp_cap: 0.3,
            ramp_period: 120.0,
            boss_min_time: 50.0,
            boss_score_threshold: 400,
            boss_forced_time: 65.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub radius: f32,
    pub drop_chance: f32,
    pub lifetime: f32,
    pub shield_duration: f32,
    pub rapid_duration: f32,
    pub heal_amount: u32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Initial horizontal drift range is `[-drift, drift)`
    pub drift: f32,
    pub fall_min: f32,
    pub fall_max: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            drop_chance: 0.10,
            lifetime: 10.0,
            shield_duration: 6.0,
            rapid_duration: 6.0,
            heal_amount: 2,
            gravity: 50.0,
            max_fall_speed: 160.0,
            drift: 40.0,
            fall_min: 40.0,
            fall_max: 120.0,
        }
    }
}

/// Camera shake impulses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    pub max: f32,
    pub decay: f32,
    /// Below this magnitude the offset is zero
    pub threshold: f32,
    pub boss_hit: f32,
    pub enemy_kill: f32,
    pub player_hit: f32,
    pub shield_hit: f32,
    pub ram: f32,
    pub pickup: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            max: 30.0,
            decay: 0.9,
            threshold: 0.5,
            boss_hit: 1.2,
            enemy_kill: 5.0,
            player_hit: 7.0,
            shield_hit: 3.0,
            ram: 9.0,
            pickup: 4.0,
        }
    }
}

/// Cosmetic effect parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub explosion_duration: f32,
    pub hit_duration: f32,
    pub player_hit_duration: f32,
    pub explosion_radius: f32,
    pub text_lifetime: f32,
    pub text_rise_speed: f32,
    pub game_over_explosions: u32,
    pub game_over_spread: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            explosion_duration: 0.35,
            hit_duration: 0.2,
            player_hit_duration: 0.25,
            explosion_radius: 36.0,
            text_lifetime: 1.0,
            text_rise_speed: 50.0,
            game_over_explosions: 10,
            game_over_spread: 40.0,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub spawn: SpawnConfig,
    pub power_up: PowerUpConfig,
    pub shake: ShakeConfig,
    pub effects: EffectConfig,
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.arena;
        if a.width <= 2.0 * a.side_margin || a.height <= a.hud_height + a.bottom_margin {
            return Err(ConfigError::invalid("arena", "play area is empty"));
        }

        let p = &self.player;
        if p.max_hp == 0 {
            return Err(ConfigError::invalid("player.max_hp", "must be at least 1"));
        }
        if p.fire_interval <= 0.0 {
            return Err(ConfigError::invalid("player.fire_interval", "must be positive"));
        }
        if !(p.rapid_multiplier > 0.0 && p.rapid_multiplier <= 1.0) {
            return Err(ConfigError::invalid("player.rapid_multiplier", "must be in (0, 1]"));
        }
        if p.projectile_shield_cost < 0.0 || p.ram_shield_cost < 0.0 {
            return Err(ConfigError::invalid("player.shield_cost", "must not be negative"));
        }

        let e = &self.enemy;
        check_range("enemy.speed", e.min_speed, e.max_speed)?;
        check_range("enemy.first_shot", e.first_shot_min, e.first_shot_max)?;
        check_range("enemy.reload", e.reload_min, e.reload_max)?;
        if e.hp <= 0 {
            return Err(ConfigError::invalid("enemy.hp", "must be positive"));
        }

        let b = &self.boss;
        if b.hp <= 0 {
            return Err(ConfigError::invalid("boss.hp", "must be positive"));
        }
        if b.entry_speed <= 0.0 {
            return Err(ConfigError::invalid("boss.entry_speed", "must be positive"));
        }
        check_range("boss.sway", b.sway_margin, a.width - b.sway_margin)?;

        let s = &self.spawn;
        if s.min_interval <= 0.0 {
            return Err(ConfigError::invalid("spawn.min_interval", "must be positive"));
        }
        if s.ramp_period <= 0.0 {
            return Err(ConfigError::invalid("spawn.ramp_period", "must be positive"));
        }
        if s.ramp_cap < 0.0 {
            return Err(ConfigError::invalid("spawn.ramp_cap", "must not be negative"));
        }

        let pu = &self.power_up;
        if !(0.0..=1.0).contains(&pu.drop_chance) {
            return Err(ConfigError::invalid("power_up.drop_chance", "must be in [0, 1]"));
        }
        check_range("power_up.fall", pu.fall_min, pu.fall_max)?;

        let sh = &self.shake;
        if !(sh.decay > 0.0 && sh.decay < 1.0) {
            return Err(ConfigError::invalid("shake.decay", "must be in (0, 1)"));
        }
        if sh.max < 0.0 {
            return Err(ConfigError::invalid("shake.max", "must not be negative"));
        }

        Ok(())
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::invalid(field, format!("min {min} exceeds max {max}")));
    }
    Ok(())
}
