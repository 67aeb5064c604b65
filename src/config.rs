//! Gameplay tuning
//!
//! Loaded once at startup. Anything malformed is rejected here so the
//! simulation itself never has to deal with bad numbers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Startup configuration failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Field width (also canvas width)
    pub field_width: f32,
    /// Field height (also canvas height)
    pub field_height: f32,
    /// Real-time interval between enemy spawns (ms)
    pub spawn_interval_ms: f64,
    /// Distance outside the field enemies appear at
    pub spawn_offset: f32,

    // === Player ===
    pub player_health: f32,
    pub player_speed: f32,
    pub player_damage: f32,
    /// Inset from the field edge the player is clamped to
    pub player_radius: f32,

    // === Enemies ===
    pub enemy_health: f32,
    pub enemy_speed: f32,
    pub enemy_damage: f32,

    // === Projectiles ===
    pub projectile_speed: f32,

    // === Collision ===
    pub hit_radius: f32,
    pub contact_radius: f32,
    pub contact_damage_factor: f32,

    /// RNG seed for spawn placement (`None` = pick one at startup)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_offset: SPAWN_OFFSET,

            player_health: PLAYER_HEALTH,
            player_speed: PLAYER_SPEED,
            player_damage: PLAYER_DAMAGE,
            player_radius: PLAYER_RADIUS,

            enemy_health: ENEMY_HEALTH,
            enemy_speed: ENEMY_SPEED,
            enemy_damage: ENEMY_DAMAGE,

            projectile_speed: PROJECTILE_SPEED,

            hit_radius: HIT_RADIUS,
            contact_radius: CONTACT_RADIUS,
            contact_damage_factor: CONTACT_DAMAGE_FACTOR,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation can't run with
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_health", self.player_health),
            ("enemy_health", self.enemy_health),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and greater than zero",
                });
            }
        }

        let non_negative = [
            ("spawn_offset", self.spawn_offset),
            ("player_speed", self.player_speed),
            ("player_damage", self.player_damage),
            ("player_radius", self.player_radius),
            ("enemy_speed", self.enemy_speed),
            ("enemy_damage", self.enemy_damage),
            ("hit_radius", self.hit_radius),
            ("contact_radius", self.contact_radius),
            ("contact_damage_factor", self.contact_damage_factor),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and not negative",
                });
            }
        }

        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "spawn_interval_ms",
                reason: "must be finite and greater than zero",
            });
        }

        if self.player_radius * 2.0 > self.field_width.min(self.field_height) {
            return Err(ConfigError::Invalid {
                field: "player_radius",
                reason: "player does not fit inside the field",
            });
        }

        Ok(self)
    }
}
