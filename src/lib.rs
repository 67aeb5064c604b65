//! Realm Clone - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, entity lifecycle)
//! - `platform`: Input adaptation and the native session host
//! - `renderer`: Read-only drawing of simulation snapshots
//! - `config`: Startup-validated gameplay tuning

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (canvas logical size)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Nominal frame length at 60 Hz, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player defaults (spawns at field centre)
    pub const PLAYER_HEALTH: f32 = 100.0;
    /// Movement units per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Damage each projectile carries
    pub const PLAYER_DAMAGE: f32 = 20.0;
    /// Drawn radius; also the inset the player is clamped to
    pub const PLAYER_RADIUS: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_HEALTH: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_DAMAGE: f32 = 10.0;
    pub const ENEMY_RADIUS: f32 = 15.0;
    /// How far outside the field enemies appear
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Real-time spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 3000.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Projectile-to-enemy hit distance
    pub const HIT_RADIUS: f32 = 20.0;
    /// Enemy-to-player contact distance
    pub const CONTACT_RADIUS: f32 = 35.0;
    /// Fraction of enemy damage drained from the player per tick of contact
    pub const CONTACT_DAMAGE_FACTOR: f32 = 0.1;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_to_cardinal_directions() {
        let origin = Vec2::new(400.0, 300.0);
        assert!(angle_to(origin, Vec2::new(800.0, 300.0)).abs() < 1e-6);
        assert!((angle_to(origin, Vec2::new(400.0, 600.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_to(origin, Vec2::new(0.0, 300.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_is_unit_length() {
        for i in 0..16 {
            let angle = i as f32 * 0.4;
            assert!((heading(angle).length() - 1.0).abs() < 1e-5);
        }
    }
}
