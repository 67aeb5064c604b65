//! Collision and bounds checks
//!
//! Every body is treated as a point with a threshold distance; the drawn
//! radii don't take part.

use glam::Vec2;

use crate::distance;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The whole field, edges included
    pub fn field(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// The field shrunk by `inset` on every side
    pub fn inset(width: f32, height: f32, inset: f32) -> Self {
        Self::new(Vec2::splat(inset), Vec2::new(width - inset, height - inset))
    }

    /// Inclusive containment
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}

/// Projectile-to-enemy hit test
#[inline]
pub fn projectile_hits_enemy(projectile: Vec2, enemy: Vec2, hit_radius: f32) -> bool {
    within(projectile, enemy, hit_radius)
}

/// Enemy-to-player contact test
#[inline]
pub fn enemy_touches_player(enemy: Vec2, player: Vec2, contact_radius: f32) -> bool {
    within(enemy, player, contact_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_bounds_inclusive() {
        let field = Bounds::field(800.0, 600.0);
        assert!(field.contains(Vec2::new(0.0, 0.0)));
        assert!(field.contains(Vec2::new(800.0, 600.0)));
        assert!(!field.contains(Vec2::new(-0.1, 300.0)));
        assert!(!field.contains(Vec2::new(400.0, 600.1)));
    }

    #[test]
    fn test_inset_clamp() {
        let bounds = Bounds::inset(800.0, 600.0, 20.0);
        assert_eq!(bounds.clamp(Vec2::new(0.0, 0.0)), Vec2::new(20.0, 20.0));
        assert_eq!(bounds.clamp(Vec2::new(900.0, 590.0)), Vec2::new(780.0, 580.0));
        assert_eq!(bounds.clamp(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_hit_is_strict() {
        let enemy = Vec2::new(100.0, 100.0);
        assert!(projectile_hits_enemy(Vec2::new(119.9, 100.0), enemy, 20.0));
        assert!(!projectile_hits_enemy(Vec2::new(120.0, 100.0), enemy, 20.0));
    }

    #[test]
    fn test_contact_is_strict() {
        let player = Vec2::new(400.0, 300.0);
        assert!(enemy_touches_player(Vec2::new(400.0, 266.0), player, 35.0));
        assert!(!enemy_touches_player(Vec2::new(400.0, 265.0), player, 35.0));
    }
}
