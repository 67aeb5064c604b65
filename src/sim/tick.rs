//! Per-frame simulation step
//!
//! One call to `tick` advances the session by exactly one frame. Sub-steps
//! run in a fixed order:
//!
//! 1. queued fire requests become projectiles
//! 2. the player moves and is clamped
//! 3. projectiles advance; those leaving the field are dropped
//! 4. enemies home in, take projectile hits and drain the player on contact
//! 5. consumed projectiles and dead enemies are removed as one batch

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, enemy_touches_player, projectile_hits_enemy};
use super::state::{EntityId, Projectile, SimulationState};
use crate::{angle_to, heading};

/// A movement direction the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl IntentSet {
    fn slot(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    pub fn insert(&mut self, dir: Direction) {
        *self.slot(dir) = true;
    }

    pub fn remove(&mut self, dir: Direction) {
        *self.slot(dir) = false;
    }

    pub fn contains(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Per-axis displacement sign. Diagonals are deliberately not normalized.
    pub fn displacement(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        d
    }
}

/// A request to shoot at a point (field coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireRequest {
    /// `None` when the pointer couldn't be mapped onto the field
    pub target: Option<Vec2>,
}

impl FireRequest {
    pub fn at(target: Vec2) -> Self {
        Self {
            target: Some(target),
        }
    }
}

/// Input consumed by a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement directions
    pub intent: IntentSet,
    /// Fire requests queued since the previous tick
    pub fire: Vec<FireRequest>,
}

/// Fire one projectile from the player toward `target`.
///
/// Returns the projectile id, or `None` (and does nothing) without a target.
pub fn fire(state: &mut SimulationState, target: Option<Vec2>) -> Option<EntityId> {
    let target = target?;
    let origin = state.player.pos;
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: origin,
        angle: angle_to(origin, target),
        speed: state.config.projectile_speed,
        damage: state.player.damage,
    });
    Some(id)
}

/// Advance the game state by one frame.
///
/// `dt_ms` is the measured frame time; negative values are treated as zero.
/// Movement is per tick, so `dt_ms` only feeds the session clock.
pub fn tick(state: &mut SimulationState, input: &TickInput, dt_ms: f64) {
    state.time_ticks += 1;
    state.elapsed_ms += dt_ms.max(0.0);

    for request in &input.fire {
        fire(state, request.target);
    }

    move_player(state, &input.intent);
    advance_projectiles(state);
    step_enemies(state);
}

fn move_player(state: &mut SimulationState, intent: &IntentSet) {
    let config = &state.config;
    let player = &mut state.player;
    let bounds = Bounds::inset(config.field_width, config.field_height, player.radius);
    player.pos = bounds.clamp(player.pos + intent.displacement() * player.speed);
}

fn advance_projectiles(state: &mut SimulationState) {
    let field = Bounds::field(state.config.field_width, state.config.field_height);
    state.projectiles.retain_mut(|p| {
        let next = p.next_pos();
        if !field.contains(next) {
            return false;
        }
        p.pos = next;
        true
    });
}

fn step_enemies(state: &mut SimulationState) {
    let hit_radius = state.config.hit_radius;
    let contact_radius = state.config.contact_radius;
    let contact_factor = state.config.contact_damage_factor;
    let player_pos = state.player.pos;

    // A projectile is spent on the first enemy it touches
    let mut consumed = vec![false; state.projectiles.len()];

    for enemy in state.enemies.iter_mut() {
        enemy.pos += heading(angle_to(enemy.pos, player_pos)) * enemy.speed;

        for (projectile, spent) in state.projectiles.iter().zip(consumed.iter_mut()) {
            if *spent || !projectile_hits_enemy(projectile.pos, enemy.pos, hit_radius) {
                continue;
            }
            enemy.health = (enemy.health - projectile.damage).max(0.0);
            *spent = true;
        }

        if enemy_touches_player(enemy.pos, player_pos, contact_radius) {
            state.player.take_damage(enemy.damage * contact_factor);
        }
    }

    let mut spent = consumed.into_iter();
    state.projectiles.retain(|_| !spent.next().unwrap_or(false));

    let before = state.enemies.len();
    state.enemies.retain(|e| {
        if !e.is_alive() {
            log::debug!("Enemy {} destroyed", e.id);
        }
        e.is_alive()
    });
    state.kills += (before - state.enemies.len()) as u64;
}
