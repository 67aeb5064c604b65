//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives here. The host owns
//! a `SimulationState` and lends it to `tick`; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::heading;

/// Opaque entity identifier, unique within a session
pub type EntityId = u32;

/// Reserved id of the (single) player
pub const PLAYER_ID: EntityId = 0;

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Movement units per tick, per held axis
    pub speed: f32,
    /// Damage copied into each fired projectile
    pub damage: f32,
    /// Body radius; drawn and used as the field inset
    pub radius: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            id: PLAYER_ID,
            pos: Vec2::new(config.field_width / 2.0, config.field_height / 2.0),
            health: config.player_health,
            max_health: config.player_health,
            speed: config.player_speed,
            damage: config.player_damage,
            radius: config.player_radius,
        }
    }

    /// Reduce health, never below zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Health rounded for display
    pub fn display_health(&self) -> i32 {
        self.health.round() as i32
    }

    /// Remaining health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Movement units per tick
    pub speed: f32,
    /// Contact damage (applied fractionally per tick)
    pub damage: f32,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, config: &GameConfig) -> Self {
        Self {
            id,
            pos,
            health: config.enemy_health,
            max_health: config.enemy_health,
            speed: config.enemy_speed,
            damage: config.enemy_damage,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Remaining health in [0, 1]
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

/// A straight-flying shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    /// Direction of travel (radians), fixed at creation
    pub angle: f32,
    /// Units per tick, fixed at creation
    pub speed: f32,
    pub damage: f32,
}

impl Projectile {
    /// Position one tick from now
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + heading(self.angle) * self.speed
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Tuning this session runs with
    pub config: GameConfig,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles, in fire order
    pub projectiles: Vec<Projectile>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated frame time (ms)
    pub elapsed_ms: f64,
    /// Enemies destroyed this session
    pub kills: u64,
    /// Next entity ID
    next_id: EntityId,
}

impl SimulationState {
    /// Fresh session: player centred, nothing else on the field
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::new(&config),
            config,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            time_ticks: 0,
            elapsed_ms: 0.0,
            kills: 0,
            next_id: PLAYER_ID + 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an enemy at `pos` with the configured stats
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let enemy = Enemy::new(id, pos, &self.config);
        self.enemies.push(enemy);
        id
    }

    /// Displayed score: the number of enemies currently alive
    pub fn score(&self) -> usize {
        self.enemies.len()
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
