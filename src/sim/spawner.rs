//! Enemy spawning
//!
//! Enemies appear on a fixed wall-clock cadence, just outside one of the four
//! field edges. The timer is fed real elapsed milliseconds by the host, so
//! dropped or slow frames don't change how often enemies arrive.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{EntityId, SimulationState};
use crate::config::GameConfig;

/// Field edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point just outside this edge; `t` in [0, 1) picks where along it
    pub fn spawn_point(self, t: f32, config: &GameConfig) -> Vec2 {
        let (w, h, off) = (config.field_width, config.field_height, config.spawn_offset);
        match self {
            Edge::Top => Vec2::new(t * w, -off),
            Edge::Right => Vec2::new(w + off, t * h),
            Edge::Bottom => Vec2::new(t * w, h + off),
            Edge::Left => Vec2::new(-off, t * h),
        }
    }
}

/// Real-time spawn timer plus the RNG used for placement
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ms: f64,
    /// Time accumulated toward the next spawn
    accumulated_ms: f64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(interval_ms: f64, seed: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GameConfig, seed: u64) -> Self {
        Self::new(config.spawn_interval_ms, seed)
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Feed wall-clock time; returns how many spawns came due.
    ///
    /// Reaching an exact multiple of the interval counts as due.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulated_ms += elapsed_ms.max(0.0);
        let mut due = 0;
        while self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            due += 1;
        }
        due
    }

    /// Advance the timer and append every enemy that came due
    pub fn update(&mut self, state: &mut SimulationState, elapsed_ms: f64) -> u32 {
        let due = self.advance(elapsed_ms);
        for _ in 0..due {
            self.spawn(state);
        }
        due
    }

    /// Pick a random edge and spot along it
    pub fn random_spawn_point(&mut self, config: &GameConfig) -> Vec2 {
        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let t: f32 = self.rng.random();
        edge.spawn_point(t, config)
    }

    /// Spawn one enemy at a random edge position
    pub fn spawn(&mut self, state: &mut SimulationState) -> EntityId {
        let pos = self.random_spawn_point(&state.config);
        let id = state.spawn_enemy_at(pos);
        log::debug!("Spawned enemy {} at ({:.1}, {:.1})", id, pos.x, pos.y);
        id
    }
}
