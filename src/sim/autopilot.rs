//! Demo/headless input source
//!
//! Shoots at the nearest enemy on a fixed cadence and steps away from
//! anything that gets close. Used when no human is at the keyboard.

use super::state::{Enemy, SimulationState};
use super::tick::{Direction, FireRequest, IntentSet, TickInput};

/// Simple AI that plays the game
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between shots
    pub fire_every: u64,
    /// Enemies closer than this trigger evasion
    pub danger_radius: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 12,
            danger_radius: 90.0,
        }
    }
}

impl Autopilot {
    /// Nearest live enemy to the player
    fn nearest<'a>(state: &'a SimulationState) -> Option<&'a Enemy> {
        let player = state.player.pos;
        state.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Decide this tick's input
    pub fn input(&self, state: &SimulationState) -> TickInput {
        let mut input = TickInput::default();
        let Some(target) = Self::nearest(state) else {
            return input;
        };

        if self.fire_every > 0 && state.time_ticks % self.fire_every == 0 {
            input.fire.push(FireRequest::at(target.pos));
        }

        let away = state.player.pos - target.pos;
        if away.length() < self.danger_radius {
            input.intent = evade(away);
        }
        input
    }
}

/// Hold the directions that increase distance along `away`
fn evade(away: glam::Vec2) -> IntentSet {
    let mut intent = IntentSet::default();
    if away.x < 0.0 {
        intent.insert(Direction::Left);
    } else if away.x > 0.0 {
        intent.insert(Direction::Right);
    }
    if away.y < 0.0 {
        intent.insert(Direction::Up);
    } else if away.y > 0.0 {
        intent.insert(Direction::Down);
    }
    intent
}
