//! Read-only view of a frame for renderers and the HUD.
//!
//! Building a snapshot never touches the state it reads.

use serde::{Deserialize, Serialize};

use super::state::{Enemy, Player, Projectile, SimulationState};

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudReadout {
    /// Player health, rounded
    pub health: i32,
    /// Live enemy count
    pub score: usize,
}

impl HudReadout {
    pub fn health_text(&self) -> String {
        format!("Health: {}", self.health)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub field_width: f32,
    pub field_height: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub hud: HudReadout,
    /// Enemies destroyed so far (diagnostics only, not the displayed score)
    pub kills: u64,
}

/// HUD values for the current state
pub fn hud(state: &SimulationState) -> HudReadout {
    HudReadout {
        health: state.player.display_health(),
        score: state.score(),
    }
}

/// Copy out the current frame
pub fn build_snapshot(state: &SimulationState) -> Snapshot {
    Snapshot {
        tick: state.time_ticks,
        field_width: state.config.field_width,
        field_height: state.config.field_height,
        player: state.player.clone(),
        enemies: state.enemies.clone(),
        projectiles: state.projectiles.clone(),
        hud: hud(state),
        kills: state.kills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_hud_rounds_health() {
        let mut state = SimulationState::default();
        state.player.take_damage(2.5);
        assert_eq!(hud(&state).health, 98);
        state.player.take_damage(0.6);
        assert_eq!(hud(&state).health, 97);
        assert_eq!(hud(&state).health_text(), "Health: 97");
    }

    #[test]
    fn test_score_counts_live_enemies() {
        let mut state = SimulationState::default();
        state.spawn_enemy_at(Vec2::new(-20.0, 10.0));
        state.spawn_enemy_at(Vec2::new(820.0, 10.0));
        state.kills = 4;
        let snap = build_snapshot(&state);
        assert_eq!(snap.hud.score, 2);
        assert_eq!(snap.hud.score_text(), "Score: 2");
        assert_eq!(snap.kills, 4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = SimulationState::default();
        state.spawn_enemy_at(Vec2::new(-20.0, 10.0));
        let snap = build_snapshot(&state);
        state.enemies.clear();
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.field_width, 800.0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = SimulationState::default();
        let json = serde_json::to_value(build_snapshot(&state)).unwrap();
        assert_eq!(json["hud"]["health"], 100);
        assert_eq!(json["hud"]["score"], 0);
        assert!(json["enemies"].as_array().unwrap().is_empty());
    }
}
