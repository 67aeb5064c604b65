//! One game session: state, spawner and input queue
//!
//! Hosts (browser or native) own a `Session` and drive it. The frame loop
//! calls `frame`; the spawn timer calls `spawn_due` or `spawn_now`; input
//! callbacks go through `input_mut`.

use crate::config::GameConfig;
use crate::sim::{Snapshot, Spawner, SimulationState, TickInput, build_snapshot, tick};

use super::input::InputAdapter;

#[derive(Debug, Clone)]
pub struct Session {
    state: SimulationState,
    spawner: Spawner,
    input: InputAdapter,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let spawner = Spawner::from_config(&config, seed);
        log::info!(
            "Session started (seed {}, spawn every {} ms)",
            seed,
            config.spawn_interval_ms
        );
        Self {
            state: SimulationState::new(config),
            spawner,
            input: InputAdapter::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut InputAdapter {
        &mut self.input
    }

    /// Cadence hosts should schedule their spawn timer at
    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawner.interval_ms()
    }

    /// Feed wall-clock time to the spawn timer
    pub fn spawn_due(&mut self, elapsed_ms: f64) -> u32 {
        self.spawner.update(&mut self.state, elapsed_ms)
    }

    /// Spawn immediately (host interval timer fired)
    pub fn spawn_now(&mut self) {
        self.spawner.spawn(&mut self.state);
    }

    /// Run one tick with the queued keyboard/pointer input
    pub fn frame(&mut self, dt_ms: f64) -> Snapshot {
        let input = self.input.take_input();
        self.frame_with(&input, dt_ms)
    }

    /// Run one tick with explicit input
    pub fn frame_with(&mut self, input: &TickInput, dt_ms: f64) -> Snapshot {
        tick(&mut self.state, input, dt_ms);
        build_snapshot(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use glam::Vec2;

    #[test]
    fn test_click_fires_on_next_frame() {
        let mut session = Session::new(GameConfig::default(), 3);
        session.input_mut().click(Some(Vec2::new(800.0, 300.0)));
        assert!(session.state().projectiles.is_empty());

        let snap = session.frame(FRAME_MS);
        assert_eq!(snap.projectiles.len(), 1);
        assert!((snap.projectiles[0].pos.x - 408.0).abs() < 1e-4);
    }

    #[test]
    fn test_keys_move_player() {
        let mut session = Session::new(GameConfig::default(), 3);
        session.input_mut().key_down("d");
        session.frame(FRAME_MS);
        session.frame(FRAME_MS);
        session.input_mut().key_up("d");
        let snap = session.frame(FRAME_MS);
        assert_eq!(snap.player.pos, Vec2::new(410.0, 300.0));
    }

    #[test]
    fn test_spawn_paths() {
        let mut session = Session::new(GameConfig::default(), 3);
        assert_eq!(session.spawn_due(9000.0), 3);
        session.spawn_now();
        let snap = session.frame(FRAME_MS);
        assert_eq!(snap.hud.score, 4);
    }

    #[test]
    fn test_focus_loss_stops_movement() {
        let mut session = Session::new(GameConfig::default(), 3);
        session.input_mut().key_down("w");
        session.frame(FRAME_MS);
        session.input_mut().release_all();
        let snap = session.frame(FRAME_MS);
        assert_eq!(snap.player.pos, Vec2::new(400.0, 295.0));
    }

    #[test]
    fn test_spawn_interval_follows_config() {
        let config = GameConfig {
            spawn_interval_ms: 1500.0,
            ..Default::default()
        };
        let mut session = Session::new(config, 3);
        assert_eq!(session.spawn_interval_ms(), 1500.0);
        assert_eq!(session.spawn_due(3000.0), 2);
    }
}
