//! Native session host
//!
//! Runs the frame loop on its own thread at a fixed frame rate. Input arrives
//! as commands over an `mpsc` channel; the latest snapshot is kept in shared
//! state for polling. The spawn timer is fed measured wall-clock time, so it
//! keeps its cadence even when frames run long.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::config::GameConfig;
use crate::renderer::{Renderer, render_frame};
use crate::sim::{Autopilot, Snapshot};

use super::session::Session;

/// Commands accepted by a running session
#[derive(Debug, Clone)]
pub enum SessionCommand {
    KeyDown(String),
    KeyUp(String),
    /// Fire toward a field point (`None` = pointer not over the field)
    Click(Option<Vec2>),
    Shutdown,
}

/// Host loop options
pub struct LoopOptions {
    /// Target frame duration
    pub frame: Duration,
    /// Plays when set; keyboard intent still wins while keys are held
    pub autopilot: Option<Autopilot>,
    /// Drawing surface, if any
    pub renderer: Option<Box<dyn Renderer + Send>>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frame: Duration::from_nanos(1_000_000_000 / 60),
            autopilot: None,
            renderer: None,
        }
    }
}

/// Handle to a running session thread.
///
/// Dropping the handle shuts the session down and waits for the thread.
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    latest: Arc<Mutex<Option<Snapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Queue a command. Returns false if the session already stopped.
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Most recent frame, if one has run
    pub fn latest_snapshot(&self) -> Option<Snapshot> {
        self.latest.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the loop, wait for it, and return the final frame
    pub fn shutdown(mut self) -> Option<Snapshot> {
        self.stop();
        self.latest_snapshot()
    }

    fn stop(&mut self) {
        let _ = self.commands.send(SessionCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Session thread panicked");
            }
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start a session on a new thread
pub fn spawn_session(config: GameConfig, seed: u64, options: LoopOptions) -> io::Result<SessionHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>();
    let latest = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest);

    let thread = std::thread::Builder::new()
        .name("realm-session".into())
        .spawn(move || {
            let session = Session::new(config, seed);
            run_loop(session, cmd_rx, &shared, options);
        })?;

    Ok(SessionHandle {
        commands: cmd_tx,
        latest,
        thread: Some(thread),
    })
}

/// Apply pending commands; returns false once the session should stop
fn drain_commands(session: &mut Session, cmd_rx: &mpsc::Receiver<SessionCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(SessionCommand::KeyDown(key)) => {
                session.input_mut().key_down(&key);
            }
            Ok(SessionCommand::KeyUp(key)) => {
                session.input_mut().key_up(&key);
            }
            Ok(SessionCommand::Click(target)) => session.input_mut().click(target),
            Ok(SessionCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

fn run_loop(
    mut session: Session,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    latest: &Mutex<Option<Snapshot>>,
    mut options: LoopOptions,
) {
    let mut last_frame = Instant::now();
    let mut next_frame = last_frame;

    while drain_commands(&mut session, &cmd_rx) {
        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;

        session.spawn_due(dt_ms);

        let mut input = session.input_mut().take_input();
        if let Some(pilot) = &options.autopilot {
            let auto = pilot.input(session.state());
            if input.intent.is_empty() {
                input.intent = auto.intent;
            }
            input.fire.extend(auto.fire);
        }
        let snapshot = session.frame_with(&input, dt_ms);

        render_frame(options.renderer.as_deref_mut(), &snapshot);

        if let Ok(mut lock) = latest.lock() {
            *lock = Some(snapshot);
        }

        next_frame += options.frame;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > options.frame * 2 {
            // Too far behind - reset rather than burst
            next_frame = now;
        }
    }

    let state = session.state();
    log::info!(
        "Session ended after {} ticks: health {}, {} enemies alive, {} destroyed",
        state.time_ticks,
        state.player.display_health(),
        state.score(),
        state.kills
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_options() -> LoopOptions {
        LoopOptions {
            frame: Duration::from_millis(1),
            ..Default::default()
        }
    }

    fn wait_for(handle: &SessionHandle, mut done: impl FnMut(&Snapshot) -> bool) -> Snapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snap) = handle.latest_snapshot() {
                if done(&snap) {
                    return snap;
                }
            }
            assert!(Instant::now() < deadline, "session never reached expected state");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_session_runs_and_shuts_down() {
        let handle = spawn_session(GameConfig::default(), 1, fast_options()).unwrap();
        wait_for(&handle, |s| s.tick > 5);
        let last = handle.shutdown().unwrap();
        assert!(last.tick > 5);
    }

    #[test]
    fn test_commands_reach_simulation() {
        let handle = spawn_session(GameConfig::default(), 1, fast_options()).unwrap();
        assert!(handle.send(SessionCommand::KeyDown("a".into())));
        assert!(handle.send(SessionCommand::Click(Some(Vec2::new(400.0, 0.0)))));
        let snap = wait_for(&handle, |s| s.player.pos.x <= 20.0);
        assert_eq!(snap.player.pos.x, 20.0);
        handle.shutdown();
    }

    #[test]
    fn test_spawn_timer_uses_wall_clock() {
        let config = GameConfig {
            spawn_interval_ms: 20.0,
            ..Default::default()
        };
        let handle = spawn_session(config, 9, fast_options()).unwrap();
        let snap = wait_for(&handle, |s| s.hud.score >= 2);
        assert!(snap.enemies.len() >= 2);
        handle.shutdown();
    }

    #[test]
    fn test_drop_stops_thread() {
        let handle = spawn_session(GameConfig::default(), 1, fast_options()).unwrap();
        let latest = Arc::clone(&handle.latest);
        wait_for(&handle, |s| s.tick > 0);
        drop(handle);
        let frozen = latest.lock().unwrap().as_ref().map(|s| s.tick);
        std::thread::sleep(Duration::from_millis(20));
        let after = latest.lock().unwrap().as_ref().map(|s| s.tick);
        assert_eq!(frozen, after);
    }
}
