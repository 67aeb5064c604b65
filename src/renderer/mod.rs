//! Rendering module
//!
//! Renderers only ever read a `Snapshot`. Layout lives in `shapes`; backends
//! replay the generated draw commands.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawCommand, frame_commands};

use crate::sim::Snapshot;

/// A drawing surface
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Draw a frame if there is a surface. Returns false when the frame was skipped.
pub fn render_frame<R: Renderer + ?Sized>(surface: Option<&mut R>, snapshot: &Snapshot) -> bool {
    match surface {
        Some(renderer) => {
            renderer.render(snapshot);
            true
        }
        None => false,
    }
}

/// Headless "renderer" that logs the HUD about once a second
#[derive(Debug, Clone)]
pub struct HudLogger {
    every_ticks: u64,
}

impl HudLogger {
    pub fn new(every_ticks: u64) -> Self {
        Self {
            every_ticks: every_ticks.max(1),
        }
    }
}

impl Default for HudLogger {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for HudLogger {
    fn render(&mut self, snapshot: &Snapshot) {
        if snapshot.tick % self.every_ticks == 0 {
            log::info!(
                "[tick {}] {} | {} | projectiles {} | destroyed {}",
                snapshot.tick,
                snapshot.hud.health_text(),
                snapshot.hud.score_text(),
                snapshot.projectiles.len(),
                snapshot.kills
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimulationState, build_snapshot};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: &Snapshot) {
            self.frames.push(snapshot.tick);
        }
    }

    #[test]
    fn test_missing_surface_skips_frame() {
        let snap = build_snapshot(&SimulationState::default());
        assert!(!render_frame::<Recorder>(None, &snap));
    }

    #[test]
    fn test_surface_receives_frame() {
        let snap = build_snapshot(&SimulationState::default());
        let mut recorder = Recorder::default();
        assert!(render_frame(Some(&mut recorder), &snap));
        assert_eq!(recorder.frames, vec![0]);
    }

    #[test]
    fn test_boxed_dyn_surface() {
        let snap = build_snapshot(&SimulationState::default());
        let mut boxed: Option<Box<dyn Renderer + Send>> = Some(Box::new(HudLogger::default()));
        assert!(render_frame(boxed.as_deref_mut(), &snap));
    }
}
