//! Keyboard/pointer adaptation
//!
//! Raw events only ever touch the held-direction set or the fire queue.
//! Entities are never mutated from here; the next tick picks the input up.

use glam::Vec2;

use crate::sim::{Direction, FireRequest, IntentSet, TickInput};

/// Map a key name (`KeyboardEvent.key` style) to a movement direction
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "w" | "W" | "ArrowUp" => Some(Direction::Up),
        "s" | "S" | "ArrowDown" => Some(Direction::Down),
        "a" | "A" | "ArrowLeft" => Some(Direction::Left),
        "d" | "D" | "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// On-screen placement of the canvas (client pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Convert a client-space pointer position into field coordinates.
///
/// Returns `None` when there's no canvas to measure against.
pub fn resolve_pointer(
    client: Vec2,
    rect: Option<CanvasRect>,
    field_width: f32,
    field_height: f32,
) -> Option<Vec2> {
    let rect = rect?;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let local = client - Vec2::new(rect.left, rect.top);
    Some(Vec2::new(
        local.x * field_width / rect.width,
        local.y * field_height / rect.height,
    ))
}

/// Resolve a click only if it landed on the game canvas itself
pub fn resolve_click(
    target_id: &str,
    canvas_id: &str,
    client: Vec2,
    rect: Option<CanvasRect>,
    field_width: f32,
    field_height: f32,
) -> Option<Vec2> {
    if target_id != canvas_id {
        return None;
    }
    resolve_pointer(client, rect, field_width, field_height)
}

/// Accumulates input between frames
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    intent: IntentSet,
    pending_fire: Vec<FireRequest>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is a movement key
    pub fn key_down(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(dir) => {
                self.intent.insert(dir);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(dir) => {
                self.intent.remove(dir);
                true
            }
            None => false,
        }
    }

    /// Queue a shot. An unresolved target is still queued; the tick ignores it.
    pub fn click(&mut self, target: Option<Vec2>) {
        self.pending_fire.push(FireRequest { target });
    }

    /// Drop everything held; called when the page loses focus
    pub fn release_all(&mut self) {
        self.intent = IntentSet::default();
    }

    pub fn intent(&self) -> IntentSet {
        self.intent
    }

    /// Input for the next tick: current held keys plus queued shots
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            intent: self.intent,
            fire: std::mem::take(&mut self.pending_fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        assert_eq!(direction_for_key("w"), Some(Direction::Up));
        assert_eq!(direction_for_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(direction_for_key("D"), Some(Direction::Right));
        assert_eq!(direction_for_key(" "), None);
    }

    #[test]
    fn test_press_release_tracks_intent() {
        let mut input = InputAdapter::new();
        assert!(input.key_down("w"));
        assert!(input.key_down("a"));
        assert!(!input.key_down("q"));
        assert!(input.intent().contains(Direction::Up));
        assert!(input.intent().contains(Direction::Left));

        input.key_up("w");
        assert!(!input.intent().contains(Direction::Up));
        assert!(input.intent().contains(Direction::Left));

        input.release_all();
        assert!(input.intent().is_empty());
    }

    #[test]
    fn test_held_keys_persist_across_frames() {
        let mut input = InputAdapter::new();
        input.key_down("s");
        assert!(input.take_input().intent.down);
        assert!(input.take_input().intent.down);
    }

    #[test]
    fn test_fire_queue_drains_once() {
        let mut input = InputAdapter::new();
        input.click(Some(Vec2::new(10.0, 20.0)));
        input.click(None);
        let first = input.take_input();
        assert_eq!(first.fire.len(), 2);
        assert_eq!(first.fire[0].target, Some(Vec2::new(10.0, 20.0)));
        assert!(input.take_input().fire.is_empty());
    }

    #[test]
    fn test_resolve_pointer() {
        let rect = CanvasRect {
            left: 100.0,
            top: 50.0,
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(
            resolve_pointer(Vec2::new(500.0, 350.0), Some(rect), 800.0, 600.0),
            Some(Vec2::new(400.0, 300.0))
        );
        assert_eq!(resolve_pointer(Vec2::new(500.0, 350.0), None, 800.0, 600.0), None);
    }

    #[test]
    fn test_resolve_pointer_scaled_canvas() {
        let rect = CanvasRect {
            left: 0.0,
            top: 0.0,
            width: 400.0,
            height: 300.0,
        };
        assert_eq!(
            resolve_pointer(Vec2::new(200.0, 150.0), Some(rect), 800.0, 600.0),
            Some(Vec2::new(400.0, 300.0))
        );
        let collapsed = CanvasRect { width: 0.0, ..rect };
        assert_eq!(resolve_pointer(Vec2::ZERO, Some(collapsed), 800.0, 600.0), None);
    }

    #[test]
    fn test_click_on_other_canvas_is_ignored() {
        let rect = CanvasRect {
            left: 0.0,
            top: 0.0,
            width: 800.0,
            height: 600.0,
        };
        let client = Vec2::new(100.0, 50.0);
        assert_eq!(
            resolve_click("minimap", "canvas", client, Some(rect), 800.0, 600.0),
            None
        );
        assert_eq!(
            resolve_click("canvas", "canvas", client, Some(rect), 800.0, 600.0),
            Some(Vec2::new(100.0, 50.0))
        );
    }
}
