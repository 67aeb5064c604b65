//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (keyboard, pointer)
//! - Frame scheduling and the spawn timer
//! - Session lifetime and teardown

pub mod input;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod session;

pub use input::{CanvasRect, InputAdapter, direction_for_key, resolve_click, resolve_pointer};
pub use session::Session;
