//! Canvas 2D backend (browser only)

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{DrawCommand, frame_commands};
use super::Renderer;
use crate::sim::Snapshot;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context. `None` if the canvas can't provide one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn draw(&self, command: &DrawCommand) {
        match *command {
            DrawCommand::Clear { width, height } => {
                self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx.begin_path();
                if self
                    .ctx
                    .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
                    .is_ok()
                {
                    self.ctx.fill();
                }
            }
            DrawCommand::Rect {
                origin,
                size,
                color,
            } => {
                self.ctx.set_fill_style_str(color);
                self.ctx
                    .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        for command in frame_commands(snapshot) {
            self.draw(&command);
        }
    }
}
