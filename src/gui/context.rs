//! Immediate-Mode GUI Context
//!
//! Per-frame drawing state tied to the render surface. `update` fills a
//! draw-command buffer through the widget layer; `flush` replays it onto
//! the canvas. The context records which surface generation it was
//! attached to, and re-attaches itself when the surface has been
//! recreated underneath it.

use super::style::GuiStyle;
use crate::text::draw_text;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Mouse snapshot for one frame, in logical coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub mouse_down: bool,
}

/// One queued drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Full-surface translucent fill
    Overlay { color: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
        scale: u32,
    },
}

/// Reference height the text scale is derived from.
const BASE_LOGICAL_HEIGHT: u32 = 360;

pub struct GuiContext {
    style: GuiStyle,
    commands: Vec<DrawCommand>,
    logical_size: (u32, u32),
    /// Text scale derived from the logical height
    scale: u32,
    /// Surface generation this context was attached to
    generation: Option<u64>,
    mouse_x: i32,
    mouse_y: i32,
    mouse_down: bool,
    mouse_pressed: bool,
    prev_mouse_down: bool,
}

impl GuiContext {
    pub fn new(style: GuiStyle) -> Self {
        GuiContext {
            style,
            commands: Vec::new(),
            logical_size: (0, 0),
            scale: 1,
            generation: None,
            mouse_x: 0,
            mouse_y: 0,
            mouse_down: false,
            mouse_pressed: false,
            prev_mouse_down: false,
        }
    }

    /// Bind the context to a surface generation and recompute the
    /// size-dependent drawing state.
    pub fn attach(&mut self, generation: u64, logical_size: (u32, u32)) {
        self.generation = Some(generation);
        self.logical_size = logical_size;
        self.scale = (logical_size.1 / BASE_LOGICAL_HEIGHT).clamp(1, 4);
        self.commands.clear();
    }

    pub fn is_attached_to(&self, generation: u64) -> bool {
        self.generation == Some(generation)
    }

    /// Start a frame: clear the command buffer and compute mouse edges.
    ///
    /// A context left pointing at a dead surface re-attaches here rather
    /// than failing.
    pub fn begin_frame(
        &mut self,
        input: FrameInput,
        generation: u64,
        logical_size: (u32, u32),
    ) {
        if !self.is_attached_to(generation) {
            log::warn!("gui context detached from live surface, reattaching");
            self.attach(generation, logical_size);
        } else {
            self.logical_size = logical_size;
            self.scale = (logical_size.1 / BASE_LOGICAL_HEIGHT).clamp(1, 4);
        }

        self.commands.clear();
        self.mouse_x = input.mouse_x;
        self.mouse_y = input.mouse_y;
        self.mouse_down = input.mouse_down;
        self.mouse_pressed = input.mouse_down && !self.prev_mouse_down;
        self.prev_mouse_down = input.mouse_down;
    }

    /// Drop this frame's press edge. Used when a mouse press was already
    /// consumed by the rebinding capture so it cannot also fire a widget.
    pub fn consume_press(&mut self) {
        self.mouse_pressed = false;
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn style(&self) -> &GuiStyle {
        &self.style
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    pub fn mouse_pos(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the queued commands onto the canvas and clear the buffer.
    pub fn flush(&mut self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        for command in self.commands.drain(..) {
            match command {
                DrawCommand::Overlay { color } => {
                    canvas.set_blend_mode(BlendMode::Blend);
                    canvas.set_draw_color(color);
                    canvas.fill_rect(None)?;
                    canvas.set_blend_mode(BlendMode::None);
                }
                DrawCommand::FillRect { rect, color } => {
                    canvas.set_draw_color(color);
                    canvas.fill_rect(rect)?;
                }
                DrawCommand::StrokeRect { rect, color } => {
                    canvas.set_draw_color(color);
                    canvas.draw_rect(rect)?;
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    color,
                    scale,
                } => {
                    draw_text(canvas, &text, x, y, color, scale)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(x: i32, y: i32, down: bool) -> FrameInput {
        FrameInput {
            mouse_x: x,
            mouse_y: y,
            mouse_down: down,
        }
    }

    #[test]
    fn test_press_and_release_edges() {
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));

        ctx.begin_frame(input(10, 10, true), 0, (1280, 720));
        assert!(ctx.mouse_pressed());

        // Held, no new edge
        ctx.begin_frame(input(10, 10, true), 0, (1280, 720));
        assert!(!ctx.mouse_pressed());
        assert!(ctx.mouse_down());

        ctx.begin_frame(input(10, 10, false), 0, (1280, 720));
        assert!(!ctx.mouse_pressed());
        assert!(!ctx.mouse_down());

        // A fresh press after release is a new edge
        ctx.begin_frame(input(10, 10, true), 0, (1280, 720));
        assert!(ctx.mouse_pressed());
    }

    #[test]
    fn test_stale_generation_reattaches() {
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));
        assert!(ctx.is_attached_to(0));

        // Surface recreated: generation 1
        ctx.begin_frame(input(0, 0, false), 1, (1920, 1080));
        assert!(ctx.is_attached_to(1));
        assert_eq!(ctx.logical_size(), (1920, 1080));
    }

    #[test]
    fn test_scale_derives_from_logical_height() {
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));
        assert_eq!(ctx.scale(), 2);
        ctx.attach(0, (640, 360));
        assert_eq!(ctx.scale(), 1);
        ctx.attach(0, (3840, 2160));
        assert_eq!(ctx.scale(), 4);
        // Never drops below 1 on tiny windows
        ctx.attach(0, (320, 200));
        assert_eq!(ctx.scale(), 1);
    }

    #[test]
    fn test_begin_frame_clears_commands() {
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));
        ctx.push(DrawCommand::Overlay {
            color: Color::RGBA(0, 0, 0, 128),
        });
        assert_eq!(ctx.commands().len(), 1);

        ctx.begin_frame(input(0, 0, false), 0, (1280, 720));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_consume_press_drops_edge() {
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));
        ctx.begin_frame(input(0, 0, true), 0, (1280, 720));
        assert!(ctx.mouse_pressed());
        ctx.consume_press();
        assert!(!ctx.mouse_pressed());
    }
}
