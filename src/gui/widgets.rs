//! Immediate-Mode Widgets
//!
//! A panel builder with a vertical layout cursor. Widgets are drawn
//! fresh every frame: each call emits draw commands into the context
//! and reports interaction against the frame's mouse snapshot. Buttons
//! fire on the press edge.

use super::context::{DrawCommand, GuiContext};
use crate::text::{text_height, text_width};
use sdl2::rect::Rect;

/// Panel size as a fraction of the logical viewport (remaining margin is
/// split evenly, so 8/10 means a 1/10 border on every side).
const PANEL_NUMERATOR: u32 = 8;
const PANEL_DENOMINATOR: u32 = 10;

/// One menu panel being built for the current frame.
pub struct Ui<'a> {
    ctx: &'a mut GuiContext,
    panel: Rect,
    content_x: i32,
    content_w: u32,
    cursor_y: i32,
}

impl<'a> Ui<'a> {
    /// Open the standard centered panel: darkened overlay, background
    /// box and a double border.
    pub fn panel(ctx: &'a mut GuiContext) -> Ui<'a> {
        let (lw, lh) = ctx.logical_size();
        let w = lw * PANEL_NUMERATOR / PANEL_DENOMINATOR;
        let h = lh * PANEL_NUMERATOR / PANEL_DENOMINATOR;
        let x = ((lw - w) / 2) as i32;
        let y = ((lh - h) / 2) as i32;
        let panel = Rect::new(x, y, w.max(1), h.max(1));

        let style = ctx.style();
        let overlay = style.overlay_color;
        let background = style.panel_color;
        let border = style.border_color;
        let padding = style.window_padding;

        ctx.push(DrawCommand::Overlay { color: overlay });
        ctx.push(DrawCommand::FillRect {
            rect: panel,
            color: background,
        });
        ctx.push(DrawCommand::StrokeRect {
            rect: panel,
            color: border,
        });
        ctx.push(DrawCommand::StrokeRect {
            rect: Rect::new(x + 2, y + 2, (w - 4).max(1), (h - 4).max(1)),
            color: border,
        });

        Ui {
            ctx,
            panel,
            content_x: x + padding,
            content_w: (w as i32 - 2 * padding).max(1) as u32,
            cursor_y: y + padding,
        }
    }

    fn scale(&self) -> u32 {
        self.ctx.scale()
    }

    fn spacing_after(&mut self, height: u32) {
        self.cursor_y += height as i32 + self.ctx.style().item_spacing;
    }

    /// Reserve a widget row and advance the cursor past it.
    fn widget_rect(&mut self, w: u32, h: u32) -> Rect {
        let rect = Rect::new(self.content_x, self.cursor_y, w.min(self.content_w), h);
        self.spacing_after(h);
        rect
    }

    fn hovered(&self, rect: Rect) -> bool {
        let (mx, my) = self.ctx.mouse_pos();
        rect.contains_point((mx, my))
    }

    /// Extra vertical gap.
    pub fn spacing(&mut self, px: i32) {
        self.cursor_y += px;
    }

    /// Jump the cursor so a block of `height` pixels sits at the panel's
    /// vertical center.
    pub fn center_block(&mut self, height: u32) {
        let center = self.panel.y() + self.panel.height() as i32 / 2;
        self.cursor_y = self.cursor_y.max(center - height as i32 / 2);
    }

    /// Large centered heading at the top of the panel.
    pub fn title(&mut self, text: &str) {
        let scale = (self.scale() * 2).min(5);
        let w = text_width(text, scale);
        let x = self.panel.x() + (self.panel.width().saturating_sub(w) / 2) as i32;
        let color = self.ctx.style().title_color;
        self.ctx.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y: self.cursor_y,
            color,
            scale,
        });
        self.spacing_after(text_height(scale) + 6);
    }

    pub fn label(&mut self, text: &str) {
        let scale = self.scale();
        let color = self.ctx.style().label_color;
        self.ctx.push(DrawCommand::Text {
            text: text.to_string(),
            x: self.content_x,
            y: self.cursor_y,
            color,
            scale,
        });
        self.spacing_after(text_height(scale));
    }

    /// Error message in the error color.
    pub fn error_text(&mut self, text: &str) {
        let scale = self.scale();
        let color = self.ctx.style().error_color;
        self.ctx.push(DrawCommand::Text {
            text: text.to_string(),
            x: self.content_x,
            y: self.cursor_y,
            color,
            scale,
        });
        self.spacing_after(text_height(scale));
    }

    /// Standard menu button. Returns true on the frame it is clicked.
    pub fn button(&mut self, label: &str) -> bool {
        let (w, h) = (self.ctx.style().button_width, self.ctx.style().button_height);
        let rect = self.widget_rect(w, h);
        self.button_in(rect, label)
    }

    /// Half-width button used for BACK.
    pub fn back_button(&mut self) -> bool {
        let w = self.ctx.style().button_width / 2;
        let rect = self.widget_rect(w, 36);
        self.button_in(rect, "BACK")
    }

    /// Two buttons side by side on one row.
    pub fn button_pair(&mut self, left: &str, right: &str) -> (bool, bool) {
        let style = self.ctx.style();
        let (w, h) = (style.button_width / 2, style.button_height);
        let gap = style.item_spacing;
        let row = self.widget_rect(w * 2 + gap as u32, h);
        let left_rect = Rect::new(row.x(), row.y(), w, h);
        let right_rect = Rect::new(row.x() + w as i32 + gap, row.y(), w, h);
        (
            self.button_in(left_rect, left),
            self.button_in(right_rect, right),
        )
    }

    fn button_in(&mut self, rect: Rect, label: &str) -> bool {
        let hovered = self.hovered(rect);
        let clicked = hovered && self.ctx.mouse_pressed();
        let style = self.ctx.style();
        let fill = if hovered && self.ctx.mouse_down() {
            style.button_pressed_color
        } else if hovered {
            style.button_hover_color
        } else {
            style.button_color
        };
        let border = style.border_color;
        let text_color = style.button_text_color;

        let scale = self.scale();
        let tw = text_width(label, scale);
        let tx = rect.x() + (rect.width().saturating_sub(tw) / 2) as i32;
        let ty = rect.y() + (rect.height().saturating_sub(text_height(scale)) / 2) as i32;

        self.ctx.push(DrawCommand::FillRect { rect, color: fill });
        self.ctx.push(DrawCommand::StrokeRect {
            rect,
            color: border,
        });
        self.ctx.push(DrawCommand::Text {
            text: label.to_string(),
            x: tx,
            y: ty,
            color: text_color,
            scale,
        });
        clicked
    }

    /// Returns true on the frame the box or its label is clicked.
    pub fn checkbox(&mut self, label: &str, checked: bool) -> bool {
        let scale = self.scale();
        let box_size = text_height(scale) + 6;
        let row = self.widget_rect(
            box_size + 8 + text_width(label, scale),
            box_size,
        );
        let box_rect = Rect::new(row.x(), row.y(), box_size, box_size);

        let hovered = self.hovered(row);
        let clicked = hovered && self.ctx.mouse_pressed();

        let style = self.ctx.style();
        let fill = if hovered {
            style.button_hover_color
        } else {
            style.button_color
        };
        let border = style.border_color;
        let accent = style.accent_color;
        let text_color = style.label_color;

        self.ctx.push(DrawCommand::FillRect {
            rect: box_rect,
            color: fill,
        });
        self.ctx.push(DrawCommand::StrokeRect {
            rect: box_rect,
            color: border,
        });
        if checked {
            self.ctx.push(DrawCommand::FillRect {
                rect: Rect::new(
                    box_rect.x() + 4,
                    box_rect.y() + 4,
                    box_size.saturating_sub(8).max(1),
                    box_size.saturating_sub(8).max(1),
                ),
                color: accent,
            });
        }
        self.ctx.push(DrawCommand::Text {
            text: label.to_string(),
            x: box_rect.x() + box_size as i32 + 8,
            y: box_rect.y() + 3,
            color: text_color,
            scale,
        });
        clicked
    }

    /// Horizontal integer slider with the value and label drawn after
    /// the track. Returns the new value while it is being dragged.
    pub fn slider_int(&mut self, label: &str, value: i32, min: i32, max: i32) -> Option<i32> {
        debug_assert!(min < max);
        let scale = self.scale();
        let row_h = text_height(scale) + 8;
        let track_w = self.content_w / 2;
        let row = self.widget_rect(self.content_w, row_h);
        let track = Rect::new(row.x(), row.y() + 4, track_w, row_h.saturating_sub(8));

        let style = self.ctx.style();
        let track_color = style.button_color;
        let border = style.border_color;
        let accent = style.accent_color;
        let label_color = style.label_color;

        let span = (max - min) as f32;
        let fraction = ((value - min) as f32 / span).clamp(0.0, 1.0);
        let fill_w = (track_w as f32 * fraction) as u32;

        self.ctx.push(DrawCommand::FillRect {
            rect: track,
            color: track_color,
        });
        if fill_w > 0 {
            self.ctx.push(DrawCommand::FillRect {
                rect: Rect::new(track.x(), track.y(), fill_w, track.height()),
                color: accent,
            });
        }
        self.ctx.push(DrawCommand::StrokeRect {
            rect: track,
            color: border,
        });
        self.ctx.push(DrawCommand::Text {
            text: format!("{}  {}", value, label),
            x: track.x() + track_w as i32 + 10,
            y: row.y() + 4,
            color: label_color,
            scale,
        });

        // Drag anywhere on the row-height band over the track
        let grab = Rect::new(track.x(), row.y(), track_w, row_h);
        if self.ctx.mouse_down() && self.hovered(grab) {
            let (mx, _) = self.ctx.mouse_pos();
            let rel = (mx - track.x()).clamp(0, track_w as i32) as f32 / track_w as f32;
            let new_value = min + (rel * span).round() as i32;
            let new_value = new_value.clamp(min, max);
            if new_value != value {
                return Some(new_value);
            }
        }
        None
    }

    /// Option stepper: `<` and `>` arrows around the current value.
    /// Returns -1 or +1 when an arrow is clicked.
    pub fn selector(&mut self, value_label: &str) -> Option<i32> {
        let scale = self.scale();
        let arrow = text_height(scale) + 10;
        let value_w = 110 * scale;
        let row = self.widget_rect(arrow * 2 + value_w + 16, arrow);

        let left = Rect::new(row.x(), row.y(), arrow, arrow);
        let right = Rect::new(
            row.x() + (arrow + value_w + 16) as i32,
            row.y(),
            arrow,
            arrow,
        );

        let prev = self.button_in(left, "<");

        let value_color = self.ctx.style().button_text_color;
        let tw = text_width(value_label, scale);
        let tx = row.x() + arrow as i32 + 8 + (value_w.saturating_sub(tw) / 2) as i32;
        self.ctx.push(DrawCommand::Text {
            text: value_label.to_string(),
            x: tx,
            y: row.y() + 5,
            color: value_color,
            scale,
        });

        let next = self.button_in(right, ">");

        if prev {
            Some(-1)
        } else if next {
            Some(1)
        } else {
            None
        }
    }

    /// Binding table row: action name in a fixed column, then a button
    /// showing the bound input (or a capture prompt). Returns true when
    /// the button is clicked.
    pub fn binding_row(&mut self, action: &str, input: &str, capturing: bool) -> bool {
        let scale = self.scale();
        let row_h = text_height(scale) + 10;
        let column = 130 * scale;
        let button_w = 110 * scale;
        let row = self.widget_rect(column + button_w, row_h);

        let label_color = self.ctx.style().label_color;
        self.ctx.push(DrawCommand::Text {
            text: action.to_string(),
            x: row.x(),
            y: row.y() + 5,
            color: label_color,
            scale,
        });

        let label = if capturing { "Press a key..." } else { input };
        let button = Rect::new(row.x() + column as i32, row.y(), button_w, row_h);
        self.button_in(button, label)
    }
}
