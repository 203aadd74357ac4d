//! Menu styling constants.

use sdl2::pixels::Color;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct GuiStyle {
    /// Overlay darkening behind panels
    pub overlay_color: Color,

    /// Panel background
    pub panel_color: Color,

    /// Panel border (drawn doubled)
    pub border_color: Color,

    /// Title text
    pub title_color: Color,

    /// Normal text
    pub label_color: Color,

    /// Values, check marks and slider fills
    pub accent_color: Color,

    /// Rebinding error message
    pub error_color: Color,

    /// Button fill per interaction state
    pub button_color: Color,
    pub button_hover_color: Color,
    pub button_pressed_color: Color,
    pub button_text_color: Color,

    /// Inner padding of a panel, logical pixels
    pub window_padding: i32,

    /// Vertical gap between widgets, logical pixels
    pub item_spacing: i32,

    pub button_width: u32,
    pub button_height: u32,
}

impl Default for GuiStyle {
    fn default() -> Self {
        GuiStyle {
            overlay_color: Color::RGBA(0, 0, 0, 180),
            panel_color: Color::RGB(30, 30, 40),
            border_color: Color::RGB(100, 100, 120),
            title_color: Color::RGB(220, 220, 240),
            label_color: Color::RGB(160, 160, 170),
            accent_color: Color::RGB(100, 255, 100),
            error_color: Color::RGB(255, 64, 64),
            button_color: Color::RGB(45, 45, 60),
            button_hover_color: Color::RGB(80, 100, 140),
            button_pressed_color: Color::RGB(60, 75, 105),
            button_text_color: Color::RGB(255, 255, 255),
            window_padding: 20,
            item_spacing: 10,
            button_width: 200,
            button_height: 50,
        }
    }
}
