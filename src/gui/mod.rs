//! Screen-Space Menu GUI
//!
//! Immediate-mode menus drawn over the live render surface. Panels are
//! rebuilt from scratch every frame:
//!
//! - [`GuiContext`] buffers draw commands and carries the frame's mouse
//!   snapshot; it is owned by the driver and re-attached whenever the
//!   surface is recreated.
//! - [`widgets::Ui`] lays out one panel per frame and reports widget
//!   interactions.
//! - [`MenuOverlay`] holds the menu state machine, the settings and
//!   bindings the widgets edit, and the deferred full-screen toggle.

pub mod context;
pub mod overlay;
pub mod style;
pub mod widgets;

pub use context::{FrameInput, GuiContext};
pub use overlay::{MenuOverlay, MenuScreen};
pub use style::GuiStyle;
