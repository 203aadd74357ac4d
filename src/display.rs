//! Render Surface Management
//!
//! Owns the SDL2 window/canvas pair and every operation that tears it
//! down and recreates it: full-screen toggling, resolution changes and
//! vsync changes. Each recreation bumps a generation counter so the GUI
//! context can detect that its drawing state belongs to a dead surface.
//!
//! The logical viewport set on the canvas is saved across recreations,
//! so the coordinate system the menus draw in survives a mode switch.

use crate::settings::{Resolution, FALLBACK_RESOLUTIONS};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::VideoSubsystem;
use std::time::Duration;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;
pub const WINDOW_TITLE: &str = "Game";

/// Windowed/fullscreen bookkeeping, kept separate from SDL so the size
/// restore logic can be exercised directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ModeState {
    fullscreen: bool,
    windowed_size: (u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ModeChange {
    EnterFullscreen,
    /// Carries the windowed size to restore
    EnterWindowed((u32, u32)),
}

impl ModeState {
    pub(crate) fn new(windowed_size: (u32, u32)) -> Self {
        ModeState {
            fullscreen: false,
            windowed_size,
        }
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Flip the mode. Entering full-screen records `current_size` so the
    /// matching switch back restores it exactly.
    pub(crate) fn toggle(&mut self, current_size: (u32, u32)) -> ModeChange {
        if self.fullscreen {
            self.fullscreen = false;
            ModeChange::EnterWindowed(self.windowed_size)
        } else {
            self.windowed_size = current_size;
            self.fullscreen = true;
            ModeChange::EnterFullscreen
        }
    }
}

/// Requested configuration for a surface rebuild.
enum SurfaceMode {
    Windowed(u32, u32),
    /// Full-screen at the desktop resolution
    FullscreenDesktop,
    /// Full-screen at an explicit resolution
    FullscreenExclusive(u32, u32),
}

/// The live render surface.
pub struct Display {
    video: VideoSubsystem,
    canvas: Canvas<Window>,
    mode: ModeState,
    logical_size: (u32, u32),
    vsync: bool,
    frame_cap: Option<u32>,
    generation: u64,
}

impl Display {
    pub fn new(video: VideoSubsystem, width: u32, height: u32) -> Result<Self, String> {
        let window = video
            .window(WINDOW_TITLE, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        canvas
            .set_logical_size(width, height)
            .map_err(|e| e.to_string())?;

        Ok(Display {
            video,
            canvas,
            mode: ModeState::new((width, height)),
            logical_size: (width, height),
            vsync: false,
            frame_cap: None,
            generation: 0,
        })
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<Window> {
        &mut self.canvas
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.logical_size
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode.is_fullscreen()
    }

    /// Bumped on every surface recreation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clear(&mut self) {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    /// Tear down the window/canvas and recreate it per `mode`, restoring
    /// the saved logical viewport onto the new canvas.
    fn rebuild(&mut self, mode: SurfaceMode) -> Result<(), String> {
        let (logical_w, logical_h) = self.logical_size;

        let window = match mode {
            SurfaceMode::Windowed(w, h) => self
                .video
                .window(WINDOW_TITLE, w, h)
                .position_centered()
                .resizable()
                .build(),
            SurfaceMode::FullscreenDesktop => self
                .video
                .window(WINDOW_TITLE, logical_w, logical_h)
                .fullscreen_desktop()
                .build(),
            SurfaceMode::FullscreenExclusive(w, h) => self
                .video
                .window(WINDOW_TITLE, w, h)
                .fullscreen()
                .build(),
        }
        .map_err(|e| e.to_string())?;

        let builder = window.into_canvas();
        let builder = if self.vsync {
            builder.present_vsync()
        } else {
            builder
        };
        let mut canvas = builder.build().map_err(|e| e.to_string())?;
        canvas
            .set_logical_size(logical_w, logical_h)
            .map_err(|e| e.to_string())?;

        self.canvas = canvas;
        self.generation += 1;
        let (w, h) = self.window_size();
        log::info!("recreated render surface at {}x{}", w, h);
        Ok(())
    }

    /// Switch between windowed and full-screen mode.
    ///
    /// On failure the surface is left in whatever state the partial
    /// rebuild produced; the caller only logs it.
    pub fn toggle_fullscreen(&mut self) -> Result<(), String> {
        let change = self.mode.toggle(self.window_size());
        log::info!(
            "toggling fullscreen, new state: {}",
            if self.mode.is_fullscreen() {
                "fullscreen"
            } else {
                "windowed"
            }
        );
        match change {
            ModeChange::EnterFullscreen => self.rebuild(SurfaceMode::FullscreenDesktop),
            ModeChange::EnterWindowed((w, h)) => self.rebuild(SurfaceMode::Windowed(w, h)),
        }
    }

    /// Recreate the surface at `resolution` in the current mode.
    pub fn apply_resolution(&mut self, resolution: Resolution) -> Result<(), String> {
        if self.mode.is_fullscreen() {
            self.rebuild(SurfaceMode::FullscreenExclusive(
                resolution.width,
                resolution.height,
            ))
        } else {
            self.rebuild(SurfaceMode::Windowed(resolution.width, resolution.height))
        }
    }

    /// SDL2 fixes vsync at canvas construction, so changing it rebuilds
    /// the surface in place.
    pub fn set_vsync(&mut self, enabled: bool) -> Result<(), String> {
        self.vsync = enabled;
        if self.mode.is_fullscreen() {
            self.rebuild(SurfaceMode::FullscreenDesktop)
        } else {
            let (w, h) = self.window_size();
            self.rebuild(SurfaceMode::Windowed(w, h))
        }
    }

    pub fn set_frame_cap(&mut self, cap: Option<u32>) {
        self.frame_cap = cap;
    }

    /// Per-frame sleep for the configured cap. `None` means uncapped.
    pub fn frame_delay(&self) -> Option<Duration> {
        self.frame_cap
            .map(|cap| Duration::new(0, 1_000_000_000u32 / cap.max(1)))
    }

    /// A window resize resets the logical viewport to the new window
    /// pixels.
    pub fn handle_resize(&mut self, width: i32, height: i32) -> Result<(), String> {
        let (w, h) = (width.max(1) as u32, height.max(1) as u32);
        self.canvas
            .set_logical_size(w, h)
            .map_err(|e| e.to_string())?;
        self.logical_size = (w, h);
        Ok(())
    }

    /// Translate window-pixel coordinates into the logical viewport.
    pub fn window_to_logical(&self, x: i32, y: i32) -> (i32, i32) {
        let (win_w, win_h) = self.window_size();
        let (log_w, log_h) = self.logical_size;
        if win_w == 0 || win_h == 0 {
            return (x, y);
        }
        (
            (x as f64 * log_w as f64 / win_w as f64) as i32,
            (y as f64 * log_h as f64 / win_h as f64) as i32,
        )
    }

    /// Resolutions offered on the options screen, largest first.
    pub fn supported_resolutions(&self) -> Vec<Resolution> {
        match self.query_display_modes() {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                log::warn!("no display modes reported, using fallback resolution list");
                FALLBACK_RESOLUTIONS.to_vec()
            }
            Err(e) => {
                log::warn!("could not enumerate display modes ({}), using fallback list", e);
                FALLBACK_RESOLUTIONS.to_vec()
            }
        }
    }

    fn query_display_modes(&self) -> Result<Vec<Resolution>, String> {
        let count = self.video.num_display_modes(0)?;
        let mut list = Vec::new();
        for i in 0..count {
            let mode = self.video.display_mode(0, i)?;
            if mode.w <= 0 || mode.h <= 0 {
                continue;
            }
            let resolution = Resolution::new(mode.w as u32, mode.h as u32);
            // Modes repeat per pixel format and refresh rate
            if !list.contains(&resolution) {
                list.push(resolution);
            }
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entering_fullscreen_records_current_size() {
        let mut mode = ModeState::new((1280, 720));
        let change = mode.toggle((1024, 768));
        assert_eq!(change, ModeChange::EnterFullscreen);
        assert!(mode.is_fullscreen());
        assert_eq!(mode.windowed_size, (1024, 768));
    }

    #[test]
    fn test_round_trip_restores_windowed_size_exactly() {
        let mut mode = ModeState::new((1280, 720));
        mode.toggle((1280, 720));
        // Full-screen reports the desktop size; it must not leak into
        // the restored windowed size
        let change = mode.toggle((2560, 1440));
        assert_eq!(change, ModeChange::EnterWindowed((1280, 720)));
        assert!(!mode.is_fullscreen());
    }

    #[test]
    fn test_windowed_size_tracks_latest_entry() {
        let mut mode = ModeState::new((1280, 720));
        mode.toggle((800, 600));
        mode.toggle((1920, 1080));
        let change = mode.toggle((640, 480));
        assert_eq!(change, ModeChange::EnterFullscreen);
        assert_eq!(mode.windowed_size, (640, 480));
    }
}
