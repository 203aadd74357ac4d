//! Menu Overlay
//!
//! The screen-space menu system: a state machine over the menu screens,
//! the settings and binding state they edit, and the deferred
//! full-screen toggle.
//!
//! Panels are rebuilt every frame. Widget interactions do not mutate
//! state directly; they produce [`MenuAction`] values that are applied
//! after the panel is built, so all state changes funnel through one
//! place (the same shape as translating input events into game actions
//! before the game loop executes them).

use super::context::{FrameInput, GuiContext};
use super::widgets::Ui;
use crate::bindings::{BindingSet, CaptureOutcome};
use crate::display::Display;
use crate::settings::{
    FrameRateOption, Resolution, Settings, CUSTOM_FRAME_RATE_MAX, CUSTOM_FRAME_RATE_MIN,
};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

/// Which menu screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Play,
    Options,
    KeyBindings,
    Credits,
    Quit,
}

/// Single-slot queue for the deferred full-screen toggle. Requests
/// collapse into one; `take` consumes the slot.
#[derive(Debug, Default)]
pub(crate) struct PendingToggle {
    requested: bool,
}

impl PendingToggle {
    pub(crate) fn request(&mut self) {
        self.requested = true;
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.requested
    }
}

/// High-level outcome of one frame's widget interactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    Goto(MenuScreen),
    RequestFullscreenToggle,
    SelectResolution(usize),
    SelectFrameRate(FrameRateOption),
    SetCustomFrameRate(u32),
    SetVsync(bool),
    SetMasterVolume(i32),
    SetFxVolume(i32),
    SetMouseSensitivity(i32),
    StartCapture(usize),
    Quit,
}

/// Surface work an action needs from the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DisplayCommand {
    ApplyResolution(Resolution),
    SetFrameCap(Option<u32>),
    SetVsync(bool),
}

pub struct MenuOverlay {
    screen: MenuScreen,
    settings: Settings,
    bindings: BindingSet,
    resolutions: Vec<Resolution>,
    pending_toggle: PendingToggle,
    window_size: (u32, u32),
    quit_requested: bool,
    /// A mouse press consumed by rebinding must not also hit a widget
    swallow_click: bool,
}

impl MenuOverlay {
    pub fn new(
        bindings: BindingSet,
        resolutions: Vec<Resolution>,
        window_size: (u32, u32),
    ) -> Self {
        let mut settings = Settings::default();
        settings.resolution_index = resolutions
            .iter()
            .position(|r| (r.width, r.height) == window_size)
            .unwrap_or(0);

        MenuOverlay {
            screen: MenuScreen::Main,
            settings,
            bindings,
            resolutions,
            pending_toggle: PendingToggle::default(),
            window_size,
            quit_requested: false,
            swallow_click: false,
        }
    }

    /// Current client-area size, tracked across resizes and mode
    /// switches.
    #[allow(dead_code)] // Queried by the embedding game loop
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Feed one event through the overlay. Window resizes update the
    /// logical viewport; key and mouse presses drive an active capture.
    pub fn handle_event(&mut self, event: &Event, display: &mut Display) {
        match event {
            Event::Window {
                win_event: WindowEvent::SizeChanged(w, h),
                ..
            } => {
                if let Err(e) = display.handle_resize(*w, *h) {
                    log::error!("could not apply resized viewport: {}", e);
                }
                self.window_size = display.window_size();
            }
            Event::KeyDown {
                keycode: Some(key), ..
            } => {
                // An active capture owns every key press, F11 included
                let outcome = self.bindings.handle_key_press(*key);
                if outcome == CaptureOutcome::Idle && *key == Keycode::F11 {
                    self.request_fullscreen_toggle();
                }
            }
            Event::MouseButtonDown { mouse_btn, .. } => {
                if self.bindings.handle_mouse_press(*mouse_btn) != CaptureOutcome::Idle {
                    self.swallow_click = true;
                }
            }
            _ => {}
        }
    }

    /// Flag a full-screen toggle to run at the next processing point.
    pub fn request_fullscreen_toggle(&mut self) {
        self.pending_toggle.request();
    }

    /// Consume the pending toggle, if any. Called once per frame by the
    /// driver, outside event dispatch, so the surface is never torn down
    /// mid-event. Failure is logged and the loop carries on.
    pub fn process_fullscreen_toggle(&mut self, display: &mut Display, ctx: &mut GuiContext) {
        if !self.pending_toggle.take() {
            return;
        }
        match display.toggle_fullscreen() {
            Ok(()) => {
                ctx.attach(display.generation(), display.logical_size());
                self.window_size = display.window_size();
            }
            Err(e) => log::error!("fullscreen toggle failed: {}", e),
        }
    }

    /// Build the active screen's panel and apply whatever the widgets
    /// produced.
    pub fn update(&mut self, ctx: &mut GuiContext, input: FrameInput, display: &mut Display) {
        self.window_size = display.window_size();
        ctx.begin_frame(input, display.generation(), display.logical_size());
        if self.swallow_click {
            ctx.consume_press();
            self.swallow_click = false;
        }

        let fullscreen = display.is_fullscreen();
        let mut actions = Vec::new();
        {
            let mut ui = Ui::panel(ctx);
            match self.screen {
                MenuScreen::Main => self.main_menu(&mut ui, &mut actions),
                MenuScreen::Play => self.play_menu(&mut ui, &mut actions),
                MenuScreen::Options => self.options_menu(&mut ui, fullscreen, &mut actions),
                MenuScreen::KeyBindings => self.key_bindings_menu(&mut ui, &mut actions),
                MenuScreen::Credits => self.credits_menu(&mut ui, &mut actions),
                MenuScreen::Quit => self.quit_menu(&mut ui, &mut actions),
            }
        }

        for action in actions {
            if let Some(command) = self.apply_action(action) {
                Self::run_display_command(display, command);
            }
        }
    }

    /// Flush this frame's draw commands to the surface.
    pub fn render(&self, ctx: &mut GuiContext, display: &mut Display) -> Result<(), String> {
        ctx.flush(display.canvas_mut())
    }

    fn main_menu(&self, ui: &mut Ui, actions: &mut Vec<MenuAction>) {
        ui.title("GAME NAME");
        ui.center_block(240);
        if ui.button("PLAY") {
            actions.push(MenuAction::Goto(MenuScreen::Play));
        }
        if ui.button("OPTIONS") {
            actions.push(MenuAction::Goto(MenuScreen::Options));
        }
        if ui.button("CREDITS") {
            actions.push(MenuAction::Goto(MenuScreen::Credits));
        }
        if ui.button("QUIT") {
            actions.push(MenuAction::Goto(MenuScreen::Quit));
        }
    }

    fn play_menu(&self, ui: &mut Ui, actions: &mut Vec<MenuAction>) {
        ui.title("Play");
        if ui.back_button() {
            actions.push(MenuAction::Goto(MenuScreen::Main));
        }
        ui.center_block(180);
        // Multiplayer is not implemented yet
        let _ = ui.button("HOST");
        let _ = ui.button("JOIN");
        let _ = ui.button("SOLO");
    }

    fn options_menu(&self, ui: &mut Ui, fullscreen: bool, actions: &mut Vec<MenuAction>) {
        ui.title("Options");
        if ui.back_button() {
            actions.push(MenuAction::Goto(MenuScreen::Main));
        }

        if ui.checkbox("Fullscreen", fullscreen) {
            actions.push(MenuAction::RequestFullscreenToggle);
        }

        ui.label("Screen Resolution");
        let index = self.settings.resolution_index.min(self.resolutions.len().saturating_sub(1));
        let resolution_label = self
            .resolutions
            .get(index)
            .map(Resolution::label)
            .unwrap_or_else(|| "Unknown".to_string());
        if let Some(delta) = ui.selector(&resolution_label) {
            let new_index = step_index(index, delta, self.resolutions.len());
            if new_index != index {
                actions.push(MenuAction::SelectResolution(new_index));
            }
        }

        ui.label("Frame Rate Cap");
        let options = FrameRateOption::all();
        let selected = options
            .iter()
            .position(|o| *o == self.settings.frame_rate)
            .unwrap_or(0);
        if let Some(delta) = ui.selector(self.settings.frame_rate.label()) {
            let new_index = step_index(selected, delta, options.len());
            if new_index != selected {
                actions.push(MenuAction::SelectFrameRate(options[new_index]));
            }
        }
        if self.settings.frame_rate == FrameRateOption::Custom {
            if let Some(value) = ui.slider_int(
                "Custom Frame Rate",
                self.settings.custom_frame_rate as i32,
                CUSTOM_FRAME_RATE_MIN,
                CUSTOM_FRAME_RATE_MAX,
            ) {
                actions.push(MenuAction::SetCustomFrameRate(value as u32));
            }
        }

        if ui.checkbox("Vertical Sync", self.settings.vsync) {
            actions.push(MenuAction::SetVsync(!self.settings.vsync));
        }

        ui.label("Audio");
        if let Some(value) = ui.slider_int("Master Volume", self.settings.master_volume, 0, 100) {
            actions.push(MenuAction::SetMasterVolume(value));
        }
        if let Some(value) = ui.slider_int("FX Volume", self.settings.fx_volume, 0, 100) {
            actions.push(MenuAction::SetFxVolume(value));
        }

        ui.label("Mouse");
        if let Some(value) =
            ui.slider_int("Mouse Sensitivity", self.settings.mouse_sensitivity, 0, 100)
        {
            actions.push(MenuAction::SetMouseSensitivity(value));
        }

        ui.label("Controls");
        if ui.button("KEY BINDINGS") {
            actions.push(MenuAction::Goto(MenuScreen::KeyBindings));
        }
    }

    fn key_bindings_menu(&self, ui: &mut Ui, actions: &mut Vec<MenuAction>) {
        ui.title("Key Bindings");
        if ui.back_button() {
            actions.push(MenuAction::Goto(MenuScreen::Options));
        }

        for (i, binding) in self.bindings.bindings().iter().enumerate() {
            if ui.binding_row(
                binding.action.label(),
                &binding.input.label(),
                binding.capturing,
            ) {
                actions.push(MenuAction::StartCapture(i));
            }
        }

        if let Some(message) = self.bindings.error_message() {
            ui.spacing(6);
            ui.error_text(message);
        }
    }

    fn credits_menu(&self, ui: &mut Ui, actions: &mut Vec<MenuAction>) {
        ui.title("Credits");
        if ui.back_button() {
            actions.push(MenuAction::Goto(MenuScreen::Main));
        }
        ui.spacing(10);
        ui.label("Contributors:");
        ui.label("John Doe - Developer");
        ui.label("Jane Smith - Artist");
    }

    fn quit_menu(&self, ui: &mut Ui, actions: &mut Vec<MenuAction>) {
        ui.title("Quit Menu");
        ui.center_block(90);
        ui.label("Quit the game?");
        let (no, yes) = ui.button_pair("NO", "YES");
        if no {
            actions.push(MenuAction::Goto(MenuScreen::Main));
        }
        if yes {
            actions.push(MenuAction::Quit);
        }
    }

    /// Apply one action to the overlay's state. Returns the surface work
    /// the driver-owned display has to run for it, if any.
    fn apply_action(&mut self, action: MenuAction) -> Option<DisplayCommand> {
        match action {
            MenuAction::Goto(screen) => {
                if self.screen == MenuScreen::KeyBindings && screen != MenuScreen::KeyBindings {
                    self.bindings.clear_error();
                }
                self.screen = screen;
                None
            }
            MenuAction::RequestFullscreenToggle => {
                self.pending_toggle.request();
                None
            }
            MenuAction::SelectResolution(index) => {
                self.settings.resolution_index = index;
                self.resolutions
                    .get(index)
                    .copied()
                    .map(DisplayCommand::ApplyResolution)
            }
            MenuAction::SelectFrameRate(option) => {
                self.settings.frame_rate = option;
                Some(DisplayCommand::SetFrameCap(
                    option.cap(self.settings.custom_frame_rate),
                ))
            }
            MenuAction::SetCustomFrameRate(value) => {
                self.settings.custom_frame_rate = value;
                if self.settings.frame_rate == FrameRateOption::Custom {
                    Some(DisplayCommand::SetFrameCap(Some(value)))
                } else {
                    None
                }
            }
            MenuAction::SetVsync(enabled) => {
                self.settings.vsync = enabled;
                Some(DisplayCommand::SetVsync(enabled))
            }
            MenuAction::SetMasterVolume(value) => {
                self.settings.master_volume = value;
                None
            }
            MenuAction::SetFxVolume(value) => {
                self.settings.fx_volume = value;
                None
            }
            MenuAction::SetMouseSensitivity(value) => {
                self.settings.mouse_sensitivity = value;
                None
            }
            MenuAction::StartCapture(index) => {
                self.bindings.start_capture(index);
                None
            }
            MenuAction::Quit => {
                self.quit_requested = true;
                None
            }
        }
    }

    fn run_display_command(display: &mut Display, command: DisplayCommand) {
        match command {
            DisplayCommand::ApplyResolution(resolution) => {
                if let Err(e) = display.apply_resolution(resolution) {
                    log::error!("could not apply resolution {}: {}", resolution.label(), e);
                }
            }
            DisplayCommand::SetFrameCap(cap) => display.set_frame_cap(cap),
            DisplayCommand::SetVsync(enabled) => {
                if let Err(e) = display.set_vsync(enabled) {
                    log::error!("could not change vsync: {}", e);
                }
            }
        }
    }
}

/// Step a selection index by `delta`, clamped to the list.
fn step_index(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let stepped = index as i64 + delta as i64;
    stepped.clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::style::GuiStyle;

    fn overlay() -> MenuOverlay {
        MenuOverlay::new(
            BindingSet::defaults(),
            vec![Resolution::new(1280, 720), Resolution::new(1920, 1080)],
            (1280, 720),
        )
    }

    #[test]
    fn test_pending_toggle_is_single_slot() {
        let mut pending = PendingToggle::default();
        assert!(!pending.take());

        // Several requests collapse into one consumption
        pending.request();
        pending.request();
        assert!(pending.is_requested());
        assert!(pending.take());
        assert!(!pending.take());
    }

    #[test]
    fn test_request_without_processing_keeps_slot_full() {
        let mut pending = PendingToggle::default();
        pending.request();
        // Any number of frames may pass; nothing consumes the slot until
        // the processing point runs
        for _ in 0..10 {
            assert!(pending.is_requested());
        }
        assert!(pending.take());
    }

    #[test]
    fn test_transition_table() {
        let transitions = [
            (MenuScreen::Main, MenuScreen::Play),
            (MenuScreen::Play, MenuScreen::Main),
            (MenuScreen::Main, MenuScreen::Options),
            (MenuScreen::Options, MenuScreen::KeyBindings),
            (MenuScreen::KeyBindings, MenuScreen::Options),
            (MenuScreen::Options, MenuScreen::Main),
            (MenuScreen::Main, MenuScreen::Credits),
            (MenuScreen::Credits, MenuScreen::Main),
            (MenuScreen::Main, MenuScreen::Quit),
            (MenuScreen::Quit, MenuScreen::Main),
        ];
        let mut overlay = overlay();
        for (from, to) in transitions {
            overlay.screen = from;
            overlay.apply_action(MenuAction::Goto(to));
            assert_eq!(overlay.screen, to);
        }
    }

    #[test]
    fn test_quit_action_sets_flag_only() {
        let mut overlay = overlay();
        overlay.screen = MenuScreen::Quit;
        assert!(!overlay.should_quit());
        overlay.apply_action(MenuAction::Quit);
        assert!(overlay.should_quit());
    }

    #[test]
    fn test_fullscreen_request_goes_through_pending_slot() {
        let mut overlay = overlay();
        overlay.apply_action(MenuAction::RequestFullscreenToggle);
        overlay.apply_action(MenuAction::RequestFullscreenToggle);
        assert!(overlay.pending_toggle.is_requested());
        assert!(overlay.pending_toggle.take());
        assert!(!overlay.pending_toggle.take());
    }

    #[test]
    fn test_frame_rate_selection_emits_cap_command() {
        let mut overlay = overlay();
        let command = overlay.apply_action(MenuAction::SelectFrameRate(FrameRateOption::Fps144));
        assert_eq!(command, Some(DisplayCommand::SetFrameCap(Some(144))));
        assert_eq!(overlay.settings.frame_rate, FrameRateOption::Fps144);

        let command = overlay.apply_action(MenuAction::SelectFrameRate(FrameRateOption::Uncapped));
        assert_eq!(command, Some(DisplayCommand::SetFrameCap(None)));
    }

    #[test]
    fn test_custom_frame_rate_only_applies_in_custom_mode() {
        let mut overlay = overlay();
        assert_eq!(
            overlay.apply_action(MenuAction::SetCustomFrameRate(90)),
            None
        );

        overlay.apply_action(MenuAction::SelectFrameRate(FrameRateOption::Custom));
        assert_eq!(
            overlay.apply_action(MenuAction::SetCustomFrameRate(100)),
            Some(DisplayCommand::SetFrameCap(Some(100)))
        );
    }

    #[test]
    fn test_resolution_selection_emits_apply_command() {
        let mut overlay = overlay();
        let command = overlay.apply_action(MenuAction::SelectResolution(1));
        assert_eq!(
            command,
            Some(DisplayCommand::ApplyResolution(Resolution::new(1920, 1080)))
        );
        assert_eq!(overlay.settings.resolution_index, 1);
    }

    #[test]
    fn test_initial_resolution_index_matches_window() {
        let overlay = MenuOverlay::new(
            BindingSet::defaults(),
            vec![Resolution::new(1920, 1080), Resolution::new(1280, 720)],
            (1280, 720),
        );
        assert_eq!(overlay.settings.resolution_index, 1);
    }

    #[test]
    fn test_leaving_key_bindings_clears_error() {
        let mut overlay = overlay();
        overlay.screen = MenuScreen::KeyBindings;
        overlay.bindings.start_capture(0);
        overlay
            .bindings
            .handle_key_press(sdl2::keyboard::Keycode::F1);
        assert!(overlay.bindings.error_message().is_some());

        overlay.apply_action(MenuAction::Goto(MenuScreen::Options));
        assert_eq!(overlay.bindings.error_message(), None);
    }

    #[test]
    fn test_start_capture_routes_to_bindings() {
        let mut overlay = overlay();
        overlay.apply_action(MenuAction::StartCapture(2));
        assert_eq!(overlay.bindings.capturing_index(), Some(2));
    }

    #[test]
    fn test_step_index_clamps_at_ends() {
        assert_eq!(step_index(0, -1, 5), 0);
        assert_eq!(step_index(4, 1, 5), 4);
        assert_eq!(step_index(2, 1, 5), 3);
        assert_eq!(step_index(2, -1, 5), 1);
        assert_eq!(step_index(0, 1, 0), 0);
    }

    #[test]
    fn test_main_menu_click_navigates_to_play() {
        // Headless frame: panel over 1280x720, centered button block.
        // The first button of the block sits at (148, 240).
        let mut ctx = GuiContext::new(GuiStyle::default());
        ctx.attach(0, (1280, 720));
        ctx.begin_frame(
            FrameInput {
                mouse_x: 150,
                mouse_y: 250,
                mouse_down: true,
            },
            0,
            (1280, 720),
        );

        let overlay = overlay();
        let mut actions = Vec::new();
        let mut ui = Ui::panel(&mut ctx);
        overlay.main_menu(&mut ui, &mut actions);
        assert_eq!(actions, vec![MenuAction::Goto(MenuScreen::Play)]);
    }
}
