//! Action Bindings
//!
//! Associates game actions with physical inputs (keyboard keys or mouse
//! buttons) and drives the rebinding flow on the key-bindings screen.
//!
//! Invariants maintained by [`BindingSet`]:
//! - no two bindings share the same bound input
//! - at most one binding is capturing at a time
//! - a rejected input leaves the binding's prior input untouched
//!
//! Function keys F1-F12 are reserved and can never be bound.

use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use serde::{Deserialize, Serialize};

/// High-level game actions a player can bind inputs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    ClimbUp,
    ClimbDown,
    PrimaryAction,
    SecondaryAction,
    Interact,
    Jump,
    Sprint,
}

impl GameAction {
    pub fn label(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "Move Left",
            GameAction::MoveRight => "Move Right",
            GameAction::ClimbUp => "Climb Up",
            GameAction::ClimbDown => "Climb Down",
            GameAction::PrimaryAction => "Primary Action",
            GameAction::SecondaryAction => "Secondary Action",
            GameAction::Interact => "Interact",
            GameAction::Jump => "Jump",
            GameAction::Sprint => "Sprint",
        }
    }
}

/// A physical input: a keyboard key or a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundInput {
    Key(Keycode),
    Mouse(MouseButton),
}

impl BoundInput {
    /// Human-readable name shown on binding buttons.
    pub fn label(&self) -> String {
        match self {
            BoundInput::Key(key) => key.name(),
            BoundInput::Mouse(button) => match button {
                MouseButton::Left => "Left Click".to_string(),
                MouseButton::Right => "Right Click".to_string(),
                MouseButton::Middle => "Middle Click".to_string(),
                MouseButton::X1 => "Mouse 4".to_string(),
                MouseButton::X2 => "Mouse 5".to_string(),
                MouseButton::Unknown => "Unknown Mouse Button".to_string(),
            },
        }
    }

    /// Parse a mouse button from its config name ("Left", "Right", ...).
    pub fn mouse_from_name(name: &str) -> Option<BoundInput> {
        let button = match name {
            "Left" => MouseButton::Left,
            "Right" => MouseButton::Right,
            "Middle" => MouseButton::Middle,
            "X1" => MouseButton::X1,
            "X2" => MouseButton::X2,
            _ => return None,
        };
        Some(BoundInput::Mouse(button))
    }
}

/// One action-to-input association.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBinding {
    pub action: GameAction,
    pub input: BoundInput,
    /// Waiting for the next input event to assign
    pub capturing: bool,
}

impl KeyBinding {
    pub fn new(action: GameAction, input: BoundInput) -> Self {
        KeyBinding {
            action,
            input,
            capturing: false,
        }
    }
}

/// Outcome of feeding an input event to a capturing binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The capturing binding took the new input
    Committed,
    /// Capture ended without changing the binding
    Cancelled,
    /// Input reserved or already bound; capture stays active
    Rejected,
    /// No binding was capturing
    Idle,
}

/// Keys that can never be bound.
const RESERVED_KEYS: [Keycode; 12] = [
    Keycode::F1,
    Keycode::F2,
    Keycode::F3,
    Keycode::F4,
    Keycode::F5,
    Keycode::F6,
    Keycode::F7,
    Keycode::F8,
    Keycode::F9,
    Keycode::F10,
    Keycode::F11,
    Keycode::F12,
];

const CONFLICT_MESSAGE: &str = "Input already assigned or invalid!";

/// The ordered binding list plus the rebinding state machine.
pub struct BindingSet {
    bindings: Vec<KeyBinding>,
    error_message: Option<String>,
}

impl BindingSet {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        BindingSet {
            bindings,
            error_message: None,
        }
    }

    /// Compiled-in default table, used when no binding config is present.
    pub fn defaults() -> Self {
        BindingSet::new(vec![
            KeyBinding::new(GameAction::MoveLeft, BoundInput::Key(Keycode::Q)),
            KeyBinding::new(GameAction::MoveRight, BoundInput::Key(Keycode::D)),
            KeyBinding::new(GameAction::ClimbUp, BoundInput::Key(Keycode::Z)),
            KeyBinding::new(GameAction::ClimbDown, BoundInput::Key(Keycode::S)),
            KeyBinding::new(GameAction::PrimaryAction, BoundInput::Mouse(MouseButton::Left)),
            KeyBinding::new(GameAction::SecondaryAction, BoundInput::Mouse(MouseButton::Right)),
            KeyBinding::new(GameAction::Interact, BoundInput::Key(Keycode::E)),
            KeyBinding::new(GameAction::Jump, BoundInput::Key(Keycode::Space)),
            KeyBinding::new(GameAction::Sprint, BoundInput::Key(Keycode::LShift)),
        ])
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Message shown on the key-bindings screen after a rejected input.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Index of the binding currently capturing, if any.
    pub fn capturing_index(&self) -> Option<usize> {
        self.bindings.iter().position(|b| b.capturing)
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing_index().is_some()
    }

    /// Put the binding at `index` into capture mode.
    ///
    /// Every other binding's capturing flag is cleared first, so at most
    /// one binding listens at a time. Clears any visible error message.
    pub fn start_capture(&mut self, index: usize) {
        if index >= self.bindings.len() {
            return;
        }
        for binding in &mut self.bindings {
            binding.capturing = false;
        }
        self.bindings[index].capturing = true;
        self.error_message = None;
    }

    /// End capture without changing the binding. Clears the message.
    pub fn cancel_capture(&mut self) {
        for binding in &mut self.bindings {
            binding.capturing = false;
        }
        self.error_message = None;
    }

    /// Feed a key press to the capture state machine.
    ///
    /// Escape cancels. A reserved or conflicting key is rejected and the
    /// binding keeps listening; any other key commits.
    pub fn handle_key_press(&mut self, key: Keycode) -> CaptureOutcome {
        if !self.is_capturing() {
            return CaptureOutcome::Idle;
        }
        if key == Keycode::Escape {
            self.cancel_capture();
            return CaptureOutcome::Cancelled;
        }
        self.try_commit(BoundInput::Key(key))
    }

    /// Feed a mouse button press to the capture state machine.
    pub fn handle_mouse_press(&mut self, button: MouseButton) -> CaptureOutcome {
        if !self.is_capturing() {
            return CaptureOutcome::Idle;
        }
        self.try_commit(BoundInput::Mouse(button))
    }

    fn try_commit(&mut self, input: BoundInput) -> CaptureOutcome {
        let index = match self.capturing_index() {
            Some(index) => index,
            None => return CaptureOutcome::Idle,
        };

        if !self.is_input_valid(input, index) {
            self.error_message = Some(CONFLICT_MESSAGE.to_string());
            return CaptureOutcome::Rejected;
        }

        self.bindings[index].input = input;
        self.bindings[index].capturing = false;
        self.error_message = None;
        CaptureOutcome::Committed
    }

    /// An input is valid when it is not reserved and not bound to any
    /// other action. `exempt` is the binding being rebound, so pressing
    /// its current input again is a no-op commit rather than a conflict.
    fn is_input_valid(&self, input: BoundInput, exempt: usize) -> bool {
        if let BoundInput::Key(key) = input {
            if RESERVED_KEYS.contains(&key) {
                return false;
            }
        }
        !self
            .bindings
            .iter()
            .enumerate()
            .any(|(i, binding)| i != exempt && binding.input == input)
    }

    /// True when `input` is bound to any action. Used when building a
    /// binding set from config to keep the inputs unique.
    pub fn conflicts_with(&self, input: BoundInput) -> bool {
        self.bindings.iter().any(|b| b.input == input)
    }

    /// Append a binding, refusing duplicates by input.
    pub fn push(&mut self, binding: KeyBinding) -> bool {
        if self.conflicts_with(binding.input) {
            return false;
        }
        self.bindings.push(binding);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(bindings: Vec<(GameAction, BoundInput)>) -> BindingSet {
        BindingSet::new(
            bindings
                .into_iter()
                .map(|(action, input)| KeyBinding::new(action, input))
                .collect(),
        )
    }

    fn assert_inputs_unique(set: &BindingSet) {
        let bindings = set.bindings();
        for (i, a) in bindings.iter().enumerate() {
            for b in bindings.iter().skip(i + 1) {
                assert_ne!(a.input, b.input);
            }
        }
    }

    #[test]
    fn test_commit_assigns_input_and_ends_capture() {
        // Capture on Jump, then a left click arrives
        let mut set = set_with(vec![(GameAction::Jump, BoundInput::Key(Keycode::Space))]);
        set.start_capture(0);

        let outcome = set.handle_mouse_press(MouseButton::Left);

        assert_eq!(outcome, CaptureOutcome::Committed);
        assert_eq!(set.bindings()[0].input, BoundInput::Mouse(MouseButton::Left));
        assert!(!set.bindings()[0].capturing);
        assert_eq!(set.error_message(), None);
    }

    #[test]
    fn test_conflicting_rebind_rejected_and_binding_unchanged() {
        let mut set = set_with(vec![
            (GameAction::MoveLeft, BoundInput::Key(Keycode::Q)),
            (GameAction::MoveRight, BoundInput::Key(Keycode::D)),
        ]);
        set.start_capture(1);

        let outcome = set.handle_key_press(Keycode::Q);

        assert_eq!(outcome, CaptureOutcome::Rejected);
        assert_eq!(set.bindings()[1].input, BoundInput::Key(Keycode::D));
        assert!(set.error_message().is_some());
        // A rejected input keeps the binding listening
        assert_eq!(set.capturing_index(), Some(1));
        assert_inputs_unique(&set);
    }

    #[test]
    fn test_function_keys_always_rejected() {
        for key in RESERVED_KEYS {
            let mut set = BindingSet::defaults();
            set.start_capture(0);
            assert_eq!(set.handle_key_press(key), CaptureOutcome::Rejected);
            assert_eq!(set.bindings()[0].input, BoundInput::Key(Keycode::Q));
        }
    }

    #[test]
    fn test_inputs_stay_unique_after_any_successful_rebind() {
        let mut set = BindingSet::defaults();
        set.start_capture(2);
        assert_eq!(set.handle_key_press(Keycode::W), CaptureOutcome::Committed);
        assert_inputs_unique(&set);

        set.start_capture(0);
        assert_eq!(
            set.handle_mouse_press(MouseButton::Middle),
            CaptureOutcome::Committed
        );
        assert_inputs_unique(&set);
    }

    #[test]
    fn test_starting_capture_clears_other_capturing_flags() {
        let mut set = BindingSet::defaults();
        set.start_capture(0);
        set.start_capture(3);

        let capturing: Vec<usize> = set
            .bindings()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.capturing)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(capturing, vec![3]);
    }

    #[test]
    fn test_escape_cancels_without_mutating_prior_input() {
        let mut set = set_with(vec![(GameAction::Jump, BoundInput::Key(Keycode::Space))]);
        set.start_capture(0);

        let outcome = set.handle_key_press(Keycode::Escape);

        assert_eq!(outcome, CaptureOutcome::Cancelled);
        assert_eq!(set.bindings()[0].input, BoundInput::Key(Keycode::Space));
        assert!(!set.is_capturing());
        assert_eq!(set.error_message(), None);
    }

    #[test]
    fn test_escape_clears_previous_error() {
        let mut set = BindingSet::defaults();
        set.start_capture(0);
        assert_eq!(set.handle_key_press(Keycode::F1), CaptureOutcome::Rejected);
        assert!(set.error_message().is_some());

        set.handle_key_press(Keycode::Escape);
        assert_eq!(set.error_message(), None);
    }

    #[test]
    fn test_rebind_to_own_input_is_a_noop_commit() {
        let mut set = set_with(vec![(GameAction::Jump, BoundInput::Key(Keycode::Space))]);
        set.start_capture(0);
        assert_eq!(
            set.handle_key_press(Keycode::Space),
            CaptureOutcome::Committed
        );
        assert_eq!(set.bindings()[0].input, BoundInput::Key(Keycode::Space));
    }

    #[test]
    fn test_input_ignored_when_nothing_captures() {
        let mut set = BindingSet::defaults();
        assert_eq!(set.handle_key_press(Keycode::X), CaptureOutcome::Idle);
        assert_eq!(
            set.handle_mouse_press(MouseButton::Left),
            CaptureOutcome::Idle
        );
    }

    #[test]
    fn test_push_refuses_duplicate_input() {
        let mut set = set_with(vec![(GameAction::Jump, BoundInput::Key(Keycode::Space))]);
        assert!(!set.push(KeyBinding::new(
            GameAction::Interact,
            BoundInput::Key(Keycode::Space),
        )));
        assert_eq!(set.len(), 1);
    }
}
