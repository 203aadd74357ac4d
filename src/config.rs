//! Binding Configuration
//!
//! Loads the default action-to-input table from a JSON file. Key names
//! use SDL's native spelling ("Space", "Left Shift"); mouse buttons use
//! "Left", "Right", "Middle", "X1", "X2".
//!
//! Nothing is ever written back; the file only seeds the in-memory
//! binding set at startup.

use crate::bindings::{BindingSet, BoundInput, GameAction, KeyBinding};
use sdl2::keyboard::Keycode;
use serde::{Deserialize, Serialize};

/// Default path, relative to the working directory.
pub const DEFAULT_BINDINGS_PATH: &str = "config/default_bindings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputDevice {
    Key,
    Mouse,
}

/// One configured binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingEntry {
    pub action: GameAction,
    pub device: InputDevice,
    pub input: String,
}

impl BindingEntry {
    /// Resolve the entry's input name. `None` when the name is unknown.
    fn resolve(&self) -> Option<BoundInput> {
        match self.device {
            InputDevice::Key => Keycode::from_name(&self.input).map(BoundInput::Key),
            InputDevice::Mouse => BoundInput::mouse_from_name(&self.input),
        }
    }
}

/// The on-disk binding table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    pub bindings: Vec<BindingEntry>,
}

impl BindingConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: BindingConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Build a binding set from the configured entries.
    ///
    /// Entries with unknown input names, inputs already taken, or actions
    /// already bound (first entry wins) are skipped with a warning, so
    /// the resulting set always has unique inputs.
    pub fn into_binding_set(self) -> BindingSet {
        let mut set = BindingSet::new(Vec::new());
        let mut seen_actions: Vec<GameAction> = Vec::new();

        for entry in self.bindings {
            let input = match entry.resolve() {
                Some(input) => input,
                None => {
                    log::warn!(
                        "skipping binding for {}: unknown input name '{}'",
                        entry.action.label(),
                        entry.input
                    );
                    continue;
                }
            };
            if seen_actions.contains(&entry.action) {
                log::warn!(
                    "skipping duplicate binding for {}",
                    entry.action.label()
                );
                continue;
            }
            if !set.push(KeyBinding::new(entry.action, input)) {
                log::warn!(
                    "skipping binding for {}: '{}' is already assigned",
                    entry.action.label(),
                    entry.input
                );
                continue;
            }
            seen_actions.push(entry.action);
        }

        if set.is_empty() {
            log::warn!("binding config produced no usable bindings, using built-in defaults");
            return BindingSet::defaults();
        }
        set
    }
}
