//! TOML binding files
//!
//! ```toml
//! deadzone = 6000
//!
//! [[actions]]
//! name = "jump"
//! keys = ["Space", "KeyW"]
//! buttons = [{ button = "A" }, { button = "DPadUp", gamepad = 1 }]
//!
//! [[actions]]
//! name = "fire"
//! mouse = ["Left"]
//! ```

use crate::action::BINDING_SLOTS;
use crate::gamepad::{GamepadButton, GamepadSelector};
use crate::mouse::{MouseButtonName, MouseButtons};
use kindle_core::{KindleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use winit::keyboard::KeyCode;

/// A full binding file. Action ids are positions in `actions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadzone: Option<u16>,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<KeyCode>,
    #[serde(default)]
    pub mouse: Vec<MouseButtonName>,
    #[serde(default)]
    pub buttons: Vec<ButtonConfig>,
}

impl ActionConfig {
    /// All listed mouse buttons OR-ed into one mask
    pub fn mouse_mask(&self) -> MouseButtons {
        self.mouse
            .iter()
            .fold(MouseButtons::NONE, |mask, name| mask | MouseButtons::from(*name))
    }
}

/// A gamepad button binding; `gamepad` omitted means the first connected pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub button: GamepadButton,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad: Option<usize>,
}

impl ButtonConfig {
    pub fn selector(&self) -> GamepadSelector {
        match self.gamepad {
            Some(index) => GamepadSelector::Index(index),
            None => GamepadSelector::First,
        }
    }
}

impl InputConfig {
    /// Parse a binding file from a string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: InputConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a binding file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} action bindings from {}",
            config.actions.len(),
            path.display()
        );
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| KindleError::ConfigError(format!("serialize error: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(deadzone) = self.deadzone {
            if deadzone > i16::MAX as u16 {
                return Err(KindleError::ConfigError(format!(
                    "deadzone {deadzone} exceeds {}",
                    i16::MAX
                )));
            }
        }

        let mut seen = HashSet::new();
        for (id, action) in self.actions.iter().enumerate() {
            if action.name.trim().is_empty() {
                return Err(KindleError::ConfigError(format!(
                    "action {id} has an empty name"
                )));
            }
            if !seen.insert(action.name.as_str()) {
                return Err(KindleError::ConfigError(format!(
                    "duplicate action name '{}'",
                    action.name
                )));
            }
            if action.keys.len() > BINDING_SLOTS {
                return Err(KindleError::ConfigError(format!(
                    "action '{}' lists {} keys, at most {BINDING_SLOTS} allowed",
                    action.name,
                    action.keys.len()
                )));
            }
            if action.buttons.len() > BINDING_SLOTS {
                return Err(KindleError::ConfigError(format!(
                    "action '{}' lists {} buttons, at most {BINDING_SLOTS} allowed",
                    action.name,
                    action.buttons.len()
                )));
            }
        }

        Ok(())
    }
}
