//! Action bindings: logical inputs backed by several physical ones

use crate::gamepad::{GamepadButton, GamepadSelector};
use crate::mouse::MouseButtons;
use kindle_core::{KindleError, Result};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Alternate bindings per device type (e.g. WASD plus arrow keys)
pub const BINDING_SLOTS: usize = 2;

/// A gamepad button bound to an action, together with the pad it is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonBinding {
    pub button: GamepadButton,
    pub gamepad: GamepadSelector,
}

impl ButtonBinding {
    pub fn new(button: GamepadButton, gamepad: GamepadSelector) -> Self {
        Self { button, gamepad }
    }
}

/// Everything an action listens to. `None` slots and an empty mouse mask
/// are unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionBinding {
    pub keys: [Option<KeyCode>; BINDING_SLOTS],
    pub buttons: [Option<ButtonBinding>; BINDING_SLOTS],
    pub mouse: MouseButtons,
}

impl ActionBinding {
    pub fn is_unbound(&self) -> bool {
        self.keys.iter().all(Option::is_none)
            && self.buttons.iter().all(Option::is_none)
            && self.mouse.is_empty()
    }
}

/// Fixed-capacity table of action bindings.
///
/// The capacity is chosen once at construction; ids at or beyond it are
/// rejected rather than read or written.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    bindings: Box<[ActionBinding]>,
    names: HashMap<String, usize>,
}

impl ActionTable {
    /// Allocate `count` unbound actions
    pub fn with_capacity(count: usize) -> Result<Self> {
        let mut bindings = Vec::new();
        bindings.try_reserve_exact(count).map_err(|e| {
            KindleError::AllocationFailed(format!("action table for {count} actions: {e}"))
        })?;
        bindings.resize_with(count, ActionBinding::default);

        Ok(Self {
            bindings: bindings.into_boxed_slice(),
            names: HashMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, action: usize) -> Option<&ActionBinding> {
        self.bindings.get(action)
    }

    /// Bind `key` to slot 0 or 1. Returns false without writing if either
    /// index is out of range.
    pub fn set_key(&mut self, action: usize, key: KeyCode, slot: usize) -> bool {
        match self.slot_mut(action, slot) {
            Some(binding) => {
                binding.keys[slot] = Some(key);
                true
            }
            None => false,
        }
    }

    /// Bind a gamepad button to slot 0 or 1
    pub fn set_button(&mut self, action: usize, button: ButtonBinding, slot: usize) -> bool {
        match self.slot_mut(action, slot) {
            Some(binding) => {
                binding.buttons[slot] = Some(button);
                true
            }
            None => false,
        }
    }

    /// Bind a mouse mask; `MouseButtons::NONE` unbinds the mouse
    pub fn set_mouse(&mut self, action: usize, mouse: MouseButtons) -> bool {
        match self.bindings.get_mut(action) {
            Some(binding) => {
                binding.mouse = mouse;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, action: usize) -> bool {
        match self.bindings.get_mut(action) {
            Some(binding) => {
                *binding = ActionBinding::default();
                true
            }
            None => false,
        }
    }

    /// Attach a lookup name to an action id
    pub fn set_name(&mut self, action: usize, name: impl Into<String>) -> bool {
        if action >= self.bindings.len() {
            return false;
        }
        self.names.insert(name.into(), action);
        true
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Registered names with their ids, sorted by id
    pub fn names(&self) -> Vec<(&str, usize)> {
        let mut names: Vec<(&str, usize)> =
            self.names.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        names.sort_by_key(|(_, id)| *id);
        names
    }

    fn slot_mut(&mut self, action: usize, slot: usize) -> Option<&mut ActionBinding> {
        if slot >= BINDING_SLOTS {
            return None;
        }
        self.bindings.get_mut(action)
    }
}
