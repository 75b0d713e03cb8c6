//! In-memory backend for tests and headless tools

use crate::backend::InputBackend;
use crate::gamepad::GamepadSample;
use crate::keyboard::KeyboardSnapshot;
use crate::mouse::{MouseButtons, MouseSnapshot};
use kindle_core::Point;
use std::collections::{BTreeMap, BTreeSet};
use winit::keyboard::KeyCode;

/// A backend whose device state is set directly by the caller.
///
/// Gamepads must be plugged before they can be opened; an unplugged but
/// still open pad reads as absent, the same as a controller yanked between
/// polls.
#[derive(Debug, Default, Clone)]
pub struct ScriptedBackend {
    keyboard: KeyboardSnapshot,
    mouse: MouseSnapshot,
    plugged: BTreeMap<usize, GamepadSample>,
    open: BTreeSet<usize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keyboard.set(key, true);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keyboard.set(key, false);
    }

    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        self.keyboard.set(key, down);
    }

    pub fn press_mouse(&mut self, buttons: MouseButtons) {
        self.mouse.buttons.insert(buttons);
    }

    pub fn release_mouse(&mut self, buttons: MouseButtons) {
        self.mouse.buttons.remove(buttons);
    }

    pub fn set_mouse_buttons(&mut self, buttons: MouseButtons) {
        self.mouse.buttons = buttons;
    }

    pub fn move_mouse(&mut self, position: Point) {
        self.mouse.position = position;
    }

    /// Attach a controller at `index` with an initial state
    pub fn plug_gamepad(&mut self, index: usize, sample: GamepadSample) {
        self.plugged.insert(index, sample);
    }

    /// Detach a controller. It stays open until closed.
    pub fn unplug_gamepad(&mut self, index: usize) {
        self.plugged.remove(&index);
    }

    /// Replace the state of a plugged controller.
    ///
    /// Returns false and changes nothing when no controller is plugged at
    /// `index`.
    pub fn set_gamepad(&mut self, index: usize, sample: GamepadSample) -> bool {
        match self.plugged.get_mut(&index) {
            Some(state) => {
                *state = sample;
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }
}

impl InputBackend for ScriptedBackend {
    fn keyboard(&self) -> KeyboardSnapshot {
        self.keyboard.clone()
    }

    fn mouse(&self) -> MouseSnapshot {
        self.mouse
    }

    fn open_gamepad(&mut self, index: usize) -> bool {
        if !self.plugged.contains_key(&index) {
            return false;
        }
        self.open.insert(index);
        true
    }

    fn close_gamepad(&mut self, index: usize) {
        self.open.remove(&index);
    }

    fn gamepad(&self, index: usize) -> Option<GamepadSample> {
        if !self.open.contains(&index) {
            return None;
        }
        self.plugged.get(&index).copied()
    }
}
