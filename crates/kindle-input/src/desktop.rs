//! winit + gilrs backend for desktop builds

use crate::backend::{DeviceEvent, InputBackend};
use crate::gamepad::{GamepadAxis, GamepadButton, GamepadSample};
use crate::keyboard::KeyboardSnapshot;
use crate::mouse::{MouseButtons, MouseSnapshot};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use kindle_core::Point;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Physical button mapping from gilrs to kindle buttons
const BUTTON_MAP: [(Button, GamepadButton); 15] = [
    (Button::South, GamepadButton::A),
    (Button::East, GamepadButton::B),
    (Button::West, GamepadButton::X),
    (Button::North, GamepadButton::Y),
    (Button::Select, GamepadButton::Back),
    (Button::Mode, GamepadButton::Guide),
    (Button::Start, GamepadButton::Start),
    (Button::LeftThumb, GamepadButton::LeftStick),
    (Button::RightThumb, GamepadButton::RightStick),
    (Button::LeftTrigger, GamepadButton::LeftShoulder),
    (Button::RightTrigger, GamepadButton::RightShoulder),
    (Button::DPadUp, GamepadButton::DPadUp),
    (Button::DPadDown, GamepadButton::DPadDown),
    (Button::DPadLeft, GamepadButton::DPadLeft),
    (Button::DPadRight, GamepadButton::DPadRight),
];

/// Keyboard and mouse fed from winit window events, gamepads read from gilrs.
///
/// The host event loop forwards every `WindowEvent` to
/// [`process_window_event`](Self::process_window_event) and calls
/// [`poll_device_events`](Self::poll_device_events) once per frame, handing
/// each returned event to the input manager before its update.
pub struct DesktopBackend {
    keyboard: KeyboardSnapshot,
    mouse: MouseSnapshot,
    gilrs: Option<Gilrs>,
    ids: HashMap<usize, GamepadId>,
    open: HashSet<usize>,
    pending: Vec<DeviceEvent>,
}

impl DesktopBackend {
    /// Create the backend. If the gamepad subsystem is unavailable the
    /// backend still serves keyboard and mouse, with no gamepads.
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                log::warn!("Gamepad support unavailable: {e}");
                None
            }
        };

        let mut ids = HashMap::new();
        let mut pending = Vec::new();
        if let Some(gilrs) = &gilrs {
            for (id, gamepad) in gilrs.gamepads() {
                let index = usize::from(id);
                log::debug!("Found gamepad {index}: {}", gamepad.name());
                ids.insert(index, id);
                pending.push(DeviceEvent::Added(index));
            }
        }

        Self {
            keyboard: KeyboardSnapshot::new(),
            mouse: MouseSnapshot::default(),
            gilrs,
            ids,
            open: HashSet::new(),
            pending,
        }
    }

    pub fn has_gamepad_support(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Track keyboard, mouse button and cursor state from a window event
    pub fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.keyboard
                        .set(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(mask) = mouse_mask(*button) {
                    match state {
                        ElementState::Pressed => self.mouse.buttons.insert(mask),
                        ElementState::Released => self.mouse.buttons.remove(mask),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.position = Point::new(position.x as i32, position.y as i32);
            }
            // Releases are never delivered to an unfocused window
            WindowEvent::Focused(false) => {
                self.keyboard.clear();
                self.mouse.buttons = MouseButtons::NONE;
            }
            _ => {}
        }
    }

    /// Drain gamepad connection changes since the last call.
    ///
    /// The first call also reports every pad that was already plugged in
    /// when the backend was created.
    pub fn poll_device_events(&mut self) -> Vec<DeviceEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let Some(gilrs) = self.gilrs.as_mut() else {
            return events;
        };

        while let Some(event) = gilrs.next_event() {
            let index = usize::from(event.id);
            match event.event {
                EventType::Connected => {
                    self.ids.insert(index, event.id);
                    events.push(DeviceEvent::Added(index));
                }
                EventType::Disconnected => {
                    events.push(DeviceEvent::Removed(index));
                }
                _ => {}
            }
        }

        events
    }
}

impl Default for DesktopBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBackend for DesktopBackend {
    fn keyboard(&self) -> KeyboardSnapshot {
        self.keyboard.clone()
    }

    fn mouse(&self) -> MouseSnapshot {
        self.mouse
    }

    fn open_gamepad(&mut self, index: usize) -> bool {
        let Some(gilrs) = &self.gilrs else {
            return false;
        };
        let connected = self
            .ids
            .get(&index)
            .is_some_and(|id| gilrs.connected_gamepad(*id).is_some());
        if connected {
            self.open.insert(index);
        }
        connected
    }

    fn close_gamepad(&mut self, index: usize) {
        self.open.remove(&index);
    }

    fn gamepad(&self, index: usize) -> Option<GamepadSample> {
        if !self.open.contains(&index) {
            return None;
        }
        let gilrs = self.gilrs.as_ref()?;
        let gamepad = gilrs.connected_gamepad(*self.ids.get(&index)?)?;

        let mut sample = GamepadSample::new();
        for (button, mapped) in BUTTON_MAP {
            if gamepad.is_pressed(button) {
                sample.buttons.insert(mapped);
            }
        }

        // gilrs reports +Y as up
        sample.axes[GamepadAxis::LeftX as usize] = axis_to_i16(gamepad.value(Axis::LeftStickX));
        sample.axes[GamepadAxis::LeftY as usize] = axis_to_i16(-gamepad.value(Axis::LeftStickY));
        sample.axes[GamepadAxis::RightX as usize] = axis_to_i16(gamepad.value(Axis::RightStickX));
        sample.axes[GamepadAxis::RightY as usize] =
            axis_to_i16(-gamepad.value(Axis::RightStickY));

        let trigger = |button| {
            gamepad
                .button_data(button)
                .map(|data| axis_to_i16(data.value()))
                .unwrap_or(0)
        };
        sample.axes[GamepadAxis::TriggerLeft as usize] = trigger(Button::LeftTrigger2);
        sample.axes[GamepadAxis::TriggerRight as usize] = trigger(Button::RightTrigger2);

        Some(sample)
    }
}

fn mouse_mask(button: MouseButton) -> Option<MouseButtons> {
    match button {
        MouseButton::Left => Some(MouseButtons::LEFT),
        MouseButton::Middle => Some(MouseButtons::MIDDLE),
        MouseButton::Right => Some(MouseButtons::RIGHT),
        MouseButton::Back => Some(MouseButtons::X1),
        MouseButton::Forward => Some(MouseButtons::X2),
        MouseButton::Other(_) => None,
    }
}

/// Scale a normalized `-1.0..=1.0` value to the signed 16-bit axis range
fn axis_to_i16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_scaling() {
        assert_eq!(axis_to_i16(0.0), 0);
        assert_eq!(axis_to_i16(1.0), i16::MAX);
        assert_eq!(axis_to_i16(-1.0), -i16::MAX);
        assert_eq!(axis_to_i16(2.5), i16::MAX);
        assert_eq!(axis_to_i16(0.5), 16383);
    }

    #[test]
    fn test_mouse_mask_mapping() {
        assert_eq!(mouse_mask(MouseButton::Left), Some(MouseButtons::LEFT));
        assert_eq!(mouse_mask(MouseButton::Back), Some(MouseButtons::X1));
        assert_eq!(mouse_mask(MouseButton::Forward), Some(MouseButtons::X2));
        assert_eq!(mouse_mask(MouseButton::Other(7)), None);
    }

    #[test]
    fn test_button_map_is_one_to_one() {
        let mapped: HashSet<GamepadButton> = BUTTON_MAP.iter().map(|(_, b)| *b).collect();
        assert_eq!(mapped.len(), BUTTON_MAP.len());
        assert!(mapped.iter().all(|b| !b.is_synthetic()));
    }
}
