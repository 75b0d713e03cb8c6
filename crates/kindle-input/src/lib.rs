//! Kindle Input - Polled keyboard, mouse and gamepad input
//!
//! Provides the per-frame input layer:
//! - `InputManager` - current/previous snapshots, edge checks, action bindings
//! - `InputBackend` - where raw device state comes from
//! - `DesktopBackend` - winit window events + gilrs gamepads
//! - `ScriptedBackend` - device state set by hand, for tests and tools
//! - `InputConfig` - TOML binding files

mod action;
mod backend;
mod config;
mod desktop;
mod edge;
mod gamepad;
mod keyboard;
mod manager;
mod mouse;
mod scripted;

pub use action::{ActionBinding, ActionTable, ButtonBinding, BINDING_SLOTS};
pub use backend::{DeviceEvent, InputBackend};
pub use config::{ActionConfig, ButtonConfig, InputConfig};
pub use desktop::DesktopBackend;
pub use edge::{Buffered, Trigger};
pub use gamepad::{
    GamepadAxis, GamepadButton, GamepadButtons, GamepadSample, GamepadSelector, DEFAULT_DEADZONE,
    MAX_GAMEPADS,
};
pub use keyboard::KeyboardSnapshot;
pub use manager::InputManager;
pub use mouse::{MouseButtonName, MouseButtons, MouseSnapshot};
pub use scripted::ScriptedBackend;

pub use winit::keyboard::KeyCode;
