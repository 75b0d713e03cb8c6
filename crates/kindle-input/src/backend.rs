//! The platform seam: where raw device state comes from

use crate::gamepad::GamepadSample;
use crate::keyboard::KeyboardSnapshot;
use crate::mouse::MouseSnapshot;

/// A gamepad connection change reported by the host event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceEvent {
    /// A controller appeared at the given platform device index
    Added(usize),
    /// The controller at the given platform device index went away
    Removed(usize),
}

/// Source of raw keyboard, mouse and gamepad state.
///
/// The input manager reads through this trait once per update and never
/// caches anything the backend owns. Implementations: [`DesktopBackend`]
/// (winit + gilrs) and [`ScriptedBackend`] (tests and headless tools).
///
/// [`DesktopBackend`]: crate::DesktopBackend
/// [`ScriptedBackend`]: crate::ScriptedBackend
pub trait InputBackend {
    /// Keys held right now
    fn keyboard(&self) -> KeyboardSnapshot;

    /// Mouse buttons held and cursor position right now
    fn mouse(&self) -> MouseSnapshot;

    /// Open the controller at `index`. Returns false if there is no usable
    /// device there.
    fn open_gamepad(&mut self, index: usize) -> bool;

    /// Release the controller at `index`. Closing an unopened index is a no-op.
    fn close_gamepad(&mut self, index: usize);

    /// Current state of an opened controller, or `None` if it is not open
    fn gamepad(&self, index: usize) -> Option<GamepadSample>;
}
