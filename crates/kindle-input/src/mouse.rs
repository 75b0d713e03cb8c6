//! Mouse button mask and snapshot

use kindle_core::Point;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// A set of mouse buttons packed into a bitmask.
///
/// Checks against a mask succeed only when every button in it is down, so
/// `LEFT | RIGHT` means "both held". The empty mask is the unbound value for
/// action bindings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MouseButtons(u32);

impl MouseButtons {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const MIDDLE: Self = Self(1 << 1);
    pub const RIGHT: Self = Self(1 << 2);
    pub const X1: Self = Self(1 << 3);
    pub const X2: Self = Self(1 << 4);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every button of `other` is also in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for MouseButtons {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOrAssign for MouseButtons {
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// Named mouse buttons, used by binding files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButtonName {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

impl From<MouseButtonName> for MouseButtons {
    fn from(name: MouseButtonName) -> Self {
        match name {
            MouseButtonName::Left => MouseButtons::LEFT,
            MouseButtonName::Middle => MouseButtons::MIDDLE,
            MouseButtonName::Right => MouseButtons::RIGHT,
            MouseButtonName::X1 => MouseButtons::X1,
            MouseButtonName::X2 => MouseButtons::X2,
        }
    }
}

/// Mouse state captured for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseSnapshot {
    pub buttons: MouseButtons,
    /// Cursor position in window pixels
    pub position: Point,
}

impl MouseSnapshot {
    pub fn new(buttons: MouseButtons, position: Point) -> Self {
        Self { buttons, position }
    }
}
