//! Gamepad buttons, axes and per-slot state

use crate::edge::{Buffered, Trigger};
use serde::{Deserialize, Serialize};

/// Maximum number of gamepads tracked at once
pub const MAX_GAMEPADS: usize = 16;

/// Default stick/trigger deadzone: 15% of the signed 16-bit axis range
pub const DEFAULT_DEADZONE: u16 = (i16::MAX as u32 * 15 / 100) as u16;

/// Gamepad buttons, including synthetic buttons for stick directions and
/// analog triggers.
///
/// The discriminants are stable: physical buttons come first, then the
/// synthetic ones in a fixed order. Bindings refer to buttons by this
/// identity, so variants must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum GamepadButton {
    A = 0,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Misc1,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,
    LeftStickUp,
    LeftStickLeft,
    LeftStickDown,
    LeftStickRight,
    RightStickUp,
    RightStickLeft,
    RightStickDown,
    RightStickRight,
    LeftTrigger,
    RightTrigger,
}

impl GamepadButton {
    /// Number of buttons a controller reports directly
    pub const PHYSICAL_COUNT: usize = 21;
    /// Physical plus synthetic buttons
    pub const COUNT: usize = 31;

    pub const ALL: [GamepadButton; Self::COUNT] = [
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::Back,
        GamepadButton::Guide,
        GamepadButton::Start,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::DPadUp,
        GamepadButton::DPadDown,
        GamepadButton::DPadLeft,
        GamepadButton::DPadRight,
        GamepadButton::Misc1,
        GamepadButton::Paddle1,
        GamepadButton::Paddle2,
        GamepadButton::Paddle3,
        GamepadButton::Paddle4,
        GamepadButton::Touchpad,
        GamepadButton::LeftStickUp,
        GamepadButton::LeftStickLeft,
        GamepadButton::LeftStickDown,
        GamepadButton::LeftStickRight,
        GamepadButton::RightStickUp,
        GamepadButton::RightStickLeft,
        GamepadButton::RightStickDown,
        GamepadButton::RightStickRight,
        GamepadButton::LeftTrigger,
        GamepadButton::RightTrigger,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// True for buttons derived from stick or trigger axes
    pub const fn is_synthetic(self) -> bool {
        self.index() as usize >= Self::PHYSICAL_COUNT
    }
}

/// A set of gamepad buttons packed into a bitmask
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GamepadButtons(u32);

impl GamepadButtons {
    pub const NONE: Self = Self(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, button: GamepadButton) -> bool {
        self.0 & (1 << button.index()) != 0
    }

    pub fn insert(&mut self, button: GamepadButton) {
        self.0 |= 1 << button.index();
    }

    pub fn remove(&mut self, button: GamepadButton) {
        self.0 &= !(1 << button.index());
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = GamepadButton> {
        GamepadButton::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }
}

impl FromIterator<GamepadButton> for GamepadButtons {
    fn from_iter<I: IntoIterator<Item = GamepadButton>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// Analog axes. Stick values are signed 16-bit with negative Y pointing up;
/// triggers rest at zero and grow positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl GamepadAxis {
    pub const COUNT: usize = 6;

    pub const ALL: [GamepadAxis; Self::COUNT] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::TriggerLeft,
        GamepadAxis::TriggerRight,
    ];

    /// The synthetic buttons for the negative and positive halves of this axis
    fn synthetic_buttons(self) -> (GamepadButton, GamepadButton) {
        match self {
            GamepadAxis::LeftX => (GamepadButton::LeftStickLeft, GamepadButton::LeftStickRight),
            GamepadAxis::LeftY => (GamepadButton::LeftStickUp, GamepadButton::LeftStickDown),
            GamepadAxis::RightX => (GamepadButton::RightStickLeft, GamepadButton::RightStickRight),
            GamepadAxis::RightY => (GamepadButton::RightStickUp, GamepadButton::RightStickDown),
            GamepadAxis::TriggerLeft => (GamepadButton::LeftTrigger, GamepadButton::LeftTrigger),
            GamepadAxis::TriggerRight => (GamepadButton::RightTrigger, GamepadButton::RightTrigger),
        }
    }
}

/// Raw state reported by the platform for one opened gamepad
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamepadSample {
    /// Physical buttons held
    pub buttons: GamepadButtons,
    pub axes: [i16; GamepadAxis::COUNT],
}

impl GamepadSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_button(mut self, button: GamepadButton) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn with_axis(mut self, axis: GamepadAxis, value: i16) -> Self {
        self.axes[axis as usize] = value;
        self
    }

    pub fn axis(&self, axis: GamepadAxis) -> i16 {
        self.axes[axis as usize]
    }

    /// Button set including synthetic stick/trigger buttons.
    ///
    /// An axis only counts when its magnitude is strictly greater than the
    /// deadzone, and then only the half matching its sign is set.
    pub fn synthesize(&self, deadzone: u16) -> GamepadButtons {
        let mut buttons = self.buttons;
        let deadzone = i32::from(deadzone);
        for axis in GamepadAxis::ALL {
            let value = i32::from(self.axis(axis));
            if value < -deadzone || value > deadzone {
                let (negative, positive) = axis.synthetic_buttons();
                buttons.insert(if value < 0 { negative } else { positive });
            }
        }
        buttons
    }
}

/// Which gamepad a query or binding refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamepadSelector {
    /// The earliest-connected gamepad that is still active
    #[default]
    First,
    /// A specific platform device index
    Index(usize),
}

/// Tracked state of one gamepad slot
#[derive(Debug, Clone, Default)]
pub(crate) struct GamepadSlot {
    pub buttons: Buffered<GamepadButtons>,
    pub axes: [i16; GamepadAxis::COUNT],
    pub active: bool,
}

impl GamepadSlot {
    /// Fresh state for a newly opened device: both frames hold its first
    /// poll, so a button already held at connect time is not a press.
    pub fn connect(sample: GamepadSample, deadzone: u16) -> Self {
        Self {
            buttons: Buffered::settled(sample.synthesize(deadzone)),
            axes: sample.axes,
            active: true,
        }
    }

    pub fn poll(&mut self, sample: GamepadSample, deadzone: u16) {
        self.buttons.advance(sample.synthesize(deadzone));
        self.axes = sample.axes;
    }

    pub fn test(&self, button: GamepadButton, trigger: Trigger) -> bool {
        self.active && self.buttons.test(trigger, |set| set.contains(button))
    }
}
