//! Frame-to-frame edge evaluation shared by every device class

/// Which transition a check asks about.
///
/// Keyboard, mouse, gamepad and action checks all funnel through
/// [`Trigger::eval`], so an action mixing device types has one meaning of
/// "pressed" and "released".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Active in the current frame
    Down,
    /// Active now, inactive in the previous frame (rising edge)
    Pressed,
    /// Inactive now, active in the previous frame (falling edge)
    Released,
}

impl Trigger {
    pub fn eval(self, current: bool, previous: bool) -> bool {
        match self {
            Trigger::Down => current,
            Trigger::Pressed => current && !previous,
            Trigger::Released => !current && previous,
        }
    }
}

/// Current and previous value of a device snapshot.
///
/// `advance` is the only way the previous value changes, so previous always
/// holds what current held one update earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffered<T> {
    current: T,
    previous: T,
}

impl<T> Buffered<T> {
    pub fn new(current: T, previous: T) -> Self {
        Self { current, previous }
    }

    /// Rotate current into previous and store the freshly polled value
    pub fn advance(&mut self, next: T) {
        self.previous = std::mem::replace(&mut self.current, next);
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Evaluate a trigger over a predicate applied to both frames
    pub fn test(&self, trigger: Trigger, active: impl Fn(&T) -> bool) -> bool {
        trigger.eval(active(&self.current), active(&self.previous))
    }
}

impl<T: Clone> Buffered<T> {
    /// Both frames hold `value`; no edge is visible until the next advance
    pub fn settled(value: T) -> Self {
        Self {
            previous: value.clone(),
            current: value,
        }
    }
}
