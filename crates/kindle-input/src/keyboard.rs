//! Keyboard snapshot

use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// The set of physical keys held down during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    down: HashSet<KeyCode>,
}

impl KeyboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held or not held
    pub fn set(&mut self, key: KeyCode, down: bool) {
        if down {
            self.down.insert(key);
        } else {
            self.down.remove(&key);
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.down.iter().copied()
    }
}

impl FromIterator<KeyCode> for KeyboardSnapshot {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        Self {
            down: iter.into_iter().collect(),
        }
    }
}
