//! Held-key tracking
//!
//! Key-down/key-up events update the set asynchronously; the simulation only
//! ever sees a snapshot taken at the start of a tick. There is no event
//! queue, the last state wins.

use crate::sim::TickInput;

/// Movement keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Map a browser `KeyboardEvent.key` name (WASD or arrows)
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(MoveKey::Up),
            "ArrowDown" => Some(MoveKey::Down),
            "ArrowLeft" => Some(MoveKey::Left),
            "ArrowRight" => Some(MoveKey::Right),
            _ => match name.to_ascii_lowercase().as_str() {
                "w" => Some(MoveKey::Up),
                "s" => Some(MoveKey::Down),
                "a" => Some(MoveKey::Left),
                "d" => Some(MoveKey::Right),
                _ => None,
            },
        }
    }
}

/// Which movement keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down by name; returns false for keys that don't move the player
    pub fn press(&mut self, name: &str) -> bool {
        match MoveKey::from_key_name(name) {
            Some(key) => {
                self.set(key, true);
                true
            }
            None => false,
        }
    }

    /// Key-up by name; returns false for keys that don't move the player
    pub fn release(&mut self, name: &str) -> bool {
        match MoveKey::from_key_name(name) {
            Some(key) => {
                self.set(key, false);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Up => self.up = held,
            MoveKey::Down => self.down = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Up => self.up,
            MoveKey::Down => self.down,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
        }
    }

    /// Drop every held key (focus loss, reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Per-axis intent for this tick; opposing keys cancel out
    pub fn snapshot(&self) -> TickInput {
        let move_x = self.right as i8 - self.left as i8;
        // Screen coordinates: up is -y
        let move_y = self.down as i8 - self.up as i8;
        TickInput::new(move_x, move_y)
    }
}
