//! Keyboard input as seen by the simulation
//!
//! Device polling happens outside the core. Each frame the host hands the
//! simulation the set of keys that went down since the previous frame.

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Key {
    /// Printable form shown on an enemy's label
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
        }
    }
}

/// Input for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Keys newly pressed this frame
    pub just_pressed: Vec<Key>,
    /// Idle/demo mode - the simulation presses the right keys itself
    pub idle_mode: bool,
}

impl FrameInput {
    /// Input with the given keys pressed this frame
    pub fn pressing(keys: &[Key]) -> Self {
        Self {
            just_pressed: keys.to_vec(),
            idle_mode: false,
        }
    }

    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// True if any of `keys` went down this frame. An empty set never matches.
    pub fn is_any_just_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_key_just_pressed(*k))
    }

    /// Record a key press (idempotent)
    pub fn press(&mut self, key: Key) {
        if !self.is_key_just_pressed(key) {
            self.just_pressed.push(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_queries() {
        let input = FrameInput::pressing(&[Key::S, Key::A]);
        assert!(input.is_key_just_pressed(Key::A));
        assert!(!input.is_key_just_pressed(Key::J));
        assert!(input.is_any_just_pressed(&[Key::D, Key::S]));
        assert!(!input.is_any_just_pressed(&[Key::J, Key::K, Key::L]));
    }

    #[test]
    fn test_empty_key_set_never_matches() {
        let input = FrameInput::pressing(&[Key::S]);
        assert!(!input.is_any_just_pressed(&[]));
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut input = FrameInput::default();
        input.press(Key::K);
        input.press(Key::K);
        assert_eq!(input.just_pressed, vec![Key::K]);
    }
}
