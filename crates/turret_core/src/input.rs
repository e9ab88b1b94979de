//! Keyboard edge tracking and pointer position.
//!
//! `is_just_pressed(key)` is true only during the frame the key went down and
//! is cleared by `end_frame()`, which the main loop calls after the scene
//! update has consumed it. OS key-repeat events do not re-trigger it while the
//! key stays held.
//!
//! Pointer position is stored in logical scene coordinates; the window layer is
//! responsible for mapping physical pixels through the view transform first.

use serde::Deserialize;
use std::collections::HashSet;

/// Keys the app reacts to. Names double as the spelling used in replay scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    Escape,
    Space,
    F3,
    G,
    I,
    M,
    R,
    S,
    T,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,

    /// Last known pointer position in logical coordinates, `None` once the
    /// pointer has left the window.
    pub mouse_position: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            mouse_position: None,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn mouse_left(&mut self) {
        self.mouse_position = None;
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
