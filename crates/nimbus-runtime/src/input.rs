//! Keyboard state and the sky's action bindings

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

pub const BREEZE_LEFT: &str = "breeze_left";
pub const BREEZE_RIGHT: &str = "breeze_right";
pub const MORE_HUMID: &str = "more_humid";
pub const LESS_HUMID: &str = "less_humid";
pub const QUIT: &str = "quit";
pub const TOGGLE_FULLSCREEN: &str = "toggle_fullscreen";

/// Tracks keyboard input per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Presses this frame in arrival order, auto-repeats included
    presses: Vec<KeyCode>,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            presses: Vec::new(),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(BREEZE_LEFT.into(), vec![KeyCode::ArrowLeft]);
        map.insert(BREEZE_RIGHT.into(), vec![KeyCode::ArrowRight]);
        map.insert(MORE_HUMID.into(), vec![KeyCode::ArrowUp]);
        map.insert(LESS_HUMID.into(), vec![KeyCode::ArrowDown]);
        map.insert(QUIT.into(), vec![KeyCode::Escape, KeyCode::KeyQ]);
        map.insert(TOGGLE_FULLSCREEN.into(), vec![KeyCode::F11]);
        map
    }

    /// Bind an action to one or more keys, replacing its previous binding
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Process a key press. OS auto-repeat counts as another press.
    pub fn process_key_down(&mut self, key: KeyCode, repeat: bool) {
        if repeat || !self.keys_down.contains(&key) {
            self.presses.push(key);
        }
        self.keys_down.insert(key);
    }

    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.presses.clear();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.keys_down.clear();
        self.presses.clear();
    }

    // --- Query methods ---

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Is an action currently held?
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .is_some_and(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
    }

    /// How many times the action fired this frame
    pub fn action_presses(&self, action: &str) -> usize {
        let Some(keys) = self.action_map.get(action) else {
            return 0;
        };
        self.presses.iter().filter(|k| keys.contains(k)).count()
    }

    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_presses(action) > 0
    }

    /// Get all action names
    pub fn action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.action_map.keys().cloned().collect();
        names.sort();
        names
    }
}
