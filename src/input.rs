//! Logical input actions
//!
//! The host feeds raw key state into `InputState`; the game only ever asks
//! the `ActionMap` about actions. Default bindings are registered at startup
//! for any action the host has not bound itself.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game knows how to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    M,
    R,
    Left,
    Right,
    Up,
    Space,
}

/// Gameplay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Only acts after game over
    Restart,
    ToggleMouseLook,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Restart,
        Action::ToggleMouseLook,
    ];

    fn default_keys(self) -> &'static [Key] {
        match self {
            Action::MoveLeft => &[Key::A, Key::Left],
            Action::MoveRight => &[Key::D, Key::Right],
            Action::Jump => &[Key::Space, Key::Up],
            Action::Restart => &[Key::R],
            Action::ToggleMouseLook => &[Key::M],
        }
    }
}

/// Raw key and mouse state for a single frame
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
    /// Mouse movement since last frame (pixels)
    pub mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys_held.remove(&key);
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}

/// Maps actions to one or more keys
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    bindings: HashMap<Action, Vec<Key>>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every default binding registered
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        map.register_defaults();
        map
    }

    pub fn bind(&mut self, action: Action, key: Key) {
        let keys = self.bindings.entry(action).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|keys| !keys.is_empty())
    }

    /// Bind default keys for actions that have no binding yet
    pub fn register_defaults(&mut self) {
        for action in Action::ALL {
            if self.has_binding(action) {
                continue;
            }
            for &key in action.default_keys() {
                self.bind(action, key);
            }
        }
    }

    pub fn is_pressed(&self, action: Action, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_pressed(*k)))
    }

    pub fn is_held(&self, action: Action, input: &InputState) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| input.is_key_held(*k)))
    }

    /// Steering axis from the two move actions
    pub fn lateral_axis(&self, input: &InputState) -> f32 {
        let mut axis = 0.0;
        if self.is_held(Action::MoveLeft, input) {
            axis -= 1.0;
        }
        if self.is_held(Action::MoveRight, input) {
            axis += 1.0;
        }
        axis
    }

    /// Physics input for this frame
    pub fn tick_input(&self, input: &InputState) -> TickInput {
        TickInput {
            lateral: self.lateral_axis(input),
            jump: self.is_pressed(Action::Jump, input),
            restart: self.is_pressed(Action::Restart, input),
            autopilot: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only_fill_missing_actions() {
        let mut map = ActionMap::new();
        map.bind(Action::Jump, Key::Up);
        map.register_defaults();

        let mut input = InputState::new();
        input.press(Key::Space);
        assert!(!map.is_pressed(Action::Jump, &input), "custom binding kept");

        input.press(Key::Up);
        assert!(map.is_pressed(Action::Jump, &input));
        assert!(Action::ALL.iter().all(|a| map.has_binding(*a)));
    }

    #[test]
    fn test_register_defaults_idempotent() {
        let mut map = ActionMap::with_defaults();
        let before = map.bindings.clone();
        map.register_defaults();
        assert_eq!(map.bindings, before);
    }

    #[test]
    fn test_lateral_axis_cancels() {
        let map = ActionMap::with_defaults();
        let mut input = InputState::new();
        input.press(Key::A);
        assert_eq!(map.lateral_axis(&input), -1.0);
        input.press(Key::Right);
        assert_eq!(map.lateral_axis(&input), 0.0);
        input.release(Key::A);
        assert_eq!(map.lateral_axis(&input), 1.0);
    }

    #[test]
    fn test_pressed_is_one_frame() {
        let map = ActionMap::with_defaults();
        let mut input = InputState::new();
        input.press(Key::R);
        assert!(map.tick_input(&input).restart);
        input.clear_frame_state();
        assert!(!map.tick_input(&input).restart);
        assert!(map.is_held(Action::Restart, &input));

        // Holding does not re-press
        input.press(Key::R);
        assert!(!map.is_pressed(Action::Restart, &input));
    }
}
