//! Keyboard input handling.
//!
//! This module defines the [`InputAction`] enum for abstracting scene actions from physical keys,
//! and provides [`KeyState`] for tracking which actions are currently held. The camera reads the
//! held set every frame; one-shot actions (spawning, clearing, quitting) are dispatched on press.

use std::collections::HashSet;
use winit::keyboard;

/// Every action the application reacts to.
///
/// The first ten variants are continuous camera controls consumed by
/// [`Camera::update`](crate::scene::camera::Camera::update); the rest are one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Rotate the view left (Left Arrow).
    TurnLeft,
    /// Rotate the view right (Right Arrow).
    TurnRight,
    /// Tilt the view up (Up Arrow).
    LookUp,
    /// Tilt the view down (Down Arrow).
    LookDown,
    /// Move along the view direction (W).
    MoveForward,
    /// Move against the view direction (S).
    MoveBackward,
    /// Strafe left (A).
    StrafeLeft,
    /// Strafe right (D).
    StrafeRight,
    /// Rise along world up (E).
    MoveUp,
    /// Sink along world up (Q).
    MoveDown,
    /// Spawn a new cube (P).
    SpawnCube,
    /// Remove the oldest cube (Backspace).
    DespawnCube,
    /// Remove every cube (C).
    ClearCubes,
    /// Quit the application (Escape).
    Quit,
}

impl InputAction {
    /// Whether the action fires once per key press instead of being held.
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            InputAction::SpawnCube
                | InputAction::DespawnCube
                | InputAction::ClearCubes
                | InputAction::Quit
        )
    }
}

/// Tracks the set of currently held actions.
#[derive(Debug, Default)]
pub struct KeyState {
    /// Set of currently pressed actions.
    pub pressed_keys: HashSet<InputAction>,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    pub fn press_key(&mut self, key: InputAction) {
        self.pressed_keys.insert(key);
    }

    pub fn release_key(&mut self, key: InputAction) {
        self.pressed_keys.remove(&key);
    }

    /// Drops every held key, e.g. when the window loses focus and release events would be missed.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to an [`InputAction`] if it is bound.
///
/// Character keys are matched case-insensitively.
pub fn winit_key_to_action(key: &keyboard::Key) -> Option<InputAction> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowLeft => InputAction::TurnLeft,
            ArrowRight => InputAction::TurnRight,
            ArrowUp => InputAction::LookUp,
            ArrowDown => InputAction::LookDown,
            Backspace => InputAction::DespawnCube,
            Escape => InputAction::Quit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => InputAction::MoveForward,
            "s" => InputAction::MoveBackward,
            "a" => InputAction::StrafeLeft,
            "d" => InputAction::StrafeRight,
            "e" => InputAction::MoveUp,
            "q" => InputAction::MoveDown,
            "p" => InputAction::SpawnCube,
            "c" => InputAction::ClearCubes,
        }),

        _ => None,
    }
}
