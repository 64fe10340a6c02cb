//! Input layer
//!
//! Press/release events update a pressed-action set; the simulation samples it
//! once at the start of each tick. No queueing, no debounce.

use std::collections::HashSet;

use crate::settings::AccelerationMode;
use crate::sim::TickInput;

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SteerLeft,
    SteerRight,
    Accelerate,
    Brake,
    Horn,
}

impl Action {
    /// Map a key name (as reported by the windowing layer) to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" | "a" => Some(Action::SteerLeft),
            "right" | "arrowright" | "d" => Some(Action::SteerRight),
            "up" | "arrowup" | "w" => Some(Action::Accelerate),
            "down" | "arrowdown" | "s" => Some(Action::Brake),
            "h" | "space" | " " => Some(Action::Horn),
            _ => None,
        }
    }
}

/// Currently pressed actions
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Key-name convenience; unmapped keys are ignored
    pub fn key_down(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            self.press(action);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = Action::from_key(key) {
            self.release(action);
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Forget everything held (called on run start)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Snapshot for one tick
    pub fn sample(&self, mode: AccelerationMode) -> TickInput {
        TickInput {
            steer_left: self.is_pressed(Action::SteerLeft),
            steer_right: self.is_pressed(Action::SteerRight),
            accelerate: self.is_pressed(Action::Accelerate),
            brake: self.is_pressed(Action::Brake),
            horn: self.is_pressed(Action::Horn),
            mode,
        }
    }
}
