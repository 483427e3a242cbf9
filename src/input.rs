//! Input mapping
//!
//! Raw key events become logical actions. Held actions drive movement every
//! frame; the shoot action is edge-triggered and rate limited by a real-time
//! cooldown.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    I,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` identifier. Unknown keys yield `None`.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::ArrowLeft),
            "ArrowRight" | "Right" => Some(Key::ArrowRight),
            "ArrowUp" | "Up" => Some(Key::ArrowUp),
            "ArrowDown" | "Down" => Some(Key::ArrowDown),
            " " | "Spacebar" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "i" | "I" => Some(Key::I),
            _ => None,
        }
    }
}

/// Logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Shoot,
    Restart,
    ToggleAutopilot,
}

/// Commands emitted by a key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SpawnProjectile,
    Restart,
    ToggleAutopilot,
}

/// Key to action table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<Key, Action>);

impl Default for KeyBindings {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Key::ArrowLeft, Action::MoveLeft),
            (Key::ArrowRight, Action::MoveRight),
            (Key::ArrowUp, Action::MoveUp),
            (Key::ArrowDown, Action::MoveDown),
            (Key::Space, Action::Shoot),
            (Key::Enter, Action::Restart),
            (Key::I, Action::ToggleAutopilot),
        ]))
    }
}

impl KeyBindings {
    pub fn action(&self, key: Key) -> Option<Action> {
        self.0.get(&key).copied()
    }

    /// Rebind a key, returning the action it previously mapped to
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.0.insert(key, action)
    }
}

/// Movement intents currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldActions {
    fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.left = held,
            Action::MoveRight => self.right = held,
            Action::MoveUp => self.up = held,
            Action::MoveDown => self.down = held,
            Action::Shoot | Action::Restart | Action::ToggleAutopilot => {}
        }
    }

    /// Horizontal intent: -1, 0 or 1
    pub fn horizontal(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Vertical intent: -1, 0 or 1 (up is positive)
    pub fn vertical(&self) -> f32 {
        (self.up as i8 - self.down as i8) as f32
    }
}

/// One-shot cooldown between shots.
///
/// Timestamps are host milliseconds. Once triggered, shooting is permitted
/// again when the host clock reaches `started + duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotCooldown {
    duration_ms: f64,
    ready_at_ms: Option<f64>,
}

impl ShotCooldown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            ready_at_ms: None,
        }
    }

    pub fn is_ready(&self, now_ms: f64) -> bool {
        self.ready_at_ms.is_none_or(|ready_at| now_ms >= ready_at)
    }

    /// Start the cooldown if it is ready. Returns whether a shot is allowed.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.ready_at_ms = Some(now_ms + self.duration_ms);
        true
    }

    pub fn reset(&mut self) {
        self.ready_at_ms = None;
    }
}

/// Maps key events to held actions and commands
#[derive(Debug, Clone)]
pub struct InputMapper {
    bindings: KeyBindings,
    held: HeldActions,
    cooldown: ShotCooldown,
}

impl InputMapper {
    pub fn new(bindings: KeyBindings, cooldown_ms: f64) -> Self {
        Self {
            bindings,
            held: HeldActions::default(),
            cooldown: ShotCooldown::new(cooldown_ms),
        }
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings.action(key)
    }

    pub fn held(&self) -> HeldActions {
        self.held
    }

    /// Replace held intents wholesale (autopilot)
    pub fn set_held(&mut self, held: HeldActions) {
        self.held = held;
    }

    pub fn key_down(&mut self, key: Key, now_ms: f64) -> Option<Command> {
        let action = self.bindings.action(key)?;
        match action {
            Action::Shoot => self.fire(now_ms),
            Action::Restart => Some(Command::Restart),
            Action::ToggleAutopilot => Some(Command::ToggleAutopilot),
            movement => {
                self.held.set(movement, true);
                None
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(action) = self.bindings.action(key) {
            self.held.set(action, false);
        }
    }

    /// Request a shot, honouring the cooldown
    pub fn fire(&mut self, now_ms: f64) -> Option<Command> {
        self.cooldown
            .trigger(now_ms)
            .then_some(Command::SpawnProjectile)
    }

    pub fn release_all(&mut self) {
        self.held = HeldActions::default();
    }

    /// Clear held state and the cooldown
    pub fn reset(&mut self) {
        self.release_all();
        self.cooldown.reset();
    }
}
