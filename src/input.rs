//! Player input intents
//!
//! The host translates device events into [`Key`] presses; [`InputState`]
//! tracks which actions are held and produces one [`FrameInput`] snapshot per
//! frame for the simulation.

use serde::{Deserialize, Serialize};

use crate::sim::player::PlayerId;

/// Something a player can ask their fighter to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Punch,
}

/// Keyboard keys the default bindings use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    D,
    W,
    Space,
    Left,
    Right,
    Up,
    Enter,
}

/// Default bindings: WASD + Space for player one, arrows + Enter for player two
pub const DEFAULT_BINDINGS: [(Key, PlayerId, Action); 8] = [
    (Key::A, PlayerId::One, Action::MoveLeft),
    (Key::D, PlayerId::One, Action::MoveRight),
    (Key::W, PlayerId::One, Action::Jump),
    (Key::Space, PlayerId::One, Action::Punch),
    (Key::Left, PlayerId::Two, Action::MoveLeft),
    (Key::Right, PlayerId::Two, Action::MoveRight),
    (Key::Up, PlayerId::Two, Action::Jump),
    (Key::Enter, PlayerId::Two, Action::Punch),
];

/// Look up which player and action a key drives
pub fn binding_for(key: Key) -> Option<(PlayerId, Action)> {
    DEFAULT_BINDINGS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, player, action)| (player, action))
}

/// Intents for one player for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub punch: bool,
}

impl PlayerInput {
    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
            Action::Punch => self.punch,
        }
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveLeft => self.move_left = pressed,
            Action::MoveRight => self.move_right = pressed,
            Action::Jump => self.jump = pressed,
            Action::Punch => self.punch = pressed,
        }
    }

    /// Any movement key held (punch excluded)
    pub fn is_key_pressing(&self) -> bool {
        self.move_left || self.move_right || self.jump
    }

    /// Horizontal drive: -1, +1 or None. Left wins when both are held.
    pub fn direction(&self) -> Option<f32> {
        if self.move_left {
            Some(-1.0)
        } else if self.move_right {
            Some(1.0)
        } else {
            None
        }
    }
}

/// Intents for both players, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub players: [PlayerInput; 2],
}

impl FrameInput {
    pub fn player(&self, id: PlayerId) -> &PlayerInput {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerInput {
        &mut self.players[id.index()]
    }

    pub fn is_action_pressed(&self, id: PlayerId, action: Action) -> bool {
        self.player(id).is_pressed(action)
    }
}

/// Held-action state built from key events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: FrameInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press or release. Unbound keys are ignored.
    pub fn process_key(&mut self, key: Key, pressed: bool) {
        if let Some((player, action)) = binding_for(key) {
            self.set_action_state(player, action, pressed);
        }
    }

    pub fn set_action_state(&mut self, player: PlayerId, action: Action, pressed: bool) {
        self.held.player_mut(player).set(action, pressed);
    }

    pub fn is_action_pressed(&self, player: PlayerId, action: Action) -> bool {
        self.held.is_action_pressed(player, action)
    }

    /// Snapshot for the next simulation frame
    pub fn frame(&self) -> FrameInput {
        self.held
    }
}
