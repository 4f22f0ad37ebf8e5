//! Fixed timestep simulation tick
//!
//! One call advances the match by one frame in a fixed order: input,
//! kinematics and animation, player-vs-player, arena bounds, attacks.

use super::player::{Player, PlayerId};
use super::state::GameState;
use crate::input::{FrameInput, PlayerInput};

/// Turn one player's intents into kinematics calls
fn apply_input(player: &mut Player, input: &PlayerInput) {
    match input.direction() {
        Some(direction) => player.move_dir(direction),
        None => player.stop_moving(),
    }
    if input.jump {
        player.jump();
    }
    if input.punch {
        player.punch();
    }
}

/// Advance the match by one frame of `dt` seconds
///
/// A frame with `dt <= 0` still applies input and runs every collision pass,
/// but nothing integrates and no clip advances. Since a strike connects once
/// per activation, repeating such a frame leaves the players unchanged.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    // 1. Input
    for player in state.players.iter_mut() {
        let intents = input.player(player.id);
        apply_input(player, intents);
    }

    // 2. Kinematics and animation
    for player in state.players.iter_mut() {
        player.update(dt);
    }

    let [p1, p2] = &mut state.players;
    let world = &mut state.collision;

    // 3. Registry pass, then the fighters against each other
    world.update();
    world.check_player_pair(Some(&mut *p1), Some(&mut *p2));

    // 4. Arena bounds
    world.check_player_bounds(Some(&mut *p1));
    world.check_player_bounds(Some(&mut *p2));

    // 5. Attacks, both orderings
    world.check_player_attack(Some(&mut *p1), Some(&mut *p2));
    world.check_player_attack(Some(&mut *p2), Some(&mut *p1));

    state.frame += 1;
}

/// Run `tick` repeatedly with the same input
pub fn run_ticks(state: &mut GameState, input: &FrameInput, dt: f32, count: u32) {
    for _ in 0..count {
        tick(state, input, dt);
    }
}

/// Input that holds one action for one player
pub fn single_player_input(id: PlayerId, f: impl FnOnce(&mut PlayerInput)) -> FrameInput {
    let mut input = FrameInput::default();
    f(input.player_mut(id));
    input
}
