//! Debug overlay and text report
//!
//! Consumers only read; capturing never touches simulation state.

use serde::{Deserialize, Serialize};

use crate::input::{Action, FrameInput};
use crate::sim::{CLIP_IDLE, CLIP_RUN, CLIP_TAKING_HIT, CollisionInfo, GameState, PlayerId, Rect};

/// Contact boxes for visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugOverlay {
    pub world_bounds: Rect,
    pub contacts: Vec<CollisionInfo>,
    pub hurtboxes: Vec<Rect>,
    /// Non-empty attack boxes only
    pub attack_boxes: Vec<Rect>,
}

/// Snapshot for the overlay, or None when visualization is off
pub fn overlay(state: &GameState) -> Option<DebugOverlay> {
    if !state.collision.is_debug_visualization_enabled() {
        return None;
    }

    Some(DebugOverlay {
        world_bounds: state.collision.world_bounds(),
        contacts: state.collision.last_frame_collisions().to_vec(),
        hurtboxes: state.players.iter().map(|p| p.world_hurtbox()).collect(),
        attack_boxes: state
            .players
            .iter()
            .map(|p| p.attack_box())
            .filter(|r| !r.is_empty())
            .collect(),
    })
}

pub fn clip_name(index: usize) -> &'static str {
    match index {
        CLIP_IDLE => "Idle",
        CLIP_RUN => "Run",
        CLIP_TAKING_HIT => "Taking hit",
        _ => "Unknown",
    }
}

fn input_line(id: PlayerId, input: &FrameInput) -> String {
    let held: Vec<&str> = [
        (Action::MoveLeft, "LEFT"),
        (Action::MoveRight, "RIGHT"),
        (Action::Jump, "JUMP"),
        (Action::Punch, "PUNCH"),
    ]
    .iter()
    .filter(|(action, _)| input.is_action_pressed(id, *action))
    .map(|(_, label)| *label)
    .collect();

    if held.is_empty() {
        format!("{}: NONE", id.label())
    } else {
        format!("{}: {}", id.label(), held.join(" "))
    }
}

/// Human-readable status lines for a text overlay
pub fn debug_lines(state: &GameState, input: Option<&FrameInput>) -> Vec<String> {
    let mut lines = Vec::new();

    for player in &state.players {
        let label = player.id.label();
        let pos = player.position();
        let clip = player.current_animation();
        lines.push(format!("=== {label} DEBUG ==="));
        lines.push(format!("{label} Pos: ({}, {})", pos.x as i32, pos.y as i32));
        lines.push(format!("{label} Animation: {} ({clip})", clip_name(clip)));
        lines.push(format!(
            "{label} Moving: {}",
            if player.is_moving() { "YES" } else { "NO" }
        ));
        lines.push(String::new());
    }

    if let Some(input) = input {
        lines.push("=== INPUT DEBUG ===".to_string());
        for id in PlayerId::ALL {
            lines.push(input_line(id, input));
        }
        lines.push(String::new());
    }

    lines.push("=== COLLISION DEBUG ===".to_string());
    lines.push(format!(
        "Contacts: {}",
        state.collision.last_frame_collisions().len()
    ));
    lines.push(format!("Frame: {}", state.frame));
    lines
}
