//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep supplied by the caller
//! - Fixed pass order within a frame
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use animation::{Animation, Timer};
pub use collision::{
    Collidable, ColliderId, CollisionInfo, CollisionKind, CollisionLayer, Contact, EntityRef,
    aabb_contact, circles_overlap, penetration_depth, rects_overlap, separation_vector,
};
pub use player::{CLIP_IDLE, CLIP_RUN, CLIP_TAKING_HIT, Player, PlayerId};
pub use rect::Rect;
pub use state::{GameState, spawn_position};
pub use tick::{run_ticks, single_player_input, tick};
pub use world::{
    CollisionEvent, CollisionWorld, resolve_attack_hit, resolve_player_bounds, resolve_player_pair,
};
