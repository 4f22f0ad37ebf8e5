//! Brawl Core - simulation core for a two-player 2D fighting game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (animation clocks, kinematics, collisions)
//! - `input`: Per-player action intents and key bindings
//! - `renderer`: Read-only views of simulation state for drawing and debugging
//! - `settings`: Data-driven engine configuration

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::{Action, FrameInput, InputState, Key, PlayerInput};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical arena dimensions
    pub const LOGICAL_WIDTH: f32 = 1280.0;
    pub const LOGICAL_HEIGHT: f32 = 720.0;

    /// Sprite frame edge length (square frames)
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Spawn position as a fraction of the arena
    pub const PLAYER1_X_RATIO: f32 = 0.2;
    pub const PLAYER2_X_RATIO: f32 = 0.8;
    pub const PLAYER_Y_RATIO: f32 = 0.9;

    /// Player movement
    pub const MOVE_SPEED: f32 = 200.0;
    pub const JUMP_SPEED: f32 = 300.0;
    pub const GRAVITY: f32 = 900.0;
    /// Per-component velocity cap applied after integration
    pub const MAX_SPEED: f32 = 500.0;
    /// Horizontal damping per tick while not actively moving
    pub const DAMPING: f32 = 0.85;
    /// Horizontal speed under which damping snaps to rest
    pub const REST_SPEED: f32 = 10.0;
    /// Horizontal speed under which the run clip reverts to idle
    pub const IDLE_SPEED: f32 = 20.0;
    /// Velocity scale applied whenever collision resolution moves a player
    pub const CORRECTION_DAMPING: f32 = 0.8;

    /// Combat
    pub const KNOCKBACK_FORCE: f32 = 150.0;
    pub const MAX_KNOCKBACK: f32 = 400.0;
    pub const ATTACK_WIDTH: f32 = 30.0;

    /// Collision
    pub const COLLISION_EPSILON: f32 = 0.001;
    /// Fraction of the overlap each player is moved when separating
    pub const SEPARATION_SHARE: f32 = 0.51;
}
