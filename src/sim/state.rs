//! Match state: the two fighters and the collision world they share

use glam::Vec2;

use super::player::{Player, PlayerId};
use super::rect::Rect;
use super::world::CollisionWorld;
use crate::consts::{PLAYER1_X_RATIO, PLAYER2_X_RATIO, PLAYER_Y_RATIO};
use crate::settings::Settings;

/// Feet position for a player spawning at `x_ratio` across the arena
pub fn spawn_position(bounds: &Rect, x_ratio: f32) -> Vec2 {
    Vec2::new(
        bounds.x + bounds.w * x_ratio,
        bounds.y + bounds.h * PLAYER_Y_RATIO,
    )
}

/// Everything the frame orchestrator advances
pub struct GameState {
    pub settings: Settings,
    /// Indexed by [`PlayerId::index`]
    pub players: [Player; 2],
    pub collision: CollisionWorld,
    /// Frames simulated this round
    pub frame: u64,
    /// Rounds started, including the current one
    pub round: u32,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let players = Self::spawn_players(&settings);
        let mut collision = CollisionWorld::from_settings(&settings);
        collision.set_debug_visualization(settings.debug_visualization);

        log::info!(
            "Round 1: arena {}x{}, spawns at x={} and x={}",
            settings.world_bounds.w,
            settings.world_bounds.h,
            players[0].position().x,
            players[1].position().x
        );

        Self {
            settings,
            players,
            collision,
            frame: 0,
            round: 1,
        }
    }

    fn spawn_players(settings: &Settings) -> [Player; 2] {
        let bounds = &settings.world_bounds;
        [
            Player::new(PlayerId::One, spawn_position(bounds, PLAYER1_X_RATIO), settings),
            Player::new(PlayerId::Two, spawn_position(bounds, PLAYER2_X_RATIO), settings),
        ]
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Tear down the round: fresh fighters at their spawns, empty registry,
    /// no pending contacts or events.
    pub fn reset_round(&mut self) {
        self.players = Self::spawn_players(&self.settings);
        self.collision.clear_all();
        self.collision.drain_events();
        self.frame = 0;
        self.round += 1;
        log::info!("Round {} started", self.round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::CLIP_IDLE;

    #[test]
    fn test_spawn_from_arena_ratios() {
        let state = GameState::new(Settings::with_arena(640.0, 360.0));
        assert_eq!(state.player(PlayerId::One).position(), Vec2::new(128.0, 324.0));
        assert_eq!(state.player(PlayerId::Two).position(), Vec2::new(512.0, 324.0));
        assert_eq!(state.player(PlayerId::One).facing(), 1.0);
        assert_eq!(state.player(PlayerId::Two).facing(), -1.0);
        assert_eq!(state.player(PlayerId::Two).current_animation(), CLIP_IDLE);
    }

    #[test]
    fn test_reset_round_restores_spawns() {
        let mut state = GameState::new(Settings::with_arena(640.0, 360.0));
        state.player_mut(PlayerId::One).set_position(Vec2::new(10.0, 10.0));
        state.frame = 99;

        state.reset_round();
        assert_eq!(state.player(PlayerId::One).position(), Vec2::new(128.0, 324.0));
        assert_eq!(state.frame, 0);
        assert_eq!(state.round, 2);
        assert!(state.collision.last_frame_collisions().is_empty());
    }
}
