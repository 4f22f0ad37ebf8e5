//! Drawable rectangles and sprite-strip frames for each fighter

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Player, PlayerId, Rect};

/// What the renderer needs to draw one fighter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub hurtbox: Rect,
    /// Zero-area unless the fighter is striking
    pub attack_box: Rect,
    pub clip: usize,
    pub frame: u32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
}

impl PlayerView {
    pub fn capture(player: &Player) -> Self {
        Self {
            id: player.id,
            hurtbox: player.world_hurtbox(),
            attack_box: player.attack_box(),
            clip: player.current_animation(),
            frame: player.current_frame(),
            facing: player.facing(),
        }
    }
}

/// Views of both fighters in player order
pub fn player_views(state: &GameState) -> [PlayerView; 2] {
    [
        PlayerView::capture(&state.players[0]),
        PlayerView::capture(&state.players[1]),
    ]
}

/// Source and destination rectangles for blitting one frame of a
/// horizontal sprite strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub src: Rect,
    pub dst: Rect,
    pub flip_horizontal: bool,
}

/// Frame of the current clip, given the size of that clip's strip texture.
/// The sprite's bottom-left corner sits on the player's position.
pub fn sprite_frame(player: &Player, strip_width: f32, strip_height: f32) -> SpriteFrame {
    let frame_count = player
        .animation(player.current_animation())
        .map(|anim| anim.frame_count())
        .unwrap_or(0);
    let frame_width = if frame_count > 0 {
        strip_width / frame_count as f32
    } else {
        strip_width
    };

    let pos = player.position();
    SpriteFrame {
        src: Rect::new(
            player.current_frame() as f32 * frame_width,
            0.0,
            frame_width,
            strip_height,
        ),
        dst: Rect::new(pos.x, pos.y - strip_height, frame_width, strip_height),
        flip_horizontal: player.facing() < 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use glam::Vec2;

    fn player(id: PlayerId) -> Player {
        Player::new(id, Vec2::new(100.0, 300.0), &Settings::default())
    }

    #[test]
    fn test_view_of_idle_player() {
        let p = player(PlayerId::One);
        let view = PlayerView::capture(&p);
        assert_eq!(view.hurtbox, p.world_hurtbox());
        assert!(view.attack_box.is_empty());
        assert_eq!(view.clip, 0);
        assert_eq!(view.frame, 0);
        assert_eq!(view.facing, 1.0);
    }

    #[test]
    fn test_sprite_frame_advances_along_strip() {
        let mut p = player(PlayerId::One);
        // Idle: 8 frames, 12 ticks each
        for _ in 0..12 {
            p.update(SIM_DT);
        }
        let sprite = sprite_frame(&p, 512.0, 64.0);
        assert_eq!(sprite.src, Rect::new(64.0, 0.0, 64.0, 64.0));
        assert_eq!(sprite.dst, Rect::new(100.0, 236.0, 64.0, 64.0));
        assert!(!sprite.flip_horizontal);
    }

    #[test]
    fn test_sprite_flips_when_facing_left() {
        let p = player(PlayerId::Two);
        assert!(sprite_frame(&p, 512.0, 64.0).flip_horizontal);
    }
}
