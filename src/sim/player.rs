//! Player entity: kinematics, animation selection and hurtbox geometry
//!
//! A player's position is the bottom-left corner of its sprite frame (its
//! feet). The hurtbox is stored relative to the sprite's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::collision::{Collidable, CollisionInfo, CollisionLayer};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Clip index: standing still
pub const CLIP_IDLE: usize = 0;
/// Clip index: running
pub const CLIP_RUN: usize = 1;
/// Clip index: reacting to a hit
pub const CLIP_TAKING_HIT: usize = 2;

/// Which side of the match a player is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "P1",
            PlayerId::Two => "P2",
        }
    }
}

/// A combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pos: Vec2,
    vel: Vec2,
    /// +1 facing right, -1 facing left
    facing: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Feet height the player lands on
    ground_y: f32,
    /// Hurtbox relative to the sprite's top-left corner
    hurtbox: Rect,
    sprite_height: f32,
    animations: Vec<Animation>,
    current_animation: usize,
    attack_clip: usize,
    grounded: bool,
    actively_moving: bool,
    /// Set once the current attack clip has landed; cleared on clip change
    hit_landed: bool,
    /// Registry contacts reported through [`Collidable::on_collision`]
    #[serde(skip)]
    contacts_seen: u32,
}

impl Player {
    /// Spawn a player with its feet at `spawn`
    pub fn new(id: PlayerId, spawn: Vec2, settings: &Settings) -> Self {
        let size = settings.sprite_size;
        let animations = settings
            .clips
            .iter()
            .map(|clip| Animation::from_duration(clip.frames, clip.duration))
            .collect();

        Self {
            id,
            pos: spawn,
            vel: Vec2::ZERO,
            facing: match id {
                PlayerId::One => 1.0,
                PlayerId::Two => -1.0,
            },
            move_speed: settings.move_speed,
            jump_speed: settings.jump_speed,
            gravity: settings.gravity,
            ground_y: spawn.y,
            hurtbox: Rect::new(size * 0.2, size * 0.1, size * 0.6, size * 0.8),
            sprite_height: size,
            animations,
            current_animation: CLIP_IDLE,
            attack_clip: settings.attack_clip,
            grounded: true,
            actively_moving: false,
            hit_landed: false,
            contacts_seen: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_moving(&self) -> bool {
        self.actively_moving
    }

    pub fn current_animation(&self) -> usize {
        self.current_animation
    }

    pub fn animation(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    /// Sprite frame of the current clip
    pub fn current_frame(&self) -> u32 {
        self.animations
            .get(self.current_animation)
            .map(Animation::current_frame)
            .unwrap_or(0)
    }

    pub fn attack_clip(&self) -> usize {
        self.attack_clip
    }

    pub fn is_attacking(&self) -> bool {
        self.current_animation == self.attack_clip
    }

    /// True once this attack has connected. A strike hits at most once.
    pub fn has_landed_hit(&self) -> bool {
        self.hit_landed
    }

    pub fn mark_hit_landed(&mut self) {
        self.hit_landed = true;
    }

    pub fn sprite_height(&self) -> f32 {
        self.sprite_height
    }

    /// Hurtbox in entity space
    pub fn local_hurtbox(&self) -> Rect {
        self.hurtbox
    }

    pub fn contacts_seen(&self) -> u32 {
        self.contacts_seen
    }

    /// Top-left corner of the sprite frame in world space
    #[inline]
    fn sprite_origin(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.sprite_height)
    }

    /// Hurtbox in world space
    pub fn world_hurtbox(&self) -> Rect {
        self.hurtbox.translated(self.sprite_origin())
    }

    /// Position that places the world hurtbox's top-left corner at `corner`
    pub fn position_for_hurtbox(&self, corner: Vec2) -> Vec2 {
        Vec2::new(
            corner.x - self.hurtbox.x,
            corner.y - self.hurtbox.y + self.sprite_height,
        )
    }

    /// Strike volume in front of the hurtbox, zero-area unless attacking
    pub fn attack_box(&self) -> Rect {
        if !self.is_attacking() {
            return Rect::ZERO;
        }

        let body = self.world_hurtbox();
        let height = body.h * 0.6;
        let x = if self.facing > 0.0 {
            body.right()
        } else {
            body.x - ATTACK_WIDTH
        };

        Rect::new(x, body.y + body.h * 0.2, ATTACK_WIDTH, height)
    }

    /// Drive horizontally at full speed in `direction` (-1 or +1)
    pub fn move_dir(&mut self, direction: f32) {
        self.vel.x = direction * self.move_speed;
        self.actively_moving = true;
        if direction != 0.0 {
            self.facing = direction.signum();
        }
    }

    /// Release horizontal drive; damping brings the player to rest
    pub fn stop_moving(&mut self) {
        self.actively_moving = false;
    }

    pub fn jump(&mut self) {
        if self.grounded {
            self.vel.y = -self.jump_speed;
            self.grounded = false;
        }
    }

    /// Start the attack clip unless already striking or reeling from a hit
    pub fn punch(&mut self) {
        if self.is_attacking() || self.current_animation == CLIP_TAKING_HIT {
            return;
        }
        self.set_animation(self.attack_clip);
    }

    /// Move the player as a collision correction. Velocity is damped so that
    /// repeated corrections settle instead of jittering.
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel *= CORRECTION_DAMPING;
    }

    /// Add an impulse, capping the resulting speed
    pub fn apply_knockback(&mut self, impulse: Vec2) {
        self.vel += impulse;
        if self.vel.length() > MAX_KNOCKBACK {
            self.vel = self.vel.normalize() * MAX_KNOCKBACK;
        }
    }

    /// Switch clips, restarting the new one. Unknown and current indices are ignored.
    pub fn set_animation(&mut self, index: usize) {
        if index < self.animations.len() && index != self.current_animation {
            self.current_animation = index;
            self.animations[index].reset();
            self.hit_landed = false;
        }
    }

    pub fn play_idle_animation(&mut self) {
        self.set_animation(CLIP_IDLE);
    }

    pub fn play_run_animation(&mut self) {
        self.set_animation(CLIP_RUN);
    }

    pub fn play_taking_hit_animation(&mut self) {
        self.set_animation(CLIP_TAKING_HIT);
    }

    /// Advance one tick of kinematics and animation
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integrate(dt);
        self.update_animation();
    }

    /// Damping, gravity, position integration, speed clamp and landing
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        if !self.actively_moving {
            self.vel.x *= DAMPING;
            if self.vel.x.abs() < REST_SPEED {
                self.vel.x = 0.0;
            }
        }

        if self.grounded && self.vel.y < 0.0 {
            self.grounded = false;
        }
        if !self.grounded {
            self.vel.y += self.gravity * dt;
        }

        self.pos += self.vel * dt;
        self.vel = self.vel.clamp(Vec2::splat(-MAX_SPEED), Vec2::splat(MAX_SPEED));

        if self.pos.y >= self.ground_y && self.vel.y >= 0.0 {
            if !self.grounded {
                log::trace!("{} landed at x={:.1}", self.id.label(), self.pos.x);
            }
            self.pos.y = self.ground_y;
            self.vel.y = 0.0;
            self.grounded = true;
        }
    }

    /// Pick the clip from movement state, then step it
    pub fn update_animation(&mut self) {
        let one_shot =
            self.current_animation == CLIP_TAKING_HIT || self.current_animation == self.attack_clip;

        if !one_shot {
            if self.actively_moving {
                if self.current_animation != CLIP_RUN {
                    self.play_run_animation();
                }
            } else if self.vel.x.abs() < IDLE_SPEED && self.current_animation == CLIP_RUN {
                self.play_idle_animation();
            }
        }

        let finished = match self.animations.get_mut(self.current_animation) {
            Some(anim) => {
                anim.step();
                anim.is_done()
            }
            None => false,
        };
        if finished && one_shot {
            self.play_idle_animation();
        }
    }
}

impl Collidable for Player {
    fn collision_box(&self) -> Rect {
        self.world_hurtbox()
    }

    fn attack_box(&self) -> Rect {
        Player::attack_box(self)
    }

    fn layer(&self) -> CollisionLayer {
        if self.is_attacking() {
            CollisionLayer::PLAYER | CollisionLayer::ATTACK
        } else {
            CollisionLayer::PLAYER
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn on_collision(&mut self, info: &CollisionInfo) {
        self.contacts_seen += 1;
        log::trace!(
            "{} registry contact {:?} depth={:.2}",
            self.id.label(),
            info.kind,
            info.penetration
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(PlayerId::One, Vec2::new(x, y), &Settings::default())
    }

    #[test]
    fn test_world_hurtbox_from_feet() {
        let p = player_at(100.0, 500.0);
        let hb = p.world_hurtbox();
        assert!((hb.x - 112.8).abs() < 1e-4);
        assert!((hb.y - (500.0 - 64.0 + 6.4)).abs() < 1e-4);
        assert!((hb.w - 38.4).abs() < 1e-4);
        assert!((hb.h - 51.2).abs() < 1e-4);
    }

    #[test]
    fn test_move_sets_velocity_and_facing() {
        let mut p = player_at(100.0, 500.0);
        p.move_dir(-1.0);
        assert_eq!(p.velocity().x, -MOVE_SPEED);
        assert_eq!(p.facing(), -1.0);
        assert!(p.is_moving());
    }

    #[test]
    fn test_damping_snaps_to_rest() {
        let mut p = player_at(100.0, 500.0);
        p.move_dir(1.0);
        p.stop_moving();
        p.integrate(SIM_DT);
        assert!((p.velocity().x - MOVE_SPEED * DAMPING).abs() < 1e-3);

        for _ in 0..60 {
            p.integrate(SIM_DT);
        }
        assert_eq!(p.velocity().x, 0.0);
    }

    #[test]
    fn test_integrate_advances_position() {
        let mut p = player_at(100.0, 500.0);
        p.move_dir(1.0);
        p.integrate(0.5);
        assert!((p.position().x - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut p = player_at(100.0, 500.0);
        p.apply_knockback(Vec2::new(100.0, 0.0));
        let before = p.clone();
        p.update(0.0);
        assert_eq!(p.position(), before.position());
        assert_eq!(p.velocity(), before.velocity());
        assert_eq!(p.animation(CLIP_IDLE), before.animation(CLIP_IDLE));
    }

    #[test]
    fn test_set_position_damps_velocity() {
        let mut p = player_at(100.0, 500.0);
        p.move_dir(1.0);
        p.set_position(Vec2::new(50.0, 500.0));
        assert_eq!(p.position().x, 50.0);
        assert!((p.velocity().x - MOVE_SPEED * CORRECTION_DAMPING).abs() < 1e-3);
    }

    #[test]
    fn test_knockback_capped() {
        let mut p = player_at(100.0, 500.0);
        p.apply_knockback(Vec2::new(1000.0, 0.0));
        assert!((p.velocity().length() - MAX_KNOCKBACK).abs() < 1e-3);

        let mut q = player_at(100.0, 500.0);
        q.apply_knockback(Vec2::new(150.0, 0.0));
        assert_eq!(q.velocity(), Vec2::new(150.0, 0.0));
    }

    #[test]
    fn test_jump_and_land() {
        let mut p = player_at(100.0, 500.0);
        p.jump();
        assert!(!p.is_grounded());
        assert_eq!(p.velocity().y, -JUMP_SPEED);

        // Second jump mid-air does nothing
        p.integrate(SIM_DT);
        let vy = p.velocity().y;
        p.jump();
        assert_eq!(p.velocity().y, vy);

        for _ in 0..240 {
            p.integrate(SIM_DT);
        }
        assert!(p.is_grounded());
        assert_eq!(p.position().y, 500.0);
        assert_eq!(p.velocity().y, 0.0);
    }

    #[test]
    fn test_run_then_idle_clip() {
        let mut p = player_at(100.0, 500.0);
        p.move_dir(1.0);
        p.update(SIM_DT);
        assert_eq!(p.current_animation(), CLIP_RUN);

        p.stop_moving();
        for _ in 0..30 {
            p.update(SIM_DT);
        }
        assert_eq!(p.current_animation(), CLIP_IDLE);
    }

    #[test]
    fn test_taking_hit_not_interrupted_by_movement() {
        let mut p = player_at(100.0, 500.0);
        p.play_taking_hit_animation();
        p.move_dir(1.0);
        p.update(SIM_DT);
        assert_eq!(p.current_animation(), CLIP_TAKING_HIT);
    }

    #[test]
    fn test_taking_hit_returns_to_idle() {
        let mut p = player_at(100.0, 500.0);
        p.play_taking_hit_animation();
        let cycle = {
            let anim = p.animation(CLIP_TAKING_HIT).unwrap();
            anim.frame_count() * anim.ticks_per_frame()
        };
        for _ in 0..cycle - 2 {
            p.update(SIM_DT);
            assert_eq!(p.current_animation(), CLIP_TAKING_HIT);
        }
        p.update(SIM_DT);
        assert_eq!(p.current_animation(), CLIP_IDLE);
    }

    #[test]
    fn test_attack_box_only_while_attacking() {
        let mut p = player_at(100.0, 500.0);
        assert!(p.attack_box().is_empty());

        p.punch();
        assert!(p.is_attacking());
        let body = p.world_hurtbox();
        let attack = p.attack_box();
        assert_eq!(attack.x, body.right());
        assert_eq!(attack.w, ATTACK_WIDTH);
        assert!((attack.h - body.h * 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_attack_box_faces_left() {
        let mut p = Player::new(PlayerId::Two, Vec2::new(300.0, 500.0), &Settings::default());
        p.punch();
        let body = p.world_hurtbox();
        assert!((p.attack_box().right() - body.x).abs() < 1e-4);
    }

    #[test]
    fn test_set_animation_ignores_out_of_range() {
        let mut p = player_at(100.0, 500.0);
        p.set_animation(42);
        assert_eq!(p.current_animation(), CLIP_IDLE);
    }

    #[test]
    fn test_position_for_hurtbox_round_trip() {
        let p = player_at(100.0, 500.0);
        let pos = p.position_for_hurtbox(Vec2::new(0.0, 0.0));
        let mut q = p.clone();
        q.set_position(pos);
        assert_eq!(q.world_hurtbox().x, 0.0);
    }

    #[test]
    fn test_landed_hit_clears_on_new_clip() {
        let mut p = player_at(100.0, 500.0);
        p.punch();
        p.mark_hit_landed();
        assert!(p.has_landed_hit());

        // Re-selecting the running clip keeps the mark
        p.set_animation(p.attack_clip());
        assert!(p.has_landed_hit());

        p.play_idle_animation();
        assert!(!p.has_landed_hit());
    }

    #[test]
    fn test_layer_includes_attack_while_striking() {
        let mut p = player_at(100.0, 500.0);
        assert_eq!(Collidable::layer(&p), CollisionLayer::PLAYER);
        p.punch();
        assert_eq!(
            Collidable::layer(&p),
            CollisionLayer::PLAYER | CollisionLayer::ATTACK
        );
    }
}
