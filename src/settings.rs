//! Engine settings
//!
//! Set once before a match starts; the simulation never renegotiates them.
//! Stored as JSON when persisted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::player::CLIP_TAKING_HIT;
use crate::sim::rect::Rect;

/// Timing for one animation clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipSettings {
    /// Frames in the sprite strip
    pub frames: u32,
    /// Seconds for one full loop
    pub duration: f32,
}

impl ClipSettings {
    pub const fn new(frames: u32, duration: f32) -> Self {
        Self { frames, duration }
    }
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playable arena
    pub world_bounds: Rect,
    /// Sprite frame edge length; the hurtbox is derived from it
    pub sprite_size: f32,

    // === Movement ===
    pub move_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,

    // === Combat ===
    pub knockback_force: f32,
    /// Clip index during which a player's attack box is live
    pub attack_clip: usize,

    // === Collision ===
    /// Player overlaps at or below this depth are recorded but not resolved
    pub collision_epsilon: f32,

    /// Clips in index order: idle, run, taking-hit
    pub clips: Vec<ClipSettings>,

    // === Debug ===
    /// Expose the contact overlay to the presentation layer
    pub debug_visualization: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_bounds: Rect::new(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT),
            sprite_size: PLAYER_SIZE,

            move_speed: MOVE_SPEED,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,

            knockback_force: KNOCKBACK_FORCE,
            attack_clip: CLIP_TAKING_HIT,

            collision_epsilon: COLLISION_EPSILON,

            clips: vec![
                ClipSettings::new(8, 1.6),
                ClipSettings::new(6, 0.75),
                ClipSettings::new(5, 0.75),
            ],

            debug_visualization: false,
        }
    }
}

impl Settings {
    /// Default settings on an arena of the given size
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            world_bounds: Rect::new(0.0, 0.0, width, height),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("Using default settings ({}: {})", path.display(), err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_json() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "move_speed": 300.0,
            "world_bounds": { "x": 0, "y": 0, "w": 640, "h": 360 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.move_speed, 300.0);
        assert_eq!(settings.world_bounds.w, 640.0);
        assert_eq!(settings.jump_speed, JUMP_SPEED);
        assert_eq!(settings.clips.len(), 3);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/brawl-settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_with_arena() {
        let settings = Settings::with_arena(640.0, 360.0);
        assert_eq!(settings.world_bounds, Rect::new(0.0, 0.0, 640.0, 360.0));
        assert_eq!(settings.attack_clip, CLIP_TAKING_HIT);
    }
}
