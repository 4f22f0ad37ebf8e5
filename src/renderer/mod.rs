//! Presentation adapter
//!
//! Read-only projections of simulation state. Nothing here mutates the
//! match; drawing itself belongs to the host.

pub mod debug;
pub mod view;

pub use debug::{DebugOverlay, clip_name, debug_lines, overlay};
pub use view::{PlayerView, SpriteFrame, player_views, sprite_frame};
