//! # driftfall - Decorative Falling-Particle Overlays
//!
//! Snowflakes, leaves, emoji, or your own sprites, drifting over the screen
//! in a transparent click-through window.
//!
//! driftfall handles the window and GPU plumbing (transparent surface,
//! sprite textures, frame pacing, pause on occlusion) so you can focus on
//! picking what falls and how it moves.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfall::prelude::*;
//!
//! fn main() {
//!     let config = FallConfig {
//!         max_items: 40,
//!         spawn_rate: 0.03,
//!         characters: vec!["❄".into(), "❅".into(), "❆".into()],
//!         ..Default::default()
//!     };
//!
//!     Overlay::new(config).run().unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Configuration
//!
//! [`FallConfig`] is a flat record of tunable ranges (speed, size, opacity,
//! drift, rotation, spawn rate, item cap) plus the visual sources: a glyph
//! list, an image list, or both. Every field is optional in the serialized
//! form, so a partial camelCase JSON record from the host parses directly:
//!
//! ```ignore
//! let config = FallConfig::from_json_file("falling.json")?;
//! ```
//!
//! Images override glyphs once at least one of them loads; failed image
//! loads are logged and skipped, and if none load the animation silently
//! degrades to glyph mode.
//!
//! ### The animator
//!
//! [`Animator`] is the simulation core: it spawns particles at the top edge
//! with attributes drawn uniformly from the configured ranges, advances them
//! each frame (fall, sway, spin, scaled by real frame time against a 60 fps
//! baseline), and retires off-screen particles into a reuse pool. It knows
//! nothing about windows; it draws through the [`Surface`] trait, so it can
//! be driven headlessly:
//!
//! ```ignore
//! let mut animator = Animator::new(config, Vec2::new(1920.0, 1080.0));
//! animator.start(Vec::new());     // no images: glyph mode
//! animator.seed_initial();
//! animator.advance(1.0);          // one 60 fps frame
//! animator.render(&mut my_surface);
//! ```
//!
//! ### The overlay
//!
//! [`Overlay`] owns the host side: a full-screen transparent window that
//! stays on top, never intercepts input, pauses while occluded, and
//! debounces resizes. Glyphs are stamped with sprite art ([`SpriteArt`]),
//! either registered per glyph or the built-in snowflake.

mod animator;
pub mod assets;
mod config;
mod error;
mod gpu;
mod overlay;
mod particle;
mod pool;
pub mod sprite;
pub mod surface;
pub mod time;

pub use animator::{Animator, Phase};
pub use config::{FallConfig, ImageLocator};
pub use error::{AssetError, ConfigError, GpuError, OverlayError};
pub use glam::Vec2;
pub use overlay::Overlay;
pub use particle::{Particle, Visual};
pub use pool::ParticlePool;
pub use sprite::SpriteArt;
pub use surface::{ImageHandle, Placement, Surface};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use driftfall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::{Animator, Phase};
    pub use crate::assets::{ImageLoader, LoadedImage};
    pub use crate::config::{FallConfig, ImageLocator};
    pub use crate::overlay::Overlay;
    pub use crate::sprite::SpriteArt;
    pub use crate::surface::{ImageHandle, Placement, Surface};
    pub use crate::time::FrameClock;
    pub use crate::Vec2;
}
