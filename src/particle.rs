//! Particle records and their visual sources.

use glam::Vec2;

/// Spawn offset above the top edge, in pixels.
pub(crate) const SPAWN_Y: f32 = -20.0;

/// How far past the bottom edge a particle may travel before it is retired,
/// in pixels.
pub(crate) const CULL_MARGIN: f32 = 30.0;

/// What a particle looks like: a text glyph or a loaded image, never both.
///
/// The slot indexes the animator's glyph or image table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    /// Index into the configured glyph list.
    Glyph(usize),
    /// Index into the loaded image table.
    Image(usize),
}

/// A single falling item.
///
/// Created with attributes drawn from the configured ranges, mutated every
/// frame by the update step, and retired to the reuse pool once it drops
/// below the viewport.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Center position in surface pixels.
    pub position: Vec2,
    /// Drawn bounding-box edge length in pixels.
    pub size: f32,
    /// Fall speed in pixels per baseline frame.
    pub speed: f32,
    /// Alpha in `0.0..=1.0`.
    pub opacity: f32,
    /// Rotation angle in radians.
    pub rotation: f32,
    /// Spin direction, `1.0` or `-1.0`.
    pub rotation_dir: f32,
    /// Phase of the sideways sway sine wave.
    pub drift_phase: f32,
    /// Per-particle multiplier on how fast the sway phase advances.
    pub drift_speed: f32,
    /// Visual source reference.
    pub visual: Visual,
}

impl Particle {
    /// A zeroed record for when the reuse pool is empty. Every field is
    /// overwritten by the spawn step.
    pub(crate) fn blank() -> Self {
        Self {
            position: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            opacity: 0.0,
            rotation: 0.0,
            rotation_dir: 1.0,
            drift_phase: 0.0,
            drift_speed: 0.0,
            visual: Visual::Glyph(0),
        }
    }

    /// Whether the particle is still inside the viewport plus the cull
    /// margin. False exactly when `y >= viewport_height + 30`.
    #[inline]
    pub fn on_screen(&self, viewport_height: f32) -> bool {
        self.position.y < viewport_height + CULL_MARGIN
    }
}
