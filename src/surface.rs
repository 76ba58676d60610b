//! Drawing surface abstraction.
//!
//! The animator never talks to a window directly; it issues draw calls
//! through [`Surface`]. The shipped wgpu overlay implements it, and headless
//! hosts or tests can record the calls instead.

use glam::Vec2;

/// Opaque reference to an image registered with the animator.
///
/// Handles are dense indices in load order, so a backend that uploads
/// textures in the same order can use [`index`](ImageHandle::index)
/// directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub(crate) usize);

impl ImageHandle {
    /// Slot of this image in the animator's loaded-image table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where and how to draw one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Center position in surface pixels, y down.
    pub center: Vec2,
    /// Drawn bounding-box edge length in pixels. Governs both axes,
    /// including non-square images.
    pub size: f32,
    /// Rotation around the center in radians.
    pub rotation: f32,
    /// Alpha multiplier in `0.0..=1.0`.
    pub opacity: f32,
}

/// A drawing surface the animation renders onto, one frame at a time.
pub trait Surface {
    /// Erase the previous frame.
    fn clear(&mut self);

    /// Draw a text glyph centered on `placement`.
    fn draw_glyph(&mut self, glyph: &str, placement: Placement);

    /// Draw a loaded image centered on `placement`.
    fn draw_image(&mut self, image: ImageHandle, placement: Placement);
}
