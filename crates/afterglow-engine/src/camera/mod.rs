//! Camera interface consumed by the compositor.
//!
//! The compositor never does camera math of its own: area-scope projection
//! and polygon clip-space transforms go through this trait. A perspective
//! implementation is provided for the demo app and for tests.

mod perspective;

pub use perspective::PerspectiveCamera;

use glam::{Mat4, Vec3};

/// Projection queries the effect pipeline needs from the active camera.
///
/// `view_depth` values are distances along the camera forward axis in world
/// units; anything smaller than `near_clip()` is behind (or too close to)
/// the camera and area-scope effects treat it as not visible.
pub trait Camera {
    /// Camera position in world space.
    fn position(&self) -> Vec3;

    /// Projects a world-space point to pixel coordinates on a viewport of
    /// the given size. Returns `(screen_x, screen_y, view_depth)`.
    ///
    /// The screen coordinates are meaningless when `view_depth` is behind
    /// the near clip plane; callers must check the depth first.
    fn project(&self, world: Vec3, viewport_w: f32, viewport_h: f32) -> (f32, f32, f32);

    /// World units covered by one pixel at the given view depth, as
    /// `(per_pixel_x, per_pixel_y)`.
    fn pixel_size_at_distance(&self, view_depth: f32, viewport_w: f32, viewport_h: f32)
        -> (f32, f32);

    /// Combined view-projection matrix.
    fn view_projection(&self) -> Mat4;

    fn near_clip(&self) -> f32;
    fn far_clip(&self) -> f32;
}
