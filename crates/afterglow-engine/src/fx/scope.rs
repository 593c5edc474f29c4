//! Scope math for area and polygon effect applications.
//!
//! Pure functions over the camera interface; the applicator feeds the
//! results into the shared constants record before issuing the draw.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;
use crate::coords::{Rect, Vec2 as ScreenVec2, Viewport};

use super::types::PolygonData;

/// Normalized-device scope rectangle and depth for an area-scope draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AreaBounds {
    /// The affected region in [0, 1] screen coordinates.
    pub rect: Rect,
    /// Depth-buffer value for the region, so area effects can sit behind
    /// ordinary geometry.
    pub depth: f32,
}

/// Projects a world-space anchor + world-space rectangular size to screen
/// bounds. Returns `None` when the anchor is behind the near clip plane —
/// the caller must skip the draw entirely.
pub fn area_bounds(
    camera: &dyn Camera,
    viewport: Viewport,
    anchor: Vec3,
    world_size: Vec2,
) -> Option<AreaBounds> {
    let (sx, sy, distance) = camera.project(anchor, viewport.width, viewport.height);

    // Nothing to do if the anchor is behind the camera.
    if distance < camera.near_clip() {
        return None;
    }

    let centre = ScreenVec2::new(sx / viewport.width, sy / viewport.height);

    // World units covered by one pixel at the anchor's distance give the
    // pixel extent of the requested world-space size, then normalize.
    let (wu_per_px_x, wu_per_px_y) =
        camera.pixel_size_at_distance(distance, viewport.width, viewport.height);
    let size = ScreenVec2::new(
        (world_size.x / wu_per_px_x) / viewport.width,
        (world_size.y / wu_per_px_y) / viewport.height,
    );

    // Linear world distance remapped into the camera's near/far range.
    let (near, far) = (camera.near_clip(), camera.far_clip());
    let depth = far * (distance - near) / (far - near) / distance;

    Some(AreaBounds {
        rect: Rect::from_centre_size(centre, size),
        depth,
    })
}

/// Transforms the four polygon points into clip space:
/// `viewProjection × (transform × point)`, passed as-is to the polygon
/// vertex stage.
pub fn polygon_clip_points(view_projection: Mat4, data: &PolygonData) -> [[f32; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (slot, point) in out.iter_mut().zip(data.points.iter()) {
        let world = data.transform * point.extend(1.0);
        let clip = view_projection * world;
        *slot = clip.to_array();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y: std::f32::consts::FRAC_PI_2,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
        }
    }

    const VIEWPORT: Viewport = Viewport::new(800.0, 800.0);

    #[test]
    fn anchor_behind_near_clip_yields_none() {
        let cam = camera();
        assert!(area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, -10.0), Vec2::splat(10.0)).is_none());
        assert!(area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 0.5), Vec2::splat(10.0)).is_none());
    }

    #[test]
    fn centred_anchor_produces_centred_bounds() {
        let cam = camera();
        let bounds =
            area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 10.0), Vec2::splat(10.0)).unwrap();

        let centre = bounds.rect.origin + bounds.rect.size * 0.5;
        assert!((centre.x - 0.5).abs() < 1e-3);
        assert!((centre.y - 0.5).abs() < 1e-3);
    }

    #[test]
    fn screen_size_shrinks_with_distance() {
        let cam = camera();
        let near =
            area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 10.0), Vec2::splat(10.0)).unwrap();
        let far =
            area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 40.0), Vec2::splat(10.0)).unwrap();
        assert!(far.rect.size.x < near.rect.size.x);
        assert!(far.rect.size.y < near.rect.size.y);
    }

    #[test]
    fn depth_remap_is_in_unit_range_and_monotonic() {
        let cam = camera();
        let near =
            area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 2.0), Vec2::splat(1.0)).unwrap();
        let far =
            area_bounds(&cam, VIEWPORT, Vec3::new(0.0, 0.0, 90.0), Vec2::splat(1.0)).unwrap();
        assert!(near.depth >= 0.0 && near.depth <= 1.0);
        assert!(far.depth >= 0.0 && far.depth <= 1.0);
        assert!(near.depth < far.depth);
    }

    #[test]
    fn polygon_points_pass_through_both_transforms() {
        let cam = camera();
        let data = PolygonData::new(
            [
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
            ],
            Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)),
        );

        let clip = polygon_clip_points(cam.view_projection(), &data);

        // All four points end up in front of the camera at depth 10.
        for p in clip {
            assert!((p[3] - 10.0).abs() < 1e-3);
        }
        // Left points have negative clip x, right points positive.
        assert!(clip[0][0] < 0.0 && clip[1][0] < 0.0);
        assert!(clip[2][0] > 0.0 && clip[3][0] > 0.0);
    }
}
