use glam::{EulerRot, Mat4, Vec3, Vec4};

use super::Camera;

/// Perspective camera with position + Euler rotation.
///
/// Left-handed projection with a [0, 1] depth range, matching the depth
/// values the area-scope remap expects.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Pitch / yaw / roll in radians.
    pub rotation: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            fov_y: std::f32::consts::FRAC_PI_3,
            aspect: 16.0 / 9.0,
            near: 0.5,
            far: 500.0,
        }
    }

    fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Camera for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn project(&self, world: Vec3, viewport_w: f32, viewport_h: f32) -> (f32, f32, f32) {
        let clip: Vec4 = self.view_projection() * world.extend(1.0);

        // For a perspective projection, clip.w is the view-space depth.
        let depth = clip.w;
        if depth.abs() <= f32::EPSILON {
            return (0.0, 0.0, depth);
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let sx = (ndc_x * 0.5 + 0.5) * viewport_w;
        let sy = (0.5 - ndc_y * 0.5) * viewport_h;
        (sx, sy, depth)
    }

    fn pixel_size_at_distance(
        &self,
        view_depth: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) -> (f32, f32) {
        // Frustum extent at the given depth; pixels are square, so the
        // horizontal extent follows from the viewport aspect and both axes
        // resolve to the same world-units-per-pixel value.
        let frustum_h = 2.0 * view_depth * (self.fov_y * 0.5).tan();
        let frustum_w = frustum_h * (viewport_w / viewport_h);
        (frustum_w / viewport_w, frustum_h / viewport_h)
    }

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn near_clip(&self) -> f32 {
        self.near
    }

    fn far_clip(&self) -> f32 {
        self.far
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at_origin() -> PerspectiveCamera {
        PerspectiveCamera {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y: std::f32::consts::FRAC_PI_2,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
        }
    }

    #[test]
    fn centre_point_projects_to_viewport_centre() {
        let cam = camera_at_origin();
        let (sx, sy, depth) = cam.project(Vec3::new(0.0, 0.0, 10.0), 800.0, 600.0);
        assert!((sx - 400.0).abs() < 0.01);
        assert!((sy - 300.0).abs() < 0.01);
        assert!((depth - 10.0).abs() < 0.01);
    }

    #[test]
    fn point_behind_camera_reports_negative_depth() {
        let cam = camera_at_origin();
        let (_, _, depth) = cam.project(Vec3::new(0.0, 0.0, -5.0), 800.0, 600.0);
        assert!(depth < cam.near_clip());
    }

    #[test]
    fn pixel_size_scales_linearly_with_depth() {
        let cam = camera_at_origin();
        let (x1, y1) = cam.pixel_size_at_distance(10.0, 800.0, 800.0);
        let (x2, y2) = cam.pixel_size_at_distance(20.0, 800.0, 800.0);
        assert!((x2 / x1 - 2.0).abs() < 1e-4);
        assert!((y2 / y1 - 2.0).abs() < 1e-4);
    }

    #[test]
    fn offset_point_projects_off_centre() {
        let cam = camera_at_origin();
        let (sx, sy, _) = cam.project(Vec3::new(5.0, 0.0, 10.0), 800.0, 800.0);
        assert!(sx > 400.0);
        assert!((sy - 400.0).abs() < 0.01);
    }
}
