use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::picking::Ray;

/// Pitch limit for user orbiting, just short of straight up/down
const MAX_PITCH: f32 = 1.5;

/// Perspective camera aimed at a look-at point
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            fov: 45.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let p = self.view_projection() * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        Some(p.truncate().truncate() / p.w)
    }

    /// Cast a ray from normalized device coordinates into the scene
    pub fn screen_ray(&self, ndc: Vec2) -> Ray {
        let vp_inv = self.view_projection().inverse();

        // Unproject near and far points
        let near_world = vp_inv * Vec4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.position,
            direction: (far - near).normalize_or_zero(),
        }
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Rotate around the look-at point. Degrees, positive `dx` turns right.
    pub fn orbit(&mut self, dx_deg: f32, dy_deg: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let yaw = offset.x.atan2(offset.z) - dx_deg.to_radians();
        let pitch = ((offset.y / distance).clamp(-1.0, 1.0).asin() + dy_deg.to_radians())
            .clamp(-MAX_PITCH, MAX_PITCH);
        self.position = self.target + spherical_offset(yaw, pitch, distance);
    }

    /// Move toward (`delta > 0`) or away from the look-at point
    pub fn dolly(&mut self, delta: f32, min_distance: f32, max_distance: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let new_distance = (distance * (1.0 - delta)).clamp(min_distance, max_distance);
        self.position = self.target + offset * (new_distance / distance);
    }
}

fn spherical_offset(yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(distance * cp * sy, distance * sp, distance * cp * cy)
}

/// Bounding rectangle of the drawing surface in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Device pixels to NDC (y up). `None` for an empty rectangle.
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (x - self.left) / self.width * 2.0 - 1.0,
            -((y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }

    /// NDC back to device pixels
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let rect = CanvasRect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(rect.to_ndc(100.0, 50.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(rect.to_ndc(300.0, 150.0), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(rect.to_ndc(200.0, 100.0), Some(Vec2::ZERO));
        assert_eq!(rect.from_ndc(Vec2::ZERO), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_ndc_empty_rect() {
        let rect = CanvasRect::new(0.0, 0.0, 0.0, 100.0);
        assert!(rect.to_ndc(0.0, 0.0).is_none());
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = PerspectiveCamera::new(Vec3::new(0.0, 3.0, 8.0), Vec3::ZERO);
        let ray = cam.screen_ray(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_project_target_is_center() {
        let cam = PerspectiveCamera::new(Vec3::new(2.0, 1.0, 5.0), Vec3::new(0.0, 0.5, 0.0));
        let ndc = cam.project(Vec3::new(0.0, 0.5, 0.0)).unwrap();
        assert!(ndc.abs_diff_eq(Vec2::ZERO, 1e-4));
        // Behind the camera
        assert!(cam.project(Vec3::new(4.0, 1.5, 10.0)).is_none());
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut cam = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.orbit(90.0, 0.0);
        assert!((cam.distance() - 5.0).abs() < 1e-4);
        assert!(cam.position.abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), 1e-4));
        cam.orbit(0.0, 200.0);
        let pitch = (cam.position.y / cam.distance()).asin();
        assert!((pitch - MAX_PITCH).abs() < 1e-4);
    }

    #[test]
    fn test_dolly_clamps() {
        let mut cam = PerspectiveCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        cam.dolly(0.5, 2.0, 30.0);
        assert!((cam.distance() - 2.5).abs() < 1e-5);
        cam.dolly(0.9, 2.0, 30.0);
        assert!((cam.distance() - 2.0).abs() < 1e-5);
        cam.dolly(-100.0, 2.0, 30.0);
        assert!((cam.distance() - 30.0).abs() < 1e-4);
    }
}
