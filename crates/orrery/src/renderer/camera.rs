use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::api::config::CameraConfig;
use crate::renderer::raycast::Ray;

/// Closest the eye may get to the origin before look-at degenerates.
const MIN_RADIUS: f32 = 1e-3;

/// Result of projecting a world point onto the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Surface position in pixels, origin top-left, Y down.
    pub pos: Vec2,
    /// Distance in front of the eye along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera orbiting the origin on a sphere.
///
/// Yaw is measured around +Y from +Z, pitch is elevation above the XZ
/// plane. The eye always looks at the origin.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    /// Always within [-π/2, π/2].
    pub pitch: f32,
    pub radius: f32,
    pub aspect: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    position: Vec3,
}

impl OrbitCamera {
    /// Place the camera at `config.initial_position`, deriving yaw, pitch and
    /// radius from it so the first drag continues from the same viewpoint.
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let start = Vec3::from_array(config.initial_position);
        let radius = start.length();
        let (yaw, pitch) = if radius > MIN_RADIUS {
            (start.x.atan2(start.z), (start.y / radius).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        let mut camera = Self {
            yaw,
            pitch,
            radius: radius.max(MIN_RADIUS),
            aspect,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            position: start,
        };
        if radius <= MIN_RADIUS {
            camera.place();
        }
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotate by a pointer delta in pixels. Pitch is clamped to the poles.
    /// With `radius` set the eye lands on that sphere; `None` keeps the
    /// current distance.
    pub fn orbit(&mut self, dx: f32, dy: f32, sensitivity: f32, radius: Option<f32>) {
        if let Some(radius) = radius.filter(|r| r.is_finite()) {
            self.radius = radius.max(MIN_RADIUS);
        }
        self.yaw += dx * sensitivity;
        self.pitch = (self.pitch + dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.place();
    }

    /// Multiply the eye distance by `factor`, then clamp to the optional
    /// bounds. Non-positive or non-finite factors are ignored.
    pub fn scale_distance(&mut self, factor: f32, min: Option<f32>, max: Option<f32>) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let mut radius = self.radius * factor;
        if let Some(max) = max {
            radius = radius.min(max);
        }
        if let Some(min) = min {
            radius = radius.max(min);
        }
        self.radius = radius.max(MIN_RADIUS);
        self.place();
        true
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    fn place(&mut self) {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        self.position = Vec3::new(cos_p * sin_y, sin_p, cos_p * cos_y) * self.radius;
    }

    /// Tangent of the orbit sphere pointing toward increasing pitch. Stays
    /// well-defined at the poles, unlike a fixed world up.
    pub fn up(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(-sin_p * sin_y, cos_p, -sin_p * cos_y)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, self.up())
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Snapshot the current matrices for projecting many points onto a
    /// surface of `size` pixels.
    pub fn projector(&self, size: Vec2) -> Projector {
        Projector {
            view: self.view(),
            projection: self.projection(),
            size,
            near: self.near,
            focal: size.y * 0.5 / (self.fov_y * 0.5).tan(),
        }
    }

    /// Project a single world point. Returns `None` for points at or behind
    /// the near plane.
    pub fn project(&self, world: Vec3, size: Vec2) -> Option<Projection> {
        self.projector(size).project(world)
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let target = self
            .view_projection()
            .inverse()
            .project_point3(ndc.extend(0.5));
        Ray::new(self.position, target - self.position)
    }
}

/// Frozen view/projection pair, built once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view: Mat4,
    projection: Mat4,
    size: Vec2,
    near: f32,
    /// Pixels per world unit at depth 1.
    focal: f32,
}

impl Projector {
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view.transform_point3(world);
        let depth = -view.z;
        if depth <= self.near {
            return None;
        }
        let clip = self.projection * view.extend(1.0);
        let ndc = clip.xy() / clip.w;
        let pos = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.size.x,
            (1.0 - ndc.y) * 0.5 * self.size.y,
        );
        Some(Projection {
            pos,
            depth,
            scale: self.focal / depth,
        })
    }

    /// Whether a projected position lies on the surface.
    pub fn on_surface(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.size.x && pos.y <= self.size.y
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default(), 800.0 / 600.0)
    }

    #[test]
    fn starts_at_configured_position() {
        let cam = camera();
        assert!((cam.position() - Vec3::new(0.0, 30.0, 60.0)).length() < 1e-4);
        assert!((cam.radius - 4500.0f32.sqrt()).abs() < 1e-3);
        assert_eq!(cam.yaw, 0.0);
        assert!(cam.pitch > 0.0 && cam.pitch < FRAC_PI_2);
    }

    #[test]
    fn orbit_without_radius_keeps_distance() {
        let mut cam = camera();
        let radius = cam.radius;
        cam.orbit(120.0, -40.0, 0.01, None);
        assert!((cam.position().length() - radius).abs() < 1e-3);
    }

    #[test]
    fn orbit_with_radius_lands_on_that_sphere() {
        let mut cam = camera();
        cam.scale_distance(1.5, None, None);
        cam.orbit(10.0, 0.0, 0.01, Some(60.0));
        assert_eq!(cam.radius, 60.0);
        assert!((cam.position().length() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped_under_repeated_drag() {
        let mut cam = camera();
        for _ in 0..1000 {
            cam.orbit(0.0, 50.0, 0.01, None);
            assert!(cam.pitch <= FRAC_PI_2);
        }
        assert_eq!(cam.pitch, FRAC_PI_2);
        for _ in 0..1000 {
            cam.orbit(0.0, -50.0, 0.01, None);
            assert!(cam.pitch >= -FRAC_PI_2);
        }
        assert_eq!(cam.pitch, -FRAC_PI_2);
        assert!(cam.view().is_finite());
    }

    #[test]
    fn scale_distance_multiplies_position() {
        let mut cam = camera();
        let before = cam.position();
        assert!(cam.scale_distance(1.1, None, None));
        assert!((cam.position() - before * 1.1).length() < 1e-3);
    }

    #[test]
    fn scale_distance_respects_bounds_and_rejects_bad_factors() {
        let mut cam = camera();
        cam.scale_distance(10.0, None, Some(100.0));
        assert!((cam.radius - 100.0).abs() < 1e-4);
        cam.scale_distance(0.01, Some(20.0), None);
        assert!((cam.radius - 20.0).abs() < 1e-4);
        assert!(!cam.scale_distance(0.0, None, None));
        assert!(!cam.scale_distance(f32::NAN, None, None));
        assert!((cam.radius - 20.0).abs() < 1e-4);
    }

    #[test]
    fn origin_projects_to_surface_center() {
        let cam = camera();
        let p = cam.project(Vec3::ZERO, Vec2::new(800.0, 600.0)).unwrap();
        assert!((p.pos - Vec2::new(400.0, 300.0)).length() < 1e-2);
        assert!((p.depth - cam.radius).abs() < 1e-3);
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        let cam = camera();
        assert!(cam.project(Vec3::new(0.0, 60.0, 120.0), Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn nearer_points_scale_larger() {
        let cam = camera();
        let size = Vec2::new(800.0, 600.0);
        let near = cam.project(Vec3::new(0.0, 0.0, 30.0), size).unwrap();
        let far = cam.project(Vec3::new(0.0, 0.0, -30.0), size).unwrap();
        assert!(near.scale > far.scale);
    }

    #[test]
    fn center_ray_points_at_origin() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (-cam.position()).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
        assert_eq!(ray.origin, cam.position());
    }

    #[test]
    fn set_aspect_ignores_degenerate_values() {
        let mut cam = camera();
        cam.set_aspect(1920.0 / 1080.0);
        cam.set_aspect(f32::INFINITY);
        cam.set_aspect(0.0);
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
    }
}
