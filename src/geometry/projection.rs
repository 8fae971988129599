//! World ↔ screen projection utilities
//!
//! The gizmo engine never talks to Bevy's camera directly. Systems capture a
//! [`CameraView`] snapshot once per frame and hand it down, which keeps the
//! projector, positioner and editors testable without a renderer.
//!
//! Screen coordinates follow the window convention: origin at the top left,
//! Y growing downwards, measured in logical pixels.

use bevy::math::Ray3d;
use bevy::prelude::*;

/// When a direction's Y component exceeds this, world up is too close to it to
/// build a stable tangent and the world depth axis is used instead
pub const TANGENT_PARALLEL_LIMIT: f32 = 0.9;

/// Read-only snapshot of the active camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera transform (camera space → world space)
    pub world_from_view: Mat4,
    /// Projection matrix (camera space → clip space)
    pub clip_from_view: Mat4,
    /// Logical viewport size in pixels
    pub viewport_size: Vec2,
}

impl CameraView {
    pub fn new(world_from_view: Mat4, clip_from_view: Mat4, viewport_size: Vec2) -> Self {
        Self {
            world_from_view,
            clip_from_view,
            viewport_size,
        }
    }

    /// Perspective camera at `eye` looking at `target`, using Bevy's default
    /// infinite reversed-Z projection
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3, fov_y: f32, viewport_size: Vec2) -> Self {
        let world_from_view = Transform::from_translation(eye)
            .looking_at(target, up)
            .compute_matrix();
        let aspect = viewport_size.x / viewport_size.y.max(1.0);
        let clip_from_view = Mat4::perspective_infinite_reverse_rh(fov_y, aspect, 0.1);
        Self::new(world_from_view, clip_from_view, viewport_size)
    }

    /// Capture a Bevy camera. Returns `None` until the camera has a viewport.
    pub fn from_camera(camera: &Camera, transform: &GlobalTransform) -> Option<Self> {
        let viewport_size = camera.logical_viewport_size()?;
        Some(Self::new(
            transform.compute_matrix(),
            camera.clip_from_view(),
            viewport_size,
        ))
    }

    /// Camera up vector in world space
    pub fn up(&self) -> Vec3 {
        self.world_from_view
            .transform_vector3(Vec3::Y)
            .normalize_or_zero()
    }

    /// Project a world point to screen space.
    ///
    /// Returns `None` for points behind the camera or outside the depth range.
    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip_from_world = self.clip_from_view * self.world_from_view.inverse();
        let clip = clip_from_world * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !ndc.is_finite() || ndc.z < 0.0 || ndc.z > 1.0 {
            return None;
        }
        let mut screen = (ndc.truncate() + Vec2::ONE) * 0.5 * self.viewport_size;
        screen.y = self.viewport_size.y - screen.y;
        Some(screen)
    }

    /// Ray from the camera through a screen point
    pub fn screen_to_ray(&self, screen: Vec2) -> Option<Ray3d> {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return None;
        }
        let mut ndc = screen * 2.0 / self.viewport_size - Vec2::ONE;
        ndc.y = -ndc.y;
        let world_from_clip = self.world_from_view * self.clip_from_view.inverse();
        let near = world_from_clip.project_point3(ndc.extend(1.0));
        let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        let direction = Dir3::new(far - near).ok()?;
        Some(Ray3d::new(near, direction))
    }
}

/// World-space tangent perpendicular to `direction`.
///
/// Crosses with world up, or with the world depth axis when `direction` is
/// nearly parallel to up, so the result never collapses to zero for a unit
/// input.
pub fn tangent_for(direction: Vec3) -> Vec3 {
    let reference = if direction.y.abs() < TANGENT_PARALLEL_LIMIT {
        Vec3::Y
    } else {
        Vec3::Z
    };
    direction.cross(reference).normalize_or_zero()
}

/// Screen-space image of a world direction anchored at a world point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenAxis {
    /// Screen position of the anchor
    pub origin: Vec2,
    /// Normalized screen direction, `None` when the direction points (nearly)
    /// straight into or out of the screen
    pub direction: Option<Vec2>,
}

/// Project `anchor` and `anchor + direction` and return the normalized screen
/// direction between them.
///
/// Returns `None` only when the anchor itself cannot be projected.
pub fn screen_axis(
    camera: &CameraView,
    anchor: Vec3,
    direction: Vec3,
    epsilon: f32,
) -> Option<ScreenAxis> {
    let origin = camera.world_to_screen(anchor)?;
    let direction = camera
        .world_to_screen(anchor + direction)
        .map(|tip| tip - origin)
        .filter(|delta| delta.length() >= epsilon)
        .map(|delta| delta.normalize());
    Some(ScreenAxis { origin, direction })
}

/// Signed angle from `a` to `b`, wrapped to (-π, π]
pub fn wrapped_angle_between(a: Vec2, b: Vec2) -> f32 {
    let raw = b.y.atan2(b.x) - a.y.atan2(a.x);
    let wrapped = (raw + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI;
    if wrapped <= -std::f32::consts::PI {
        wrapped + std::f32::consts::TAU
    } else {
        wrapped
    }
}
