//! Workbench orbit camera
//!
//! Left-drag orbits around the focus point and the wheel zooms. Both stop
//! while [`CameraNavigation`] is suspended, which is how a gizmo drag keeps
//! the view still.

use crate::geometry::projection::CameraView;
use crate::gizmo::GizmoSet;
use crate::scene::navigation::CameraNavigation;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

const ORBIT_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.1;
const PIXELS_PER_LINE: f32 = 40.0;
const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 80.0;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

/// Spherical camera rig around `focus`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            radius: 12.0,
            yaw: 0.6,
            pitch: 0.45,
        }
    }
}

impl OrbitCamera {
    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        let eye = self.focus + rotation * Vec3::new(0.0, 0.0, self.radius);
        Transform::from_translation(eye).looking_at(self.focus, Vec3::Y)
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SPEED;
        self.pitch = (self.pitch + delta.y * ORBIT_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * (1.0 - lines * ZOOM_SPEED)).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

/// Camera snapshot handed to the gizmo each frame; `None` until a camera has
/// a viewport
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ActiveCameraView(pub Option<CameraView>);

pub fn spawn_orbit_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((Camera3d::default(), orbit.transform(), orbit));
}

pub fn orbit_camera_input(
    navigation: Res<CameraNavigation>,
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    if !navigation.is_enabled() {
        return;
    }
    let dragging = mouse.pressed(MouseButton::Left) && !mouse.just_pressed(MouseButton::Left);
    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    if !dragging && lines == 0.0 {
        return;
    }

    for (mut orbit, mut transform) in &mut cameras {
        if dragging && motion.delta != Vec2::ZERO {
            orbit.orbit(motion.delta);
        }
        if lines != 0.0 {
            orbit.zoom(lines);
        }
        *transform = orbit.transform();
    }
}

/// Capture the orbit camera for this frame's gizmo work
pub fn capture_camera_view(
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut view: ResMut<ActiveCameraView>,
) {
    view.0 = cameras
        .single()
        .ok()
        .and_then(|(camera, transform)| CameraView::from_camera(camera, transform));
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveCameraView>()
            .add_systems(Startup, spawn_orbit_camera)
            .add_systems(PreUpdate, capture_camera_view)
            .add_systems(Update, orbit_camera_input.after(GizmoSet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut orbit = OrbitCamera::default();
        orbit.orbit(Vec2::new(120.0, 10_000.0));
        assert!(orbit.pitch <= PITCH_LIMIT);
        let eye = orbit.transform().translation;
        assert!(((eye - orbit.focus).length() - orbit.radius).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_bounded() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(100.0);
        assert_eq!(orbit.radius, MIN_RADIUS);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.radius, MAX_RADIUS);
    }
}
