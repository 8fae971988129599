//! Pointer-to-parameter projection
//!
//! Maps 2D pointer travel onto one scalar (a distance or an angle) so that
//! dragging along a handle's natural on-screen direction always increases the
//! value, whatever the camera orientation.
//!
//! The natural direction is the handle's own direction for translate handles
//! and the ring tangent for rotation rings. Both are projected through the
//! gizmo's screen position; when that image collapses (looking straight down
//! the direction) the pointer's angle around the gizmo is used instead.

use crate::core::errors::{GizmoError, GizmoResult};
use crate::core::settings::GizmoSettings;
use crate::geometry::projection::{screen_axis, tangent_for, wrapped_angle_between, CameraView};
use bevy::prelude::*;

/// What the projected scalar measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// World units along a translate handle
    Distance,
    /// Radians about a rotation ring's axis
    Angle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerToParameterProjector {
    pub distance_sensitivity: f32,
    pub angle_sensitivity: f32,
    /// Minimum screen axis length in pixels
    pub degenerate_epsilon: f32,
}

impl Default for PointerToParameterProjector {
    fn default() -> Self {
        Self::from_settings(&GizmoSettings::default())
    }
}

impl PointerToParameterProjector {
    pub fn from_settings(settings: &GizmoSettings) -> Self {
        Self {
            distance_sensitivity: settings.distance_sensitivity,
            angle_sensitivity: settings.angle_sensitivity,
            degenerate_epsilon: settings.degenerate_screen_epsilon,
        }
    }

    pub fn sensitivity(&self, kind: ParameterKind) -> f32 {
        match kind {
            ParameterKind::Distance => self.distance_sensitivity,
            ParameterKind::Angle => self.angle_sensitivity,
        }
    }

    /// World direction whose screen image is the drag direction for `kind`
    pub fn drag_direction(kind: ParameterKind, reference: Vec3) -> Vec3 {
        match kind {
            ParameterKind::Distance => reference,
            ParameterKind::Angle => tangent_for(reference),
        }
    }

    /// Scalar for the pointer travel from `start` to `current`.
    ///
    /// Fails when the gizmo cannot be projected or the reference direction is
    /// degenerate; the caller skips the update in that case.
    pub fn project(
        &self,
        camera: &CameraView,
        gizmo_world: Vec3,
        reference: Vec3,
        kind: ParameterKind,
        start: Vec2,
        current: Vec2,
    ) -> GizmoResult<f32> {
        let reference = reference.try_normalize().ok_or(GizmoError::DegenerateAxis(reference))?;
        let direction = Self::drag_direction(kind, reference);
        let axis = screen_axis(camera, gizmo_world, direction, self.degenerate_epsilon)
            .ok_or(GizmoError::Unprojectable)?;

        let value = match axis.direction {
            Some(screen_direction) => (current - start).dot(screen_direction) * self.sensitivity(kind),
            None => {
                let from = start - axis.origin;
                let to = current - axis.origin;
                if from.length_squared() <= f32::EPSILON || to.length_squared() <= f32::EPSILON {
                    0.0
                } else {
                    // Screen Y points down, so flip to keep counter-clockwise positive
                    -wrapped_angle_between(from, to)
                }
            }
        };

        Ok(value)
    }
}
