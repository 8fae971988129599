//! Gizmo placement
//!
//! The gizmo floats next to its target instead of being parented to it, so its
//! world placement is derived from the target's bounds, the picked face and
//! the camera. Whatever the strategy, the gizmo never ends up inside the
//! target.

use crate::core::settings::GizmoSettings;
use crate::geometry::projection::CameraView;
use crate::scene::target::TargetObject;
use bevy::prelude::*;

/// World placement of the handle set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPlacement {
    pub position: Vec3,
    pub orientation: Quat,
}

/// How a placement was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    FaceAnchored,
    BoundsAnchored,
    /// Bounds-anchored along world up because no camera was available
    Fallback,
}

/// A picked point on a target face with its outward world normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceAnchor {
    pub point: Vec3,
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPositioner {
    pub face_clearance: f32,
    pub bounds_clearance: f32,
    pub fallback_offset: f32,
}

impl Default for GizmoPositioner {
    fn default() -> Self {
        Self::from_settings(&GizmoSettings::default())
    }
}

impl GizmoPositioner {
    pub fn from_settings(settings: &GizmoSettings) -> Self {
        Self {
            face_clearance: settings.face_clearance,
            bounds_clearance: settings.bounds_clearance,
            fallback_offset: settings.fallback_offset,
        }
    }

    /// Place the gizmo just off a picked face.
    ///
    /// With `align_to_normal` the gizmo's +Y axis is turned onto the face
    /// normal, otherwise it keeps the world orientation. Falls back to bounds
    /// anchoring if the result would sit inside the target; the fallback
    /// keeps the alignment so the handle still points along the normal.
    pub fn face_anchored(
        &self,
        target: &TargetObject,
        anchor: FaceAnchor,
        align_to_normal: bool,
        camera: Option<&CameraView>,
    ) -> (GizmoPlacement, PlacementStrategy) {
        let Some(normal) = anchor.normal.try_normalize() else {
            return self.bounds_or_fallback(target, camera);
        };
        let orientation = if align_to_normal {
            Quat::from_rotation_arc(Vec3::Y, normal)
        } else {
            Quat::IDENTITY
        };

        let position = anchor.point + normal * self.face_clearance;
        if target.contains_point(position) {
            debug!("[GIZMO] Face-anchored placement inside {}, using bounds", target.id);
            let (placement, strategy) = self.bounds_or_fallback(target, camera);
            return (
                GizmoPlacement {
                    orientation,
                    ..placement
                },
                strategy,
            );
        }

        (
            GizmoPlacement {
                position,
                orientation,
            },
            PlacementStrategy::FaceAnchored,
        )
    }

    /// Place the gizmo just beyond the target's bounds along `up`
    pub fn bounds_anchored(&self, target: &TargetObject, up: Vec3) -> GizmoPlacement {
        let up = up.try_normalize().unwrap_or(Vec3::Y);
        let bounds = target.bounds();
        let center = bounds.center();
        let reach = bounds.max_projection(center, up);
        GizmoPlacement {
            position: center + up * (reach + self.bounds_clearance),
            orientation: Quat::IDENTITY,
        }
    }

    /// Bounds-anchored against the camera's up vector, or against world up
    /// with the fallback offset when there is no camera
    pub fn bounds_or_fallback(
        &self,
        target: &TargetObject,
        camera: Option<&CameraView>,
    ) -> (GizmoPlacement, PlacementStrategy) {
        match camera.map(CameraView::up).and_then(Vec3::try_normalize) {
            Some(up) => (self.bounds_anchored(target, up), PlacementStrategy::BoundsAnchored),
            None => (self.fallback(target), PlacementStrategy::Fallback),
        }
    }

    pub fn fallback(&self, target: &TargetObject) -> GizmoPlacement {
        let bounds = target.bounds();
        let center = bounds.center();
        let reach = bounds.max_projection(center, Vec3::Y);
        GizmoPlacement {
            position: center + Vec3::Y * (reach + self.fallback_offset),
            orientation: Quat::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitive::Primitive;
    use crate::scene::target::TargetId;
    use std::f32::consts::FRAC_PI_4;

    fn cube() -> TargetObject {
        TargetObject::new(
            TargetId(1),
            "cube",
            Primitive::Box {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
        )
    }

    #[test]
    fn test_face_anchored_sits_off_the_face() {
        let positioner = GizmoPositioner::default();
        let anchor = FaceAnchor {
            point: Vec3::new(1.0, 0.2, 0.3),
            normal: Vec3::X,
        };
        let (placement, strategy) = positioner.face_anchored(&cube(), anchor, true, None);
        assert_eq!(strategy, PlacementStrategy::FaceAnchored);
        assert!((placement.position - Vec3::new(1.5, 0.2, 0.3)).length() < 1e-6);
        assert!((placement.orientation * Vec3::Y - Vec3::X).length() < 1e-5);

        let (unaligned, _) = positioner.face_anchored(&cube(), anchor, false, None);
        assert_eq!(unaligned.orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_inward_normal_falls_back_to_bounds() {
        let positioner = GizmoPositioner::default();
        let anchor = FaceAnchor {
            point: Vec3::new(1.0, 0.0, 0.0),
            normal: Vec3::NEG_X,
        };
        let (placement, strategy) = positioner.face_anchored(&cube(), anchor, true, None);
        assert_eq!(strategy, PlacementStrategy::Fallback);
        assert!(!cube().bounds().contains(placement.position));
        // Handle keeps pointing along the picked normal
        assert!((placement.orientation * Vec3::Y - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_rotated_target_face_stays_face_anchored() {
        let positioner = GizmoPositioner::default();
        let turn = Quat::from_rotation_y(FRAC_PI_4);
        let target = cube().with_orientation(turn);
        let normal = turn * Vec3::Z;
        let anchor = FaceAnchor {
            point: normal,
            normal,
        };
        let (placement, strategy) = positioner.face_anchored(&target, anchor, true, None);
        assert_eq!(strategy, PlacementStrategy::FaceAnchored);
        assert!((placement.position - normal * 1.5).length() < 1e-5);
        assert!((placement.orientation * Vec3::Y - normal).length() < 1e-5);
    }

    #[test]
    fn test_bounds_anchored_follows_camera_up() {
        let positioner = GizmoPositioner::default();
        let camera = CameraView::looking_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::Y,
            FRAC_PI_4,
            Vec2::new(800.0, 600.0),
        );
        let (placement, strategy) = positioner.bounds_or_fallback(&cube(), Some(&camera));
        assert_eq!(strategy, PlacementStrategy::BoundsAnchored);
        assert!((placement.position - Vec3::new(0.0, 1.25, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotated_target_pushes_gizmo_further() {
        let positioner = GizmoPositioner::default();
        let tilted = cube().with_orientation(Quat::from_rotation_z(FRAC_PI_4));
        let placement = positioner.bounds_anchored(&tilted, Vec3::Y);
        assert!((placement.position.y - (2.0_f32.sqrt() + 0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_uses_world_up_offset() {
        let positioner = GizmoPositioner::default();
        let target = cube().with_position(Vec3::new(3.0, 1.0, 0.0));
        let (placement, strategy) = positioner.bounds_or_fallback(&target, None);
        assert_eq!(strategy, PlacementStrategy::Fallback);
        assert!((placement.position - Vec3::new(3.0, 4.0, 0.0)).length() < 1e-5);
    }
}
