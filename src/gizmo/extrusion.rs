//! Face extrusion
//!
//! Pushes or pulls one face of a primitive along its normal while the
//! opposite face stays where it was. The edited dimension is chosen from the
//! handle direction expressed in the target's local frame at drag start.

use crate::core::errors::{GizmoError, GizmoResult};
use crate::core::settings::MIN_POSITIVE_LENGTH;
use crate::geometry::primitive::{LocalAxis, Primitive};
use crate::gizmo::session::ObjectState;
use crate::scene::host::SceneHost;
use crate::scene::target::TargetId;
use bevy::prelude::*;

/// Outcome of one extrusion update, always relative to the drag start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionResult {
    pub axis: LocalAxis,
    /// World direction the moved face travels in
    pub face_direction: Vec3,
    /// Dimension along `axis` after clamping
    pub dimension: f32,
    /// Distance the moved face actually travelled; differs from the request
    /// when the dimension was clamped
    pub applied_distance: f32,
    pub primitive: Primitive,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionEditor {
    pub min_dimension: f32,
}

impl ExtrusionEditor {
    /// `min_dimension` is floored at a small positive length
    pub fn new(min_dimension: f32) -> Self {
        Self {
            min_dimension: min_dimension.max(MIN_POSITIVE_LENGTH),
        }
    }

    /// Compute the extruded shape without touching the scene
    pub fn extrude(
        &self,
        start: &ObjectState,
        world_axis: Vec3,
        signed_distance: f32,
    ) -> GizmoResult<ExtrusionResult> {
        if !signed_distance.is_finite() {
            return Err(GizmoError::DegenerateAxis(world_axis));
        }
        let local = start.orientation.inverse() * world_axis;
        let (axis, sign) = LocalAxis::dominant(local).ok_or(GizmoError::DegenerateAxis(world_axis))?;

        let start_dimension = start.primitive.dimension(axis);
        let dimension = (start_dimension + signed_distance).max(self.min_dimension);
        let applied_distance = dimension - start_dimension;
        let face_direction = start.orientation * (axis.unit() * sign);

        Ok(ExtrusionResult {
            axis,
            face_direction,
            dimension,
            applied_distance,
            primitive: start.primitive.with_dimension(axis, dimension),
            position: start.position + face_direction * (applied_distance * 0.5),
        })
    }

    /// Extrude `target` from its drag-start state and rebuild its geometry
    pub fn apply<H: SceneHost>(
        &self,
        host: &mut H,
        target: TargetId,
        world_axis: Vec3,
        signed_distance: f32,
        start: &ObjectState,
    ) -> GizmoResult<ExtrusionResult> {
        let result = self.extrude(start, world_axis, signed_distance)?;
        let object = host.target_mut(target).ok_or(GizmoError::StaleTarget(target))?;
        object.position = result.position;
        object.orientation = start.orientation;
        if !host.rebuild_primitive(target, result.primitive) {
            return Err(GizmoError::StaleTarget(target));
        }
        Ok(result)
    }

    /// Record a finished extrusion on the target
    pub fn commit<H: SceneHost>(&self, host: &mut H, target: TargetId, result: &ExtrusionResult) -> GizmoResult<()> {
        let object = host.target_mut(target).ok_or(GizmoError::StaleTarget(target))?;
        object.extrusion_height = Some(result.dimension);
        object.metadata.is_extruded = true;
        debug!(
            "[EXTRUDE] Committed {} along {:?}: {:.3} ({:+.3})",
            target, result.axis, result.dimension, result.applied_distance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::SceneModel;
    use crate::scene::target::TargetObject;
    use std::f32::consts::FRAC_PI_2;

    const MIN: f32 = 0.01;

    fn cube_state() -> ObjectState {
        ObjectState {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            primitive: Primitive::Box {
                width: 2.0,
                height: 2.0,
                depth: 2.0,
            },
        }
    }

    #[test]
    fn test_positive_x_face_scenario() {
        let editor = ExtrusionEditor::new(MIN);
        let start = cube_state();

        let grown = editor.extrude(&start, Vec3::X, 1.5).unwrap();
        assert_eq!(grown.axis, LocalAxis::X);
        assert!((grown.dimension - 3.5).abs() < 1e-6);
        assert!((grown.position.x - 0.75).abs() < 1e-6);

        // Overshooting clamps the width and stops the face at the minimum
        let clamped = editor.extrude(&start, Vec3::X, -4.0).unwrap();
        assert_eq!(clamped.dimension, MIN);
        assert!((clamped.applied_distance - (MIN - 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_minimum_is_floored() {
        for min in [0.0, -1.0] {
            let editor = ExtrusionEditor::new(min);
            let result = editor.extrude(&cube_state(), Vec3::X, -10.0).unwrap();
            assert!(result.dimension > 0.0, "min {min}");
            assert_eq!(result.primitive.dimension(LocalAxis::X), result.dimension);
        }
    }

    #[test]
    fn test_opposite_face_stays_put() {
        let editor = ExtrusionEditor::new(MIN);
        let start = ObjectState {
            position: Vec3::new(1.0, 2.0, 3.0),
            orientation: Quat::from_rotation_y(0.7),
            primitive: Primitive::Box {
                width: 1.0,
                height: 0.25,
                depth: 3.0,
            },
        };
        let face = start.orientation * Vec3::NEG_Z;
        let anchor = start.position - face * 1.5;

        for distance in [0.3, 2.0, -1.0, -2.9, -10.0] {
            let result = editor.extrude(&start, face, distance).unwrap();
            let half = result.primitive.dimension(LocalAxis::Z) * 0.5;
            let opposite = result.position - face * half;
            assert!((opposite - anchor).length() < 1e-5, "distance {distance}");
            assert!(result.dimension >= MIN);
        }
    }

    #[test]
    fn test_rotated_target_maps_world_axis_to_local() {
        let editor = ExtrusionEditor::new(MIN);
        let mut start = cube_state();
        start.orientation = Quat::from_rotation_z(FRAC_PI_2);
        start.primitive = Primitive::Box {
            width: 4.0,
            height: 1.0,
            depth: 1.0,
        };
        // World up is local +X after a quarter turn about Z
        let result = editor.extrude(&start, Vec3::Y, 1.0).unwrap();
        assert_eq!(result.axis, LocalAxis::X);
        assert!((result.dimension - 5.0).abs() < 1e-6);
        assert!((result.position - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_cylinder_height_and_diameter() {
        let editor = ExtrusionEditor::new(MIN);
        let start = ObjectState {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            primitive: Primitive::Cylinder {
                diameter: 2.0,
                height: 0.1,
            },
        };
        let taller = editor.extrude(&start, Vec3::Y, 1.9).unwrap();
        assert_eq!(
            taller.primitive,
            Primitive::Cylinder {
                diameter: 2.0,
                height: 2.0
            }
        );
        let wider = editor.extrude(&start, Vec3::NEG_Z, 1.0).unwrap();
        assert_eq!(
            wider.primitive,
            Primitive::Cylinder {
                diameter: 3.0,
                height: 0.1
            }
        );
        assert!((wider.position - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_axis_leaves_target_untouched() {
        let editor = ExtrusionEditor::new(MIN);
        let mut model = SceneModel::default();
        let start = cube_state();
        let id = model.allocate_id();
        model.insert(TargetObject::new(id, "cube", start.primitive));

        for axis in [Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)] {
            assert!(editor.apply(&mut model, id, axis, 1.0, &start).is_err());
        }
        let target = model.target(id).unwrap();
        assert_eq!(target.primitive, start.primitive);
        assert_eq!(target.revision, 0);
    }

    #[test]
    fn test_apply_and_commit_update_the_target() {
        let editor = ExtrusionEditor::new(MIN);
        let mut model = SceneModel::default();
        let start = cube_state();
        let id = model.allocate_id();
        model.insert(TargetObject::new(id, "cube", start.primitive));

        editor.apply(&mut model, id, Vec3::Y, 0.5, &start).unwrap();
        let result = editor.apply(&mut model, id, Vec3::Y, 1.0, &start).unwrap();
        editor.commit(&mut model, id, &result).unwrap();

        let target = model.target(id).unwrap();
        assert_eq!(target.primitive.dimension(LocalAxis::Y), 3.0);
        assert_eq!(target.revision, 2);
        assert_eq!(target.extrusion_height, Some(3.0));
        assert!(target.metadata.is_extruded);

        model.remove(id);
        assert_eq!(
            editor.apply(&mut model, id, Vec3::Y, 1.0, &start),
            Err(GizmoError::StaleTarget(id))
        );
    }
}
