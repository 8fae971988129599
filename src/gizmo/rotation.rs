//! Rotation about a world axis

use crate::core::errors::{GizmoError, GizmoResult};
use crate::scene::host::SceneHost;
use crate::scene::target::TargetId;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationEditor;

impl RotationEditor {
    /// Orientation after turning `start` by `angle` radians about `world_axis`.
    ///
    /// The delta is applied in world space (pre-multiplied), so the ring axes
    /// stay aligned with the world whatever the target's current orientation.
    pub fn rotate(&self, start: Quat, world_axis: Vec3, angle: f32) -> GizmoResult<Quat> {
        let axis = world_axis
            .try_normalize()
            .ok_or(GizmoError::DegenerateAxis(world_axis))?;
        if !angle.is_finite() {
            return Err(GizmoError::DegenerateAxis(world_axis));
        }
        Ok((Quat::from_axis_angle(axis, angle) * start).normalize())
    }

    pub fn apply<H: SceneHost>(
        &self,
        host: &mut H,
        target: TargetId,
        world_axis: Vec3,
        start: Quat,
        angle: f32,
    ) -> GizmoResult<Quat> {
        let orientation = self.rotate(start, world_axis, angle)?;
        let object = host.target_mut(target).ok_or(GizmoError::StaleTarget(target))?;
        object.orientation = orientation;
        Ok(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitive::Primitive;
    use crate::scene::model::SceneModel;
    use crate::scene::target::TargetObject;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_round_trip_restores_orientation() {
        let editor = RotationEditor;
        let start = Quat::from_euler(EulerRot::XYZ, 0.3, -1.1, 0.4);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            for angle in [0.2_f32, 1.3, -2.7] {
                let turned = editor.rotate(start, axis, angle).unwrap();
                let back = editor.rotate(turned, axis, -angle).unwrap();
                // angle_between is acos-limited near zero, compare the dot product instead
                assert!(back.dot(start).abs() > 1.0 - 1e-6, "{axis:?} {angle}");
            }
        }
    }

    #[test]
    fn test_rotation_is_about_world_axis() {
        let editor = RotationEditor;
        // Tilted start: a local-axis rotation would move a different vector
        let start = Quat::from_rotation_x(FRAC_PI_2);
        let turned = editor.rotate(start, Vec3::Y, FRAC_PI_2).unwrap();
        let expected = Quat::from_rotation_y(FRAC_PI_2) * start;
        assert!(turned.dot(expected).abs() > 1.0 - 1e-6);
        assert!((turned * Vec3::Y - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_apply_keeps_position_and_shape() {
        let editor = RotationEditor;
        let mut model = SceneModel::default();
        let id = model.allocate_id();
        let primitive = Primitive::Cylinder {
            diameter: 1.0,
            height: 2.0,
        };
        model.insert(TargetObject::new(id, "dowel", primitive).with_position(Vec3::ONE));

        editor.apply(&mut model, id, Vec3::Z, Quat::IDENTITY, 0.5).unwrap();
        let target = model.target(id).unwrap();
        assert_eq!(target.position, Vec3::ONE);
        assert_eq!(target.primitive, primitive);
        assert!((target.orientation.length() - 1.0).abs() < 1e-6);

        assert!(editor.rotate(Quat::IDENTITY, Vec3::ZERO, 1.0).is_err());
    }
}
