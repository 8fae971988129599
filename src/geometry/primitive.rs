//! Procedural primitive descriptions
//!
//! A primitive is centered on its own origin and described by a small set of
//! dimensions. Extrusion edits one dimension at a time, so every primitive
//! exposes its dimensions per local axis.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned component threshold used when mapping a normal onto a box face
const FACE_ALIGNMENT: f32 = 0.9;

/// Kind of a primitive, without its dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Box,
    Cylinder,
}

/// A basic solid defined by its dimensions
///
/// Boxes map width/height/depth to local X/Y/Z. Cylinders stand along local Y:
/// their height is the Y dimension and their diameter covers both X and Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { diameter: f32, height: f32 },
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Box { .. } => PrimitiveKind::Box,
            Primitive::Cylinder { .. } => PrimitiveKind::Cylinder,
        }
    }

    /// Full size of the primitive along each local axis
    pub fn size(&self) -> Vec3 {
        match *self {
            Primitive::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Primitive::Cylinder { diameter, height } => Vec3::new(diameter, height, diameter),
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Dimension measured along a local axis
    pub fn dimension(&self, axis: LocalAxis) -> f32 {
        match (*self, axis) {
            (Primitive::Box { width, .. }, LocalAxis::X) => width,
            (Primitive::Box { height, .. }, LocalAxis::Y) => height,
            (Primitive::Box { depth, .. }, LocalAxis::Z) => depth,
            (Primitive::Cylinder { height, .. }, LocalAxis::Y) => height,
            (Primitive::Cylinder { diameter, .. }, LocalAxis::X | LocalAxis::Z) => diameter,
        }
    }

    /// Copy of this primitive with one dimension replaced
    pub fn with_dimension(&self, axis: LocalAxis, value: f32) -> Primitive {
        let mut next = *self;
        match (&mut next, axis) {
            (Primitive::Box { width, .. }, LocalAxis::X) => *width = value,
            (Primitive::Box { height, .. }, LocalAxis::Y) => *height = value,
            (Primitive::Box { depth, .. }, LocalAxis::Z) => *depth = value,
            (Primitive::Cylinder { height, .. }, LocalAxis::Y) => *height = value,
            (Primitive::Cylinder { diameter, .. }, LocalAxis::X | LocalAxis::Z) => {
                *diameter = value
            }
        }
        next
    }

    /// Build a render mesh for this primitive
    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Primitive::Box {
                width,
                height,
                depth,
            } => Mesh::from(Cuboid::new(width, height, depth)),
            Primitive::Cylinder { diameter, height } => {
                Mesh::from(Cylinder::new(diameter * 0.5, height))
            }
        }
    }

    /// Local-space outward normal for a picked box face.
    ///
    /// Face indices follow the triangle order of the generated box:
    /// two triangles per face, in the order +Z, -Z, +X, -X, +Y, -Y.
    pub fn box_face_normal(face_index: u32) -> Option<Vec3> {
        match face_index / 2 {
            0 => Some(Vec3::Z),
            1 => Some(Vec3::NEG_Z),
            2 => Some(Vec3::X),
            3 => Some(Vec3::NEG_X),
            4 => Some(Vec3::Y),
            5 => Some(Vec3::NEG_Y),
            _ => None,
        }
    }

    /// Inverse of [`Primitive::box_face_normal`]: first triangle index of the face
    /// whose normal matches `local_normal`
    pub fn box_face_index(local_normal: Vec3) -> Option<u32> {
        let (axis, sign) = LocalAxis::dominant(local_normal)?;
        if local_normal.abs().max_element() < FACE_ALIGNMENT {
            return None;
        }
        let face = match (axis, sign > 0.0) {
            (LocalAxis::Z, true) => 0,
            (LocalAxis::Z, false) => 1,
            (LocalAxis::X, true) => 2,
            (LocalAxis::X, false) => 3,
            (LocalAxis::Y, true) => 4,
            (LocalAxis::Y, false) => 5,
        };
        Some(face * 2)
    }
}

/// One of the three local axes of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalAxis {
    X,
    Y,
    Z,
}

impl LocalAxis {
    pub const ALL: [LocalAxis; 3] = [LocalAxis::X, LocalAxis::Y, LocalAxis::Z];

    pub fn unit(&self) -> Vec3 {
        match self {
            LocalAxis::X => Vec3::X,
            LocalAxis::Y => Vec3::Y,
            LocalAxis::Z => Vec3::Z,
        }
    }

    pub fn component(&self, v: Vec3) -> f32 {
        match self {
            LocalAxis::X => v.x,
            LocalAxis::Y => v.y,
            LocalAxis::Z => v.z,
        }
    }

    /// The axis carrying the largest component of `v`, with that component's sign.
    ///
    /// Returns `None` for zero-length or non-finite vectors.
    pub fn dominant(v: Vec3) -> Option<(LocalAxis, f32)> {
        if !v.is_finite() || v.length_squared() <= f32::EPSILON {
            return None;
        }
        let abs = v.abs();
        let axis = if abs.x >= abs.y && abs.x >= abs.z {
            LocalAxis::X
        } else if abs.y >= abs.z {
            LocalAxis::Y
        } else {
            LocalAxis::Z
        };
        Some((axis, axis.component(v).signum()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_dimensions_share_diameter() {
        let cylinder = Primitive::Cylinder {
            diameter: 3.0,
            height: 0.5,
        };
        assert_eq!(cylinder.dimension(LocalAxis::X), 3.0);
        assert_eq!(cylinder.dimension(LocalAxis::Z), 3.0);
        assert_eq!(cylinder.dimension(LocalAxis::Y), 0.5);

        let wider = cylinder.with_dimension(LocalAxis::Z, 4.0);
        assert_eq!(wider.size(), Vec3::new(4.0, 0.5, 4.0));
    }

    #[test]
    fn test_box_face_mapping_round_trips() {
        for face in 0..6u32 {
            let normal = Primitive::box_face_normal(face * 2).unwrap();
            assert_eq!(Primitive::box_face_index(normal), Some(face * 2));
            // Second triangle of the same face resolves to the same normal
            assert_eq!(Primitive::box_face_normal(face * 2 + 1), Some(normal));
        }
        assert_eq!(Primitive::box_face_normal(12), None);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(
            LocalAxis::dominant(Vec3::new(0.1, -0.9, 0.2)),
            Some((LocalAxis::Y, -1.0))
        );
        assert_eq!(LocalAxis::dominant(Vec3::ZERO), None);
        assert_eq!(LocalAxis::dominant(Vec3::new(f32::NAN, 0.0, 1.0)), None);
    }
}
