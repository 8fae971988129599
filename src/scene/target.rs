//! Editable solids on the workbench

use crate::geometry::bounds::WorldAabb;
use crate::geometry::primitive::Primitive;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a target, kept across geometry rebuilds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a solid came from and what has been done to it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetMetadata {
    /// Name of the sketch profile the solid was created from
    pub source_sketch: Option<String>,
    /// Set once an extrusion has been committed
    pub is_extruded: bool,
}

/// A solid edited by the gizmo
///
/// Owned by the scene; the gizmo only holds its [`TargetId`]. Edits mutate the
/// object in place and bump `revision` so the render side rebuilds its mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetObject {
    pub id: TargetId,
    pub name: String,
    pub position: Vec3,
    pub orientation: Quat,
    pub primitive: Primitive,
    pub color: Color,
    pub metadata: TargetMetadata,
    /// Dimension along the last extruded axis after the last committed extrusion
    pub extrusion_height: Option<f32>,
    /// Bumped whenever the physical representation must be rebuilt
    pub revision: u64,
}

impl TargetObject {
    pub fn new(id: TargetId, name: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            id,
            name: name.into(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            primitive,
            color: Color::srgb(0.76, 0.6, 0.42),
            metadata: TargetMetadata::default(),
            extrusion_height: None,
            revision: 0,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_source_sketch(mut self, sketch: impl Into<String>) -> Self {
        self.metadata.source_sketch = Some(sketch.into());
        self
    }

    pub fn bounds(&self) -> WorldAabb {
        WorldAabb::from_primitive(&self.primitive, self.position, self.orientation)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.orientation)
    }

    /// Whether a world point lies strictly inside the solid itself, not just
    /// inside its world bounds
    pub fn contains_point(&self, world: Vec3) -> bool {
        let local = self.orientation.inverse() * (world - self.position);
        match self.primitive {
            Primitive::Box { .. } => local.abs().cmplt(self.primitive.half_extents()).all(),
            Primitive::Cylinder { diameter, height } => {
                local.y.abs() < height * 0.5 && Vec2::new(local.x, local.z).length() < diameter * 0.5
            }
        }
    }
}
