//! State captured for the duration of one drag

use crate::geometry::primitive::Primitive;
use crate::gizmo::handles::HandleId;
use crate::scene::target::{TargetId, TargetObject};
use bevy::prelude::*;

/// Snapshot of a target's transform and shape at drag start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectState {
    pub position: Vec3,
    pub orientation: Quat,
    pub primitive: Primitive,
}

impl ObjectState {
    pub fn capture(target: &TargetObject) -> Self {
        Self {
            position: target.position,
            orientation: target.orientation,
            primitive: target.primitive,
        }
    }
}

/// Lives from pointer-down on a handle to pointer-up
///
/// Every preview is computed from the start snapshot plus the total pointer
/// travel, never incrementally, so repeated updates cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: TargetId,
    pub active_handle: HandleId,
    pub start_screen_pos: Vec2,
    pub start_object_state: ObjectState,
    /// Handle direction captured once at drag start
    pub reference_direction_world: Vec3,
    /// Gizmo position at drag start, used as the projection anchor
    pub gizmo_position: Vec3,
    /// Last parameter value applied to the target
    pub last_value: f32,
}

impl DragSession {
    pub fn start(
        target: &TargetObject,
        active_handle: HandleId,
        start_screen_pos: Vec2,
        reference_direction_world: Vec3,
        gizmo_position: Vec3,
    ) -> Self {
        Self {
            target: target.id,
            active_handle,
            start_screen_pos,
            start_object_state: ObjectState::capture(target),
            reference_direction_world,
            gizmo_position,
            last_value: 0.0,
        }
    }
}
