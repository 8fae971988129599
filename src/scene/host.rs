//! The seam between the gizmo engine and whatever owns the scene

use crate::geometry::primitive::Primitive;
use crate::scene::target::{TargetId, TargetObject};
use bevy::prelude::*;

/// Result of picking a target under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: TargetId,
    /// World-space hit point
    pub point: Vec3,
    /// Triangle index of the hit box face or flat cap, if any
    pub face_index: Option<u32>,
    /// World-space outward normal at the hit
    pub normal: Vec3,
    pub distance: f32,
}

/// Scene access the gizmo needs
pub trait SceneHost {
    fn target(&self, id: TargetId) -> Option<&TargetObject>;

    fn target_mut(&mut self, id: TargetId) -> Option<&mut TargetObject>;

    /// Replace a target's primitive and request a geometry rebuild.
    ///
    /// The target keeps its identity. Returns `false` if it no longer exists.
    fn rebuild_primitive(&mut self, id: TargetId, primitive: Primitive) -> bool;

    fn contains(&self, id: TargetId) -> bool {
        self.target(id).is_some()
    }
}
