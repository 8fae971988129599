//! Notifications emitted while a target is being edited

use crate::scene::target::TargetId;
use bevy::prelude::*;

/// Extrusion progress. `distance` is the face travel since the drag started.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeEvent {
    pub target: TargetId,
    pub distance: f32,
    pub is_preview: bool,
}

/// Rotation progress. `angle_delta` is measured from the drag start.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RotateEvent {
    pub target: TargetId,
    pub axis: Vec3,
    pub angle_delta: f32,
    pub is_preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoEvent {
    Extrude(ExtrudeEvent),
    Rotate(RotateEvent),
}

impl GizmoEvent {
    pub fn target(&self) -> TargetId {
        match self {
            GizmoEvent::Extrude(event) => event.target,
            GizmoEvent::Rotate(event) => event.target,
        }
    }

    pub fn is_preview(&self) -> bool {
        match self {
            GizmoEvent::Extrude(event) => event.is_preview,
            GizmoEvent::Rotate(event) => event.is_preview,
        }
    }
}
