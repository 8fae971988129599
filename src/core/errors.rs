//! Error types for the gizmo engine
//!
//! Every variant is recoverable: callers log it and fall back to a safe
//! placement or a no-op instead of aborting the interaction.

use crate::scene::TargetId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GizmoError {
    #[error("no active camera")]
    NoCamera,

    #[error("gizmo position cannot be projected to the screen")]
    Unprojectable,

    #[error("reference direction is degenerate: {0:?}")]
    DegenerateAxis(bevy::math::Vec3),

    #[error("target {0} no longer exists")]
    StaleTarget(TargetId),

    #[error("gizmo is not attached to a target")]
    NotAttached,
}

pub type GizmoResult<T> = Result<T, GizmoError>;
