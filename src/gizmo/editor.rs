//! One drag pipeline, two edits
//!
//! The controller drives whichever editor matches the grabbed handle through
//! the same projector and session; only the mapping from the projected value
//! to a target change differs.

use crate::core::errors::GizmoResult;
use crate::core::settings::GizmoSettings;
use crate::gizmo::events::{ExtrudeEvent, GizmoEvent, RotateEvent};
use crate::gizmo::extrusion::{ExtrusionEditor, ExtrusionResult};
use crate::gizmo::handles::{GizmoMode, HandleKind};
use crate::gizmo::projector::ParameterKind;
use crate::gizmo::rotation::RotationEditor;
use crate::gizmo::session::DragSession;
use crate::scene::host::SceneHost;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Editor {
    Extrusion(ExtrusionEditor),
    Rotation(RotationEditor),
}

/// What an editor did to the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    Extruded(ExtrusionResult),
    Rotated(Quat),
}

impl Editor {
    pub fn for_mode(mode: GizmoMode, settings: &GizmoSettings) -> Self {
        match mode {
            GizmoMode::Extrude => Editor::Extrusion(ExtrusionEditor::new(settings.min_dimension)),
            GizmoMode::Rotate => Editor::Rotation(RotationEditor),
        }
    }

    pub fn for_handle(kind: HandleKind, settings: &GizmoSettings) -> Self {
        match kind {
            HandleKind::TranslateNormal => Self::for_mode(GizmoMode::Extrude, settings),
            HandleKind::RotateAxis => Self::for_mode(GizmoMode::Rotate, settings),
        }
    }

    pub fn parameter_kind(&self) -> ParameterKind {
        match self {
            Editor::Extrusion(_) => ParameterKind::Distance,
            Editor::Rotation(_) => ParameterKind::Angle,
        }
    }

    /// Apply `value` relative to the session's start state
    pub fn apply<H: SceneHost>(
        &self,
        host: &mut H,
        session: &DragSession,
        value: f32,
    ) -> GizmoResult<EditOutcome> {
        let start = &session.start_object_state;
        let axis = session.reference_direction_world;
        match self {
            Editor::Extrusion(editor) => editor
                .apply(host, session.target, axis, value, start)
                .map(EditOutcome::Extruded),
            Editor::Rotation(editor) => editor
                .apply(host, session.target, axis, start.orientation, value)
                .map(EditOutcome::Rotated),
        }
    }

    /// Finish the edit at `value`; returns the outcome that was committed
    pub fn commit<H: SceneHost>(
        &self,
        host: &mut H,
        session: &DragSession,
        value: f32,
    ) -> GizmoResult<EditOutcome> {
        let outcome = self.apply(host, session, value)?;
        if let (Editor::Extrusion(editor), EditOutcome::Extruded(result)) = (self, &outcome) {
            editor.commit(host, session.target, result)?;
        }
        Ok(outcome)
    }

    /// Observer notification for an outcome produced from `value`
    pub fn event(
        &self,
        session: &DragSession,
        outcome: &EditOutcome,
        value: f32,
        is_preview: bool,
    ) -> GizmoEvent {
        match outcome {
            EditOutcome::Extruded(result) => GizmoEvent::Extrude(ExtrudeEvent {
                target: session.target,
                distance: result.applied_distance,
                is_preview,
            }),
            EditOutcome::Rotated(_) => GizmoEvent::Rotate(RotateEvent {
                target: session.target,
                axis: session.reference_direction_world,
                angle_delta: value,
                is_preview,
            }),
        }
    }
}
