//! Workbench tools
//!
//! Select leaves the scene alone. Extrude and Rotate attach the gizmo to the
//! clicked solid in the matching mode.

pub mod gizmo_tools;
pub mod tool_state;

#[cfg(test)]
mod tests;

pub use gizmo_tools::{click_to_attach, delete_attached_target, sync_gizmo_with_tool, ClickTracker};
pub use tool_state::{tool_is_active, SwitchToolEvent, ToolId, ToolState, ToolStatePlugin};

use crate::gizmo::GizmoSet;
use bevy::prelude::*;

pub struct ToolsPlugin;

impl Plugin for ToolsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ToolStatePlugin).add_systems(
            Update,
            (
                sync_gizmo_with_tool,
                click_to_attach.run_if(not(tool_is_active(ToolId::Select))),
                delete_attached_target,
            )
                .chain()
                .after(GizmoSet),
        );
    }
}
