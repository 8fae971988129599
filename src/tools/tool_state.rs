//! Unified tool state management - single source of truth for active tool

use crate::gizmo::GizmoMode;
use bevy::prelude::*;

/// The single source of truth for which tool is currently active
#[derive(Resource, Debug, Default)]
pub struct ToolState {
    /// Currently active tool
    pub active: ToolId,

    /// Track if active tool changed this frame (for cleanup systems)
    active_changed: bool,
}

impl ToolState {
    /// Switch to a new tool
    pub fn activate(&mut self, tool: ToolId) {
        if self.active != tool {
            info!("Tool switched: {} -> {}", self.active.name(), tool.name());
            self.active = tool;
            self.active_changed = true;
        }
    }

    /// Check if active tool changed this frame
    pub fn just_changed(&self) -> bool {
        self.active_changed
    }

    /// Reset the changed flag (called at end of frame)
    pub fn clear_changed(&mut self) {
        self.active_changed = false;
    }

    /// Check if a specific tool is active
    pub fn is_active(&self, tool: ToolId) -> bool {
        self.active == tool
    }
}

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolId {
    #[default]
    Select,
    Extrude,
    Rotate,
}

impl ToolId {
    pub const ALL: [ToolId; 3] = [ToolId::Select, ToolId::Extrude, ToolId::Rotate];

    /// Get the tool's display name
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::Select => "Select",
            ToolId::Extrude => "Extrude",
            ToolId::Rotate => "Rotate",
        }
    }

    pub fn shortcut(&self) -> KeyCode {
        match self {
            ToolId::Select => KeyCode::KeyV,
            ToolId::Extrude => KeyCode::KeyE,
            ToolId::Rotate => KeyCode::KeyR,
        }
    }

    /// Gizmo mode this tool edits with, if any
    pub fn gizmo_mode(&self) -> Option<GizmoMode> {
        match self {
            ToolId::Select => None,
            ToolId::Extrude => Some(GizmoMode::Extrude),
            ToolId::Rotate => Some(GizmoMode::Rotate),
        }
    }
}

/// Event to request tool switch
#[derive(Event, Debug)]
pub struct SwitchToolEvent {
    pub tool: ToolId,
}

/// System to handle tool switching
pub fn handle_tool_switch(mut tool_state: ResMut<ToolState>, mut events: EventReader<SwitchToolEvent>) {
    for event in events.read() {
        debug!("SwitchToolEvent received: {:?}", event);
        tool_state.activate(event.tool);
    }
}

/// Turn tool shortcuts into switch requests
pub fn tool_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut events: EventWriter<SwitchToolEvent>) {
    for tool in ToolId::ALL {
        if keyboard.just_pressed(tool.shortcut()) {
            events.write(SwitchToolEvent { tool });
        }
    }
}

/// System to clear the changed flag at end of frame
pub fn clear_tool_changed(mut tool_state: ResMut<ToolState>) {
    tool_state.clear_changed();
}

/// Run condition for systems that only run when a specific tool is active
pub fn tool_is_active(tool: ToolId) -> impl Fn(Res<ToolState>) -> bool {
    move |state: Res<ToolState>| state.is_active(tool)
}

/// Plugin to add unified tool state management
pub struct ToolStatePlugin;

impl Plugin for ToolStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ToolState>()
            .add_event::<SwitchToolEvent>()
            .add_systems(PreUpdate, (tool_shortcuts, handle_tool_switch).chain())
            .add_systems(PostUpdate, clear_tool_changed);
    }
}
