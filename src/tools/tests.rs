//! Tests for the tool state system

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::gizmo::GizmoMode;
    use bevy::prelude::*;

    #[test]
    fn test_tool_state_activation() {
        let mut tool_state = ToolState::default();

        // Default should be Select
        assert_eq!(tool_state.active, ToolId::Select);
        assert!(!tool_state.just_changed());

        // Activate Extrude tool
        tool_state.activate(ToolId::Extrude);
        assert_eq!(tool_state.active, ToolId::Extrude);
        assert!(tool_state.just_changed());

        // Clear changed flag
        tool_state.clear_changed();
        assert!(!tool_state.just_changed());

        // Activate same tool (no change)
        tool_state.activate(ToolId::Extrude);
        assert!(!tool_state.just_changed());
    }

    #[test]
    fn test_tool_shortcuts_are_distinct() {
        // Each tool has its own key
        let keys: Vec<KeyCode> = ToolId::ALL.iter().map(ToolId::shortcut).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key), "{key:?} bound twice");
        }
        assert_eq!(ToolId::Extrude.name(), "Extrude");
    }

    #[test]
    fn test_tool_gizmo_modes() {
        assert_eq!(ToolId::Select.gizmo_mode(), None);
        assert_eq!(ToolId::Extrude.gizmo_mode(), Some(GizmoMode::Extrude));
        assert_eq!(ToolId::Rotate.gizmo_mode(), Some(GizmoMode::Rotate));
    }

    #[test]
    fn test_tool_is_active() {
        let mut tool_state = ToolState::default();

        assert!(tool_state.is_active(ToolId::Select));
        assert!(!tool_state.is_active(ToolId::Rotate));

        tool_state.activate(ToolId::Rotate);
        assert!(!tool_state.is_active(ToolId::Select));
        assert!(tool_state.is_active(ToolId::Rotate));
    }

    #[test]
    fn test_shortcut_switches_tool() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(ToolStatePlugin);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        let state = app.world().resource::<ToolState>();
        assert_eq!(state.active, ToolId::Rotate);
        // Changed flag is cleared at the end of the frame
        assert!(!state.just_changed());
    }
}
