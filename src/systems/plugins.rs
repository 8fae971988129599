//! Plugin management and configuration for the Kerf workbench
//!
//! This module organizes the Bevy default plugins and the workbench setup
//! systems into logical groups.

use bevy::gizmos::{config::DefaultGizmoConfigGroup, config::GizmoConfigStore};
use bevy::log::{BoxedLayer, Level, LogPlugin};
use bevy::prelude::*;

use crate::core::settings::{DEFAULT_WINDOW_SIZE, WINDOW_TITLE};
use crate::logging::{file_log_layer, no_extra_layer};
use crate::systems::workbench::{exit_on_esc, log_committed_edits, setup_workbench};

const OUTLINE_LINE_WIDTH: f32 = 2.0;

/// Configure logging with performance optimization for release builds
pub fn configure_logging(log_to_file: bool) -> LogPlugin {
    let custom_layer: fn(&mut App) -> Option<BoxedLayer> = if log_to_file {
        file_log_layer
    } else {
        no_extra_layer
    };

    #[cfg(debug_assertions)]
    {
        // Debug builds: Show more detailed logging for development
        LogPlugin {
            level: Level::INFO,
            filter: "kerf=info,bevy_render=warn,bevy_winit=warn,wgpu=warn,winit=warn".to_string(),
            custom_layer,
            ..default()
        }
    }

    #[cfg(not(debug_assertions))]
    {
        // Release builds: Quieter logging, focus on warnings and errors
        LogPlugin {
            level: Level::WARN,
            filter: "kerf=warn,bevy=warn,wgpu=error,winit=error".to_string(),
            custom_layer,
            ..default()
        }
    }
}

/// Configure default Bevy plugins for the application
pub fn configure_default_plugins(log_to_file: bool) -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: DEFAULT_WINDOW_SIZE.into(),
                // Tell wasm to resize the window according to the available canvas
                fit_canvas_to_parent: true,
                // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        })
        .set(configure_logging(log_to_file))
}

/// System to configure gizmo appearance
fn configure_gizmos(mut gizmo_store: ResMut<GizmoConfigStore>) {
    let (config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = OUTLINE_LINE_WIDTH;
    debug!("Configured gizmo line width to {}px", OUTLINE_LINE_WIDTH);
}

/// Plugin to organize setup systems
pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (configure_gizmos, setup_workbench));
    }
}

/// Main application plugin that bundles the workbench systems
pub struct KerfSystems;

impl Plugin for KerfSystems {
    fn build(&self, app: &mut App) {
        app.add_plugins(SetupPlugin)
            .add_systems(Update, (log_committed_edits, exit_on_esc));
    }
}
