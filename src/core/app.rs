//! Application initialization and configuration

use crate::core::cli::CliArgs;
use crate::gizmo::GizmoPlugin;
use crate::input::PointerPlugin;
use crate::rendering::{GizmoVisualsPlugin, OrbitCameraPlugin, TargetRenderingPlugin};
use crate::scene::ScenePlugin;
use crate::systems::{configure_default_plugins, KerfSystems};
use crate::tools::ToolsPlugin;
use anyhow::Result;
use bevy::app::{PluginGroup, PluginGroupBuilder};
use bevy::prelude::*;
use bevy::winit::WinitSettings;

/// Plugin group for core application functionality
#[derive(Default)]
pub struct CorePluginGroup;

impl PluginGroup for CorePluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(PointerPlugin)
            .add(ScenePlugin)
            .add(GizmoPlugin)
            .add(KerfSystems)
    }
}

/// Plugin group for rendering functionality
#[derive(Default)]
pub struct RenderingPluginGroup;

impl PluginGroup for RenderingPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(OrbitCameraPlugin)
            .add(TargetRenderingPlugin)
            .add(GizmoVisualsPlugin)
    }
}

/// Plugin group for the editing tools
#[derive(Default)]
pub struct EditorPluginGroup;

impl PluginGroup for EditorPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>().add(ToolsPlugin)
    }
}

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    #[cfg(not(target_arch = "wasm32"))]
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let log_to_file = cli_args.log_to_file;
    let mut app = App::new();
    configure_resources(&mut app, cli_args);
    configure_window_plugins(&mut app, log_to_file);
    add_plugin_groups(&mut app);
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_resources(app: &mut App, cli_args: CliArgs) {
    let gizmo_settings = cli_args.get_gizmo_settings();
    let demo_scene = cli_args.get_demo_scene();

    app.insert_resource(gizmo_settings)
        .insert_resource(demo_scene)
        .insert_resource(cli_args);

    // Configure platform-specific window settings
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Continuous updates keep drag previews smooth while developing
        #[cfg(debug_assertions)]
        app.insert_resource(WinitSettings {
            focused_mode: bevy::winit::UpdateMode::Continuous,
            unfocused_mode: bevy::winit::UpdateMode::Continuous,
        });

        #[cfg(not(debug_assertions))]
        app.insert_resource(WinitSettings::desktop_app());
    }

    #[cfg(target_arch = "wasm32")]
    app.insert_resource(WinitSettings::game());
}

/// Configure window and default plugins with platform-specific settings
fn configure_window_plugins(app: &mut App, log_to_file: bool) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_plugins(configure_default_plugins(log_to_file));
    }

    #[cfg(target_arch = "wasm32")]
    {
        app.add_plugins(configure_default_plugins(log_to_file).set(
            bevy::render::RenderPlugin {
                render_creation: bevy::render::settings::RenderCreation::Automatic(
                    bevy::render::settings::WgpuSettings {
                        backends: Some(bevy::render::settings::Backends::GL),
                        power_preference: bevy::render::settings::PowerPreference::LowPower,
                        ..default()
                    },
                ),
                ..default()
            },
        ));
    }
}

/// Add all plugin groups to the application
fn add_plugin_groups(app: &mut App) {
    debug!("Adding plugin groups...");
    app.add_plugins((CorePluginGroup, RenderingPluginGroup, EditorPluginGroup));
    debug!("All plugin groups added successfully");
}
