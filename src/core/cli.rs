//! Command line interface for the Kerf workbench
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Settings given here win over the
//! user config file, which in turn wins over the built-in defaults.

use crate::core::config_file::ConfigFile;
use crate::core::settings::GizmoSettings;
use crate::systems::workbench::DemoScene;
use bevy::prelude::*;
use clap::Parser;

/// Kerf CLI arguments
///
/// Examples:
///   kerf                                  # Open the default workbench
///   kerf --demo cylinder                  # Start with a single cylinder
///   kerf --distance-sensitivity 0.02      # Faster extrusion drags
///   kerf --log-to-file                    # Also write logs to ~/.config/kerf/logs
#[derive(Parser, Debug, Resource, Clone, Default)]
#[clap(
    name = "kerf",
    version,
    about = "A woodworking CAD workbench built with Rust and Bevy",
    long_about = "Kerf is a 3D woodworking workbench. Solids are edited by direct manipulation: drag the face handle to extrude, drag a ring to rotate about a world axis."
)]
pub struct CliArgs {
    /// Demo scene to populate the workbench with
    #[clap(
        long = "demo",
        short = 'd',
        help = "Demo scene to load",
        long_help = "Demo scene to populate the workbench with. Available scenes: box, cylinder, both (default)"
    )]
    pub demo: Option<String>,

    /// Extrusion distance per pixel of pointer travel
    #[clap(
        long = "distance-sensitivity",
        help = "World units per pixel when dragging the extrude handle",
        long_help = "World units of extrusion per pixel of pointer travel along the handle's screen direction. Must be positive. Defaults to 0.01."
    )]
    pub distance_sensitivity: Option<f32>,

    /// Rotation per pixel of pointer travel
    #[clap(
        long = "angle-sensitivity",
        help = "Radians per pixel when dragging a rotation ring",
        long_help = "Radians of rotation per pixel of pointer travel along a ring's screen tangent. Must be positive. Defaults to 0.01."
    )]
    pub angle_sensitivity: Option<f32>,

    /// Initialize user configuration directory with settings
    ///
    /// This creates the ~/.config/kerf directory with a settings.json listing
    /// every gizmo setting and a logs/ directory.
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/kerf directory with a settings.json file holding every gizmo setting and its default, and a logs directory."
    )]
    pub new_config: bool,

    /// Write logs to ~/.config/kerf/logs in addition to the terminal
    #[clap(
        long = "log-to-file",
        help = "Also write logs to ~/.config/kerf/logs",
        long_help = "Write log output to a daily file in ~/.config/kerf/logs in addition to the terminal."
    )]
    pub log_to_file: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if let Some(demo) = &self.demo {
            if DemoScene::parse(demo).is_none() {
                let available = DemoScene::all_names().join(", ");
                return Err(format!(
                    "Unknown demo scene: '{demo}'\nAvailable scenes: {available}"
                ));
            }
        }

        for (flag, value) in [
            ("--distance-sensitivity", self.distance_sensitivity),
            ("--angle-sensitivity", self.angle_sensitivity),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(format!("{flag} must be a positive number, got {value}"));
                }
            }
        }

        Ok(())
    }

    /// Create default CLI args for web builds
    #[cfg(target_arch = "wasm32")]
    pub fn default_for_web() -> Self {
        Self::default()
    }

    /// Get the demo scene from CLI args, config file, or default
    ///
    /// Priority order:
    /// 1. CLI argument (--demo)
    /// 2. Config file setting (~/.config/kerf/settings.json)
    /// 3. Built-in default (both solids)
    pub fn get_demo_scene(&self) -> DemoScene {
        self.resolve_demo_scene(ConfigFile::load().as_ref())
    }

    /// Gizmo settings from CLI overrides, config file, or defaults
    pub fn get_gizmo_settings(&self) -> GizmoSettings {
        self.resolve_gizmo_settings(ConfigFile::load().as_ref())
    }

    fn resolve_demo_scene(&self, config: Option<&ConfigFile>) -> DemoScene {
        if let Some(scene) = self.demo.as_deref().and_then(DemoScene::parse) {
            debug!("Using demo scene from CLI: {:?}", scene);
            return scene;
        }

        if let Some(scene) = config
            .and_then(|config| config.default_demo.as_deref())
            .and_then(DemoScene::parse)
        {
            debug!("Using demo scene from config file: {:?}", scene);
            return scene;
        }

        DemoScene::default()
    }

    fn resolve_gizmo_settings(&self, config: Option<&ConfigFile>) -> GizmoSettings {
        let mut settings = config
            .and_then(|config| config.gizmo.clone())
            .unwrap_or_default();
        if let Some(value) = self.distance_sensitivity {
            settings.distance_sensitivity = value;
        }
        if let Some(value) = self.angle_sensitivity {
            settings.angle_sensitivity = value;
        }
        settings.sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags() {
        let args = CliArgs::parse_from([
            "kerf",
            "--demo",
            "box",
            "--angle-sensitivity",
            "0.05",
            "--log-to-file",
        ]);
        assert_eq!(args.demo.as_deref(), Some("box"));
        assert_eq!(args.angle_sensitivity, Some(0.05));
        assert!(args.log_to_file);
        assert!(!args.new_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let unknown_demo = CliArgs {
            demo: Some("dovetail".to_string()),
            ..default()
        };
        assert!(unknown_demo.validate().unwrap_err().contains("box, cylinder, both"));

        let negative = CliArgs {
            distance_sensitivity: Some(-1.0),
            ..default()
        };
        assert!(negative.validate().is_err());

        let zero = CliArgs {
            angle_sensitivity: Some(0.0),
            ..default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_cli_wins_over_config_file() {
        let config = ConfigFile {
            default_demo: Some("cylinder".to_string()),
            gizmo: Some(GizmoSettings {
                distance_sensitivity: 0.5,
                angle_sensitivity: 0.5,
                ..default()
            }),
        };

        let args = CliArgs {
            demo: Some("box".to_string()),
            angle_sensitivity: Some(0.02),
            ..default()
        };
        assert_eq!(args.resolve_demo_scene(Some(&config)), DemoScene::Box);
        let settings = args.resolve_gizmo_settings(Some(&config));
        assert_eq!(settings.angle_sensitivity, 0.02);
        // Not given on the command line, so the config value stands
        assert_eq!(settings.distance_sensitivity, 0.5);

        let bare = CliArgs::default();
        assert_eq!(bare.resolve_demo_scene(Some(&config)), DemoScene::Cylinder);
        assert_eq!(bare.resolve_demo_scene(None), DemoScene::Both);
        assert_eq!(bare.resolve_gizmo_settings(None), GizmoSettings::default());
    }

    #[test]
    fn test_config_file_settings_are_sanitized() {
        let config: ConfigFile =
            serde_json::from_str(r#"{ "gizmo": { "min_dimension": -1.0, "bounds_clearance": -2.0 } }"#)
                .unwrap();
        let settings = CliArgs::default().resolve_gizmo_settings(Some(&config));
        assert!(settings.min_dimension > 0.0);
        assert!(settings.bounds_clearance > 0.0);

        // The extrusion editor built from them cannot invert a box
        let editor = crate::gizmo::ExtrusionEditor::new(settings.min_dimension);
        let start = crate::gizmo::ObjectState {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            primitive: crate::geometry::Primitive::Box {
                width: 2.0,
                height: 1.0,
                depth: 1.0,
            },
        };
        let result = editor.extrude(&start, Vec3::X, -10.0).unwrap();
        assert!(result.dimension > 0.0);
    }
}
