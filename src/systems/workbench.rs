//! Demo workbench: lighting, the starting solids and the edit log

use crate::core::settings::BACKGROUND_COLOR;
use crate::geometry::primitive::Primitive;
use crate::gizmo::{ExtrudeEvent, RotateEvent};
use crate::scene::{SceneModel, TargetObject};
use bevy::prelude::*;

/// Sketch profiles start this thin along their extrusion axis
const PROFILE_THICKNESS: f32 = 0.05;

const BOARD_COLOR: Color = Color::srgb(0.76, 0.6, 0.42);
const DOWEL_COLOR: Color = Color::srgb(0.62, 0.45, 0.3);

/// Which solids the workbench starts with
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoScene {
    Box,
    Cylinder,
    #[default]
    Both,
}

impl DemoScene {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "box" => Some(DemoScene::Box),
            "cylinder" => Some(DemoScene::Cylinder),
            "both" => Some(DemoScene::Both),
            _ => None,
        }
    }

    pub fn all_names() -> [&'static str; 3] {
        ["box", "cylinder", "both"]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DemoScene::Box => "box",
            DemoScene::Cylinder => "cylinder",
            DemoScene::Both => "both",
        }
    }

    fn has_box(&self) -> bool {
        matches!(self, DemoScene::Box | DemoScene::Both)
    }

    fn has_cylinder(&self) -> bool {
        matches!(self, DemoScene::Cylinder | DemoScene::Both)
    }
}

/// Add the demo solids to the scene
pub fn populate_demo_scene(scene: &mut SceneModel, demo: DemoScene) {
    if demo.has_box() {
        let id = scene.allocate_id();
        scene.insert(
            TargetObject::new(
                id,
                "Board",
                Primitive::Box {
                    width: 4.0,
                    height: PROFILE_THICKNESS,
                    depth: 2.5,
                },
            )
            .with_position(Vec3::new(-2.5, PROFILE_THICKNESS * 0.5, 0.0))
            .with_color(BOARD_COLOR)
            .with_source_sketch("rectangle"),
        );
    }
    if demo.has_cylinder() {
        let id = scene.allocate_id();
        scene.insert(
            TargetObject::new(
                id,
                "Dowel",
                Primitive::Cylinder {
                    diameter: 1.5,
                    height: PROFILE_THICKNESS,
                },
            )
            .with_position(Vec3::new(2.5, PROFILE_THICKNESS * 0.5, 0.0))
            .with_color(DOWEL_COLOR)
            .with_source_sketch("circle"),
        );
    }
    info!("[WORKBENCH] Loaded '{}' demo with {} solid(s)", demo.name(), scene.len());
}

pub fn setup_workbench(mut commands: Commands, demo: Res<DemoScene>, mut scene: ResMut<SceneModel>) {
    commands.insert_resource(ClearColor(BACKGROUND_COLOR));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    populate_demo_scene(scene.as_mut(), *demo);
}

/// Log committed edits; previews are too chatty for info
pub fn log_committed_edits(
    mut extrusions: EventReader<ExtrudeEvent>,
    mut rotations: EventReader<RotateEvent>,
) {
    for event in extrusions.read() {
        if event.is_preview {
            continue;
        }
        info!("[EXTRUDE] {} extruded by {:.3}", event.target, event.distance);
    }
    for event in rotations.read() {
        if event.is_preview {
            continue;
        }
        info!(
            "[ROTATE] {} rotated {:.1} deg about {}",
            event.target,
            event.angle_delta.to_degrees(),
            event.axis
        );
    }
}

/// Exit the application when Escape is pressed
pub fn exit_on_esc(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneHost;

    #[test]
    fn test_demo_scene_parse() {
        assert_eq!(DemoScene::parse("box"), Some(DemoScene::Box));
        assert_eq!(DemoScene::parse("Cylinder"), Some(DemoScene::Cylinder));
        assert_eq!(DemoScene::parse("sphere"), None);
        for name in DemoScene::all_names() {
            assert_eq!(DemoScene::parse(name).map(|d| d.name()), Some(name));
        }
    }

    #[test]
    fn test_demo_solids_start_as_thin_profiles() {
        let mut scene = SceneModel::default();
        populate_demo_scene(&mut scene, DemoScene::Both);
        assert_eq!(scene.len(), 2);

        for target in scene.iter() {
            assert_eq!(target.primitive.size().y, PROFILE_THICKNESS);
            // Resting on the workbench
            assert!((target.bounds().min.y).abs() < 1e-6);
            assert!(target.metadata.source_sketch.is_some());
            assert!(!target.metadata.is_extruded);
        }
    }

    #[test]
    fn test_single_demo_has_one_solid() {
        let mut scene = SceneModel::default();
        populate_demo_scene(&mut scene, DemoScene::Cylinder);
        assert_eq!(scene.len(), 1);
        let id = scene.ids().next();
        assert!(id.is_some_and(|id| scene.contains(id)));
    }
}
