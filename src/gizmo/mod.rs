//! Transform gizmo: face extrusion and world-axis rotation by direct manipulation

pub mod controller;
pub mod editor;
pub mod events;
pub mod extrusion;
pub mod handles;
pub mod positioner;
pub mod projector;
pub mod rotation;
pub mod session;


pub use controller::{GizmoContext, GizmoController, InteractionState};
pub use editor::{EditOutcome, Editor};
pub use events::{ExtrudeEvent, GizmoEvent, RotateEvent};
pub use extrusion::{ExtrusionEditor, ExtrusionResult};
pub use handles::{GizmoHandle, GizmoHandleSet, GizmoMode, HandleId, HandleKind, HandleVisual};
pub use positioner::{FaceAnchor, GizmoPlacement, GizmoPositioner, PlacementStrategy};
pub use projector::{ParameterKind, PointerToParameterProjector};
pub use rotation::RotationEditor;
pub use session::{DragSession, ObjectState};

use crate::core::settings::GizmoSettings;
use crate::input::pointer::{PointerEvent, PointerQueue};
use crate::rendering::camera::ActiveCameraView;
use crate::scene::{CameraNavigation, SceneHost, SceneModel};
use bevy::prelude::*;

/// Systems driving the gizmo from pointer input
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GizmoSet;

/// Pointer events the gizmo did not consume this frame, for tools to act on
#[derive(Resource, Debug, Default)]
pub struct UnclaimedPointer {
    pub events: Vec<PointerEvent>,
}

fn setup_gizmo_controller(
    mut commands: Commands,
    settings: Res<GizmoSettings>,
    mut queue: ResMut<PointerQueue>,
) {
    let mut controller = GizmoController::new(settings.clone());
    controller.connect(queue.as_mut());
    commands.insert_resource(controller);
}

/// Pump pointer input through the controller and publish its events
#[allow(clippy::too_many_arguments)]
pub fn drive_gizmo(
    mut controller: ResMut<GizmoController>,
    mut scene: ResMut<SceneModel>,
    mut navigation: ResMut<CameraNavigation>,
    mut queue: ResMut<PointerQueue>,
    camera: Res<ActiveCameraView>,
    mut unclaimed: ResMut<UnclaimedPointer>,
    mut extrude_events: EventWriter<ExtrudeEvent>,
    mut rotate_events: EventWriter<RotateEvent>,
) {
    let mut ctx = GizmoContext {
        host: scene.as_mut(),
        camera: camera.0.as_ref(),
        navigation: navigation.as_mut(),
    };

    if let Some(target) = controller.target() {
        if !ctx.host.contains(target) {
            controller.on_target_removed(&mut ctx, target);
        }
    }

    unclaimed.events = controller.pump(&mut ctx, queue.as_mut());

    for event in controller.drain_events() {
        match event {
            GizmoEvent::Extrude(event) => {
                extrude_events.write(event);
            }
            GizmoEvent::Rotate(event) => {
                rotate_events.write(event);
            }
        }
    }
}

pub struct GizmoPlugin;

impl Plugin for GizmoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoSettings>()
            .init_resource::<UnclaimedPointer>()
            .add_event::<ExtrudeEvent>()
            .add_event::<RotateEvent>()
            .add_systems(Startup, setup_gizmo_controller)
            .add_systems(Update, drive_gizmo.in_set(GizmoSet));
    }
}
