//! Gizmo handle rendering
//!
//! The handle entities are spawned once under a single root. Frame to frame
//! only the root transform, per-handle visibility and material colors change.

use crate::core::settings::GizmoSettings;
use crate::gizmo::{GizmoController, GizmoSet, HandleId};
use crate::scene::{SceneHost, SceneModel};
use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

const SHAFT_RADIUS: f32 = 0.05;
const TIP_RADIUS: f32 = 0.16;
const TIP_LENGTH: f32 = 0.4;
const OUTLINE_COLOR: Color = Color::srgb(0.95, 0.75, 0.3);

/// Root of the handle hierarchy; placed at the gizmo placement
#[derive(Component, Debug)]
pub struct GizmoRoot;

/// One mesh part of a handle
#[derive(Component, Debug, Clone, Copy)]
pub struct HandlePart(pub HandleId);

/// Material per handle, recolored in place on hover and drag
#[derive(Resource, Debug, Default)]
pub struct HandleMaterials {
    materials: HashMap<HandleId, Handle<StandardMaterial>>,
    colors: HashMap<HandleId, Color>,
}

fn handle_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

pub fn spawn_gizmo_visuals(
    mut commands: Commands,
    settings: Res<GizmoSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut handle_materials: ResMut<HandleMaterials>,
) {
    let controller_handles = crate::gizmo::GizmoHandleSet::new();
    for handle in controller_handles.handles() {
        let color = handle.color();
        handle_materials
            .materials
            .insert(handle.id, materials.add(handle_material(color)));
        handle_materials.colors.insert(handle.id, color);
    }
    let material = |id: HandleId| {
        MeshMaterial3d(
            handle_materials
                .materials
                .get(&id)
                .cloned()
                .unwrap_or_default(),
        )
    };

    let shaft_length = (settings.translate_handle_length - TIP_LENGTH).max(0.1);
    let shaft = meshes.add(Cylinder::new(SHAFT_RADIUS, shaft_length));
    let tip = meshes.add(Cone {
        radius: TIP_RADIUS,
        height: TIP_LENGTH,
    });
    let tube = settings.ring_thickness * 0.25;
    let ring = meshes.add(Torus::new(
        settings.ring_radius - tube,
        settings.ring_radius + tube,
    ));

    commands
        .spawn((
            Name::new("Gizmo"),
            GizmoRoot,
            Transform::default(),
            Visibility::Hidden,
        ))
        .with_children(|root| {
            root.spawn((
                HandlePart(HandleId::Translate),
                Mesh3d(shaft),
                material(HandleId::Translate),
                Transform::from_xyz(0.0, shaft_length * 0.5, 0.0),
            ));
            root.spawn((
                HandlePart(HandleId::Translate),
                Mesh3d(tip),
                material(HandleId::Translate),
                Transform::from_xyz(0.0, shaft_length + TIP_LENGTH * 0.5, 0.0),
            ));
            // Torus meshes lie in the XZ plane, around +Y
            for (id, rotation) in [
                (HandleId::RingX, Quat::from_rotation_z(-FRAC_PI_2)),
                (HandleId::RingY, Quat::IDENTITY),
                (HandleId::RingZ, Quat::from_rotation_x(FRAC_PI_2)),
            ] {
                root.spawn((
                    HandlePart(id),
                    Mesh3d(ring.clone()),
                    material(id),
                    Transform::from_rotation(rotation),
                ));
            }
        });
}

/// Mirror the controller's placement, mode and handle states
pub fn sync_gizmo_visuals(
    controller: Res<GizmoController>,
    mut handle_materials: ResMut<HandleMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut roots: Query<(&mut Transform, &mut Visibility), (With<GizmoRoot>, Without<HandlePart>)>,
    mut parts: Query<(&HandlePart, &mut Visibility), Without<GizmoRoot>>,
) {
    let Ok((mut transform, mut visibility)) = roots.single_mut() else {
        return;
    };

    let placement = controller.placement().filter(|_| controller.is_visible());
    let Some(placement) = placement else {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    };
    visibility.set_if_neq(Visibility::Inherited);
    transform.set_if_neq(
        Transform::from_translation(placement.position).with_rotation(placement.orientation),
    );

    let mode = controller.mode();
    for (part, mut part_visibility) in &mut parts {
        let wanted = if part.0.mode() == mode {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        part_visibility.set_if_neq(wanted);
    }

    for handle in controller.handles().handles() {
        let color = handle.color();
        if handle_materials.colors.get(&handle.id) == Some(&color) {
            continue;
        }
        if let Some(material) = handle_materials
            .materials
            .get(&handle.id)
            .and_then(|h| materials.get_mut(h))
        {
            material.base_color = color;
        }
        handle_materials.colors.insert(handle.id, color);
    }
}

/// Outline the attached target
pub fn draw_target_outline(controller: Res<GizmoController>, scene: Res<SceneModel>, mut gizmos: Gizmos) {
    if !controller.is_visible() {
        return;
    }
    let Some(target) = controller.target().and_then(|id| scene.target(id)) else {
        return;
    };
    let size = target.primitive.size();
    gizmos.cuboid(
        Transform::from_translation(target.position)
            .with_rotation(target.orientation)
            .with_scale(size * 1.01),
        OUTLINE_COLOR,
    );
}

pub struct GizmoVisualsPlugin;

impl Plugin for GizmoVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HandleMaterials>()
            .add_systems(Startup, spawn_gizmo_visuals)
            .add_systems(
                Update,
                (sync_gizmo_visuals, draw_target_outline).after(GizmoSet),
            );
    }
}
