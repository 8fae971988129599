//! Target mesh rendering
//!
//! Each target gets one entity and one mesh asset for its whole life. Geometry
//! edits overwrite the mesh asset in place, so the entity, its handle and the
//! registry entry survive every rebuild.

use crate::scene::registry::{PrimitiveRegistry, RegisteredTarget};
use crate::scene::target::TargetId;
use crate::scene::{SceneHost, SceneModel};
use bevy::prelude::*;
use bevy::transform::TransformSystem;

/// Marks the entity rendering a target
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMesh(pub TargetId);

/// Spawn, update and despawn target entities to match the scene model
pub fn sync_target_meshes(
    mut commands: Commands,
    scene: Res<SceneModel>,
    mut registry: ResMut<PrimitiveRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut transforms: Query<&mut Transform, With<TargetMesh>>,
) {
    for target in scene.iter() {
        match registry.get_mut(target.id) {
            Some(entry) => {
                if entry.revision != target.revision {
                    if let Some(mesh) = meshes.get_mut(&entry.mesh) {
                        *mesh = target.primitive.to_mesh();
                    }
                    entry.revision = target.revision;
                    debug!("[RENDER] Rebuilt mesh for {} (rev {})", target.id, target.revision);
                }
                if let Ok(mut transform) = transforms.get_mut(entry.entity) {
                    let next = target.transform();
                    if *transform != next {
                        *transform = next;
                    }
                }
            }
            None => {
                let mesh = meshes.add(target.primitive.to_mesh());
                let material = materials.add(StandardMaterial {
                    base_color: target.color,
                    perceptual_roughness: 0.85,
                    ..default()
                });
                let entity = commands
                    .spawn((
                        Name::new(target.name.clone()),
                        TargetMesh(target.id),
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        target.transform(),
                    ))
                    .id();
                registry.register(
                    target.id,
                    RegisteredTarget {
                        entity,
                        mesh,
                        material,
                        revision: target.revision,
                    },
                );
                debug!("[RENDER] Spawned {} '{}'", target.id, target.name);
            }
        }
    }

    let removed: Vec<TargetId> = registry.ids().filter(|id| !scene.contains(*id)).collect();
    for id in removed {
        if let Some(entry) = registry.unregister(id) {
            commands.entity(entry.entity).despawn();
            debug!("[RENDER] Despawned {}", id);
        }
    }
}

pub struct TargetRenderingPlugin;

impl Plugin for TargetRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            sync_target_meshes
                .run_if(resource_changed::<SceneModel>)
                .before(TransformSystem::TransformPropagate),
        );
    }
}
