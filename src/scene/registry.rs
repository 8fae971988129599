//! Identity → render entity mapping

use crate::scene::target::TargetId;
use bevy::prelude::*;
use std::collections::HashMap;

/// Render-side handles of one target
#[derive(Debug, Clone)]
pub struct RegisteredTarget {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    /// Target revision the mesh was last built from
    pub revision: u64,
}

/// Keeps each target bound to the same entity and mesh asset across rebuilds
#[derive(Resource, Debug, Default)]
pub struct PrimitiveRegistry {
    entries: HashMap<TargetId, RegisteredTarget>,
}

impl PrimitiveRegistry {
    pub fn get(&self, id: TargetId) -> Option<&RegisteredTarget> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut RegisteredTarget> {
        self.entries.get_mut(&id)
    }

    pub fn register(&mut self, id: TargetId, entry: RegisteredTarget) {
        self.entries.insert(id, entry);
    }

    pub fn unregister(&mut self, id: TargetId) -> Option<RegisteredTarget> {
        self.entries.remove(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.entries.keys().copied()
    }
}
