//! Workbench scene: targets, their owner, and the camera navigation gate

pub mod host;
pub mod model;
pub mod navigation;
pub mod registry;
pub mod target;

pub use host::{PickHit, SceneHost};
pub use model::SceneModel;
pub use navigation::CameraNavigation;
pub use registry::{PrimitiveRegistry, RegisteredTarget};
pub use target::{TargetId, TargetMetadata, TargetObject};

use bevy::prelude::*;

/// Registers scene resources
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneModel>()
            .init_resource::<PrimitiveRegistry>()
            .init_resource::<CameraNavigation>();
    }
}
