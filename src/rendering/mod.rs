//! Rendering and visualization
//!
//! - Target meshes, rebuilt in place when their geometry changes
//! - Gizmo handle meshes and the attached-target outline
//! - The orbit camera the gizmo projects through

pub mod camera;
pub mod gizmo_visuals;
pub mod targets;

// Re-export commonly used items
pub use camera::{ActiveCameraView, OrbitCamera, OrbitCameraPlugin};
pub use gizmo_visuals::GizmoVisualsPlugin;
pub use targets::{TargetMesh, TargetRenderingPlugin};
