//! Geometric primitives and operations

pub mod bounds;
pub mod primitive;
pub mod projection;
pub mod ray;

// Re-export commonly used items
pub use bounds::WorldAabb;
pub use primitive::{LocalAxis, Primitive, PrimitiveKind};
pub use projection::{screen_axis, tangent_for, CameraView, ScreenAxis};
pub use ray::{intersect_primitive, RayHit};
