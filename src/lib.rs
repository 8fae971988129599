//! Kerf
pub mod core;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod logging;
pub mod rendering;
pub mod scene;
pub mod systems;
pub mod tools;
