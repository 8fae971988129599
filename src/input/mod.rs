//! Input handling

pub mod pointer;

pub use pointer::{PointerEvent, PointerPlugin, PointerQueue, PointerSource, SubscriptionId};
