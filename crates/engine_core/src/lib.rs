//! Core types shared by the arena crates.
//!
//! - World clock / frame timing
//! - Yaw-only poses and planar geometry helpers
//! - Common data records

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
