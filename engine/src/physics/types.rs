//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the physics system, re-exported from the glam library.

pub use glam::{Mat4, Quat, Vec2, Vec3};
