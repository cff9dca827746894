//! Physics module for the arena combat engine
//!
//! A single-threaded, iterative narrow-phase collision engine. Bodies are
//! simple primitives (sphere, capsule, inverted cylinder for the arena
//! wall); each step integrates velocities, resolves interpenetration by
//! priority with an iteration cap, clamps to the ground plane and reports
//! collision events after all positions are final.
//!
//! There is no broad phase — every pair is tested each pass — and no
//! continuous collision detection.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`config`] - Simulation tunables and numeric constants
//! - [`collision`] - Closest-point geometry routines
//! - [`shape`] - Collider shapes, tags, priorities and per-body flags
//! - [`rigidbody`] - Per-body kinematic state
//! - [`body`] - Registrable physics body
//! - [`world`] - Body registry and the step pipeline
//! - [`debug_draw`] - Observational collider visualization sink

pub mod body;
pub mod collision;
pub mod config;
pub mod debug_draw;
pub mod rigidbody;
pub mod shape;
pub mod types;
pub mod world;

// Re-export commonly used types at the physics module level
pub use body::Body;
pub use config::{ConfigError, FIX_POSITION_OFFSET, PhysicsConfig, ZERO_TOLERANCE};
pub use debug_draw::DebugDraw;
pub use rigidbody::RigidBody;
pub use shape::{ColliderData, ColliderShape, GameObjectTag, Priority};
pub use types::{Quat, Vec2, Vec3};
pub use world::{BodyHandle, CollisionEvent, PhysicsWorld};
