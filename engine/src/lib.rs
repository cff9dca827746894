//! Fatal Arena Physics Library
//!
//! The collision and movement core of an arena combat game: a compact,
//! single-threaded physics engine for state-machine-driven characters.
//! Gameplay code (player, enemies, weapons, items, the arena itself) owns
//! a [`physics::Body`] per object, registers it with a
//! [`physics::PhysicsWorld`], and steps the world once per frame.
//!
//! # Example
//!
//! ```
//! use fatal_arena_physics::physics::{
//!     Body, ColliderData, GameObjectTag, PhysicsWorld, Priority, Vec3,
//! };
//!
//! let mut world = PhysicsWorld::new();
//!
//! // A player capsule and an enemy sphere overlapping it.
//! let mut player = Body::new(
//!     Priority::High,
//!     GameObjectTag::Player,
//!     ColliderData::capsule(0.5, Vec3::Y * 1.6, false, true),
//! );
//! player.rigidbody.set_pos(Vec3::ZERO);
//! let player = world.register_body(player);
//!
//! let mut enemy = Body::new(
//!     Priority::Low,
//!     GameObjectTag::Enemy,
//!     ColliderData::sphere(0.6, false, true),
//! );
//! enemy.rigidbody.set_pos(Vec3::new(0.4, 0.5, 0.0));
//! let enemy = world.register_body(enemy);
//!
//! // One tick: the enemy is pushed out of the player and both are notified.
//! let events = world.step();
//! assert!(events.iter().any(|e| e.owner == player && e.other == enemy));
//! assert!(events.iter().any(|e| e.owner == enemy && e.other == player));
//! ```

pub mod physics;
