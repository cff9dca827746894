//! Body
//!
//! A registrable physics body: tag, correction priority, kinematic state
//! and collider data. Gameplay objects (player, enemies, weapons, items,
//! the arena wall) each own one of these and register it with a
//! [`PhysicsWorld`](super::world::PhysicsWorld).

use glam::Vec3;

use super::rigidbody::RigidBody;
use super::shape::{ColliderData, GameObjectTag, Priority};

/// A physics body. Constructed with its collider data, so every body has
/// exactly one shape for its whole lifetime.
#[derive(Debug, Clone)]
pub struct Body {
    tag: GameObjectTag,
    priority: Priority,
    /// Kinematic state. Gameplay reads and writes this between steps.
    pub rigidbody: RigidBody,
    data: ColliderData,
    /// Proposed position for the current step. Scratch state owned by the
    /// world's step pipeline; not meaningful between steps.
    pub(crate) next_pos: Vec3,
}

impl Body {
    pub fn new(priority: Priority, tag: GameObjectTag, data: ColliderData) -> Self {
        Self {
            tag,
            priority,
            rigidbody: RigidBody::new(),
            data,
            next_pos: Vec3::ZERO,
        }
    }

    pub fn tag(&self) -> GameObjectTag {
        self.tag
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn pos(&self) -> Vec3 {
        self.rigidbody.pos()
    }

    pub fn vel(&self) -> Vec3 {
        self.rigidbody.vel()
    }

    pub fn dir(&self) -> Vec3 {
        self.rigidbody.dir()
    }

    pub fn data(&self) -> &ColliderData {
        &self.data
    }

    /// Mutable access to the collider data, for toggling flags and editing
    /// through tags. The shape itself stays fixed for the body's lifetime.
    pub fn data_mut(&mut self) -> &mut ColliderData {
        &mut self.data
    }
}
