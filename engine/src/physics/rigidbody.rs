//! Rigidbody
//!
//! Per-body kinematic state: position, velocity, derived facing direction
//! and the gravity flag. Owned exclusively by one body; mutated by that
//! body's gameplay logic between steps and by the physics world during one.

use glam::Vec3;

/// Kinematic state of a single body.
///
/// `dir` always holds the normalized form of the last non-zero velocity
/// passed to [`RigidBody::set_vel`]; it is never set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pos: Vec3,
    dir: Vec3,
    vel: Vec3,
    use_gravity: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self {
            pos: Vec3::ZERO,
            dir: Vec3::ZERO,
            vel: Vec3::ZERO,
            use_gravity: false,
        }
    }

    /// Resets all state, keeping only the given gravity flag.
    pub fn init(&mut self, use_gravity: bool) {
        self.pos = Vec3::ZERO;
        self.dir = Vec3::ZERO;
        self.vel = Vec3::ZERO;
        self.use_gravity = use_gravity;
    }

    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Facing direction derived from the last non-zero velocity.
    pub fn dir(&self) -> Vec3 {
        self.dir
    }

    pub fn vel(&self) -> Vec3 {
        self.vel
    }

    pub fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    /// Sets the velocity, updating the facing direction when the new
    /// velocity has any length.
    pub fn set_vel(&mut self, vel: Vec3) {
        self.vel = vel;
        if vel.length_squared() > 0.0 {
            self.dir = vel.normalize();
        }
    }

    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}
