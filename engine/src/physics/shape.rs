//! Collider Shape Data
//!
//! Per-body collision parameters: the shape variant itself plus the
//! trigger/collision flags and the list of tags a body passes through.

use glam::Vec3;

/// Tag identifying what kind of game object a body belongs to.
///
/// Narrow-phase tests consult these through [`ColliderData::is_through_target`];
/// gameplay code uses them to interpret collision events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameObjectTag {
    /// No tag assigned
    None,
    Player,
    PlayerAttack,
    Enemy,
    EnemyAttack,
    Item,
    /// Invisible boundary keeping bodies inside the arena
    SystemWall,
    /// Walkable ground piece
    StepGround,
}

/// Positional-correction priority.
///
/// When two bodies overlap, the one with the *lower* ordinal stays put and
/// the other is pushed out. Equal priorities push both bodies half-way.
/// `Static` bodies are never displaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Never pushed out
    Static,
    High,
    Middle,
    Low,
}

/// Shape-specific collider parameters.
///
/// Shapes are axis-agnostic primitives positioned by their owning body;
/// there is no per-shape orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere {
        radius: f32,
    },
    /// The body origin is one endpoint of the axis; `start_to_end` is the
    /// local offset to the other endpoint.
    Capsule {
        radius: f32,
        start_to_end: Vec3,
    },
    /// A cylinder whose solid region is the annulus *outside* the inner
    /// radius, used for arena boundary walls. The axis is world-up;
    /// `inner_radius <= outer_radius` always holds.
    InvertedCylinder {
        inner_radius: f32,
        outer_radius: f32,
        start_to_end: Vec3,
    },
}

impl ColliderShape {
    /// Creates an inverted cylinder, swapping the radii if they were given
    /// in the wrong order so that `inner <= outer` holds.
    pub fn inverted_cylinder(inner_radius: f32, outer_radius: f32, start_to_end: Vec3) -> Self {
        let (inner_radius, outer_radius) = if inner_radius > outer_radius {
            (outer_radius, inner_radius)
        } else {
            (inner_radius, outer_radius)
        };
        ColliderShape::InvertedCylinder {
            inner_radius,
            outer_radius,
            start_to_end,
        }
    }
}

/// Full collision description attached to a body: shape, behavior flags and
/// pass-through tags. Created exactly once, at body construction.
#[derive(Debug, Clone)]
pub struct ColliderData {
    shape: ColliderShape,
    is_trigger: bool,
    is_collision: bool,
    /// Tags this body never collides with, regardless of overlap.
    through_tags: Vec<GameObjectTag>,
}

impl ColliderData {
    pub fn new(shape: ColliderShape, is_trigger: bool, is_collision: bool) -> Self {
        Self {
            shape,
            is_trigger,
            is_collision,
            through_tags: Vec::new(),
        }
    }

    /// Sphere collider data.
    pub fn sphere(radius: f32, is_trigger: bool, is_collision: bool) -> Self {
        Self::new(ColliderShape::Sphere { radius }, is_trigger, is_collision)
    }

    /// Capsule collider data. The body origin is one axis endpoint.
    pub fn capsule(radius: f32, start_to_end: Vec3, is_trigger: bool, is_collision: bool) -> Self {
        Self::new(
            ColliderShape::Capsule {
                radius,
                start_to_end,
            },
            is_trigger,
            is_collision,
        )
    }

    /// Inverted-cylinder collider data; radii are reordered if inverted.
    pub fn inverted_cylinder(
        inner_radius: f32,
        outer_radius: f32,
        start_to_end: Vec3,
        is_trigger: bool,
        is_collision: bool,
    ) -> Self {
        Self::new(
            ColliderShape::inverted_cylinder(inner_radius, outer_radius, start_to_end),
            is_trigger,
            is_collision,
        )
    }

    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    /// Trigger bodies report overlaps but never take part in positional
    /// correction.
    pub fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    pub fn set_trigger(&mut self, is_trigger: bool) {
        self.is_trigger = is_trigger;
    }

    /// Whether this body participates in collision at all. Gameplay toggles
    /// this to arm and disarm attack hitboxes.
    pub fn is_collision(&self) -> bool {
        self.is_collision
    }

    pub fn set_collision(&mut self, is_collision: bool) {
        self.is_collision = is_collision;
    }

    /// Registers a tag this body should pass through. Adding a tag that is
    /// already registered is a programming error.
    pub fn add_through_tag(&mut self, tag: GameObjectTag) {
        debug_assert!(
            !self.through_tags.contains(&tag),
            "through tag already registered: {tag:?}"
        );
        if !self.through_tags.contains(&tag) {
            self.through_tags.push(tag);
        }
    }

    /// Removes a previously registered pass-through tag. Removing a tag
    /// that was never registered is a programming error.
    pub fn remove_through_tag(&mut self, tag: GameObjectTag) {
        let before = self.through_tags.len();
        self.through_tags.retain(|t| *t != tag);
        debug_assert!(
            self.through_tags.len() < before,
            "through tag was not registered: {tag:?}"
        );
    }

    /// True if this body ignores collisions against `target`.
    pub fn is_through_target(&self, target: GameObjectTag) -> bool {
        self.through_tags.contains(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_cylinder_reorders_radii() {
        let shape = ColliderShape::inverted_cylinder(10.0, 4.0, Vec3::Y * 5.0);
        match shape {
            ColliderShape::InvertedCylinder {
                inner_radius,
                outer_radius,
                ..
            } => {
                assert_eq!(inner_radius, 4.0);
                assert_eq!(outer_radius, 10.0);
            }
            _ => panic!("expected inverted cylinder"),
        }
    }

    #[test]
    fn test_through_tags_add_remove_query() {
        let mut data = ColliderData::sphere(1.0, false, true);
        assert!(!data.is_through_target(GameObjectTag::Item));

        data.add_through_tag(GameObjectTag::Item);
        data.add_through_tag(GameObjectTag::Enemy);
        assert!(data.is_through_target(GameObjectTag::Item));
        assert!(data.is_through_target(GameObjectTag::Enemy));
        assert!(!data.is_through_target(GameObjectTag::Player));

        data.remove_through_tag(GameObjectTag::Item);
        assert!(!data.is_through_target(GameObjectTag::Item));
        assert!(data.is_through_target(GameObjectTag::Enemy));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Static < Priority::High);
        assert!(Priority::High < Priority::Middle);
        assert!(Priority::Middle < Priority::Low);
    }
}
