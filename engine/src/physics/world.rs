//! Physics World
//!
//! Owns the registered body set and advances the simulation. One call to
//! [`PhysicsWorld::step`] runs the full pipeline:
//!
//! 1. **Integrate** — damp, apply gravity, compute each body's proposed
//!    `next_pos` from its velocity.
//! 2. **Iterative resolve** — all-pairs narrow phase; on each hit, push the
//!    lower-priority body out and rescan, up to a fixed pass cap.
//! 3. **Commit** — clamp to the ground plane, finalize positions and derive
//!    the post-correction velocity.
//! 4. **Notify** — return the collision events collected during resolution.
//!
//! Events are returned (not dispatched through callbacks) so no gameplay
//! code ever runs inside a step; registering or releasing bodies while the
//! body set is being iterated is therefore impossible by construction.

use glam::{Vec2, Vec3};

use super::body::Body;
use super::collision::{closest_point_on_segment, closest_point_segments};
use super::config::{FIX_POSITION_OFFSET, PhysicsConfig, ZERO_TOLERANCE};
use super::debug_draw::{COLOR_ACTIVE, COLOR_INACTIVE, DebugDraw};
use super::shape::ColliderShape;

/// Generation-checked handle to a body registered in a [`PhysicsWorld`].
///
/// Handles stay cheap to copy and become invalid when their body is
/// released; a stale handle can never reach a different body that happens
/// to reuse the same arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

/// Deferred collision notification: `owner` collided with `other` during
/// the step that produced this event. Every colliding pair yields two
/// events, one in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub owner: BodyHandle,
    pub other: BodyHandle,
}

/// One arena slot. The generation counts how many bodies have lived here.
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// The physics engine: body registry plus step pipeline.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    debug: Option<DebugDraw>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.config
    }

    // ========================================================================
    // REGISTRY
    // ========================================================================

    /// Adds a body to the active set and returns its handle.
    pub fn register_body(&mut self, body: Body) -> BodyHandle {
        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                (self.slots.len() - 1) as u32
            }
        };
        let generation = self.slots[index as usize].generation;
        tracing::trace!(index, generation, "registered body");
        BodyHandle { index, generation }
    }

    /// Removes a body from the active set, returning it to the caller.
    ///
    /// Releasing through a stale or unknown handle is a programming error;
    /// it is asserted in debug builds and returns `None` in release.
    pub fn unregister_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            debug_assert!(false, "unregister with unknown handle");
            return None;
        };
        if slot.generation != handle.generation || slot.body.is_none() {
            debug_assert!(false, "body is not registered");
            return None;
        }
        let body = slot.body.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        tracing::trace!(index = handle.index, "released body");
        body
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // DEBUG DRAW
    // ========================================================================

    /// Starts capturing collider draw requests each step.
    pub fn enable_debug_draw(&mut self) {
        if self.debug.is_none() {
            self.debug = Some(DebugDraw::new());
        }
    }

    pub fn disable_debug_draw(&mut self) {
        self.debug = None;
    }

    /// Draw requests captured during the most recent step, if enabled.
    pub fn debug_draw(&self) -> Option<&DebugDraw> {
        self.debug.as_ref()
    }

    // ========================================================================
    // STEP PIPELINE
    // ========================================================================

    /// Advances the simulation by one tick and returns the collision events
    /// detected during it. Events are handed out only after every position
    /// is final, so a handler always observes consistent state.
    pub fn step(&mut self) -> Vec<CollisionEvent> {
        self.integrate();
        let events = self.check_collide();
        self.fix_position();
        events
    }

    /// Damping, gravity, sleep thresholds and the proposed next position.
    fn integrate(&mut self) {
        let config = &self.config;
        let debug = &mut self.debug;
        if let Some(sink) = debug.as_mut() {
            sink.clear();
        }

        for slot in &mut self.slots {
            let Some(body) = slot.body.as_mut() else {
                continue;
            };

            let pos = body.rigidbody.pos();
            let mut vel = body.rigidbody.vel();

            // Horizontal damping.
            vel.x *= config.deceleration_rate * 0.5;
            vel.z *= config.deceleration_rate * 0.5;

            if body.rigidbody.use_gravity() {
                vel += config.gravity;
                // Gravity is negative, so the terminal speed is a floor.
                if vel.y < config.max_gravity_accel.y {
                    vel.y = config.max_gravity_accel.y;
                }
            }

            // Sleep: drop motion entirely below the threshold, or just the
            // horizontal part when only XZ jitter remains.
            let vel_xz = Vec3::new(vel.x, 0.0, vel.z);
            if vel.length() < config.sleep_threshold {
                vel = Vec3::ZERO;
            } else if vel_xz.length() < config.sleep_threshold {
                vel.x = 0.0;
                vel.z = 0.0;
            }

            if let Some(sink) = debug.as_mut() {
                record_debug_shape(sink, body, pos);
            }

            body.rigidbody.set_vel(vel);
            body.next_pos = pos + vel;
        }
    }

    /// All-pairs narrow phase with iterative positional correction.
    ///
    /// Each pass scans for a colliding pair. A non-trigger hit is corrected
    /// and restarts the scan from the top; trigger hits are only recorded.
    /// The pass cap bounds the work per step; hitting it leaves a small
    /// residual overlap for the next frame to clean up.
    fn check_collide(&mut self) -> Vec<CollisionEvent> {
        let occupied: Vec<u32> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.body.is_some())
            .map(|(index, _)| index as u32)
            .collect();

        let mut events: Vec<CollisionEvent> = Vec::new();
        let mut do_check = true;
        let mut check_count: u32 = 0;

        while do_check {
            do_check = false;
            check_count += 1;

            'scan: for &ia in &occupied {
                for &ib in &occupied {
                    if ia == ib {
                        continue;
                    }
                    let a = self.body_at(ia);
                    let b = self.body_at(ib);
                    if !is_colliding(a, b) {
                        continue;
                    }

                    let mut pri_index = ia;
                    let mut sec_index = ib;
                    let is_trigger_pair = a.data().is_trigger() || b.data().is_trigger();

                    // Either side being a trigger skips correction entirely.
                    if !is_trigger_pair {
                        // The higher ordinal is easier to displace.
                        if a.priority() > b.priority() {
                            pri_index = ib;
                            sec_index = ia;
                        }
                        let mutual = a.priority() == b.priority();
                        let (delta_primary, delta_secondary) = fix_next_position(
                            self.body_at(pri_index),
                            self.body_at(sec_index),
                            mutual,
                        );
                        self.body_at_mut(pri_index).next_pos += delta_primary;
                        self.body_at_mut(sec_index).next_pos += delta_secondary;
                        do_check = true;
                    }

                    let primary = self.handle_at(pri_index);
                    let secondary = self.handle_at(sec_index);
                    push_event(&mut events, primary, secondary);
                    push_event(&mut events, secondary, primary);

                    if do_check {
                        // Positions changed; every pair needs rechecking.
                        break 'scan;
                    }
                    // Trigger hit: keep scanning the remaining bodies.
                    break;
                }
            }

            if check_count > self.config.check_collide_max_count && do_check {
                tracing::debug!(
                    passes = check_count,
                    "collision resolution hit the pass cap, leaving residual overlap"
                );
                break;
            }
        }

        events
    }

    /// Ground clamp and final commit of position and velocity.
    fn fix_position(&mut self) {
        let ground_height = self.config.ground_height;
        for slot in &mut self.slots {
            let Some(body) = slot.body.as_mut() else {
                continue;
            };

            if body.next_pos.y <= ground_height {
                body.next_pos.y = ground_height;
            }

            // The committed velocity reflects any correction applied.
            let to_fixed_pos = body.next_pos - body.rigidbody.pos();
            body.rigidbody.set_vel(to_fixed_pos);
            body.rigidbody.set_pos(body.next_pos);
        }
    }

    fn handle_at(&self, index: u32) -> BodyHandle {
        BodyHandle {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn body_at(&self, index: u32) -> &Body {
        self.slots[index as usize]
            .body
            .as_ref()
            .expect("slot occupied for the duration of a step")
    }

    fn body_at_mut(&mut self, index: u32) -> &mut Body {
        self.slots[index as usize]
            .body
            .as_mut()
            .expect("slot occupied for the duration of a step")
    }
}

/// Records a pending notification unless the same (owner, other) pair is
/// already queued; a body is told about each distinct partner exactly once
/// per step, however many resolve passes touched the pair.
fn push_event(events: &mut Vec<CollisionEvent>, owner: BodyHandle, other: BodyHandle) {
    let already_queued = events
        .iter()
        .any(|event| event.owner == owner && event.other == other);
    if !already_queued {
        events.push(CollisionEvent { owner, other });
    }
}

fn record_debug_shape(sink: &mut DebugDraw, body: &Body, pos: Vec3) {
    let color = if body.data().is_collision() {
        COLOR_ACTIVE
    } else {
        COLOR_INACTIVE
    };
    match body.data().shape() {
        ColliderShape::Sphere { radius } => {
            sink.draw_sphere(pos, radius, color);
        }
        ColliderShape::Capsule {
            radius,
            start_to_end,
        } => {
            let start = pos;
            let end = pos + start_to_end;
            sink.draw_sphere(start, radius, color);
            sink.draw_sphere(end, radius, color);
            sink.draw_capsule(start, end, radius, color);
        }
        ColliderShape::InvertedCylinder { start_to_end, .. } => {
            sink.draw_line(pos, pos + start_to_end, color);
        }
    }
}

// ============================================================================
// NARROW PHASE
// ============================================================================

/// Exact overlap test between two bodies at their proposed positions.
/// Read-only: never mutates either body.
pub(crate) fn is_colliding(a: &Body, b: &Body) -> bool {
    // Either side's through-tag suppresses the pair.
    if a.data().is_through_target(b.tag()) || b.data().is_through_target(a.tag()) {
        return false;
    }
    if !a.data().is_collision() || !b.data().is_collision() {
        return false;
    }

    use ColliderShape::*;
    match (a.data().shape(), b.data().shape()) {
        (Sphere { radius: radius_a }, Sphere { radius: radius_b }) => {
            a.next_pos.distance(b.next_pos) < radius_a + radius_b
        }
        (
            Capsule {
                radius: radius_a,
                start_to_end: axis_a,
            },
            Capsule {
                radius: radius_b,
                start_to_end: axis_b,
            },
        ) => {
            let (on_a, on_b) = closest_point_segments(
                a.next_pos,
                a.next_pos + axis_a,
                b.next_pos,
                b.next_pos + axis_b,
            );
            let radius_sum = radius_a + radius_b;
            on_a.distance_squared(on_b) < radius_sum * radius_sum
        }
        (Sphere { .. }, Capsule { .. }) => sphere_capsule_hit(a, b),
        (Capsule { .. }, Sphere { .. }) => sphere_capsule_hit(b, a),
        (Sphere { .. } | Capsule { .. }, InvertedCylinder { .. }) => annulus_hit(a, b),
        (InvertedCylinder { .. }, Sphere { .. } | Capsule { .. }) => annulus_hit(b, a),
        // Two arena walls against each other is not a supported pairing.
        (InvertedCylinder { .. }, InvertedCylinder { .. }) => false,
    }
}

fn sphere_capsule_hit(sphere: &Body, capsule: &Body) -> bool {
    let ColliderShape::Sphere {
        radius: sphere_radius,
    } = sphere.data().shape()
    else {
        return false;
    };
    let ColliderShape::Capsule {
        radius: capsule_radius,
        start_to_end,
    } = capsule.data().shape()
    else {
        return false;
    };

    let center = sphere.next_pos;
    let closest = closest_point_on_segment(center, capsule.next_pos, capsule.next_pos + start_to_end);

    let radius_sum = sphere_radius + capsule_radius;
    center.distance_squared(closest) < radius_sum * radius_sum
}

/// Radius and axis segment of a sphere or capsule, for tests against the
/// inverted cylinder. A sphere is a degenerate zero-length segment.
fn round_axis(body: &Body) -> Option<(f32, Vec3, Vec3)> {
    match body.data().shape() {
        ColliderShape::Sphere { radius } => Some((radius, body.next_pos, body.next_pos)),
        ColliderShape::Capsule {
            radius,
            start_to_end,
        } => Some((radius, body.next_pos, body.next_pos + start_to_end)),
        ColliderShape::InvertedCylinder { .. } => None,
    }
}

/// Vector between the closest points of the round body's axis and the
/// cylinder's axis, plus its length projected onto the XZ plane (the
/// cylinder axis is world-up).
fn annulus_separation(round: &Body, cylinder: &Body, cylinder_axis: Vec3) -> Option<(Vec3, f32)> {
    let (_, round_start, round_end) = round_axis(round)?;
    let (on_round, on_axis) = closest_point_segments(
        round_start,
        round_end,
        cylinder.next_pos,
        cylinder.next_pos + cylinder_axis,
    );
    let between = on_round - on_axis;
    let dist_xz = Vec2::new(between.x, between.z).length();
    Some((between, dist_xz))
}

/// Sphere/capsule against the inverted cylinder's annulus wall. Contact
/// with the cap and base edges is not handled.
fn annulus_hit(round: &Body, cylinder: &Body) -> bool {
    let ColliderShape::InvertedCylinder {
        inner_radius,
        outer_radius,
        start_to_end,
    } = cylinder.data().shape()
    else {
        return false;
    };
    let Some((round_radius, _, _)) = round_axis(round) else {
        return false;
    };
    let Some((_, dist_xz)) = annulus_separation(round, cylinder, start_to_end) else {
        return false;
    };

    let inside_bore = dist_xz < inner_radius - round_radius;
    let beyond_outer = dist_xz > outer_radius + round_radius;
    !inside_bore && beyond_outer
}

// ============================================================================
// POSITIONAL CORRECTION
// ============================================================================

/// Computes the `next_pos` corrections for a colliding pair, returned as
/// `(primary_delta, secondary_delta)`.
///
/// `primary` is the body that stays put; with `mutual` the push is split
/// half and half. The push direction runs along the line between the two
/// closest points, falling back to the center-to-center direction and
/// finally to +X when both are degenerate, so a fully coincident pair still
/// separates deterministically.
pub(crate) fn fix_next_position(primary: &Body, secondary: &Body, mutual: bool) -> (Vec3, Vec3) {
    use ColliderShape::*;
    match (primary.data().shape(), secondary.data().shape()) {
        (
            Sphere {
                radius: primary_radius,
            },
            Sphere {
                radius: secondary_radius,
            },
        ) => {
            // Push direction: secondary toward primary.
            let push_dir = fallback_normalize(primary.next_pos - secondary.next_pos, Vec3::ZERO);
            let current_dist = primary.next_pos.distance(secondary.next_pos);
            let push_dist =
                (primary_radius + secondary_radius - current_dist) + FIX_POSITION_OFFSET;
            let fix = push_dir * push_dist;
            if mutual {
                (fix * 0.5, -fix * 0.5)
            } else {
                (Vec3::ZERO, -fix)
            }
        }
        (
            Capsule {
                radius: primary_radius,
                start_to_end: primary_axis,
            },
            Capsule {
                radius: secondary_radius,
                start_to_end: secondary_axis,
            },
        ) => {
            let (on_primary, on_secondary) = closest_point_segments(
                primary.next_pos,
                primary.next_pos + primary_axis,
                secondary.next_pos,
                secondary.next_pos + secondary_axis,
            );
            // Push direction: primary toward secondary, with a fallback to
            // the body centers when the axes intersect.
            let push_dir = fallback_normalize(
                on_secondary - on_primary,
                secondary.next_pos - primary.next_pos,
            );
            let current_dist = on_primary.distance(on_secondary);
            let push_dist =
                (primary_radius + secondary_radius - current_dist) + FIX_POSITION_OFFSET;
            let fix = push_dir * push_dist;
            if mutual {
                (-fix * 0.5, fix * 0.5)
            } else {
                (Vec3::ZERO, fix)
            }
        }
        (Sphere { .. }, Capsule { .. }) => fix_sphere_capsule(primary, secondary, mutual, true),
        (Capsule { .. }, Sphere { .. }) => fix_sphere_capsule(secondary, primary, mutual, false),
        (Sphere { .. } | Capsule { .. }, InvertedCylinder { .. }) => {
            fix_round_cylinder(primary, secondary, mutual, false)
        }
        (InvertedCylinder { .. }, Sphere { .. } | Capsule { .. }) => {
            fix_round_cylinder(secondary, primary, mutual, true)
        }
        // Unsupported pairing: detection already reports no collision.
        (InvertedCylinder { .. }, InvertedCylinder { .. }) => (Vec3::ZERO, Vec3::ZERO),
    }
}

/// Sphere-vs-capsule correction. `sphere_is_primary` maps the shape-relative
/// push back onto the (primary, secondary) delta pair.
fn fix_sphere_capsule(
    sphere: &Body,
    capsule: &Body,
    mutual: bool,
    sphere_is_primary: bool,
) -> (Vec3, Vec3) {
    let ColliderShape::Sphere {
        radius: sphere_radius,
    } = sphere.data().shape()
    else {
        return (Vec3::ZERO, Vec3::ZERO);
    };
    let ColliderShape::Capsule {
        radius: capsule_radius,
        start_to_end,
    } = capsule.data().shape()
    else {
        return (Vec3::ZERO, Vec3::ZERO);
    };

    let center = sphere.next_pos;
    let closest = closest_point_on_segment(center, capsule.next_pos, capsule.next_pos + start_to_end);

    // Push direction: capsule toward sphere.
    let push_dir = fallback_normalize(center - closest, sphere.next_pos - capsule.next_pos);
    let current_dist = center.distance(closest);
    let push_dist = (sphere_radius + capsule_radius - current_dist) + FIX_POSITION_OFFSET;
    let fix = push_dir * push_dist;

    if mutual {
        // The sphere moves along the push, the capsule against it.
        if sphere_is_primary {
            (fix * 0.5, -fix * 0.5)
        } else {
            (-fix * 0.5, fix * 0.5)
        }
    } else if sphere_is_primary {
        // Secondary is the capsule, pushed against the fix direction.
        (Vec3::ZERO, -fix)
    } else {
        (Vec3::ZERO, fix)
    }
}

/// Sphere/capsule-vs-inverted-cylinder correction. The invading body is
/// pushed toward whichever annulus boundary it is numerically closer to.
fn fix_round_cylinder(
    round: &Body,
    cylinder: &Body,
    mutual: bool,
    cylinder_is_primary: bool,
) -> (Vec3, Vec3) {
    let ColliderShape::InvertedCylinder {
        inner_radius,
        outer_radius,
        start_to_end,
    } = cylinder.data().shape()
    else {
        return (Vec3::ZERO, Vec3::ZERO);
    };
    let Some((round_radius, _, _)) = round_axis(round) else {
        return (Vec3::ZERO, Vec3::ZERO);
    };
    let Some((between, dist_xz)) = annulus_separation(round, cylinder, start_to_end) else {
        return (Vec3::ZERO, Vec3::ZERO);
    };

    let inside_bore = dist_xz < inner_radius - round_radius;
    let beyond_outer = dist_xz > outer_radius + round_radius;
    if inside_bore || !beyond_outer {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    // Push in the XZ plane only; a body sitting exactly on the axis gets an
    // arbitrary fixed direction.
    let push_dir = fallback_normalize(Vec3::new(between.x, 0.0, between.z), Vec3::ZERO);

    let dist_to_inner = (dist_xz - inner_radius).abs();
    let dist_to_outer = (dist_xz - outer_radius).abs();

    let fix = if dist_to_inner < dist_to_outer {
        // Closer to the bore wall: push outward through it.
        push_dir * ((inner_radius - dist_xz) + round_radius)
    } else {
        // Closer to the rim: push back inside far enough to clear it.
        -push_dir * ((dist_xz - outer_radius) + round_radius)
    };
    // The fix direction runs cylinder -> round.
    let fix = fix * (1.0 + FIX_POSITION_OFFSET);

    if mutual {
        if cylinder_is_primary {
            (-fix * 0.5, fix * 0.5)
        } else {
            (fix * 0.5, -fix * 0.5)
        }
    } else if cylinder_is_primary {
        (Vec3::ZERO, fix)
    } else {
        (Vec3::ZERO, -fix)
    }
}

/// Normalizes `vec`, falling back to `fallback` when it is degenerate and
/// to +X when both are. Correction directions must never be NaN.
fn fallback_normalize(vec: Vec3, fallback: Vec3) -> Vec3 {
    if vec.length_squared() >= ZERO_TOLERANCE {
        return vec.normalize();
    }
    if fallback.length_squared() >= ZERO_TOLERANCE {
        return fallback.normalize();
    }
    Vec3::X
}
