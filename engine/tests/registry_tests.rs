//! Registry Tests - Handles, Debug Draw and Config Persistence
//!
//! Covers body registration and release through generation-checked handles,
//! the per-step debug draw capture, and saving/loading the simulation
//! config as JSON.

use fatal_arena_physics::physics::debug_draw::{COLOR_ACTIVE, COLOR_INACTIVE};
use fatal_arena_physics::physics::{
    Body, ColliderData, GameObjectTag, PhysicsConfig, PhysicsWorld, Priority, Vec3,
};

fn sphere_at(pos: Vec3, radius: f32) -> Body {
    let mut body = Body::new(
        Priority::Middle,
        GameObjectTag::Enemy,
        ColliderData::sphere(radius, false, true),
    );
    body.rigidbody.set_pos(pos);
    body
}

// ============================================================================
// HANDLES
// ============================================================================

#[test]
fn test_register_and_access_body() {
    let mut world = PhysicsWorld::new();
    assert!(world.is_empty());

    let handle = world.register_body(sphere_at(Vec3::new(2.0, 0.0, 0.0), 1.0));
    assert_eq!(world.len(), 1);
    assert!(world.contains(handle));

    let body = world.body(handle).unwrap();
    assert_eq!(body.tag(), GameObjectTag::Enemy);
    assert_eq!(body.pos(), Vec3::new(2.0, 0.0, 0.0));

    world.body_mut(handle).unwrap().rigidbody.set_pos(Vec3::ZERO);
    assert_eq!(world.body(handle).unwrap().pos(), Vec3::ZERO);
}

#[test]
fn test_unregister_returns_the_body() {
    let mut world = PhysicsWorld::new();
    let handle = world.register_body(sphere_at(Vec3::Y, 1.0));

    let body = world.unregister_body(handle).unwrap();
    assert_eq!(body.pos(), Vec3::Y);
    assert!(world.is_empty());
    assert!(!world.contains(handle));
    assert!(world.body(handle).is_none());
}

#[test]
fn test_stale_handle_never_reaches_reused_slot() {
    let mut world = PhysicsWorld::new();
    let first = world.register_body(sphere_at(Vec3::ZERO, 1.0));
    world.unregister_body(first);

    // The replacement reuses the freed slot under a new generation.
    let second = world.register_body(sphere_at(Vec3::X, 1.0));
    assert_ne!(first, second);
    assert!(!world.contains(first));
    assert!(world.body(first).is_none());
    assert_eq!(world.body(second).unwrap().pos(), Vec3::X);
}

#[test]
fn test_released_bodies_skip_the_step() {
    let mut world = PhysicsWorld::new();
    let kept = world.register_body(sphere_at(Vec3::ZERO, 1.0));
    let released = world.register_body(sphere_at(Vec3::new(0.5, 0.0, 0.0), 1.0));
    world.unregister_body(released);

    let events = world.step();
    assert!(events.is_empty());
    assert_eq!(world.body(kept).unwrap().pos(), Vec3::ZERO);
}

// ============================================================================
// DEBUG DRAW
// ============================================================================

#[test]
fn test_step_records_collider_shapes() {
    let mut world = PhysicsWorld::new();
    world.register_body(sphere_at(Vec3::ZERO, 1.0));

    let mut capsule = Body::new(
        Priority::Middle,
        GameObjectTag::Player,
        ColliderData::capsule(0.5, Vec3::Y * 2.0, false, true),
    );
    capsule.rigidbody.set_pos(Vec3::new(4.0, 0.0, 0.0));
    world.register_body(capsule);

    let mut wall = Body::new(
        Priority::Static,
        GameObjectTag::SystemWall,
        ColliderData::inverted_cylinder(10.0, 12.0, Vec3::Y * 10.0, false, true),
    );
    wall.rigidbody.set_pos(Vec3::ZERO);
    world.register_body(wall);

    let mut ghost = Body::new(
        Priority::Middle,
        GameObjectTag::Item,
        ColliderData::sphere(1.0, false, false),
    );
    ghost.rigidbody.set_pos(Vec3::new(-4.0, 0.0, 0.0));
    world.register_body(ghost);

    // Nothing recorded until the sink is enabled.
    world.step();
    assert!(world.debug_draw().is_none());

    world.enable_debug_draw();
    world.step();

    let sink = world.debug_draw().unwrap();
    // Sphere + two capsule end caps + ghost sphere.
    assert_eq!(sink.spheres().len(), 4);
    assert_eq!(sink.capsules().len(), 1);
    // The wall draws its axis as a line.
    assert_eq!(sink.lines().len(), 1);

    assert!(sink.spheres().iter().any(|s| s.color == COLOR_ACTIVE));
    // The collision-disabled body shows up in the inactive color.
    assert!(
        sink.spheres()
            .iter()
            .any(|s| s.color == COLOR_INACTIVE && s.center.x == -4.0)
    );

    world.disable_debug_draw();
    world.step();
    assert!(world.debug_draw().is_none());
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir()
        .join("fatal_arena_physics_tests")
        .join("physics_config.json");

    let mut config = PhysicsConfig::default();
    config.ground_height = -1.5;
    config.sleep_threshold = 0.01;
    config.save(&path).unwrap();

    let restored = PhysicsConfig::load(&path).unwrap();
    assert_eq!(restored, config);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_world_uses_custom_config() {
    let mut config = PhysicsConfig::default();
    config.gravity = Vec3::ZERO;
    config.max_gravity_accel = Vec3::ZERO;
    let mut world = PhysicsWorld::with_config(config);

    let mut body = sphere_at(Vec3::Y * 10.0, 1.0);
    body.rigidbody.set_use_gravity(true);
    let handle = world.register_body(body);

    world.step();
    // Zero gravity: a gravity-enabled body stays where it is.
    assert_eq!(world.body(handle).unwrap().pos(), Vec3::Y * 10.0);

    assert_eq!(world.config().gravity, Vec3::ZERO);
    world.config_mut().ground_height = 20.0;
    world.step();
    // Raising the ground plane lifts the body on the next commit.
    assert_eq!(world.body(handle).unwrap().pos().y, 20.0);
}
