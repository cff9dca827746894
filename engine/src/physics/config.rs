//! Physics Configuration
//!
//! Centralized tunables for the simulation step. `Default` returns the
//! values the engine was balanced against; games can override individual
//! fields or persist a full config as JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Squared lengths and determinants below this are treated as zero.
pub const ZERO_TOLERANCE: f32 = 0.00001;

/// Extra distance added on top of the penetration depth when pushing a body
/// out. Restoring the exact contact distance would leave the pair touching
/// and immediately re-colliding on the next pass.
pub const FIX_POSITION_OFFSET: f32 = ZERO_TOLERANCE;

/// Tunable parameters for one physics world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// World gravity, applied additively each step to gravity-enabled bodies.
    pub gravity: Vec3,
    /// Terminal fall velocity. Gravity is negative, so `vel.y` is clamped
    /// to stay above `max_gravity_accel.y`.
    pub max_gravity_accel: Vec3,
    /// Horizontal damping factor applied to `vel.xz` each step.
    pub deceleration_rate: f32,
    /// Speed below which a body is considered not moving.
    pub sleep_threshold: f32,
    /// Upper bound on resolve passes within a single step.
    pub check_collide_max_count: u32,
    /// Height of the temporary ground plane; positions are clamped above it.
    pub ground_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let gravity = Vec3::new(0.0, -0.981, 0.0);
        Self {
            gravity,
            max_gravity_accel: gravity * 15.0,
            deceleration_rate: 0.98,
            sleep_threshold: 0.005,
            check_collide_max_count: 16,
            ground_height: 0.0,
        }
    }
}

impl PhysicsConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the config to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur during config save/load.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}
