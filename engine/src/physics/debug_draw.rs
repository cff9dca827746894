//! Debug Draw
//!
//! Observational sink for collider visualization. The world records
//! draw requests here during integration when the sink is enabled; the
//! renderer drains them after the step. Nothing here feeds back into the
//! simulation.

use glam::Vec3;

/// Color used for colliders that participate in collision.
pub const COLOR_ACTIVE: u32 = 0xff00ff;
/// Color used for colliders whose collision flag is off.
pub const COLOR_INACTIVE: u32 = 0x101010;

/// A recorded line draw request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineInfo {
    pub start: Vec3,
    pub end: Vec3,
    pub color: u32,
}

/// A recorded sphere draw request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereInfo {
    pub center: Vec3,
    pub radius: f32,
    pub color: u32,
}

/// A recorded capsule draw request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleInfo {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub color: u32,
}

/// Buffer of pending debug draw requests.
#[derive(Debug, Clone, Default)]
pub struct DebugDraw {
    lines: Vec<LineInfo>,
    spheres: Vec<SphereInfo>,
    capsules: Vec<CapsuleInfo>,
}

impl DebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all recorded requests.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.spheres.clear();
        self.capsules.clear();
    }

    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: u32) {
        self.lines.push(LineInfo { start, end, color });
    }

    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: u32) {
        self.spheres.push(SphereInfo {
            center,
            radius,
            color,
        });
    }

    pub fn draw_capsule(&mut self, start: Vec3, end: Vec3, radius: f32, color: u32) {
        self.capsules.push(CapsuleInfo {
            start,
            end,
            radius,
            color,
        });
    }

    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    pub fn spheres(&self) -> &[SphereInfo] {
        &self.spheres
    }

    pub fn capsules(&self) -> &[CapsuleInfo] {
        &self.capsules
    }
}
