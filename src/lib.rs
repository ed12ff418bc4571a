//! Slope Roll - physics core for a ball rolling on a rotating slope
//!
//! Core modules:
//! - `sim`: Per-frame physics (collision detection, integration, host tick)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Validation errors for obstacles and tuning

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ObstacleError, TuningError};
pub use settings::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Values are per step at the reference resolution (`REFERENCE_HEIGHT`).
/// Length-like values are scaled by `height / REFERENCE_HEIGHT` at runtime.
pub mod consts {
    /// Canvas height the constants below were tuned against
    pub const REFERENCE_HEIGHT: f32 = 800.0;

    /// Downward acceleration added each step
    pub const GRAVITY: f32 = 0.2;
    /// Tangential velocity decay while in contact
    pub const FRICTION: f32 = 0.995;
    /// Fraction of relative tangential speed kept through a contact
    pub const TANGENTIAL_RETENTION: f32 = 0.6;
    /// Normal bounce coefficient on hard impacts
    pub const RESTITUTION: f32 = 0.3;
    /// Relative normal speed below which a contact counts as a hard impact
    pub const IMPACT_THRESHOLD: f32 = -0.10;
    /// Speed below which the body is forced to rest
    pub const STOP_THRESHOLD: f32 = 0.01;
    /// Tangential speeds below this are candidates for the anti-creep clamp
    pub const CREEP_EPSILON: f32 = 0.02;
    /// Tangents with a smaller vertical component count as level (no downhill)
    pub const LEVEL_EPSILON: f32 = 1e-4;

    /// Upward velocity added by a jump
    pub const JUMP_IMPULSE: f32 = 6.0;
    /// Hard cap on ball speed
    pub const MAX_SPEED: f32 = 14.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Gap between ball and slope surface at spawn
    pub const SPAWN_CLEARANCE: f32 = 40.0;

    /// Slope defaults
    pub const SLOPE_THICKNESS: f32 = 10.0;
    /// Slope half length as a fraction of canvas width
    pub const SLOPE_HALF_LENGTH_FRACTION: f32 = 0.35;
    /// Slope center height as a fraction of canvas height
    pub const SLOPE_HEIGHT_FRACTION: f32 = 0.6;
    /// Rotation speed while a direction is held (radians/step)
    pub const SLOPE_ROTATION_SPEED: f32 = 0.02;
    /// Maximum tilt either way (radians)
    pub const SLOPE_MAX_TILT: f32 = 1.2;

    /// Height of the deadly ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 20.0;
}

/// Rotate `v` counter-clockwise (in math orientation) by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Perpendicular of a unit normal, used as the contact tangent
#[inline]
pub fn tangent_of(normal: Vec2) -> Vec2 {
    Vec2::new(-normal.y, normal.x)
}
