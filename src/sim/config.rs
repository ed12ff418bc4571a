//! Per-step physics configuration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Everything `step` needs besides the body and obstacles
///
/// Values are already scaled to the current resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Downward acceleration per step
    pub gravity: f32,
    /// Tangential decay factor while in contact (< 1)
    pub friction: f32,
    /// Replaces `friction` for the tangential response when set
    pub tangential_friction: Option<f32>,
    /// Fraction of the raw relative tangential speed kept through contact
    pub tangential_retention: f32,
    /// Normal bounce coefficient for hard impacts
    pub restitution: f32,
    /// Relative normal speed below which a contact is a hard impact (negative)
    pub impact_threshold: f32,
    /// Speed below which the body is forced to rest
    pub stop_threshold: f32,
    /// World size; the ball is reflected back inside `[0, bounds]`
    pub bounds: Vec2,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            tangential_friction: None,
            tangential_retention: TANGENTIAL_RETENTION,
            restitution: RESTITUTION,
            impact_threshold: IMPACT_THRESHOLD,
            stop_threshold: STOP_THRESHOLD,
            bounds: Vec2::new(600.0, REFERENCE_HEIGHT),
        }
    }
}

impl StepConfig {
    /// Friction used for the tangential response
    #[inline]
    pub fn effective_tangential_friction(&self) -> f32 {
        self.tangential_friction.unwrap_or(self.friction)
    }
}
