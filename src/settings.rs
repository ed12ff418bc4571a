//! Data-driven tuning
//!
//! Constants are authored at the reference resolution and scaled to the
//! actual canvas so the game feels the same at any size.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::StepConfig;

/// Game tuning at the reference resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Canvas height these values were authored for
    pub reference_height: f32,

    // === Integrator ===
    pub gravity: f32,
    pub friction: f32,
    /// Optional tangential friction override
    pub tangential_friction: Option<f32>,
    pub tangential_retention: f32,
    pub restitution: f32,
    pub impact_threshold: f32,
    pub stop_threshold: f32,

    // === Player ===
    pub jump_impulse: f32,
    pub max_speed: f32,
    pub ball_radius: f32,

    // === Slope ===
    pub slope_thickness: f32,
    pub slope_half_length_fraction: f32,
    pub slope_height_fraction: f32,
    pub slope_rotation_speed: f32,
    pub slope_max_tilt: f32,

    /// Deadly strip along the bottom edge
    pub ground_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_height: REFERENCE_HEIGHT,

            gravity: GRAVITY,
            friction: FRICTION,
            tangential_friction: None,
            tangential_retention: TANGENTIAL_RETENTION,
            restitution: RESTITUTION,
            impact_threshold: IMPACT_THRESHOLD,
            stop_threshold: STOP_THRESHOLD,

            jump_impulse: JUMP_IMPULSE,
            max_speed: MAX_SPEED,
            ball_radius: BALL_RADIUS,

            slope_thickness: SLOPE_THICKNESS,
            slope_half_length_fraction: SLOPE_HALF_LENGTH_FRACTION,
            slope_height_fraction: SLOPE_HEIGHT_FRACTION,
            slope_rotation_speed: SLOPE_ROTATION_SPEED,
            slope_max_tilt: SLOPE_MAX_TILT,

            ground_height: GROUND_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning (gravity={}, restitution={})", tuning.gravity, tuning.restitution);
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<(), TuningError> {
        let unit = [
            ("friction", self.friction),
            ("tangential_retention", self.tangential_retention),
            ("restitution", self.restitution),
            ("slope_half_length_fraction", self.slope_half_length_fraction),
            ("slope_height_fraction", self.slope_height_fraction),
        ];
        for (field, value) in unit {
            check(field, value, (0.0..=1.0).contains(&value))?;
        }
        if let Some(value) = self.tangential_friction {
            check("tangential_friction", value, (0.0..=1.0).contains(&value))?;
        }

        let positive = [
            ("reference_height", self.reference_height),
            ("gravity", self.gravity),
            ("stop_threshold", self.stop_threshold),
            ("max_speed", self.max_speed),
            ("ball_radius", self.ball_radius),
        ];
        for (field, value) in positive {
            check(field, value, value > 0.0)?;
        }

        let non_negative = [
            ("jump_impulse", self.jump_impulse),
            ("slope_thickness", self.slope_thickness),
            ("slope_rotation_speed", self.slope_rotation_speed),
            ("slope_max_tilt", self.slope_max_tilt),
            ("ground_height", self.ground_height),
        ];
        for (field, value) in non_negative {
            check(field, value, value >= 0.0)?;
        }

        check("impact_threshold", self.impact_threshold, self.impact_threshold <= 0.0)
    }

    /// Resolution scale for a canvas of the given height
    #[inline]
    pub fn scale_for(&self, height: f32) -> f32 {
        height / self.reference_height
    }

    /// Per-step physics configuration for a world of `bounds`
    pub fn step_config(&self, bounds: Vec2) -> StepConfig {
        let scale = self.scale_for(bounds.y);
        StepConfig {
            gravity: self.gravity * scale,
            friction: self.friction,
            tangential_friction: self.tangential_friction,
            tangential_retention: self.tangential_retention,
            restitution: self.restitution,
            impact_threshold: self.impact_threshold,
            stop_threshold: self.stop_threshold * scale,
            bounds,
        }
    }

    #[inline]
    pub fn jump_impulse(&self, scale: f32) -> f32 {
        self.jump_impulse * scale
    }

    #[inline]
    pub fn max_speed(&self, scale: f32) -> f32 {
        self.max_speed * scale
    }
}

fn check(field: &'static str, value: f32, in_range: bool) -> Result<(), TuningError> {
    if value.is_finite() && in_range {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, value })
    }
}
