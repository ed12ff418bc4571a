//! Obstacle shapes the ball collides with
//!
//! Two shapes only:
//! - `Segment`: a thick line segment (capsule), optionally spinning about a center
//! - `Rect`: a static axis-aligned box
//!
//! Obstacles are rebuilt by the host every step; the physics never mutates them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ObstacleError;

/// Spin applied to a segment (for carrying the ball)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Pivot the segment rotates about
    pub center: Vec2,
    /// Radians per step (positive turns +x toward +y)
    pub angular_velocity: f32,
}

/// A thickened line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    /// Full thickness (capsule radius is half of this)
    pub thickness: f32,
    pub rotation: Option<Rotation>,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, thickness: f32) -> Self {
        Self {
            a,
            b,
            thickness,
            rotation: None,
        }
    }

    /// Attach a rotation center and angular velocity
    pub fn with_rotation(mut self, center: Vec2, angular_velocity: f32) -> Self {
        self.rotation = Some(Rotation {
            center,
            angular_velocity,
        });
        self
    }

    #[inline]
    pub fn half_thickness(&self) -> f32 {
        self.thickness * 0.5
    }

    /// Velocity of a point rigidly attached to the spinning segment
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        match self.rotation {
            Some(rot) if rot.angular_velocity != 0.0 => {
                let d = point - rot.center;
                Vec2::new(-rot.angular_velocity * d.y, rot.angular_velocity * d.x)
            }
            _ => Vec2::ZERO,
        }
    }
}

/// A static axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// Discriminator for hit records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Segment,
    Rect,
}

/// Anything the ball can collide with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Segment(Segment),
    Rect(Rect),
}

impl From<Segment> for Obstacle {
    fn from(segment: Segment) -> Self {
        Obstacle::Segment(segment)
    }
}

impl From<Rect> for Obstacle {
    fn from(rect: Rect) -> Self {
        Obstacle::Rect(rect)
    }
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Segment(_) => ObstacleKind::Segment,
            Obstacle::Rect(_) => ObstacleKind::Rect,
        }
    }

    /// Surface velocity at `point` (zero for anything not spinning)
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        match self {
            Obstacle::Segment(segment) => segment.velocity_at(point),
            Obstacle::Rect(_) => Vec2::ZERO,
        }
    }

    /// Reject configurations that would make collision results meaningless
    pub fn validate(&self) -> Result<(), ObstacleError> {
        match self {
            Obstacle::Segment(s) => {
                finite("a.x", s.a.x)?;
                finite("a.y", s.a.y)?;
                finite("b.x", s.b.x)?;
                finite("b.y", s.b.y)?;
                finite("thickness", s.thickness)?;
                if s.thickness < 0.0 {
                    return Err(ObstacleError::NegativeThickness(s.thickness));
                }
                if let Some(rot) = s.rotation {
                    finite("center.x", rot.center.x)?;
                    finite("center.y", rot.center.y)?;
                    finite("angular_velocity", rot.angular_velocity)?;
                }
                Ok(())
            }
            Obstacle::Rect(r) => {
                finite("x", r.x)?;
                finite("y", r.y)?;
                finite("w", r.w)?;
                finite("h", r.h)?;
                if r.w < 0.0 || r.h < 0.0 {
                    return Err(ObstacleError::NegativeExtent { w: r.w, h: r.h });
                }
                Ok(())
            }
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ObstacleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ObstacleError::NonFinite { field, value })
    }
}
