//! Narrow-phase collision detection
//!
//! Circle against capsules and boxes. Detection is pure: it reports every
//! overlapping obstacle and leaves picking the one to resolve to the caller.

use glam::Vec2;

use super::geometry::{closest_point_on_rect, closest_point_on_segment, direction_or_zero};
use super::obstacle::{Obstacle, ObstacleKind};

/// A single overlap between the ball and an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the source obstacle in the slice passed to `detect`
    pub obstacle: usize,
    pub kind: ObstacleKind,
    /// Closest point on the obstacle's core shape (segment centerline or box)
    pub point: Vec2,
    /// Point on the obstacle surface along the normal
    pub surface: Vec2,
    /// Unit normal from obstacle toward ball center, zero when ambiguous
    pub normal: Vec2,
    /// Overlap depth, always >= 0
    pub penetration: f32,
}

/// Every obstacle the ball at `center` overlaps
///
/// Touching (distance equal to the combined radius) counts as a hit with zero
/// penetration, so a resting ball keeps reporting contact.
pub fn detect(center: Vec2, radius: f32, obstacles: &[Obstacle]) -> Vec<Hit> {
    obstacles
        .iter()
        .enumerate()
        .filter_map(|(index, obstacle)| detect_one(center, radius, index, obstacle))
        .collect()
}

/// Check the ball against one obstacle
pub fn detect_one(center: Vec2, radius: f32, index: usize, obstacle: &Obstacle) -> Option<Hit> {
    let (point, reach) = match obstacle {
        Obstacle::Segment(seg) => {
            let (closest, _t) = closest_point_on_segment(center, seg.a, seg.b);
            (closest, seg.half_thickness())
        }
        Obstacle::Rect(rect) => (closest_point_on_rect(center, rect.min(), rect.max()), 0.0),
    };

    let effective_radius = radius + reach;
    let dist = center.distance(point);
    // Written as a negated `>` so NaN input falls through to a miss
    if !(dist <= effective_radius) {
        return None;
    }

    let normal = direction_or_zero(point, center);
    Some(Hit {
        obstacle: index,
        kind: obstacle.kind(),
        point,
        surface: point + normal * reach,
        normal,
        penetration: effective_radius - dist,
    })
}

/// The hit with the greatest penetration
///
/// Only this contact is resolved per step; overlapping secondary contacts are
/// left for later steps.
pub fn dominant_hit(hits: &[Hit]) -> Option<&Hit> {
    hits.iter()
        .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
}
