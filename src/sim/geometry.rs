//! Geometry primitives for capsule and box collision

use glam::Vec2;

/// Closest point on the finite segment `a`-`b` to `p`
///
/// Returns the point and its parameter `t` in [0, 1]. A zero-length segment
/// returns `a` with `t = 0`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> (Vec2, f32) {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return (a, 0.0);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Closest point inside the axis-aligned box `[min, max]` to `p`
///
/// Points inside the box map to themselves.
#[inline]
pub fn closest_point_on_rect(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    // max/min instead of clamp: clamp asserts min <= max
    p.max(min).min(max)
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_or_zero(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
