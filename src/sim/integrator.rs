//! Physics integrator
//!
//! Advances the ball one step against the current obstacle list. The tricky
//! part is the slope: it spins while the ball sits on it, so the contact is
//! resolved in the slope's local frame (relative velocity) and the surface
//! velocity is added back afterwards. That is what lets the slope carry the
//! ball instead of sliding out from under it.
//!
//! Only the deepest contact is resolved each step.

use glam::Vec2;

use super::collision::{Hit, detect, dominant_hit};
use super::config::StepConfig;
use super::obstacle::Obstacle;
use super::state::BodyState;
use crate::consts::{CREEP_EPSILON, LEVEL_EPSILON};
use crate::tangent_of;

/// Advance `body` by one step
///
/// Never fails: degenerate input yields a best-effort state (NaN propagates,
/// zero-normal contacts produce no push-out).
pub fn step(body: &BodyState, obstacles: &[Obstacle], config: &StepConfig) -> BodyState {
    let gravity = Vec2::new(0.0, config.gravity);
    let radius = body.radius;

    let mut vel = body.velocity();
    vel = reflect_at_bounds(body.pos + vel + gravity, vel, radius, config.bounds);

    let tentative = body.pos + vel + gravity;
    let hits = detect(tentative, radius, obstacles);

    let mut next = *body;
    match dominant_hit(&hits) {
        None => {
            next.pos = contain(tentative, radius, config.bounds);
            next.contact = false;
            settle(&mut next, vel + gravity, Vec2::ZERO, config.stop_threshold);
        }
        Some(hit) => {
            let surface_vel = obstacles[hit.obstacle].velocity_at(hit.surface);
            let out = resolve_contact(hit, vel, surface_vel, config);

            let corrected = tentative + hit.normal * hit.penetration;
            next.pos = contain(corrected, radius, config.bounds);
            next.contact = true;
            settle(&mut next, out, surface_vel, config.stop_threshold);
        }
    }
    next
}

/// Outgoing velocity after resolving `hit`
///
/// `vel` is the pre-gravity velocity; `surface_vel` the obstacle's velocity at
/// the contact point.
pub fn resolve_contact(hit: &Hit, vel: Vec2, surface_vel: Vec2, config: &StepConfig) -> Vec2 {
    let normal = hit.normal;
    if normal == Vec2::ZERO {
        log::debug!(
            "degenerate contact with obstacle {} (center on surface), no normal",
            hit.obstacle
        );
    }
    let tangent = tangent_of(normal);
    let gravity = Vec2::new(0.0, config.gravity);

    let rel = vel - surface_vel;
    let rel_n = rel.dot(normal);
    let rel_t = rel.dot(tangent);
    let surface_n = surface_vel.dot(normal);
    let surface_t = surface_vel.dot(tangent);
    let falling_n = (vel + gravity).dot(normal);
    let gravity_t = gravity.dot(tangent);

    let out_n = if rel_n < config.impact_threshold {
        log::debug!("hard impact: rel_n={rel_n:.3} restitution={}", config.restitution);
        -rel_n * config.restitution + surface_n
    } else if falling_n > 0.0 {
        falling_n
    } else {
        // Resting: ride the surface exactly
        surface_n
    };

    let damped_t = (rel_t + gravity_t) * config.effective_tangential_friction();
    let kept = config.tangential_retention;
    let mut out_t = damped_t * (1.0 - kept) + rel_t * kept + surface_t;

    // Moving along +tangent goes downhill when tangent.y > 0 (y grows down)
    let downhill = tangent.y;
    if out_t.abs() < CREEP_EPSILON && downhill.abs() > LEVEL_EPSILON && out_t * downhill < 0.0 {
        out_t = 0.0;
    }

    let mut out = normal * out_n + tangent * out_t;
    let into_surface = out.dot(normal);
    if into_surface < 0.0 {
        out -= normal * into_surface;
    }
    out
}

/// Flip velocity components that would carry the ball out of the world
pub fn reflect_at_bounds(next: Vec2, mut vel: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    if (next.x - radius < 0.0 && vel.x < 0.0) || (next.x + radius > bounds.x && vel.x > 0.0) {
        vel.x = -vel.x;
    }
    if (next.y - radius < 0.0 && vel.y < 0.0) || (next.y + radius > bounds.y && vel.y > 0.0) {
        vel.y = -vel.y;
    }
    vel
}

/// Keep the ball center inside the world
///
/// Reflection alone can't hold a ball that gravity presses against the floor.
fn contain(pos: Vec2, radius: f32, bounds: Vec2) -> Vec2 {
    let lo = Vec2::splat(radius).min(bounds * 0.5);
    let hi = (bounds - Vec2::splat(radius)).max(bounds * 0.5);
    pos.max(lo).min(hi)
}

/// Commit `vel`, forcing a full stop when the ball is at rest
///
/// On a moving surface the ball only stops if it is also at rest relative to
/// that surface, otherwise a slow platform could never start carrying it.
fn settle(body: &mut BodyState, vel: Vec2, surface_vel: Vec2, stop_threshold: f32) {
    if vel.length() < stop_threshold && (vel - surface_vel).length() < stop_threshold {
        body.stop();
    } else {
        body.set_velocity(vel);
    }
}
