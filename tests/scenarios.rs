//! End-to-end physics scenarios through the public API

use glam::Vec2;
use proptest::prelude::*;

use slope_roll::sim::{
    BodyState, Obstacle, Segment, StepConfig, closest_point_on_segment, detect, step,
};

const RADIUS: f32 = 15.0;

fn config(restitution: f32) -> StepConfig {
    StepConfig {
        gravity: 0.2,
        friction: 0.995,
        restitution,
        bounds: Vec2::new(600.0, 800.0),
        ..StepConfig::default()
    }
}

fn floor() -> Segment {
    Segment::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), 10.0)
}

fn run(mut body: BodyState, obstacles: &[Obstacle], config: &StepConfig, steps: usize) -> BodyState {
    for _ in 0..steps {
        body = step(&body, obstacles, config);
    }
    body
}

#[test]
fn falling_ball_settles_without_drift() {
    let config = config(0.3);
    let obstacles: [Obstacle; 1] = [floor().into()];
    let body = run(BodyState::new(Vec2::new(50.0, 50.0), RADIUS), &obstacles, &config, 400);

    assert!(body.contact);
    assert!(body.velocity().y.abs() < config.stop_threshold);
    assert!((body.pos.x - 50.0).abs() < 1e-3);
    // Resting on top: 15 + 5 above the centerline
    assert!((body.pos.y - 80.0).abs() < 0.5);
}

/// Surface above the pivot moves toward +x at 0.02 * 5 = 0.1
const SURFACE_SPEED: f32 = 0.1;

/// Horizontal velocity must approach the contact-point velocity without passing it
fn assert_carried(body: &BodyState, start_x: f32) {
    let vx = body.velocity().x;
    assert!(body.contact);
    assert!(vx > 0.5 * SURFACE_SPEED, "carry too slow: vx={vx}");
    assert!(vx <= SURFACE_SPEED + 1e-3, "carry overshoots: vx={vx}");
    assert!(body.pos.x > start_x);
}

#[test]
fn spinning_slope_carries_ball() {
    let config = config(0.3);
    let obstacles: [Obstacle; 1] = [floor().with_rotation(Vec2::new(50.0, 100.0), 0.02).into()];

    let body = run(BodyState::new(Vec2::new(50.0, 50.0), RADIUS), &obstacles, &config, 700);
    assert_carried(&body, 50.0);
}

#[test]
fn spinning_slope_carries_ball_landing_off_pivot() {
    let config = config(0.3);
    // Long enough that the ball stays on the slope while it is carried
    let slope = Segment::new(Vec2::new(-100.0, 100.0), Vec2::new(200.0, 100.0), 10.0)
        .with_rotation(Vec2::new(50.0, 100.0), 0.02);
    let obstacles: [Obstacle; 1] = [slope.into()];

    let mut body = BodyState::new(Vec2::new(60.0, 50.0), RADIUS);
    let mut previous_vx = f32::NEG_INFINITY;
    for i in 0..800 {
        body = step(&body, &obstacles, &config);
        // Once settled the carry only ever grows
        if i >= 200 {
            assert!(body.velocity().x >= previous_vx - 1e-6, "step {i}");
        }
        previous_vx = body.velocity().x;
    }
    assert_carried(&body, 60.0);
}

#[test]
fn static_ball_at_rest_never_bounces() {
    let config = config(0.3);
    let obstacles: [Obstacle; 1] = [floor().into()];
    let mut body = BodyState::new(Vec2::new(50.0, 80.0), RADIUS);
    for _ in 0..500 {
        body = step(&body, &obstacles, &config);
        assert!(body.contact);
        assert!(body.speed <= config.stop_threshold);
    }
}

#[test]
fn restitution_scales_bounce() {
    let obstacles: [Obstacle; 1] = [floor().into()];
    let incoming = BodyState::new(Vec2::new(50.0, 79.0), RADIUS).with_velocity(Vec2::new(0.0, 2.0));

    let mut previous = 0.0;
    for restitution in [0.3, 0.7] {
        let out = step(&incoming, &obstacles, &config(restitution));
        assert!(out.contact);
        let up = -out.velocity().y;
        assert!((up - 2.0 * restitution).abs() < 1e-4, "restitution {restitution}: {up}");
        assert!(up > previous);
        previous = up;
    }
}

#[test]
fn wall_flips_outward_velocity() {
    let config = config(0.3);
    let body = BodyState::new(Vec2::new(20.0, 300.0), RADIUS).with_velocity(Vec2::new(-10.0, 0.0));
    let next = step(&body, &[], &config);
    assert!((next.velocity().x - 10.0).abs() < 1e-6);
    assert!(next.pos.x >= 0.0);
}

#[test]
fn center_on_segment_reports_full_penetration() {
    let obstacles: [Obstacle; 1] = [floor().into()];
    let hits = detect(Vec2::new(50.0, 100.0), RADIUS, &obstacles);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].penetration - (RADIUS + 5.0)).abs() < 1e-6);

    assert!(detect(Vec2::new(50.0, -200.0), RADIUS, &obstacles).is_empty());
}

proptest! {
    #[test]
    fn resolved_contacts_do_not_penetrate(
        x in 250.0f32..350.0,
        y in 250.0f32..279.0,
        vx in -5.0f32..5.0,
        vy in -5.0f32..5.0,
        angle in -0.3f32..0.3,
        omega in -0.05f32..0.05,
    ) {
        let center = Vec2::new(300.0, 300.0);
        let half = Vec2::from_angle(angle).rotate(Vec2::new(60.0, 0.0));
        let segment = Segment::new(center - half, center + half, 10.0).with_rotation(center, omega);
        let obstacles: [Obstacle; 1] = [segment.into()];

        let body = BodyState::new(Vec2::new(x, y), RADIUS).with_velocity(Vec2::new(vx, vy));
        let next = step(&body, &obstacles, &config(0.3));

        if next.contact {
            let (closest, _) = closest_point_on_segment(next.pos, segment.a, segment.b);
            // Exact hits on the centerline have no normal to push along
            prop_assume!(next.pos.distance(closest) > 1e-3);
            prop_assert!(next.pos.distance(closest) >= RADIUS + 5.0 - 1e-3);
        }
    }

    #[test]
    fn ball_stays_inside_world(
        x in 15.0f32..585.0,
        y in 15.0f32..785.0,
        vx in -20.0f32..20.0,
        vy in -20.0f32..20.0,
    ) {
        let config = config(0.3);
        let mut body = BodyState::new(Vec2::new(x, y), RADIUS).with_velocity(Vec2::new(vx, vy));
        for _ in 0..100 {
            body = step(&body, &[], &config);
            prop_assert!(body.pos.x >= 0.0 && body.pos.x <= config.bounds.x);
            prop_assert!(body.pos.y >= 0.0 && body.pos.y <= config.bounds.y);
        }
    }
}
