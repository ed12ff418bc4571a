//! Per-frame host tick
//!
//! Drives the slope from input, steps the ball, and applies the rules built on
//! top of the physics: jump permission, speed cap and game over.

use glam::Vec2;

use super::integrator::step;
use super::state::{BodyState, GameEvent, GameOverCause, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested this frame
    pub jump: bool,
    /// Rotate the slope counter-clockwise (left end dips)
    pub rotate_left: bool,
    /// Rotate the slope clockwise (right end dips)
    pub rotate_right: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    let tuning = &state.tuning;
    state.slope.apply_rotation(
        input.rotate_left,
        input.rotate_right,
        tuning.slope_rotation_speed,
        tuning.slope_max_tilt,
    );

    let obstacles = state.obstacles();
    let was_touching = state.body.contact;
    let incoming_speed = state.body.speed;

    state.body = step(&state.body, &obstacles, &state.config);
    state.time_ticks += 1;

    if state.body.contact {
        state.can_jump = true;
        if !was_touching {
            state.events.push(GameEvent::Landed {
                speed: incoming_speed,
            });
        }
    }

    if input.jump && state.can_jump {
        let impulse = state.tuning.jump_impulse(state.scale);
        state.body.apply_impulse(Vec2::new(0.0, -impulse));
        state.can_jump = false;
        state.events.push(GameEvent::Jumped);
    }

    state.body.clamp_speed(state.tuning.max_speed(state.scale));

    let ground = state.tuning.ground_height * state.scale;
    if let Some(cause) = check_game_over(&state.body, state.bounds, ground) {
        log::info!(
            "Game over ({:?}) after {} ticks at ({:.1}, {:.1})",
            cause,
            state.time_ticks,
            state.body.pos.x,
            state.body.pos.y
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver(cause));
    }
}

/// Ground strip or lost-ball check
///
/// The integrator keeps every finite position inside the world, so the ball
/// only counts as off screen once its position is no longer finite.
pub fn check_game_over(body: &BodyState, bounds: Vec2, ground_height: f32) -> Option<GameOverCause> {
    let pos = body.pos;

    if !pos.is_finite() {
        return Some(GameOverCause::OffScreen);
    }
    if pos.y + body.radius >= bounds.y - ground_height {
        return Some(GameOverCause::Ground);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;

    fn new_state() -> GameState {
        GameState::new(Vec2::new(600.0, 800.0), Tuning::default())
    }

    fn settle(state: &mut GameState) {
        for _ in 0..240 {
            tick(state, &TickInput::default());
        }
    }

    #[test]
    fn test_ball_lands_and_arms_jump() {
        let mut state = new_state();

        // Falling: jump is ignored
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(!state.events.contains(&GameEvent::Jumped));
        assert!(!state.can_jump);

        let mut landed = false;
        for _ in 0..240 {
            tick(&mut state, &TickInput::default());
            landed |= state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Landed { .. }));
        }
        assert!(landed);
        assert!(state.body.contact);
        assert!(state.can_jump);
        assert_eq!(state.phase, GamePhase::Playing);
        // Level slope: no drift
        assert!((state.body.pos.x - state.slope.center.x).abs() < 1e-3);
    }

    #[test]
    fn test_jump_consumes_permission() {
        let mut state = new_state();
        settle(&mut state);
        assert!(state.can_jump);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(state.events.contains(&GameEvent::Jumped));
        assert!(!state.can_jump);
        assert!(state.body.velocity().y < -5.0);

        // Still airborne next frame: no second jump
        tick(&mut state, &jump);
        assert!(!state.events.contains(&GameEvent::Jumped));
        assert!(!state.body.contact);
    }

    #[test]
    fn test_tilting_rolls_ball_downhill() {
        let mut state = new_state();
        settle(&mut state);
        let start_x = state.body.pos.x;

        let right = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &right);
        }
        assert!(state.slope.angle > 0.0);
        assert!(state.body.pos.x > start_x + 1.0);
        assert!(state.body.velocity().x > 0.0);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut state = new_state();
        state.body = state.body.with_velocity(Vec2::new(100.0, 0.0));
        tick(&mut state, &TickInput::default());
        assert!(state.body.speed <= state.tuning.max_speed(state.scale) + 1e-4);
    }

    #[test]
    fn test_ground_ends_run() {
        let mut state = new_state();
        state.body.pos = Vec2::new(40.0, 770.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state
            .events
            .contains(&GameEvent::GameOver(GameOverCause::Ground)));

        // Frozen until respawn
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());

        state.respawn();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_off_screen_check() {
        let bounds = Vec2::new(600.0, 800.0);
        let mut body = BodyState::new(Vec2::new(300.0, 300.0), 15.0);
        assert_eq!(check_game_over(&body, bounds, 20.0), None);

        body.pos = Vec2::new(f32::NAN, 300.0);
        assert_eq!(check_game_over(&body, bounds, 20.0), Some(GameOverCause::OffScreen));

        body.pos = Vec2::new(300.0, 770.0);
        assert_eq!(check_game_over(&body, bounds, 20.0), Some(GameOverCause::Ground));
    }

    #[test]
    fn test_hurled_ball_stays_in_play() {
        let mut state = new_state();
        state.body = BodyState::new(Vec2::new(20.0, 200.0), state.body.radius)
            .with_velocity(Vec2::new(-40.0, -40.0));

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Playing);
            assert!(state.body.pos.x >= 0.0 && state.body.pos.y >= 0.0);
        }
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                rotate_left: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut state1 = new_state();
        let mut state2 = new_state();
        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.body, state2.body);
        assert_eq!(state1.slope, state2.slope);
    }
}
