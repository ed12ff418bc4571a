//! Slope Roll headless runner
//!
//! Plays a scripted session against the simulation and logs what happens.
//! Usage: `slope-roll [tuning.json]`

use glam::Vec2;

use slope_roll::Tuning;
use slope_roll::sim::{GameEvent, GamePhase, GameState, Rect, TickInput, tick};

/// Frames to simulate (about 20 seconds at 60 fps)
const DEMO_TICKS: u64 = 1200;

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("Using default tuning");
        return Tuning::default();
    };

    match Tuning::load(&path) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Failed to load tuning from {path}: {e} - using defaults");
            Tuning::default()
        }
    }
}

/// Scripted input: tilt back and forth, hopping now and then
fn scripted_input(t: u64) -> TickInput {
    let phase = (t / 90) % 4;
    TickInput {
        jump: t % 150 == 149,
        rotate_left: phase == 1,
        rotate_right: phase == 3,
    }
}

fn main() {
    env_logger::init();
    log::info!("Slope Roll (headless) starting...");

    let mut state = GameState::new(Vec2::new(600.0, 800.0), load_tuning());
    // Ledge below the right end of the slope
    if let Err(e) = state.add_platform(Rect::new(440.0, 620.0, 140.0, 16.0)) {
        log::warn!("Skipping ledge: {e}");
    }

    for t in 0..DEMO_TICKS {
        tick(&mut state, &scripted_input(t));

        for event in &state.events {
            match event {
                GameEvent::Landed { speed } => log::debug!("t={t} landed at speed {speed:.2}"),
                GameEvent::Jumped => log::debug!("t={t} jump"),
                GameEvent::GameOver(cause) => log::info!("t={t} game over: {cause:?}"),
            }
        }

        if state.phase == GamePhase::GameOver {
            state.respawn();
        }
    }

    let body = &state.body;
    log::info!(
        "Finished: pos=({:.1}, {:.1}) speed={:.3} contact={} slope_angle={:.2}",
        body.pos.x,
        body.pos.y,
        body.speed,
        body.contact,
        state.slope.angle
    );
}
