//! Simulation module
//!
//! Physics and the per-frame rules layered on it. Everything here is pure and
//! deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Obstacles are rebuilt by the caller every step
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod geometry;
pub mod integrator;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use collision::{Hit, detect, dominant_hit};
pub use config::StepConfig;
pub use geometry::closest_point_on_segment;
pub use integrator::step;
pub use obstacle::{Obstacle, ObstacleKind, Rect, Rotation, Segment};
pub use state::{BodyState, GameEvent, GameOverCause, GamePhase, GameState, Slope};
pub use tick::{TickInput, check_game_over, tick};
