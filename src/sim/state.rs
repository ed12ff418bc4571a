//! Ball, slope and host game state
//!
//! The ball's direction and speed are stored alongside its velocity so a body
//! that comes to rest still remembers which way it was heading.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::StepConfig;
use super::obstacle::{Obstacle, Rect, Segment};
use crate::consts::SPAWN_CLEARANCE;
use crate::error::ObstacleError;
use crate::rotate;
use crate::settings::Tuning;

/// Kinematic state of the ball, replaced wholesale every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub pos: Vec2,
    /// Unit heading (zero when stopped)
    pub dir: Vec2,
    pub speed: f32,
    /// Explicit velocity; when absent the step rebuilds it from `dir * speed`
    pub vel: Option<Vec2>,
    pub radius: f32,
    /// Whether the last step resolved a contact
    #[serde(default)]
    pub contact: bool,
}

impl BodyState {
    /// A body at rest
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            dir: Vec2::ZERO,
            speed: 0.0,
            vel: Some(Vec2::ZERO),
            radius,
            contact: false,
        }
    }

    /// Same body with a new velocity (direction and speed re-derived)
    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.set_velocity(vel);
        self
    }

    /// Velocity to integrate from: persisted if present, otherwise rebuilt
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel.unwrap_or(self.dir * self.speed)
    }

    /// Store `vel` and re-derive direction and speed
    pub fn set_velocity(&mut self, vel: Vec2) {
        let speed = vel.length();
        self.vel = Some(vel);
        self.speed = speed;
        if speed > 0.0 {
            self.dir = vel / speed;
        }
    }

    /// Zero every motion field at once
    pub fn stop(&mut self) {
        self.dir = Vec2::ZERO;
        self.speed = 0.0;
        self.vel = Some(Vec2::ZERO);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.speed == 0.0 && self.velocity() == Vec2::ZERO
    }

    /// Add an instantaneous velocity change (jump)
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        let vel = self.velocity() + impulse;
        self.set_velocity(vel);
    }

    /// Cap the speed, keeping direction
    pub fn clamp_speed(&mut self, max_speed: f32) {
        let vel = self.velocity();
        if vel.length() > max_speed {
            self.set_velocity(vel.clamp_length_max(max_speed));
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball is live
    Playing,
    /// Run ended; waiting for the host to respawn
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Ball touched the ground strip
    Ground,
    /// Ball position stopped being finite (containment keeps finite positions on screen)
    OffScreen,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball touched down after being airborne
    Landed { speed: f32 },
    Jumped,
    GameOver(GameOverCause),
}

/// The rotating platform the ball rolls on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slope {
    /// Pivot (also the segment midpoint)
    pub center: Vec2,
    pub half_length: f32,
    pub thickness: f32,
    /// Current tilt (radians, positive dips the right end)
    pub angle: f32,
    /// Change of `angle` during the last tick (radians/step)
    pub angular_vel: f32,
}

impl Slope {
    /// Level slope placed for a world of `bounds`
    pub fn new(bounds: Vec2, tuning: &Tuning, scale: f32) -> Self {
        Self {
            center: Vec2::new(bounds.x * 0.5, bounds.y * tuning.slope_height_fraction),
            half_length: bounds.x * tuning.slope_half_length_fraction,
            thickness: tuning.slope_thickness * scale,
            angle: 0.0,
            angular_vel: 0.0,
        }
    }

    /// Rotate from the direction buttons, staying within `max_tilt`
    ///
    /// Holding both directions (or neither) leaves the slope still.
    pub fn apply_rotation(&mut self, left: bool, right: bool, speed: f32, max_tilt: f32) {
        let dir = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        let target = (self.angle + dir * speed).clamp(-max_tilt, max_tilt);
        self.angular_vel = target - self.angle;
        self.angle = target;
    }

    /// Current rotated endpoints (left, right)
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = rotate(Vec2::new(self.half_length, 0.0), self.angle);
        (self.center - half, self.center + half)
    }

    /// Collision shape for this step, spinning about the center
    pub fn as_obstacle(&self) -> Obstacle {
        let (a, b) = self.endpoints();
        Segment::new(a, b, self.thickness)
            .with_rotation(self.center, self.angular_vel)
            .into()
    }
}

/// Everything the host persists between frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub body: BodyState,
    pub slope: Slope,
    /// Extra static platforms, validated on insert
    platforms: Vec<Rect>,
    /// Re-armed by contact, consumed by a jump
    pub can_jump: bool,
    pub time_ticks: u64,
    /// World size (canvas dimensions)
    pub bounds: Vec2,
    /// Resolution scale relative to the tuning's reference height
    pub scale: f32,
    pub tuning: Tuning,
    /// Derived from `tuning` and `bounds`
    pub config: StepConfig,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(bounds: Vec2, tuning: Tuning) -> Self {
        let scale = tuning.scale_for(bounds.y);
        let config = tuning.step_config(bounds);
        let slope = Slope::new(bounds, &tuning, scale);
        let body = BodyState::new(spawn_point(&slope, &tuning, scale), tuning.ball_radius * scale);

        Self {
            phase: GamePhase::Playing,
            body,
            slope,
            platforms: Vec::new(),
            can_jump: false,
            time_ticks: 0,
            bounds,
            scale,
            tuning,
            config,
            events: Vec::new(),
        }
    }

    /// Start a new run in the same world
    pub fn respawn(&mut self) {
        self.slope = Slope::new(self.bounds, &self.tuning, self.scale);
        self.body = BodyState::new(
            spawn_point(&self.slope, &self.tuning, self.scale),
            self.tuning.ball_radius * self.scale,
        );
        self.can_jump = false;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.events.clear();
        log::info!("Respawned at ({:.1}, {:.1})", self.body.pos.x, self.body.pos.y);
    }

    /// Add a static platform, rejecting degenerate boxes
    pub fn add_platform(&mut self, rect: Rect) -> Result<(), ObstacleError> {
        Obstacle::Rect(rect).validate()?;
        self.platforms.push(rect);
        Ok(())
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Obstacles for the current step: slope first, then platforms
    pub fn obstacles(&self) -> Vec<Obstacle> {
        std::iter::once(self.slope.as_obstacle())
            .chain(self.platforms.iter().map(|&rect| Obstacle::Rect(rect)))
            .collect()
    }
}

/// Ball spawn point, a little above the middle of the slope
fn spawn_point(slope: &Slope, tuning: &Tuning, scale: f32) -> Vec2 {
    let lift = slope.thickness * 0.5 + (tuning.ball_radius + SPAWN_CLEARANCE) * scale;
    slope.center - Vec2::new(0.0, lift)
}
