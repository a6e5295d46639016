//! Pong RL - A deterministic two-paddle ball game as a training environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, scoring)
//! - `env`: Gym-style `reset`/`step` wrapper with action repeat
//! - `config`: Environment construction parameters
//! - `stats`: Episode records for headless runs

pub mod config;
pub mod env;
pub mod error;
pub mod sim;
pub mod stats;

pub use config::{EnvConfig, ObservationKind};
pub use env::{Observation, ObservationSpace, PongEnv, StepInfo, StepResult};
pub use error::EnvError;
pub use stats::{EpisodeRecord, RunSummary};

/// Game configuration constants
pub mod consts {
    /// Arena defaults
    pub const DEFAULT_HEIGHT: f32 = 300.0;
    pub const DEFAULT_WIDTH: f32 = 400.0;

    /// Ticks run per external step
    pub const DEFAULT_REPEAT_ACTIONS: u32 = 3;
    /// Matches per episode (odd, first past half wins)
    pub const DEFAULT_NUM_MATCHES: u32 = 7;

    /// Paddle defaults
    pub const DEFAULT_PADDLE_VELOCITY: f32 = 3.0;
    /// Paddle x offset from its side wall is `width / PADDLE_X_DIVISOR`
    pub const PADDLE_X_DIVISOR: f32 = 27.0;
    /// Paddle length is `height / PADDLE_LENGTH_DIVISOR`
    pub const PADDLE_LENGTH_DIVISOR: f32 = 3.0;
    /// Paddle width is `width / PADDLE_WIDTH_DIVISOR`
    pub const PADDLE_WIDTH_DIVISOR: f32 = 50.0;

    /// Thickness of ceiling, floor and side walls
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Ball defaults
    pub const DEFAULT_BALL_VELOCITY: f32 = 2.0;
    pub const DEFAULT_BALL_SIZE: f32 = 10.0;
    /// Launch cone (radians) before mirroring
    pub const LAUNCH_ANGLE_MIN: f32 = std::f32::consts::PI / 8.0;
    pub const LAUNCH_ANGLE_MAX: f32 = std::f32::consts::PI / 3.0;

    /// Opponent policy
    pub const OPPONENT_RELEASE_PROB: f32 = 0.08;
    pub const OPPONENT_LOCK_PROB: f32 = 0.85;
    /// Ball must be past this fraction of arena width before the opponent reacts
    pub const OPPONENT_WAKE_FRACTION: f32 = 0.6;

    /// Reward shaping
    pub const SCORE_REWARD: f32 = 500.0;
    pub const WIN_BONUS: f32 = 2000.0;
}
