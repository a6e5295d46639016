//! Environment construction parameters
//!
//! Loaded from JSON (every field optional) and validated before an
//! environment is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EnvError;

/// Observation layout, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    /// `[paddle_x, paddle_y, ball_x, ball_y]`
    #[default]
    Full,
    /// `[paddle_x - ball_x, paddle_y - ball_y]`
    Relative,
}

impl ObservationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationKind::Full => "full",
            ObservationKind::Relative => "relative",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(ObservationKind::Full),
            "relative" | "easy" => Some(ObservationKind::Relative),
            _ => None,
        }
    }

    /// Number of values in an observation of this kind
    pub fn dims(&self) -> usize {
        match self {
            ObservationKind::Full => 4,
            ObservationKind::Relative => 2,
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    // === Arena ===
    pub height: f32,
    pub width: f32,

    // === Stepping ===
    /// Ticks simulated per `step` call
    pub repeat_actions: u32,
    /// Episode ends once either side has won more than half of this many matches
    pub num_matches: u32,

    // === Kinematics ===
    pub paddle_velocity: f32,
    pub ball_velocity: f32,
    /// Half extent of the square ball collider
    pub ball_size: f32,

    pub observation: ObservationKind,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,

            repeat_actions: DEFAULT_REPEAT_ACTIONS,
            num_matches: DEFAULT_NUM_MATCHES,

            paddle_velocity: DEFAULT_PADDLE_VELOCITY,
            ball_velocity: DEFAULT_BALL_VELOCITY,
            ball_size: DEFAULT_BALL_SIZE,

            observation: ObservationKind::Full,
        }
    }
}

impl EnvConfig {
    /// Default configuration with the relative-offset observation
    pub fn relative() -> Self {
        Self {
            observation: ObservationKind::Relative,
            ..Self::default()
        }
    }

    /// Reject non-positive dimensions, velocities and counts
    pub fn validate(&self) -> Result<(), EnvError> {
        let dimensions = [
            ("height", self.height),
            ("width", self.width),
            ("paddle_velocity", self.paddle_velocity),
            ("ball_velocity", self.ball_velocity),
            ("ball_size", self.ball_size),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(EnvError::InvalidConfiguration(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.repeat_actions == 0 {
            return Err(EnvError::InvalidConfiguration(
                "repeat_actions must be at least 1".into(),
            ));
        }
        if self.num_matches == 0 {
            return Err(EnvError::InvalidConfiguration(
                "num_matches must be at least 1".into(),
            ));
        }
        if self.num_matches % 2 == 0 {
            log::warn!(
                "num_matches = {} is even; the episode ends at {} wins",
                self.num_matches,
                self.num_matches / 2 + 1
            );
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, EnvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
