//! Gym-style environment wrapper
//!
//! `reset` / `step` over a [`MatchEngine`], with a fixed action repeat and a
//! construction-time choice of observation layout.

use serde::{Deserialize, Serialize};

use crate::config::{EnvConfig, ObservationKind};
use crate::error::EnvError;
use crate::sim::{Action, Frame, MatchEngine, MatchPhase, Score, Side};

/// Observation vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// `[paddle_x, paddle_y, ball_x, ball_y]`
    Full([f32; 4]),
    /// `[paddle_x - ball_x, paddle_y - ball_y]`
    Relative([f32; 2]),
}

impl Observation {
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Observation::Full(values) => values.as_slice(),
            Observation::Relative(values) => values.as_slice(),
        }
    }

    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::Full(_) => ObservationKind::Full,
            Observation::Relative(_) => ObservationKind::Relative,
        }
    }
}

/// Per-dimension bounds of the observation vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub low: Vec<f32>,
    pub high: Vec<f32>,
}

impl ObservationSpace {
    pub fn shape(&self) -> usize {
        self.low.len()
    }
}

/// Extra information about a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Ticks actually simulated (less than the repeat count on termination)
    pub ticks: u32,
    pub score: Score,
    /// Side that scored during this step, if any (the last one wins)
    pub scorer: Option<Side>,
    pub phase: MatchPhase,
}

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    /// Sum of tick rewards over the repeated action
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Pong environment
#[derive(Debug, Clone)]
pub struct PongEnv {
    config: EnvConfig,
    engine: MatchEngine,
}

impl PongEnv {
    /// Number of discrete actions
    pub const ACTION_COUNT: usize = 3;

    /// Validate the config and start the first episode
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        let engine = MatchEngine::new(&config, seed);
        log::info!(
            "Created {}x{} pong env (seed {}, {} observation, repeat {}, best of {})",
            config.width,
            config.height,
            seed,
            config.observation.as_str(),
            config.repeat_actions,
            config.num_matches
        );
        Ok(Self { config, engine })
    }

    /// Start a new episode, reseeding first if a seed is given
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.engine.reseed(seed);
        }
        self.engine.reset_episode();
        self.observation()
    }

    /// Step with a raw action index; anything outside `{0, 1, 2}` is
    /// rejected before any state changes
    pub fn step(&mut self, action: u8) -> Result<StepResult, EnvError> {
        let action = Action::try_from(action)?;
        Ok(self.step_action(action))
    }

    /// Repeat `action` for up to `repeat_actions` ticks, stopping at episode end
    pub fn step_action(&mut self, action: Action) -> StepResult {
        let start_tick = self.engine.time_ticks();
        let mut reward = 0.0;
        let mut scorer = None;

        for _ in 0..self.config.repeat_actions {
            let outcome = self.engine.tick(action);
            reward += outcome.reward;
            if outcome.scorer.is_some() {
                scorer = outcome.scorer;
            }
            if outcome.done {
                break;
            }
        }

        StepResult {
            observation: self.observation(),
            reward,
            done: self.engine.is_done(),
            info: StepInfo {
                ticks: (self.engine.time_ticks() - start_tick) as u32,
                score: self.engine.score(),
                scorer,
                phase: self.engine.phase(),
            },
        }
    }

    /// Current observation in the configured layout
    pub fn observation(&self) -> Observation {
        let paddle = self.engine.player().pos;
        let ball = self.engine.ball().pos;
        match self.config.observation {
            ObservationKind::Full => Observation::Full([paddle.x, paddle.y, ball.x, ball.y]),
            ObservationKind::Relative => {
                Observation::Relative([paddle.x - ball.x, paddle.y - ball.y])
            }
        }
    }

    pub fn observation_space(&self) -> ObservationSpace {
        let (w, h) = (self.config.width, self.config.height);
        match self.config.observation {
            ObservationKind::Full => ObservationSpace {
                low: vec![0.0; ObservationKind::Full.dims()],
                high: vec![w, h, w, h],
            },
            // Each component is the difference of two values in [0, extent]
            ObservationKind::Relative => ObservationSpace {
                low: vec![-w, -h],
                high: vec![w, h],
            },
        }
    }

    pub fn action_count(&self) -> usize {
        Self::ACTION_COUNT
    }

    /// Seed of the current random stream
    pub fn seed(&self) -> u64 {
        self.engine.seed()
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Read-only access to the simulation
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Snapshot for a renderer
    pub fn frame(&self) -> Frame {
        self.engine.frame()
    }

    /// End the episode from outside (e.g. a window close event)
    pub fn abort(&mut self) {
        self.engine.abort();
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }
}
