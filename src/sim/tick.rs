//! Discrete simulation tick
//!
//! The engine owns every paddle, the ball, the scoring state and the random
//! stream. One call to [`MatchEngine::tick`] is one atomic state transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{Collider, HitSet, resolve};
use super::paddle::{Action, MovePolicy, Orientation, Paddle};
use super::rng::RandomStream;
use super::state::{MatchPhase, MatchState, Score, Side};
use crate::config::EnvConfig;
use crate::consts::*;

/// Boundary indices, also the collision test order
pub const PLAYER: usize = 0;
pub const OPPONENT: usize = 1;
pub const CEILING: usize = 2;
pub const FLOOR: usize = 3;
pub const LEFT_WALL: usize = 4;
pub const RIGHT_WALL: usize = 5;
pub const BOUNDARY_COUNT: usize = 6;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Signed reward: positive when the player scored
    pub reward: f32,
    pub scorer: Option<Side>,
    /// Episode is over after this tick
    pub done: bool,
    /// Boundaries the ball overlapped this tick
    pub hits: HitSet,
}

impl TickOutcome {
    fn idle(done: bool) -> Self {
        Self {
            reward: 0.0,
            scorer: None,
            done,
            hits: HitSet::default(),
        }
    }
}

/// Read-only snapshot for renderers and input collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub arena: Vec2,
    /// Colliders in boundary index order
    pub boundaries: [Collider; BOUNDARY_COUNT],
    pub ball: Collider,
    pub score: Score,
    pub phase: MatchPhase,
    pub tick: u64,
}

/// Owns and advances the whole simulation
#[derive(Debug, Clone)]
pub struct MatchEngine {
    arena: Vec2,
    paddles: [Paddle; BOUNDARY_COUNT],
    ball: Ball,
    state: MatchState,
    rng: RandomStream,
    /// Simulation tick counter (reset per episode)
    time_ticks: u64,
}

impl MatchEngine {
    /// Build the arena from a validated config and start the first episode,
    /// with the ball already launched from the first draws of `seed`
    pub fn new(config: &EnvConfig, seed: u64) -> Self {
        let arena = Vec2::new(config.width, config.height);
        let mut engine = Self {
            arena,
            paddles: layout(config),
            ball: Ball::new(arena / 2.0, config.ball_size, config.ball_velocity),
            state: MatchState::new(config.num_matches),
            rng: RandomStream::new(seed),
            time_ticks: 0,
        };
        engine.reset_episode();
        engine
    }

    /// Replace the random stream; every stochastic consumer sees it at once
    pub fn reseed(&mut self, seed: u64) {
        log::info!("Reseeding simulation with seed {}", seed);
        self.rng = RandomStream::new(seed);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Recenter ball and paddles and relaunch the ball. Scores are kept.
    pub fn reset_match(&mut self) {
        let center = self.arena / 2.0;
        self.ball.recenter(center);
        self.paddles[PLAYER].pos.y = center.y;
        self.paddles[OPPONENT].pos.y = center.y;
        self.ball.reset_velocity(&mut self.rng);
    }

    /// Start a fresh episode: new match, zero scores, not done
    pub fn reset_episode(&mut self) {
        self.paddles[OPPONENT].clear_direction();
        self.reset_match();
        self.state.reset();
        self.time_ticks = 0;
    }

    /// Force the episode to end (e.g. the display was closed)
    pub fn abort(&mut self) {
        if !self.state.is_done() {
            log::info!("Episode aborted at tick {}", self.time_ticks);
        }
        self.state.phase = MatchPhase::EpisodeDone;
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, action: Action) -> TickOutcome {
        match self.state.phase {
            MatchPhase::EpisodeDone => return TickOutcome::idle(true),
            MatchPhase::MatchOver => self.state.phase = MatchPhase::InMatch,
            MatchPhase::InMatch => {}
        }

        self.time_ticks += 1;

        // The opponent reacts to where the ball was at the start of the tick
        let ball_pos = self.ball.pos;
        self.paddles[PLAYER].apply(MovePolicy::Controlled(action), &mut self.rng);
        self.paddles[OPPONENT].apply(MovePolicy::Opponent { ball: ball_pos }, &mut self.rng);

        self.ball.advance();

        let hits = resolve(
            self.ball.pos,
            self.ball.half_size,
            &mut self.ball.vel,
            &self.paddles,
        );

        let side = if hits.contains(LEFT_WALL) {
            Side::Opponent
        } else if hits.contains(RIGHT_WALL) {
            Side::Player
        } else {
            return TickOutcome {
                reward: 0.0,
                scorer: None,
                done: false,
                hits,
            };
        };

        let mut magnitude = SCORE_REWARD;
        let done = self.state.record_point(side);
        let score = self.state.score;
        if done {
            magnitude += WIN_BONUS;
            log::info!(
                "Episode over after {} ticks: {} x {}",
                self.time_ticks,
                score.player,
                score.opponent
            );
        } else {
            log::debug!(
                "{:?} scored at tick {}: {} x {}",
                side,
                self.time_ticks,
                score.player,
                score.opponent
            );
        }
        self.reset_match();

        let reward = match side {
            Side::Player => magnitude,
            Side::Opponent => -magnitude,
        };
        TickOutcome {
            reward,
            scorer: Some(side),
            done,
            hits,
        }
    }

    pub fn arena(&self) -> Vec2 {
        self.arena
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn player(&self) -> &Paddle {
        &self.paddles[PLAYER]
    }

    pub fn opponent(&self) -> &Paddle {
        &self.paddles[OPPONENT]
    }

    /// All boundaries in collision order
    pub fn boundaries(&self) -> &[Paddle; BOUNDARY_COUNT] {
        &self.paddles
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn frame(&self) -> Frame {
        Frame {
            arena: self.arena,
            boundaries: std::array::from_fn(|i| self.paddles[i].collider()),
            ball: self.ball.collider(),
            score: self.state.score,
            phase: self.state.phase,
            tick: self.time_ticks,
        }
    }

    #[cfg(test)]
    fn set_ball(&mut self, pos: Vec2, vel: Vec2) {
        self.ball.pos = pos;
        self.ball.vel = vel;
    }
}

/// Paddles, ceiling, floor and side walls for a `width` x `height` arena
///
/// Positions are truncated to whole units; extents are not.
fn layout(config: &EnvConfig) -> [Paddle; BOUNDARY_COUNT] {
    let (w, h) = (config.width, config.height);
    let arena = Vec2::new(w, h);
    let at = |x: f32, y: f32| Vec2::new(x.trunc(), y.trunc());

    let paddle_x = w / PADDLE_X_DIVISOR;
    let paddle_length = h / PADDLE_LENGTH_DIVISOR;
    let paddle_width = w / PADDLE_WIDTH_DIVISOR;
    let vel = config.paddle_velocity;

    [
        Paddle::new(at(paddle_x, h / 2.0), paddle_length, paddle_width, vel, arena),
        Paddle::new(at(w - paddle_x, h / 2.0), paddle_length, paddle_width, vel, arena),
        Paddle::boundary(at(w / 2.0, 0.0), WALL_THICKNESS, w, Orientation::Horizontal, arena),
        Paddle::boundary(at(w / 2.0, h), WALL_THICKNESS, w, Orientation::Horizontal, arena),
        Paddle::boundary(at(0.0, h / 2.0), h, WALL_THICKNESS, Orientation::Vertical, arena),
        Paddle::boundary(at(w, h / 2.0), h, WALL_THICKNESS, Orientation::Vertical, arena),
    ]
}
