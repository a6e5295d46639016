//! Paddles and static boundaries
//!
//! Player paddle, opponent paddle, ceiling, floor and both side walls all use
//! the same type. Only the two player-side paddles ever move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::rng::RandomStream;
use crate::consts::*;
use crate::error::EnvError;

/// Which velocity component a boundary reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Ceiling and floor: reflect `vy`
    Horizontal,
    /// Paddles and side walls: reflect `vx`
    Vertical,
}

/// Discrete agent action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    #[default]
    Noop = 0,
    /// Increase y (toward the floor)
    Down = 1,
    /// Decrease y (toward the ceiling)
    Up = 2,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Noop, Action::Down, Action::Up];

    /// Vertical displacement this action applies at the given speed
    #[inline]
    pub fn delta(self, velocity: f32) -> f32 {
        match self {
            Action::Noop => 0.0,
            Action::Down => velocity,
            Action::Up => -velocity,
        }
    }

    /// Human keyboard mapping; both keys held cancel out
    pub fn from_keys(down: bool, up: bool) -> Self {
        match (down, up) {
            (true, false) => Action::Down,
            (false, true) => Action::Up,
            _ => Action::Noop,
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = EnvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Noop),
            1 => Ok(Action::Down),
            2 => Ok(Action::Up),
            other => Err(EnvError::InvalidAction(other)),
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action as u8
    }
}

/// How a paddle decides its movement this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePolicy {
    /// Driven by an external action
    Controlled(Action),
    /// Scripted opponent chasing the ball
    Opponent { ball: Vec2 },
    /// Walls, ceiling, floor
    Static,
}

/// A paddle or fixed boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position (x never changes after construction)
    pub pos: Vec2,
    /// Extent along the long axis (always measured in y for the collider)
    pub length: f32,
    /// Extent along the short axis (always measured in x for the collider)
    pub width: f32,
    /// Movement per tick
    pub velocity: f32,
    pub orientation: Orientation,
    /// Arena extents (width, height); y is clamped to `[0, height]`
    pub arena: Vec2,
    /// Opponent lock-on state: -1, 0 or +1
    direction: i8,
}

impl Paddle {
    /// A movable vertical paddle
    pub fn new(pos: Vec2, length: f32, width: f32, velocity: f32, arena: Vec2) -> Self {
        Self {
            pos,
            length,
            width,
            velocity,
            orientation: Orientation::Vertical,
            arena,
            direction: 0,
        }
    }

    /// A fixed boundary (zero velocity)
    pub fn boundary(
        pos: Vec2,
        length: f32,
        width: f32,
        orientation: Orientation,
        arena: Vec2,
    ) -> Self {
        Self {
            pos,
            length,
            width,
            velocity: 0.0,
            orientation,
            arena,
            direction: 0,
        }
    }

    /// Current opponent lock-on direction
    pub fn direction(&self) -> i8 {
        self.direction
    }

    /// Clear opponent state (on episode reset)
    pub fn clear_direction(&mut self) {
        self.direction = 0;
    }

    /// Rectangle used for overlap tests
    pub fn collider(&self) -> Collider {
        Collider::from_center(self.pos, self.width, self.length)
    }

    /// Move according to the policy, then clamp y into the arena
    pub fn apply(&mut self, policy: MovePolicy, rng: &mut RandomStream) {
        match policy {
            MovePolicy::Controlled(action) => {
                self.pos.y += action.delta(self.velocity);
            }
            MovePolicy::Opponent { ball } => {
                self.update_direction(ball, rng);
                self.pos.y += self.velocity * self.direction as f32;
            }
            MovePolicy::Static => {}
        }
        self.pos.y = self.pos.y.clamp(0.0, self.arena.y);
    }

    /// Stochastic lock-on: release with a small chance, otherwise chase the
    /// ball once it crosses into the opponent's side
    fn update_direction(&mut self, ball: Vec2, rng: &mut RandomStream) {
        if self.direction != 0 {
            if rng.unit() < OPPONENT_RELEASE_PROB {
                self.direction = 0;
            }
        } else if ball.x >= self.arena.x * OPPONENT_WAKE_FRACTION
            && rng.unit() < OPPONENT_LOCK_PROB
        {
            self.direction = sign(ball.y - self.pos.y);
        }
    }
}

/// Sign of a float as -1, 0 or +1 (zero maps to zero)
#[inline]
fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
