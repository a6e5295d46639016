//! The ball: a square collider moving at constant speed

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, overlaps, reflect};
use super::paddle::Paddle;
use super::rng::RandomStream;
use crate::consts::*;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half extent of the square collider
    pub half_size: f32,
    /// Velocity magnitude, fixed for the ball's lifetime
    pub speed: f32,
}

impl Ball {
    /// Create a ball at rest; call [`Ball::reset_velocity`] to launch it
    pub fn new(pos: Vec2, half_size: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half_size,
            speed,
        }
    }

    /// Pick one of four mirrored launch cones around the diagonals
    ///
    /// Draw order is angle, then vertical sign, then horizontal offset.
    pub fn reset_velocity(&mut self, rng: &mut RandomStream) {
        use std::f32::consts::PI;

        let mut angle = rng.uniform(LAUNCH_ANGLE_MIN, LAUNCH_ANGLE_MAX);
        angle *= rng.choose(&[-1.0, 1.0]);
        angle += rng.choose(&[0.0, PI]);
        self.vel = Vec2::new(self.speed * angle.cos(), -self.speed * angle.sin());
    }

    /// Move the ball back to `center` (velocity untouched)
    pub fn recenter(&mut self, center: Vec2) {
        self.pos = center;
    }

    /// One Euler step
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Reflect off `boundary` if overlapping; returns whether it hit
    pub fn bounce(&mut self, boundary: &Paddle) -> bool {
        if overlaps(self.pos, self.half_size, &boundary.collider()) {
            self.vel = reflect(self.vel, boundary.orientation);
            true
        } else {
            false
        }
    }

    /// Square collider for rendering
    pub fn collider(&self) -> Collider {
        Collider::from_center(self.pos, 2.0 * self.half_size, 2.0 * self.half_size)
    }
}
