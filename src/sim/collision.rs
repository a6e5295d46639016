//! Collision detection and response for axis-aligned boundaries
//!
//! Every boundary (paddles, ceiling, floor, side walls) is a rectangle. The
//! ball is a square. A hit only flips the velocity component normal to the
//! boundary; the ball is never pushed back out of penetration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::paddle::{Orientation, Paddle};

/// Axis-aligned rectangle, top-left corner plus extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Collider {
    /// Build from a center point and full extents
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }
}

/// Overlap test between a square ball and a boundary rectangle
///
/// The x test is shrunk by one unit, the y test is not.
#[inline]
pub fn overlaps(ball_pos: Vec2, half_size: f32, boundary: &Collider) -> bool {
    let delta = (ball_pos - boundary.center()).abs();
    let half = boundary.half_extents();
    delta.x < half.x + half_size - 1.0 && delta.y < half.y + half_size
}

/// Reflect velocity off a boundary of the given orientation
///
/// Horizontal boundaries flip `vy`, vertical ones flip `vx`. Magnitude is
/// preserved exactly.
#[inline]
pub fn reflect(vel: Vec2, orientation: Orientation) -> Vec2 {
    match orientation {
        Orientation::Horizontal => Vec2::new(vel.x, -vel.y),
        Orientation::Vertical => Vec2::new(-vel.x, vel.y),
    }
}

/// Boundaries hit during one collision pass, as a bitset over boundary index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSet(u8);

impl HitSet {
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < 8 && self.0 & (1 << index) != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    fn insert(&mut self, index: usize) {
        self.0 |= 1 << index;
    }
}

/// Test the ball against each boundary in order and reflect on overlap
///
/// Every overlap is recorded. Each axis flips at most once per pass, so the
/// first boundary to reflect an axis wins.
pub fn resolve(ball_pos: Vec2, half_size: f32, vel: &mut Vec2, boundaries: &[Paddle]) -> HitSet {
    let mut hits = HitSet::default();
    let mut flipped_x = false;
    let mut flipped_y = false;

    for (index, boundary) in boundaries.iter().enumerate().take(8) {
        if !overlaps(ball_pos, half_size, &boundary.collider()) {
            continue;
        }
        hits.insert(index);

        let already = match boundary.orientation {
            Orientation::Horizontal => &mut flipped_y,
            Orientation::Vertical => &mut flipped_x,
        };
        if !*already {
            *vel = reflect(*vel, boundary.orientation);
            *already = true;
        }
        log::trace!("Ball hit boundary {} at {:?}", index, ball_pos);
    }

    hits
}
