//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, constant-velocity integration
//! - Seeded RNG only, owned by the engine
//! - Fixed boundary test order
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod paddle;
pub mod rng;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Collider, HitSet, overlaps, reflect, resolve};
pub use paddle::{Action, MovePolicy, Orientation, Paddle};
pub use rng::RandomStream;
pub use state::{MatchPhase, MatchState, Score, Side};
pub use tick::{
    BOUNDARY_COUNT, CEILING, FLOOR, Frame, LEFT_WALL, MatchEngine, OPPONENT, PLAYER, RIGHT_WALL,
    TickOutcome,
};
