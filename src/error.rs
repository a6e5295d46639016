//! Error taxonomy for environment construction and stepping

use thiserror::Error;

/// Errors surfaced by the environment API
///
/// Stepping a finished episode is not an error: it yields zero reward and
/// `done = true`.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Action outside the discrete set `{0, 1, 2}`
    #[error("invalid action {0}: expected 0 (noop), 1 (down) or 2 (up)")]
    InvalidAction(u8),
    /// Non-positive dimension, velocity or match count
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
