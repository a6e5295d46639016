//! Episode records for headless runs
//!
//! Collected by the runner and written out as JSON.

use serde::{Deserialize, Serialize};

use crate::error::EnvError;
use crate::sim::{Score, Side};

/// Outcome of one finished (or aborted) episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Seed the episode was reset with
    pub seed: u64,
    /// External `step` calls
    pub steps: u64,
    /// Simulation ticks
    pub ticks: u64,
    pub total_reward: f32,
    pub score: Score,
    /// `None` if the episode was cut short with the score level
    pub winner: Option<Side>,
}

impl EpisodeRecord {
    pub fn player_won(&self) -> bool {
        self.winner == Some(Side::Player)
    }
}

/// All episodes of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub episodes: Vec<EpisodeRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            episodes: Vec::new(),
        }
    }

    pub fn push(&mut self, record: EpisodeRecord) {
        log::info!(
            "Episode {} finished: {} x {} in {} steps, reward {}",
            self.episodes.len() + 1,
            record.score.player,
            record.score.opponent,
            record.steps,
            record.total_reward
        );
        self.episodes.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Fraction of episodes the player won (0 when empty)
    pub fn win_rate(&self) -> f32 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        let wins = self.episodes.iter().filter(|e| e.player_won()).count();
        wins as f32 / self.episodes.len() as f32
    }

    pub fn mean_reward(&self) -> f32 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        let total: f32 = self.episodes.iter().map(|e| e.total_reward).sum();
        total / self.episodes.len() as f32
    }

    /// Highest-reward episode
    pub fn best(&self) -> Option<&EpisodeRecord> {
        self.episodes
            .iter()
            .max_by(|a, b| a.total_reward.total_cmp(&b.total_reward))
    }

    pub fn to_json(&self) -> Result<String, EnvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
