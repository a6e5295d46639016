//! Match and episode scoring state
//!
//! Scores persist across matches and are only cleared on episode reset.

use serde::{Deserialize, Serialize};

/// Which side won a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Matches won by each side in the current episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    #[inline]
    pub fn max(&self) -> u32 {
        self.player.max(self.opponent)
    }

    /// Side currently ahead, if any
    pub fn leader(&self) -> Option<Side> {
        match self.player.cmp(&self.opponent) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Opponent),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

/// Phase of the tick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Rally in progress
    #[default]
    InMatch,
    /// A point was just scored and the match auto-reset
    MatchOver,
    /// Terminal until the episode is reset
    EpisodeDone,
}

/// Scoring state for one episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub score: Score,
    /// Episode ends once either score exceeds half of this
    pub matches_to_win: u32,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new(matches_to_win: u32) -> Self {
        Self {
            score: Score::default(),
            matches_to_win,
            phase: MatchPhase::InMatch,
        }
    }

    /// `max(score) > matches_to_win / 2`, compared without division
    pub fn is_decided(&self) -> bool {
        2 * self.score.max() > self.matches_to_win
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == MatchPhase::EpisodeDone
    }

    /// Credit a point and advance the phase; returns true if this ended the episode
    pub fn record_point(&mut self, side: Side) -> bool {
        self.score.award(side);
        if self.is_decided() {
            self.phase = MatchPhase::EpisodeDone;
            true
        } else {
            self.phase = MatchPhase::MatchOver;
            false
        }
    }

    /// Clear scores for a fresh episode
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.phase = MatchPhase::InMatch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of_seven() {
        let mut state = MatchState::new(7);
        for _ in 0..3 {
            assert!(!state.record_point(Side::Player));
            assert_eq!(state.phase, MatchPhase::MatchOver);
        }
        for _ in 0..3 {
            assert!(!state.record_point(Side::Opponent));
        }
        assert_eq!(state.score, Score { player: 3, opponent: 3 });
        assert_eq!(state.score.leader(), None);
        assert!(state.record_point(Side::Opponent));
        assert!(state.is_done());
        assert_eq!(state.score.leader(), Some(Side::Opponent));
    }

    #[test]
    fn test_single_match_decides_immediately() {
        let mut state = MatchState::new(1);
        assert!(!state.is_decided());
        assert!(state.record_point(Side::Player));
        assert_eq!(state.score.max(), 1);
    }

    #[test]
    fn test_even_match_count_threshold() {
        let mut state = MatchState::new(4);
        state.record_point(Side::Player);
        state.record_point(Side::Player);
        assert!(!state.is_done());
        assert!(state.record_point(Side::Player));
    }

    #[test]
    fn test_reset() {
        let mut state = MatchState::new(1);
        state.record_point(Side::Player);
        state.reset();
        assert_eq!(state.score, Score::default());
        assert_eq!(state.phase, MatchPhase::InMatch);
        assert_eq!(state.matches_to_win, 1);
    }
}
