//! Client-holdable binary-insertion comparison session.
//!
//! The session carries the full comparison state across request round-trips;
//! the server persists nothing until the session converges. An abandoned
//! session leaves no trace.

use super::types::{Candidate, SatisfactionTier};
use serde::{Deserialize, Serialize};

/// Who won one pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonWinner {
    /// The shop being inserted was preferred.
    New,
    /// The already-ranked opponent was preferred.
    Existing,
}

/// Next move after feeding a comparison result into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// Present the new shop against this candidate.
    Compare(Candidate),
    /// Bounds crossed; insert at this index into the candidate list.
    Converged { insert_index: usize },
}

/// Binary-insertion state over a snapshot of the tier's candidates, sorted
/// ascending by rank (index 0 = best). Bounds are inclusive and signed so
/// `max` can pass below zero on the way to convergence, mirroring the
/// `[min, max]` / `floor((min+max)/2)` protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertionSession {
    pub user_id: String,
    pub shop_id: i64,
    pub tier: SatisfactionTier,
    pub candidates: Vec<Candidate>,
    min: i64,
    max: i64,
}

impl InsertionSession {
    /// Start a session over a non-empty candidate list.
    pub fn new(
        user_id: impl Into<String>,
        shop_id: i64,
        tier: SatisfactionTier,
        candidates: Vec<Candidate>,
    ) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let max = candidates.len() as i64 - 1;
        Self {
            user_id: user_id.into(),
            shop_id,
            tier,
            candidates,
            min: 0,
            max,
        }
    }

    pub fn converged(&self) -> bool {
        self.min > self.max
    }

    fn compare_index(&self) -> usize {
        #[allow(clippy::cast_sign_loss)]
        let idx = ((self.min + self.max) / 2) as usize;
        idx
    }

    /// Current comparison to present, or the converged insertion index.
    pub fn step(&self) -> SessionStep {
        if self.converged() {
            #[allow(clippy::cast_sign_loss)]
            let insert_index = self.min as usize;
            SessionStep::Converged { insert_index }
        } else {
            SessionStep::Compare(self.candidates[self.compare_index()])
        }
    }

    /// Apply one comparison result and return the next step.
    ///
    /// NEW winning means the new shop ranks better (lower numeric rank) than
    /// the opponent, so the search continues in the upper half.
    pub fn choose(&mut self, winner: ComparisonWinner) -> SessionStep {
        if !self.converged() {
            let compare = self.compare_index();
            #[allow(clippy::cast_possible_wrap)]
            let compare = compare as i64;
            match winner {
                ComparisonWinner::New => self.max = compare - 1,
                ComparisonWinner::Existing => self.min = compare + 1,
            }
        }
        self.step()
    }

    /// Tier rank the new shop takes at convergence: the displaced
    /// candidate's rank, or one past the tier end.
    pub fn target_rank(&self) -> Option<i64> {
        if !self.converged() {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        let insert_index = self.min as usize;
        let rank = if insert_index < self.candidates.len() {
            self.candidates[insert_index].rank
        } else {
            self.candidates.last().map_or(0, |c| c.rank) + 1
        };
        Some(rank)
    }
}
