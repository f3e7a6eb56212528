//! Best runs of the current session
//!
//! Kept in memory only; a new process starts with an empty board.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Survival time in seconds
    pub survival: f32,
    /// Which run of the session this was
    pub run_index: u32,
}

/// Session leaderboard, sorted by score then survival time (descending)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn beats(score: u64, survival: f32, entry: &HighScoreEntry) -> bool {
        score > entry.score || (score == entry.score && survival > entry.survival)
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, score: u64, survival: f32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| Self::beats(score, survival, e))
            .unwrap_or(true)
    }

    /// Add a finished run (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_run(&mut self, score: u64, survival: f32, run_index: u32) -> Option<usize> {
        if !self.qualifies(score, survival) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            survival,
            run_index,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| Self::beats(score, survival, e));
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Run {} placed #{} with score {}", run_index, rank, score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best run so far (if any)
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }
}
