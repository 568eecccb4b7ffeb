//! Match winner leaderboard
//!
//! In-memory only; tracks the top 5 match times.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 5;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Winning fighter's display name
    pub name: String,
    /// Seconds on the clock when the match ended
    pub time_secs: u64,
}

/// Winners sorted by time, longest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a time would make the board
    pub fn qualifies(&self, time_secs: u64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|e| time_secs > e.time_secs)
    }

    /// Record a winner
    /// Returns the rank achieved (1-indexed) or None if it fell off the board
    pub fn record(&mut self, name: impl Into<String>, time_secs: u64) -> Option<usize> {
        if !self.qualifies(time_secs) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: name.into(),
            time_secs,
        };

        // Equal times keep earlier winners ahead
        let pos = self
            .entries
            .iter()
            .position(|e| time_secs > e.time_secs)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry (if any)
    pub fn top(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }
}
