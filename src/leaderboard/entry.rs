//! Ranking rows.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One stored result. Lower scores rank higher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: i64,
    /// Milliseconds since the Unix epoch.
    pub recorded_at: u64,
}

impl RankingEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, score: i64, recorded_at: u64) -> Self {
        Self {
            name: name.into(),
            score,
            recorded_at,
        }
    }

    /// Sort key: score, then age.
    #[must_use]
    pub fn sort_key(&self) -> (i64, u64) {
        (self.score, self.recorded_at)
    }
}

/// A row of the top-N view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub score: i64,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} {}", self.rank, self.name, self.score)
    }
}

/// Wall clock in milliseconds since the Unix epoch.
///
/// A clock before 1970 reads as 0.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
