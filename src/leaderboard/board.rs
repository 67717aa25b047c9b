//! Append-only ranking store.
//!
//! Entries are never removed or reordered in storage; `top5` sorts a copy.
//! Timestamps only move forward: a new batch is stamped no earlier than the
//! latest entry already held, so ties break by recording order even when
//! the wall clock steps back.
//!
//! ## Persistence
//!
//! The whole sequence is written with `bincode` to a temp file and renamed
//! over the target. Reading a missing or corrupt file yields an empty board.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::entry::{now_millis, RankedEntry, RankingEntry};
use crate::error::PersistenceError;

/// Rows shown by `top5`.
pub const TOP_SIZE: usize = 5;

/// Historical results, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<RankingEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch of `(name, score)` results at the current time.
    ///
    /// Returns how many entries were added.
    pub fn record<'a>(&mut self, scores: impl IntoIterator<Item = (&'a str, i64)>) -> usize {
        self.record_at(scores, now_millis())
    }

    /// Record a batch with a shared timestamp.
    ///
    /// Negative scores and blank names are skipped.
    pub fn record_at<'a>(
        &mut self,
        scores: impl IntoIterator<Item = (&'a str, i64)>,
        at: u64,
    ) -> usize {
        let at = self.latest_timestamp().map_or(at, |latest| at.max(latest));
        let before = self.entries.len();

        for (name, score) in scores {
            if score < 0 || name.trim().is_empty() {
                debug!(name, score, "skipping ranking entry");
                continue;
            }
            self.entries.push(RankingEntry::new(name, score, at));
        }

        self.entries.len() - before
    }

    /// Timestamp of the newest entry.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.recorded_at).max()
    }

    /// The best `n` results: ascending score, older first on ties.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<RankedEntry> {
        let mut sorted: Vec<&RankingEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.sort_key());

        sorted
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, e)| RankedEntry {
                rank: i + 1,
                name: e.name.clone(),
                score: e.score,
            })
            .collect()
    }

    /// The best five results.
    #[must_use]
    pub fn top5(&self) -> Vec<RankedEntry> {
        self.top(TOP_SIZE)
    }

    /// Stored entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // === Persistence ===

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, PersistenceError> {
        Ok(bincode::deserialize(data)?)
    }

    /// Write the board to `path`, replacing any previous file.
    pub fn try_persist(&self, path: &Path) -> Result<(), PersistenceError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Best-effort `try_persist`; failures are logged.
    pub fn persist(&self, path: &Path) -> bool {
        match self.try_persist(path) {
            Ok(()) => {
                info!(path = %path.display(), entries = self.len(), "leaderboard saved");
                true
            }
            Err(err) => {
                error!(path = %path.display(), %err, "leaderboard save failed");
                false
            }
        }
    }

    /// Read a board from `path`.
    pub fn try_restore(path: &Path) -> Result<Self, PersistenceError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Read a board from `path`, falling back to an empty one.
    #[must_use]
    pub fn restore(path: &Path) -> Self {
        match Self::try_restore(path) {
            Ok(board) => {
                info!(path = %path.display(), entries = board.len(), "leaderboard loaded");
                board
            }
            Err(PersistenceError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no leaderboard file, starting empty");
                Self::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "leaderboard unreadable, starting empty");
                Self::new()
            }
        }
    }
}
