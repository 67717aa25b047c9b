//! Persistent ranking of finished games.
//!
//! - `RankingEntry`: one stored `(name, score, time)` result
//! - `Leaderboard`: append-only store, top-5 view, file persistence

mod board;
mod entry;

pub use board::{Leaderboard, TOP_SIZE};
pub use entry::{now_millis, RankedEntry, RankingEntry};
