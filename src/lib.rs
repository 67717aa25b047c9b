//! # parade-engine
//!
//! Rule engine for the card game Parade, with a persistent leaderboard.
//!
//! ## Design Principles
//!
//! 1. **One authoritative state**: a `Table` owns the game behind a lock.
//!    Clients send intents (join, start, play) and read copies back.
//!
//! 2. **Validated commits**: a play is applied to an O(1) clone of the
//!    state, checked against the removal rule and card conservation, and
//!    only then swapped in.
//!
//! 3. **Deterministic when seeded**: shuffles use a seedable ChaCha8 RNG
//!    whose position is part of every snapshot.
//!
//! ## Modules
//!
//! - `cards`: card values, colors, the deck
//! - `core`: players, game state, play records, RNG, configuration
//! - `rules`: removal rule, scoring, play resolution
//! - `events`: outbound notifications
//! - `leaderboard`: ranking of finished games
//! - `snapshot`: save and restore a game
//! - `table`: the lock-guarded engine a transport calls into
//! - `error`: error types

pub mod cards;
pub mod core;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod rules;
pub mod snapshot;
pub mod table;

// Re-export commonly used types
pub use crate::cards::{Card, Color, ColorMap, Deck, DECK_SIZE};

pub use crate::core::{GameRng, GameRngState, GameState, ParadeConfig, PlayRecord, Player, PlayerId};

pub use crate::error::{
    CardError, ConfigError, ConsistencyFault, JoinError, ParadeError, PersistenceError, StartError,
};

pub use crate::events::{EventQueue, GameEvent};

pub use crate::leaderboard::{Leaderboard, RankedEntry, RankingEntry};

pub use crate::rules::{FinalScores, GameResult, ParadeRules, PlayOutcome, PlayRejection, PlayReport};

pub use crate::snapshot::Snapshot;

pub use crate::table::Table;
