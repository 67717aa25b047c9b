//! Error types.
//!
//! Three families, kept apart so callers can tell a bad client call from an
//! engine bug:
//!
//! - **Rejected input** (`JoinError`, `StartError`, and the non-error
//!   `PlayRejection` in `rules`): state is unchanged.
//! - **Internal consistency faults** (`ConsistencyFault`): the removal rule
//!   or card conservation disagreed with itself. The play is aborted before
//!   commit.
//! - **Persistence failures** (`PersistenceError`): snapshot and leaderboard
//!   I/O. Never fatal; the table reports them as `false`.

use thiserror::Error;

use crate::cards::Card;

/// Card construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("rank {0} out of range (0..=10)")]
    RankOutOfRange(u8),
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_players must be at least 1")]
    NoPlayersAllowed,
    #[error("min_players ({min}) exceeds max_players ({max})")]
    PlayerBoundsInverted { min: usize, max: usize },
    #[error("max_players ({0}) exceeds the 255 seat limit")]
    TooManySeats(usize),
}

/// Reasons a join request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("a player named {0:?} already joined")]
    DuplicateName(String),
    #[error("the game has already started")]
    GameAlreadyStarted,
    #[error("the table is full ({0} seats)")]
    TableFull(usize),
}

/// Reasons a start request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("need at least {needed} players, {seated} seated")]
    NotEnoughPlayers { needed: usize, seated: usize },
}

/// An engine bug detected while validating a play.
///
/// Raised before commit; the authoritative state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyFault {
    #[error("parade row has {actual} cards after the play, expected {expected}")]
    RowSizeMismatch { expected: usize, actual: usize },
    #[error("removed card {0} was not in the parade row before the play")]
    RemovedCardNotInRow(Card),
    #[error("recomputed removal set differs from the applied one")]
    RemovalMismatch,
    #[error("card count is {actual}, expected {expected}")]
    CardCountMismatch { expected: usize, actual: usize },
}

/// Snapshot and leaderboard I/O failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("snapshot rejected: {0}")]
    InvalidSnapshot(String),
}

/// Umbrella error for callers that want a single type.
#[derive(Debug, Error)]
pub enum ParadeError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error(transparent)]
    Start(#[from] StartError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyFault),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            JoinError::DuplicateName("Ana".into()).to_string(),
            "a player named \"Ana\" already joined"
        );
        assert_eq!(
            StartError::NotEnoughPlayers { needed: 2, seated: 1 }.to_string(),
            "need at least 2 players, 1 seated"
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: ParadeError = JoinError::GameAlreadyStarted.into();
        assert!(matches!(err, ParadeError::Join(JoinError::GameAlreadyStarted)));

        let fault: ParadeError = ConsistencyFault::RemovalMismatch.into();
        assert_eq!(fault.to_string(), "recomputed removal set differs from the applied one");
    }
}
