//! Game event types.
//!
//! Events tell renderers what changed. The engine appends them after each
//! committed mutation; how they reach a client is the transport's business.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::PlayerId;
use crate::rules::{FinalScores, GameResult};

/// Something observable happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player took a seat in the lobby.
    PlayerJoined { player: PlayerId, name: String },

    /// Cards were dealt (fresh start or a loaded snapshot).
    GameStarted { player_count: usize },

    /// A play was committed.
    CardPlayed {
        player: PlayerId,
        card: Card,
        collected: SmallVec<[Card; 4]>,
    },

    /// The last round began.
    LastRoundTriggered { by: PlayerId },

    /// Final scores are available.
    FinalScoresReady { scores: FinalScores },

    /// The game is over.
    GameEnded { result: GameResult },

    /// The leaderboard changed.
    LeaderboardUpdated,

    /// Free-form notice for the players.
    InfoMessage(String),
}

impl GameEvent {
    /// Short, stable name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::PlayerJoined { .. } => "player_joined",
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::CardPlayed { .. } => "card_played",
            GameEvent::LastRoundTriggered { .. } => "last_round",
            GameEvent::FinalScoresReady { .. } => "final_scores",
            GameEvent::GameEnded { .. } => "game_ended",
            GameEvent::LeaderboardUpdated => "leaderboard_updated",
            GameEvent::InfoMessage(_) => "info",
        }
    }
}
