//! Game snapshots.
//!
//! A `Snapshot` is the logical content of a running game: seats with their
//! hands and collected piles, the draw pile, the row, the turn pointer, the
//! last-round latch, the deal sizes, the play history and the RNG position.
//! It is encoded with `bincode` as an opaque blob.
//!
//! Restoring validates the blob before it becomes a `GameState`: seat ids
//! must match their position, names must be unique, the turn pointer must
//! be in range, and no card may appear twice. Once dealt, all 66 cards must
//! be present; a lobby saved before the deal holds none. A restored game is
//! always marked started.

use std::fs;
use std::path::Path;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Deck, DECK_SIZE};
use crate::core::{GameRng, GameRngState, GameState, PlayRecord, Player};
use crate::error::PersistenceError;

/// Encoding version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub players: Vector<Player>,
    pub deck: Deck,
    pub parade_row: Vector<Card>,
    pub turn: usize,
    pub last_round: bool,
    pub parade_size: usize,
    pub hand_size: usize,
    pub history: Vector<PlayRecord>,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Capture `state`. O(1): every collection is shared.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            players: state.players.clone(),
            deck: state.deck.clone(),
            parade_row: state.parade_row.clone(),
            turn: state.turn,
            last_round: state.last_round,
            parade_size: state.parade_size,
            hand_size: state.hand_size,
            history: state.history.clone(),
            rng: state.rng.state(),
        }
    }

    /// Check the snapshot describes a game the engine can continue.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let invalid = |msg: String| Err(PersistenceError::InvalidSnapshot(msg));

        if self.version != SNAPSHOT_VERSION {
            return invalid(format!("unsupported version {}", self.version));
        }

        for (seat, player) in self.players.iter().enumerate() {
            if player.id().index() != seat {
                return invalid(format!("seat {seat} holds {}", player.id()));
            }
            if player.name().trim().is_empty() {
                return invalid(format!("seat {seat} has no name"));
            }
            if self.players.iter().take(seat).any(|p| p.name_matches(player.name())) {
                return invalid(format!("duplicate player name {:?}", player.name()));
            }
        }

        if self.players.is_empty() {
            if self.turn != 0 {
                return invalid(format!("turn {} with no players", self.turn));
            }
        } else if self.turn >= self.players.len() {
            return invalid(format!(
                "turn {} out of range for {} players",
                self.turn,
                self.players.len()
            ));
        }

        let mut seen: FxHashSet<Card> = FxHashSet::default();
        let held = self
            .players
            .iter()
            .flat_map(|p| p.hand().iter().chain(p.collected().iter()));
        let all = self
            .deck
            .cards()
            .into_iter()
            .chain(self.parade_row.iter().copied())
            .chain(held.copied());
        for card in all {
            if !seen.insert(card) {
                return invalid(format!("card {card} appears twice"));
            }
        }
        // A lobby saved before the deal holds no cards at all.
        if !seen.is_empty() && seen.len() != DECK_SIZE {
            return invalid(format!("{} cards, expected {DECK_SIZE}", seen.len()));
        }

        Ok(())
    }

    /// Validate and rebuild a started `GameState`.
    pub fn into_state(self) -> Result<GameState, PersistenceError> {
        self.validate()?;

        let mut state = GameState::new(GameRng::from_state(&self.rng));
        state.players = self.players;
        state.deck = self.deck;
        state.parade_row = self.parade_row;
        state.turn = self.turn;
        state.last_round = self.last_round;
        state.parade_size = self.parade_size;
        state.hand_size = self.hand_size;
        state.history = self.history;
        state.started = true;
        Ok(state)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, PersistenceError> {
        Ok(bincode::deserialize(data)?)
    }

    /// Write to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Read from `path`. Call `into_state` to validate and use it.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        Self::from_bytes(&fs::read(path)?)
    }
}
