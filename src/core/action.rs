//! Play records.
//!
//! Every committed play is appended to the game's history as a
//! `PlayRecord`: who played which card, what it took from the parade row,
//! and what was drawn in return. The history is cleared by a new deal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::Card;

/// A committed play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// The player who played.
    pub player: PlayerId,

    /// The card played onto the row.
    pub card: Card,

    /// Cards moved from the row to the player's collected pile, in scan order.
    /// SmallVec covers the usual 0-4 cards without a heap allocation.
    pub collected: SmallVec<[Card; 4]>,

    /// Replacement card drawn from the deck, if any.
    pub drawn: Option<Card>,

    /// 0-based position of this play within the game.
    pub sequence: u32,
}

impl PlayRecord {
    /// Create a new play record.
    #[must_use]
    pub fn new(player: PlayerId, card: Card, collected: &[Card], drawn: Option<Card>, sequence: u32) -> Self {
        Self {
            player,
            card,
            collected: SmallVec::from_slice(collected),
            drawn,
            sequence,
        }
    }

    /// Number of cards this play took.
    #[must_use]
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }
}
