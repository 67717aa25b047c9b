//! Player identification and per-player card piles.
//!
//! ## PlayerId
//!
//! Seat index assigned at join time, 0-based, stable for the whole game.
//! It doubles as the turn order.
//!
//! ## Player
//!
//! A seated player: name, current hand, and collected pile. Only the rule
//! engine mutates the piles.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, ColorMap, COLOR_COUNT};

/// Player identifier supporting 1-255 seats.
///
/// Player indices are 0-based: the first player to join is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    pub(crate) hand: Vector<Card>,
    pub(crate) collected: Vector<Card>,
}

impl Player {
    /// Create a player with empty piles.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vector::new(),
            collected: Vector::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current hand, in draw order.
    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    /// Cards taken from the parade row, in the order they were taken.
    #[must_use]
    pub fn collected(&self) -> &Vector<Card> {
        &self.collected
    }

    /// Case-insensitive name comparison used for seat uniqueness.
    #[must_use]
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// Collected cards per color.
    #[must_use]
    pub fn color_counts(&self) -> ColorMap<u32> {
        let mut counts = ColorMap::default();
        for card in &self.collected {
            counts[card.color()] += 1;
        }
        counts
    }

    /// Whether the collected pile holds at least one card of every color.
    #[must_use]
    pub fn has_all_colors(&self) -> bool {
        self.color_counts().values().filter(|&&n| n > 0).count() == COLOR_COUNT
    }

    /// Sum of ranks over the whole collected pile.
    #[must_use]
    pub fn collected_rank_sum(&self) -> i64 {
        self.collected.iter().map(|c| i64::from(c.rank())).sum()
    }

    /// Empty both piles (new deal).
    pub(crate) fn clear_piles(&mut self) {
        self.hand.clear();
        self.collected.clear();
    }
}
