//! Card values and per-color tables.
//!
//! A Parade card is a plain value: one of six colors plus a rank in
//! `0..=10`. Two cards with the same color and rank are equal, but the
//! deck only ever holds one of each, so equality also identifies a card
//! within a game.
//!
//! `ColorMap` is the closed per-color table used for tallies. It is backed
//! by a fixed array so every color always has an entry.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::error::CardError;

/// Highest rank a card can carry.
pub const MAX_RANK: u8 = 10;

/// Number of distinct colors in the deck.
pub const COLOR_COUNT: usize = 6;

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Black,
}

impl Color {
    /// All colors in deck order.
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Black,
    ];

    /// Position of this color in [`Color::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
            Color::Black => "Black",
        };
        f.write_str(name)
    }
}

/// An immutable Parade card.
///
/// Deserialization goes through [`Card::new`], so a snapshot cannot smuggle
/// in an out-of-range rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    color: Color,
    rank: u8,
}

#[derive(Serialize, Deserialize)]
struct CardRepr {
    color: Color,
    rank: u8,
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        Self {
            color: card.color,
            rank: card.rank,
        }
    }
}

impl TryFrom<CardRepr> for Card {
    type Error = CardError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        Card::new(repr.color, repr.rank)
    }
}

impl Card {
    /// Create a card, rejecting ranks above [`MAX_RANK`].
    pub fn new(color: Color, rank: u8) -> Result<Self, CardError> {
        if rank > MAX_RANK {
            return Err(CardError::RankOutOfRange(rank));
        }
        Ok(Self { color, rank })
    }

    /// Card color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Card rank (`0..=10`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Every color/rank combination, colors outermost.
    pub fn all() -> impl Iterator<Item = Card> {
        Color::ALL
            .into_iter()
            .flat_map(|color| (0..=MAX_RANK).map(move |rank| Card { color, rank }))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.color, self.rank)
    }
}

/// Fixed per-color storage with O(1) access, indexed by `Color`.
///
/// ```
/// use parade_engine::cards::{Color, ColorMap};
///
/// let mut counts: ColorMap<u32> = ColorMap::default();
/// counts[Color::Green] += 2;
/// assert_eq!(counts[Color::Green], 2);
/// assert_eq!(counts[Color::Red], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; COLOR_COUNT],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Iterate over (Color, &T) pairs in deck order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over the values in deck order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.data[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.data[color.index()]
    }
}
