//! The draw pile.
//!
//! `Deck` is a LIFO stack: the top card is the last element of the backing
//! vector, so drawing is a `pop_back`. It is backed by `im::Vector` so the
//! whole game state can be cloned in O(1) before a play is validated.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::rng::GameRng;

/// Total number of cards in a Parade deck.
pub const DECK_SIZE: usize = 66;

/// LIFO draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    /// Bottom first, top last.
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck from cards listed bottom first.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Peek at the top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom first.
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.cards.clone()
    }
}

/// Build all 66 cards and shuffle them.
///
/// The returned deck is ready to draw from; the top card is whichever card
/// the shuffle left last.
#[must_use]
pub fn generate_deck(rng: &mut GameRng) -> Deck {
    let mut cards: Vec<Card> = Card::all().collect();
    rng.shuffle(&mut cards);
    Deck::from_cards(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    #[test]
    fn test_generate_deck_complete() {
        let mut rng = GameRng::new(42);
        let deck = generate_deck(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);

        let mut cards: Vec<_> = deck.cards().into_iter().collect();
        let mut expected: Vec<_> = Card::all().collect();
        cards.sort_by_key(|c| (c.color(), c.rank()));
        expected.sort_by_key(|c| (c.color(), c.rank()));
        assert_eq!(cards, expected);
    }

    #[test]
    fn test_generate_deck_shuffled() {
        let mut rng = GameRng::new(42);
        let deck = generate_deck(&mut rng);
        let ordered: Vector<Card> = Card::all().collect();
        assert_ne!(deck.cards(), ordered);
    }

    #[test]
    fn test_generate_deck_deterministic() {
        let deck1 = generate_deck(&mut GameRng::new(7));
        let deck2 = generate_deck(&mut GameRng::new(7));
        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_draw_is_lifo() {
        let bottom = Card::new(Color::Red, 1).unwrap();
        let top = Card::new(Color::Blue, 2).unwrap();
        let mut deck = Deck::from_cards([bottom, top]);

        assert_eq!(deck.top(), Some(&top));
        assert_eq!(deck.draw(), Some(top));
        assert_eq!(deck.draw(), Some(bottom));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }
}
