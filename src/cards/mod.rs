//! Card values and the draw pile.
//!
//! - `Card`, `Color`: immutable card values (6 colors × ranks 0-10)
//! - `ColorMap`: closed per-color table for tallies
//! - `Deck`: LIFO draw pile and deck generation

pub mod card;
pub mod deck;

pub use card::{Card, Color, ColorMap, COLOR_COUNT, MAX_RANK};
pub use deck::{generate_deck, Deck, DECK_SIZE};
