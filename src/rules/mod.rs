//! Parade rules.
//!
//! - `removal`: which row cards a play takes
//! - `scoring`: color majorities and final scores
//! - `engine`: lobby, deal and play transitions over `GameState`

pub mod engine;
pub mod removal;
pub mod scoring;

pub use engine::{ParadeRules, PlayOutcome, PlayRejection, PlayReport};
pub use removal::{apply_removal, compute_removal, evaluated_count, is_taken, verify_removal, Removal};
pub use scoring::{
    color_tallies, compute_scores, FinalScores, GameResult, PlayerScore,
    TWO_PLAYER_MAJORITY_LEAD,
};
