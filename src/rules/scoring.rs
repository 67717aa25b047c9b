//! Scoring.
//!
//! Each player's score is a color-majority bonus plus the rank sum of every
//! collected card. Lower is better; the scoring functions only compute
//! magnitudes and `GameResult` applies the "lowest wins" reading.
//!
//! ## Color majority
//!
//! - **Two players**: a player scores the full count of a color when they
//!   hold at least two more cards of it than the opponent.
//! - **Other player counts** (advisory): every player holding the
//!   maximum (> 0) of a color scores that count, ties included.

use serde::{Deserialize, Serialize};

use crate::cards::ColorMap;
use crate::core::{Player, PlayerId};

/// Lead needed in a two-player game to score a color.
pub const TWO_PLAYER_MAJORITY_LEAD: u32 = 2;

/// Per-color collected counts, one entry per seat.
pub fn color_tallies(players: &[&Player]) -> ColorMap<Vec<u32>> {
    let counts: Vec<ColorMap<u32>> = players.iter().map(|p| p.color_counts()).collect();
    ColorMap::new(|color| counts.iter().map(|c| c[color]).collect())
}

/// Majority bonus each seat earns for one color.
fn color_bonus(counts: &[u32]) -> Vec<i64> {
    let mut bonus = vec![0i64; counts.len()];

    if let &[a, b] = counts {
        if a >= b + TWO_PLAYER_MAJORITY_LEAD {
            bonus[0] = i64::from(a);
        } else if b >= a + TWO_PLAYER_MAJORITY_LEAD {
            bonus[1] = i64::from(b);
        }
        return bonus;
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    if max > 0 {
        for (seat, &count) in counts.iter().enumerate() {
            if count == max {
                bonus[seat] = i64::from(count);
            }
        }
    }
    bonus
}

/// Scores in seat order.
#[must_use]
pub fn compute_scores<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<i64> {
    let players: Vec<&Player> = players.into_iter().collect();
    let tallies = color_tallies(&players);

    let mut scores: Vec<i64> = players.iter().map(|p| p.collected_rank_sum()).collect();
    for (_, counts) in tallies.iter() {
        for (score, bonus) in scores.iter_mut().zip(color_bonus(counts)) {
            *score += bonus;
        }
    }
    scores
}

/// One player's final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub name: String,
    pub score: i64,
}

/// Final scores in seat order, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScores {
    entries: Vec<PlayerScore>,
}

impl FinalScores {
    /// Score every seated player.
    #[must_use]
    pub fn from_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let players: Vec<&Player> = players.into_iter().collect();
        let scores = compute_scores(players.iter().copied());
        let entries = players
            .into_iter()
            .zip(scores)
            .map(|(p, score)| PlayerScore {
                player: p.id(),
                name: p.name().to_string(),
                score,
            })
            .collect();
        Self { entries }
    }

    /// Entries in seat order.
    #[must_use]
    pub fn entries(&self) -> &[PlayerScore] {
        &self.entries
    }

    /// Score of the player called `name` (exact match).
    #[must_use]
    pub fn score_of(&self, name: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    /// `(name, score)` pairs in seat order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.score))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a finished game. Lowest score wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players share the lowest score.
    Winners(Vec<PlayerId>),
    /// Nobody was seated.
    NoContest,
}

impl GameResult {
    /// Derive the result from final scores.
    #[must_use]
    pub fn from_scores(scores: &FinalScores) -> Self {
        let Some(best) = scores.entries().iter().map(|e| e.score).min() else {
            return GameResult::NoContest;
        };
        let winners: Vec<PlayerId> = scores
            .entries()
            .iter()
            .filter(|e| e.score == best)
            .map(|e| e.player)
            .collect();

        match winners.as_slice() {
            [single] => GameResult::Winner(*single),
            _ => GameResult::Winners(winners),
        }
    }

    /// Check if a player won (alone or shared).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::NoContest => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Color, Color::*};
    use proptest::prelude::*;

    fn player_with(id: u8, collected: &[(Color, u8)]) -> Player {
        let mut player = Player::new(PlayerId::new(id), format!("P{id}"));
        for &(color, rank) in collected {
            player.collected.push_back(Card::new(color, rank).unwrap());
        }
        player
    }

    #[test]
    fn test_no_collected_scores_zero() {
        let a = player_with(0, &[]);
        let b = player_with(1, &[]);
        assert_eq!(compute_scores([&a, &b]), vec![0, 0]);
    }

    #[test]
    fn test_two_player_majority_needs_lead_of_two() {
        // Red: 3 vs 1 -> A scores 3. Blue: 2 vs 1 -> nobody.
        let a = player_with(0, &[(Red, 1), (Red, 2), (Red, 3), (Blue, 0), (Blue, 0)]);
        let b = player_with(1, &[(Red, 4), (Blue, 5)]);

        // A: ranks 6 + bonus 3. B: ranks 9.
        assert_eq!(compute_scores([&a, &b]), vec![9, 9]);
    }

    #[test]
    fn test_two_player_majority_against_empty() {
        let a = player_with(0, &[]);
        let b = player_with(1, &[(Green, 0), (Green, 1)]);
        assert_eq!(compute_scores([&a, &b]), vec![0, 3]);
    }

    #[test]
    fn test_n_player_tied_maximum_scores() {
        let a = player_with(0, &[(Yellow, 1), (Yellow, 1)]);
        let b = player_with(1, &[(Yellow, 2), (Yellow, 2)]);
        let c = player_with(2, &[(Yellow, 3)]);

        // Tied maximum of 2: both A and B add 2.
        assert_eq!(compute_scores([&a, &b, &c]), vec![4, 6, 3]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let a = player_with(0, &[(Purple, 7), (Purple, 3), (Black, 2)]);
        let b = player_with(1, &[(Black, 9)]);
        assert_eq!(compute_scores([&a, &b]), compute_scores([&a, &b]));
    }

    #[test]
    fn test_final_scores() {
        let a = player_with(0, &[(Red, 4)]);
        let b = player_with(1, &[(Blue, 0)]);
        let scores = FinalScores::from_players([&a, &b]);

        assert_eq!(scores.entries().len(), 2);
        assert_eq!(scores.score_of("P0"), Some(4));
        assert_eq!(scores.score_of("P1"), Some(0));
        assert_eq!(scores.pairs().collect::<Vec<_>>(), vec![("P0", 4), ("P1", 0)]);
    }

    #[test]
    fn test_game_result() {
        let a = player_with(0, &[(Red, 4)]);
        let b = player_with(1, &[(Blue, 0)]);
        let result = GameResult::from_scores(&FinalScores::from_players([&a, &b]));
        assert_eq!(result, GameResult::Winner(PlayerId::new(1)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(!result.is_winner(PlayerId::new(0)));

        let tied = GameResult::from_scores(&FinalScores::from_players([&a, &a]));
        assert_eq!(tied, GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(0)]));

        assert_eq!(GameResult::from_scores(&FinalScores::default()), GameResult::NoContest);
    }

    fn arb_pile() -> impl Strategy<Value = Vec<(Color, u8)>> {
        prop::collection::vec((prop::sample::select(Color::ALL.to_vec()), 0u8..=10), 0..15)
    }

    proptest! {
        #[test]
        fn test_scoring_has_no_side_effects(piles in prop::collection::vec(arb_pile(), 2..=4)) {
            let players: Vec<Player> = piles
                .iter()
                .enumerate()
                .map(|(i, pile)| player_with(i as u8, pile))
                .collect();

            let first = compute_scores(players.iter());
            prop_assert_eq!(&first, &compute_scores(players.iter()));

            for (score, player) in first.iter().zip(&players) {
                prop_assert!(*score >= player.collected_rank_sum());
            }
        }
    }
}
