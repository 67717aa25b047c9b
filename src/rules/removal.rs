//! The parade removal rule.
//!
//! Playing a card of rank `v` onto a row of `n` cards protects the newest
//! `v` cards. If `n <= v` nothing is exposed. Otherwise the oldest
//! `n - v` cards are evaluated, oldest first, and each one is taken if it
//! shares the played card's color or its rank is at most `v`.
//!
//! The rule is a pure function of "row before the play" and "card played",
//! which lets the engine recompute it to validate a commit.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::Card;
use crate::error::ConsistencyFault;

/// Cards a play takes from the row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Removal {
    /// Positions in the pre-play row, ascending.
    indices: SmallVec<[usize; 8]>,
    /// The cards at those positions, in scan order.
    cards: SmallVec<[Card; 8]>,
}

impl Removal {
    /// Positions in the pre-play row, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Removed cards in scan order (oldest first).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// How many of the oldest row cards a card of `rank` exposes.
///
/// ```
/// use parade_engine::rules::evaluated_count;
///
/// assert_eq!(evaluated_count(4, 0), 4);
/// assert_eq!(evaluated_count(6, 2), 4);
/// assert_eq!(evaluated_count(3, 5), 0);
/// ```
#[must_use]
pub fn evaluated_count(row_len: usize, rank: u8) -> usize {
    row_len.saturating_sub(usize::from(rank))
}

/// Whether `candidate` is taken when `played` is played on top of it.
#[must_use]
pub fn is_taken(candidate: Card, played: Card) -> bool {
    candidate.color() == played.color() || candidate.rank() <= played.rank()
}

/// Compute the cards `played` takes from `row_before`.
#[must_use]
pub fn compute_removal(row_before: &Vector<Card>, played: Card) -> Removal {
    let evaluated = evaluated_count(row_before.len(), played.rank());
    let mut removal = Removal::default();

    for (index, &candidate) in row_before.iter().take(evaluated).enumerate() {
        if is_taken(candidate, played) {
            removal.indices.push(index);
            removal.cards.push(candidate);
        }
    }

    removal
}

/// The row after `played` is appended and `removal` is taken.
#[must_use]
pub fn apply_removal(row_before: &Vector<Card>, played: Card, removal: &Removal) -> Vector<Card> {
    let mut row = row_before.clone();
    row.push_back(played);
    for &index in removal.indices.iter().rev() {
        row.remove(index);
    }
    row
}

/// Re-validate a play before it is committed.
///
/// Checks that the post-play row has `pre + 1 - removed` cards, that every
/// removed card was in the pre-play row, and that recomputing the rule from
/// scratch gives the same removal.
pub fn verify_removal(
    row_before: &Vector<Card>,
    played: Card,
    removal: &Removal,
    row_after: &Vector<Card>,
) -> Result<(), ConsistencyFault> {
    let expected = (row_before.len() + 1).checked_sub(removal.len()).ok_or(
        ConsistencyFault::RowSizeMismatch {
            expected: 0,
            actual: row_after.len(),
        },
    )?;
    if row_after.len() != expected {
        return Err(ConsistencyFault::RowSizeMismatch {
            expected,
            actual: row_after.len(),
        });
    }

    let mut available: FxHashMap<Card, usize> = FxHashMap::default();
    for &card in row_before {
        *available.entry(card).or_insert(0) += 1;
    }
    for &card in removal.cards() {
        match available.get_mut(&card) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return Err(ConsistencyFault::RemovedCardNotInRow(card)),
        }
    }

    if compute_removal(row_before, played) != *removal {
        return Err(ConsistencyFault::RemovalMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color::{self, *};

    fn c(color: Color, rank: u8) -> Card {
        Card::new(color, rank).unwrap()
    }

    fn row(cards: &[Card]) -> Vector<Card> {
        cards.iter().copied().collect()
    }

    #[test]
    fn test_short_row_takes_nothing() {
        let before = row(&[c(Red, 0), c(Blue, 1), c(Green, 2)]);
        let removal = compute_removal(&before, c(Red, 3));
        assert!(removal.is_empty());

        let removal = compute_removal(&before, c(Red, 5));
        assert!(removal.is_empty());
    }

    #[test]
    fn test_only_exposed_cards_are_evaluated() {
        // Rank 2 on a 5-card row exposes the oldest 3.
        let before = row(&[c(Blue, 9), c(Green, 1), c(Yellow, 8), c(Red, 0), c(Blue, 0)]);
        let removal = compute_removal(&before, c(Blue, 2));

        assert_eq!(removal.indices(), &[0, 1]);
        assert_eq!(removal.cards(), &[c(Blue, 9), c(Green, 1)]);
    }

    #[test]
    fn test_rank_zero_exposes_whole_row() {
        let before = row(&[c(Red, 5), c(Blue, 0), c(Green, 3), c(Purple, 7)]);
        let removal = compute_removal(&before, c(Green, 0));

        assert_eq!(removal.cards(), &[c(Blue, 0), c(Green, 3)]);
    }

    #[test]
    fn test_is_taken() {
        let played = c(Yellow, 4);
        assert!(is_taken(c(Yellow, 10), played));
        assert!(is_taken(c(Black, 4), played));
        assert!(is_taken(c(Black, 0), played));
        assert!(!is_taken(c(Black, 5), played));
    }

    #[test]
    fn test_apply_removal() {
        let before = row(&[c(Red, 5), c(Blue, 0), c(Green, 3), c(Purple, 7)]);
        let played = c(Green, 0);
        let removal = compute_removal(&before, played);
        let after = apply_removal(&before, played, &removal);

        assert_eq!(after, row(&[c(Red, 5), c(Purple, 7), c(Green, 0)]));
        assert!(verify_removal(&before, played, &removal, &after).is_ok());
    }

    #[test]
    fn test_verify_catches_size_mismatch() {
        let before = row(&[c(Red, 5), c(Blue, 0)]);
        let played = c(Blue, 0);
        let removal = compute_removal(&before, played);
        assert_eq!(removal.len(), 1);

        // Played card appended but nothing taken.
        let mut wrong_after = before.clone();
        wrong_after.push_back(played);

        assert_eq!(
            verify_removal(&before, played, &removal, &wrong_after),
            Err(ConsistencyFault::RowSizeMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_verify_catches_foreign_card() {
        let before = row(&[c(Red, 5), c(Blue, 0)]);
        let played = c(Blue, 0);
        let mut forged = compute_removal(&before, played);
        forged.cards[0] = c(Black, 10);
        let after = apply_removal(&before, played, &forged);

        assert_eq!(
            verify_removal(&before, played, &forged, &after),
            Err(ConsistencyFault::RemovedCardNotInRow(c(Black, 10)))
        );
    }

    #[test]
    fn test_verify_catches_recompute_mismatch() {
        let before = row(&[c(Red, 5), c(Blue, 0), c(Green, 9)]);
        let played = c(Blue, 0);
        let mut forged = compute_removal(&before, played);
        forged.indices.push(0);
        forged.cards.push(c(Red, 5));
        let after = apply_removal(&before, played, &forged);

        assert_eq!(
            verify_removal(&before, played, &forged, &after),
            Err(ConsistencyFault::RemovalMismatch)
        );
    }
}
