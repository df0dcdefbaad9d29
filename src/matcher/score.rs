//! Score tiers for completed groups.
//!
//! A valid set scores by how many of its feature columns are all-distinct:
//! more variety, higher tier. The negative tiers label score updates from
//! the other calling contexts (a failed group, a penalty deal) and are
//! never produced by `score_for_set`.

use serde::{Deserialize, Serialize};

use crate::core::Card;
use crate::matcher::is_set;

/// Tier of a single score update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    /// Penalty deal ("couldn't find a set, deal more anyway").
    VeryNegative,
    /// Completed group that was not a set.
    Negative,
    /// Set with at most one all-distinct column.
    Low,
    /// Set with two all-distinct columns.
    Medium,
    /// Set with three all-distinct columns.
    High,
    /// Set distinct in every column.
    Highest,
}

impl ScoreTier {
    /// Signed magnitude of this tier.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            ScoreTier::VeryNegative => -3,
            ScoreTier::Negative => -1,
            ScoreTier::Low => 1,
            ScoreTier::Medium => 2,
            ScoreTier::High => 3,
            ScoreTier::Highest => 4,
        }
    }

    /// Tier for a set with the given count of all-distinct columns.
    ///
    /// Total over `0..=F`: counts above four saturate at `Highest`, and
    /// zero (unreachable for cards with distinct feature vectors) maps
    /// to `Low`.
    #[must_use]
    pub const fn for_distinct_columns(count: usize) -> Self {
        match count {
            0 | 1 => ScoreTier::Low,
            2 => ScoreTier::Medium,
            3 => ScoreTier::High,
            _ => ScoreTier::Highest,
        }
    }
}

/// Rate a matched group by its all-distinct column count.
///
/// Panics if `cards` is empty or does not satisfy the set predicate;
/// callers only score groups the matcher has already accepted.
#[must_use]
pub fn score_for_set(cards: &[Card]) -> ScoreTier {
    assert!(!cards.is_empty(), "Cannot score an empty group");

    let feature_count = cards[0].features.len();
    assert!(
        is_set(cards, feature_count),
        "Cannot score a group that is not a set"
    );

    let distinct_columns = (0..feature_count)
        .filter(|&index| {
            let mut column: Vec<u8> = cards.iter().map(|card| card.feature(index)).collect();
            column.sort_unstable();
            column.windows(2).all(|w| w[0] != w[1])
        })
        .count();

    ScoreTier::for_distinct_columns(distinct_columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;

    fn card(id: u32, features: [u8; 4]) -> Card {
        Card::new(CardId::new(id), features.iter().copied().collect())
    }

    #[test]
    fn test_tier_values() {
        assert_eq!(ScoreTier::VeryNegative.value(), -3);
        assert_eq!(ScoreTier::Negative.value(), -1);
        assert_eq!(ScoreTier::Low.value(), 1);
        assert_eq!(ScoreTier::Medium.value(), 2);
        assert_eq!(ScoreTier::High.value(), 3);
        assert_eq!(ScoreTier::Highest.value(), 4);
    }

    #[test]
    fn test_one_distinct_column() {
        let cards = [
            card(0, [0, 1, 1, 1]),
            card(1, [1, 1, 1, 1]),
            card(2, [2, 1, 1, 1]),
        ];
        assert_eq!(score_for_set(&cards), ScoreTier::Low);
    }

    #[test]
    fn test_two_distinct_columns() {
        let cards = [
            card(0, [0, 0, 1, 1]),
            card(1, [1, 1, 1, 1]),
            card(2, [2, 2, 1, 1]),
        ];
        assert_eq!(score_for_set(&cards), ScoreTier::Medium);
    }

    #[test]
    fn test_three_distinct_columns() {
        let cards = [
            card(0, [0, 0, 0, 1]),
            card(1, [1, 1, 1, 1]),
            card(2, [2, 2, 2, 1]),
        ];
        assert_eq!(score_for_set(&cards), ScoreTier::High);
    }

    #[test]
    fn test_four_distinct_columns() {
        let cards = [
            card(0, [0, 0, 0, 0]),
            card(1, [1, 1, 1, 1]),
            card(2, [2, 2, 2, 2]),
        ];
        assert_eq!(score_for_set(&cards), ScoreTier::Highest);
    }

    #[test]
    fn test_score_ignores_order_and_identity() {
        let forward = [
            card(0, [0, 0, 0, 1]),
            card(1, [1, 1, 1, 1]),
            card(2, [2, 2, 2, 1]),
        ];
        let backward = [
            card(9, [2, 2, 2, 1]),
            card(8, [1, 1, 1, 1]),
            card(7, [0, 0, 0, 1]),
        ];
        assert_eq!(score_for_set(&forward), score_for_set(&backward));
    }

    #[test]
    #[should_panic(expected = "empty group")]
    fn test_empty_group_panics() {
        score_for_set(&[]);
    }

    #[test]
    #[should_panic(expected = "not a set")]
    fn test_non_set_panics() {
        let cards = [
            card(0, [0, 0, 0, 0]),
            card(1, [0, 0, 0, 0]),
            card(2, [1, 0, 0, 0]),
        ];
        score_for_set(&cards);
    }
}
