//! Set matching predicates.
//!
//! Pure combinatorics, no game state: a group of cards is a set when
//! every feature column is either uniform or pairwise distinct across
//! the whole group. A column with exactly two equal values and one
//! different breaks the group.

pub mod score;

pub use score::{score_for_set, ScoreTier};

use crate::core::{Card, RulesConfig};

/// Any classic board of at least this many cards contains a set.
///
/// The largest cap (set-free card collection) in the K=3, F=4 feature
/// space has 20 cards. The bound does not transfer to other
/// configurations and must be re-derived if F or K change.
const CLASSIC_SET_FREE_BOUND: usize = 21;

/// Is every value in the column the same, or are all pairwise distinct?
fn column_uniform_or_distinct(values: &[u8]) -> bool {
    let mut sorted: Vec<u8> = values.to_vec();
    sorted.sort_unstable();

    let uniform = sorted.windows(2).all(|w| w[0] == w[1]);
    let distinct = sorted.windows(2).all(|w| w[0] != w[1]);
    uniform || distinct
}

/// The set predicate.
///
/// False on an empty group. Order-independent: any permutation of
/// `cards` yields the same answer.
///
/// ```
/// use set_engine::core::{Card, CardId};
/// use set_engine::matcher::is_set;
/// use smallvec::smallvec;
///
/// let cards = [
///     Card::new(CardId::new(0), smallvec![0, 0, 1, 2]),
///     Card::new(CardId::new(1), smallvec![1, 0, 1, 1]),
///     Card::new(CardId::new(2), smallvec![2, 0, 1, 0]),
/// ];
/// assert!(is_set(&cards, 4));
/// ```
#[must_use]
pub fn is_set(cards: &[Card], feature_count: usize) -> bool {
    if cards.is_empty() {
        return false;
    }

    (0..feature_count).all(|index| {
        let column: Vec<u8> = cards.iter().map(|card| card.feature(index)).collect();
        column_uniform_or_distinct(&column)
    })
}

/// Does any `group_size`-subset of `cards` form a set?
///
/// Exhaustive enumeration, O(n^3) for the classic group size of 3. On
/// the classic feature space, boards of 21 or more cards are guaranteed
/// to contain a set and short-circuit without enumerating.
#[must_use]
pub fn contains_set(cards: &[Card], config: &RulesConfig) -> bool {
    let group_size = config.group_size();

    if cards.len() < group_size {
        return false;
    }

    if config.is_classic() && cards.len() >= CLASSIC_SET_FREE_BOUND {
        return true;
    }

    let mut group: Vec<&Card> = Vec::with_capacity(group_size);
    any_group_is_set(cards, config.feature_count(), group_size, 0, &mut group)
}

/// Recurse over index combinations, testing each completed group.
fn any_group_is_set<'a>(
    cards: &'a [Card],
    feature_count: usize,
    group_size: usize,
    start: usize,
    group: &mut Vec<&'a Card>,
) -> bool {
    if group.len() == group_size {
        let candidate: Vec<Card> = group.iter().map(|&c| c.clone()).collect();
        return is_set(&candidate, feature_count);
    }

    // Leave room for the remaining picks.
    let last = cards.len() - (group_size - group.len()) + 1;
    for index in start..last {
        group.push(&cards[index]);
        if any_group_is_set(cards, feature_count, group_size, index + 1, group) {
            group.pop();
            return true;
        }
        group.pop();
    }

    false
}
