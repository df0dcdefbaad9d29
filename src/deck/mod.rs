//! Deck generation over the card feature space.
//!
//! The deck is the full Cartesian product of F features with K options
//! each: exactly K^F distinct feature vectors, every one instantiated as
//! a card with a freshly allocated identity, shuffled once at creation.

use crate::core::{Card, CardIdAllocator, FeatureVec, GameRng, RulesConfig};

/// Enumerate every feature vector of the configured space.
///
/// Vectors are produced in lexicographic order (an odometer over base-K
/// digits); the caller shuffles. Exactly `K^F` vectors, no duplicates.
fn feature_vectors(config: &RulesConfig) -> Vec<FeatureVec> {
    let feature_count = config.feature_count();
    let options = config.feature_options() as u8;

    let mut vectors = Vec::with_capacity(config.deck_size());
    let mut current: FeatureVec = std::iter::repeat(0).take(feature_count).collect();

    loop {
        vectors.push(current.clone());

        // Advance the odometer; overflow past the last digit means done.
        let mut index = feature_count;
        loop {
            if index == 0 {
                return vectors;
            }
            index -= 1;
            current[index] += 1;
            if current[index] < options {
                break;
            }
            current[index] = 0;
        }
    }
}

/// Generate a full, uniformly shuffled deck.
///
/// Every card gets a fresh id from `alloc`; two calls with the same
/// allocator never produce colliding identities.
///
/// ```
/// use set_engine::core::{CardIdAllocator, GameRng, RulesConfig};
/// use set_engine::deck::generate_deck;
///
/// let config = RulesConfig::classic();
/// let mut alloc = CardIdAllocator::new();
/// let mut rng = GameRng::new(7);
///
/// let deck = generate_deck(&config, &mut alloc, &mut rng);
/// assert_eq!(deck.len(), 81);
/// ```
pub fn generate_deck(
    config: &RulesConfig,
    alloc: &mut CardIdAllocator,
    rng: &mut GameRng,
) -> Vec<Card> {
    let mut deck: Vec<Card> = feature_vectors(config)
        .into_iter()
        .map(|features| Card::new(alloc.alloc(), features))
        .collect();

    rng.shuffle(&mut deck);
    deck
}
