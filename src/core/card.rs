//! Card identity and selection state.
//!
//! A card is an immutable feature vector plus an identity. Identity is
//! assigned once, at deck generation, and is never derived from features:
//! two cards with identical feature vectors are still distinct entities.
//!
//! ## Id Allocation
//!
//! Ids come from a `CardIdAllocator` owned by whoever builds the deck.
//! There is no global counter; an allocator never hands out the same id
//! twice, so every card of one engine instance has a unique identity.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Feature vector of a card. Each entry is an integer in `[0, K)`.
///
/// Inline storage covers the classic configuration (F = 4) without
/// heap allocation; larger feature counts spill transparently.
pub type FeatureVec = SmallVec<[u8; 4]>;

/// Unique identifier for a card.
///
/// Monotonic within one allocator, never reused. Equality and hashing of
/// cards go through this id, not through features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// An immutable card: identity plus feature vector.
///
/// Cards are created exactly once, during deck generation, and are only
/// relocated between the deck and the board afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity, assigned at creation.
    pub id: CardId,

    /// Ordered feature vector of length F.
    pub features: FeatureVec,
}

impl Card {
    /// Create a card with the given identity and features.
    #[must_use]
    pub fn new(id: CardId, features: FeatureVec) -> Self {
        Self { id, features }
    }

    /// Read one feature by column index.
    ///
    /// Panics if `index` is out of range; callers always iterate within
    /// the configured feature count.
    #[must_use]
    pub fn feature(&self, index: usize) -> u8 {
        self.features[index]
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

/// Transient per-card selection state.
///
/// Keyed by card identity inside the engine and never persisted: a
/// restored board always comes back fully `Unselected`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Not part of any selection.
    #[default]
    Unselected,
    /// Picked by the player, group not yet complete.
    Selected,
    /// Part of a completed group that formed a set.
    Matched,
    /// Part of a completed group that did not form a set.
    Unmatched,
}

impl CardState {
    /// The opposite of a plain selection toggle.
    ///
    /// Only meaningful for `Unselected`/`Selected`; the engine resolves
    /// `Matched`/`Unmatched` groups before toggling again.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CardState::Unselected => CardState::Selected,
            _ => CardState::Unselected,
        }
    }
}

/// Hands out card ids, monotonically, without reuse.
///
/// Owned by the caller of deck generation so identity allocation is
/// deterministic and testable (no hidden global state).
#[derive(Clone, Debug, Default)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next card id.
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_identity_not_features() {
        let features: FeatureVec = smallvec![0, 1, 2, 0];
        let a = Card::new(CardId::new(1), features.clone());
        let b = Card::new(CardId::new(2), features);

        // Same feature vector, distinct entities.
        assert_ne!(a, b);
        assert_eq!(a, Card::new(CardId::new(1), smallvec![2, 2, 2, 2]));
    }

    #[test]
    fn test_allocator_monotonic() {
        let mut alloc = CardIdAllocator::new();

        let a = alloc.alloc();
        let b = alloc.alloc();
        let c = alloc.alloc();

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(c, CardId::new(2));
    }

    #[test]
    fn test_state_toggle() {
        assert_eq!(CardState::Unselected.toggled(), CardState::Selected);
        assert_eq!(CardState::Selected.toggled(), CardState::Unselected);
    }

    #[test]
    fn test_default_state_is_unselected() {
        assert_eq!(CardState::default(), CardState::Unselected);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(7), smallvec![1, 0, 2, 1]);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card.id, deserialized.id);
        assert_eq!(card.features, deserialized.features);
    }
}
