//! # set-engine
//!
//! The rules engine of the pattern-matching card game Set: deck
//! generation over a feature space, the set-matching predicates, the
//! selection state machine with dealing and scoring, and a binary codec
//! for save/restore.
//!
//! ## Design Principles
//!
//! 1. **Events out, no observers in**: every mutating operation returns
//!    the ordered list of [`GameEvent`]s it produced. The engine holds
//!    no listener reference; callers dispatch (a [`GameObserver`] trait
//!    is provided for callback-shaped presentation layers).
//!
//! 2. **Configured, not hardcoded**: the feature space (F features, K
//!    options) and board capacity come from [`RulesConfig`]. The classic
//!    ruleset is `RulesConfig::classic()`: 81 cards, groups of 3.
//!
//! 3. **Identity is not features**: cards are distinct entities with
//!    ids allocated once at deck generation; two cards with equal
//!    feature vectors are still different cards.
//!
//! 4. **Loud on misuse, graceful on bad data**: precondition violations
//!    (over-dealing, scoring a non-set) panic; malformed persisted
//!    blobs are recoverable [`CodecError`]s.
//!
//! ## Modules
//!
//! - `core`: cards, identity allocation, RNG, rules configuration
//! - `deck`: feature-space enumeration and shuffled deck generation
//! - `matcher`: set predicates and score tiers
//! - `engine`: the game state machine, events, observer contract
//! - `codec`: persisted state schema and binary encode/decode
//!
//! ## Quick start
//!
//! ```
//! use set_engine::{RulesConfig, SetGame};
//!
//! let mut game = SetGame::new(RulesConfig::classic(), 42);
//! let events = game.deal_cards(12, false);
//!
//! assert_eq!(game.board().len(), 12);
//! assert_eq!(game.deck_size(), 69);
//! assert!(!events.is_empty());
//! ```

pub mod codec;
pub mod core;
pub mod deck;
pub mod engine;
pub mod matcher;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardIdAllocator, CardState, FeatureVec, GameRng, RulesConfig, RulesConfigBuilder,
    DEAL_PENALTY, MATCH_BONUS, MISMATCH_PENALTY,
};

pub use crate::deck::generate_deck;

pub use crate::matcher::{contains_set, is_set, score_for_set, ScoreTier};

pub use crate::engine::{dispatch, GameEvent, GameObserver, SetGame};

pub use crate::codec::{CodecError, SavedState};
