//! State codec: the persisted form of a game.
//!
//! The blob carries deck order, board order (slot positions matter), and
//! the cumulative score, nothing else. Selection flags are transient by
//! design and the terminal latch is derivable, so neither is persisted.
//!
//! Decoding is the one place where bad input is *not* a programmer
//! error: blobs come from an external store and may be truncated or
//! stale. Failures surface as [`CodecError`] so the caller can fall back
//! to a fresh game; the engine never repairs corrupt state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Card, CardId, RulesConfig};

/// Decode failure. Recoverable, unlike the engine's precondition panics.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The byte blob did not parse (wrong schema, truncated data).
    #[error("malformed state blob: {0}")]
    Decode(#[from] bincode::Error),

    /// A restored card's feature vector has the wrong length.
    #[error("{id} has a feature vector of length {len}, expected {expected}")]
    FeatureLength {
        id: CardId,
        len: usize,
        expected: usize,
    },

    /// A restored feature value is outside the configured option range.
    #[error("{id} has feature value {value}, outside 0..{options}")]
    FeatureRange {
        id: CardId,
        value: u8,
        options: usize,
    },

    /// The same card identity appears twice across deck and board.
    #[error("{id} appears more than once in the restored state")]
    DuplicateCard { id: CardId },

    /// The restored board does not fit the configured maximum.
    #[error("restored board of {len} cards exceeds the maximum of {max}")]
    BoardOverflow { len: usize, max: usize },
}

/// The persisted schema. Round-trips exactly: deck order, board order,
/// score, and every card identity survive a save/restore unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Undealt cards, stack order (tail = top).
    pub deck: Vec<Card>,

    /// In-play cards, board order.
    pub board: Vec<Card>,

    /// Cumulative score.
    pub score: i64,
}

/// Encode a state snapshot.
///
/// Encoding an in-memory value cannot fail short of allocation failure,
/// so this is infallible at the API level.
#[must_use]
pub fn encode(state: &SavedState) -> Vec<u8> {
    bincode::serialize(state).expect("in-memory state snapshot must encode")
}

/// Decode and validate a state snapshot against a rules configuration.
pub fn decode(bytes: &[u8], config: &RulesConfig) -> Result<SavedState, CodecError> {
    let state: SavedState = bincode::deserialize(bytes)?;
    validate(&state, config)?;
    Ok(state)
}

/// Cheap structural checks: a blob that parses can still disagree with
/// the configuration it is being restored under.
fn validate(state: &SavedState, config: &RulesConfig) -> Result<(), CodecError> {
    if state.board.len() > config.max_board_size() {
        return Err(CodecError::BoardOverflow {
            len: state.board.len(),
            max: config.max_board_size(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for card in state.deck.iter().chain(state.board.iter()) {
        if !seen.insert(card.id) {
            return Err(CodecError::DuplicateCard { id: card.id });
        }

        if card.features.len() != config.feature_count() {
            return Err(CodecError::FeatureLength {
                id: card.id,
                len: card.features.len(),
                expected: config.feature_count(),
            });
        }

        if let Some(&value) = card
            .features
            .iter()
            .find(|&&v| v as usize >= config.feature_options())
        {
            return Err(CodecError::FeatureRange {
                id: card.id,
                value,
                options: config.feature_options(),
            });
        }
    }

    Ok(())
}
