//! Domain events emitted by engine operations.
//!
//! Every mutating operation returns the ordered list of events it
//! produced; the caller dispatches them (see `observer`). The engine
//! holds no reference to any listener, so observer lifetime never leaks
//! into engine state.
//!
//! Within one operation the order is fixed: selection changes, then
//! score updates, then availability updates, then finish.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardId, CardState};
use crate::matcher::ScoreTier;

/// One observable engine state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Cards appended to the end of the board, in board order.
    Dealt { cards: Vec<Card> },

    /// Matched cards removed from the board for good, in board order.
    Removed { cards: Vec<Card> },

    /// In-place slot replacements; `old_cards[i]` was replaced by
    /// `new_cards[i]` at the same board position.
    Replaced {
        old_cards: Vec<Card>,
        new_cards: Vec<Card>,
    },

    /// One card's selection flag changed.
    SelectionChanged { card: CardId, state: CardState },

    /// The cumulative score changed. `tier` labels the move that caused
    /// it; `None` for the synthetic update emitted on restore.
    ScoreUpdated {
        total: i64,
        tier: Option<ScoreTier>,
    },

    /// Deck size or dealing eligibility changed.
    DeckAvailabilityChanged {
        remaining: usize,
        can_deal_more: bool,
    },

    /// The game reached its terminal state. Emitted exactly once, by the
    /// operation whose completion empties the deck with no set on board.
    GameFinished { final_score: i64 },
}
