//! Observer contract for presentation layers.
//!
//! The engine itself only returns event lists; `dispatch` maps a list
//! onto this trait in emission order for callers that prefer callbacks
//! over matching on `GameEvent` directly.

use crate::core::{Card, CardId, CardState};
use crate::engine::GameEvent;
use crate::matcher::ScoreTier;

/// Callbacks mirroring `GameEvent`, one method per variant.
///
/// Calls arrive synchronously, in the exact order the engine emitted
/// the events, before the originating operation returns to the caller.
pub trait GameObserver {
    fn on_dealt(&mut self, cards: &[Card]);

    fn on_removed(&mut self, cards: &[Card]);

    fn on_replaced(&mut self, old_cards: &[Card], new_cards: &[Card]);

    fn on_selection_changed(&mut self, card: CardId, state: CardState);

    fn on_score_updated(&mut self, total: i64, tier: Option<ScoreTier>);

    fn on_deck_availability_changed(&mut self, remaining: usize, can_deal_more: bool);

    fn on_game_finished(&mut self, final_score: i64);
}

/// Forward an event list to an observer, in order.
pub fn dispatch(events: &[GameEvent], observer: &mut dyn GameObserver) {
    for event in events {
        match event {
            GameEvent::Dealt { cards } => observer.on_dealt(cards),
            GameEvent::Removed { cards } => observer.on_removed(cards),
            GameEvent::Replaced {
                old_cards,
                new_cards,
            } => observer.on_replaced(old_cards, new_cards),
            GameEvent::SelectionChanged { card, state } => {
                observer.on_selection_changed(*card, *state);
            }
            GameEvent::ScoreUpdated { total, tier } => {
                observer.on_score_updated(*total, *tier);
            }
            GameEvent::DeckAvailabilityChanged {
                remaining,
                can_deal_more,
            } => observer.on_deck_availability_changed(*remaining, *can_deal_more),
            GameEvent::GameFinished { final_score } => observer.on_game_finished(*final_score),
        }
    }
}
