//! The game engine: board/deck ownership and the selection state machine.
//!
//! ## Selection contexts
//!
//! The effect of a click depends on what the board's selection flags
//! currently hold. The context is derived by scanning the board, never
//! stored:
//!
//! - **MatchedSetOnBoard**: a completed set is waiting to be vacated.
//!   The next click resolves it (replace its slots from the deck, or
//!   remove it when dealing is not possible) after toggling the clicked
//!   card, unless the click landed on one of the matched cards.
//! - **UnmatchedSetOnBoard**: a failed group is still highlighted. The
//!   next click clears every flag, then starts fresh with the clicked
//!   card.
//! - **NoContext**: plain toggling, until the clicked card completes a
//!   group of `group_size` cards, which is then judged by the matcher.
//!
//! Matched and unmatched groups are always resolved before a new group
//! can form, so at most one of the two contexts is ever active.
//!
//! ## Concurrency
//!
//! Strictly single-threaded and synchronous: every operation completes,
//! including producing all of its events, before returning. Callers
//! serialize access.

use rustc_hash::FxHashMap;

use crate::codec::{self, CodecError, SavedState};
use crate::core::{
    Card, CardId, CardIdAllocator, CardState, GameRng, RulesConfig, DEAL_PENALTY, MATCH_BONUS,
    MISMATCH_PENALTY,
};
use crate::deck::generate_deck;
use crate::engine::GameEvent;
use crate::matcher::{contains_set, is_set, score_for_set, ScoreTier};

/// Derived classification of the board's selection flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    MatchedSetOnBoard,
    UnmatchedSetOnBoard,
    NoContext,
}

/// The rules engine for one game.
///
/// Owns the deck (tail = top), the board (order is significant: slot
/// positions are preserved across replacement), the cumulative score,
/// and the transient selection flags. All mutation goes through
/// [`select`](Self::select) and [`deal_cards`](Self::deal_cards), which
/// return their events in emission order.
pub struct SetGame {
    config: RulesConfig,
    deck: Vec<Card>,
    board: Vec<Card>,
    score: i64,
    selection: FxHashMap<CardId, CardState>,
    finished: bool,
}

impl SetGame {
    /// Create a fresh game with a seeded shuffle.
    ///
    /// The board starts empty; callers deal the opening layout
    /// themselves (the classic app deals 12).
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self::with_rng(config, &mut GameRng::new(seed))
    }

    /// Create a fresh game shuffled from OS entropy.
    #[must_use]
    pub fn from_entropy(config: RulesConfig) -> Self {
        Self::with_rng(config, &mut GameRng::from_entropy())
    }

    fn with_rng(config: RulesConfig, rng: &mut GameRng) -> Self {
        let mut alloc = CardIdAllocator::new();
        let deck = generate_deck(&config, &mut alloc, rng);

        Self {
            config,
            deck,
            board: Vec::new(),
            score: 0,
            selection: FxHashMap::default(),
            finished: false,
        }
    }

    // === Accessors ===

    /// The rules this game runs under.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Cards currently in play, in board order.
    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Undealt cards remaining.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Cumulative score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Selection flag of a board card. `Unselected` for unknown ids.
    #[must_use]
    pub fn selection_state(&self, card: CardId) -> CardState {
        self.selection.get(&card).copied().unwrap_or_default()
    }

    // === Queries ===

    /// Whether `count` cards could be dealt right now.
    ///
    /// Dealing vacates matched slots first, so the capacity check is
    /// against the board net of matched cards.
    #[must_use]
    pub fn can_deal(&self, count: usize) -> bool {
        self.board.len() - self.matched_cards().len() + count <= self.config.max_board_size()
            && self.deck.len() >= count
    }

    /// True when no set hides among the unresolved board cards.
    ///
    /// Callers use this to decide whether to warn before a penalty deal:
    /// if a fresh set is still findable, dealing more is the player
    /// giving up.
    #[must_use]
    pub fn can_deal_without_penalty(&self) -> bool {
        let fresh: Vec<Card> = self
            .board
            .iter()
            .filter(|card| {
                !matches!(
                    self.selection_state(card.id),
                    CardState::Matched | CardState::Unmatched
                )
            })
            .cloned()
            .collect();

        !contains_set(&fresh, &self.config)
    }

    /// Whether any set exists anywhere on the board.
    #[must_use]
    pub fn any_sets_in_game(&self) -> bool {
        contains_set(&self.board, &self.config)
    }

    /// Terminal check: deck exhausted and no set left on the board.
    ///
    /// Pure query. The `GameFinished` event is emitted exactly once, by
    /// the mutating operation that caused the transition.
    #[must_use]
    pub fn is_game_finished(&self) -> bool {
        self.finished
    }

    // === Mutating operations ===

    /// Interpret a click on a board card.
    ///
    /// Panics if `card` is not on the board: the caller handed the
    /// engine an identity it never dealt, which is an invariant break,
    /// not a recoverable condition.
    pub fn select(&mut self, card: CardId) -> Vec<GameEvent> {
        let clicked = self
            .board
            .iter()
            .find(|c| c.id == card)
            .cloned()
            .unwrap_or_else(|| panic!("{card} is not on the board"));

        let mut events = Vec::new();

        match self.context() {
            Context::MatchedSetOnBoard => {
                let matched = self.matched_cards();
                log::debug!("resolving matched set of {}", matched.len());

                if !matched.iter().any(|c| c.id == clicked.id) {
                    self.toggle(clicked.id, &mut events);
                }

                if self.can_deal(matched.len()) {
                    self.deal_into(matched.len(), &mut events);
                } else {
                    self.remove_matched(&mut events);
                }
                self.check_finished(&mut events);
            }
            Context::UnmatchedSetOnBoard => {
                self.reset_selections(&mut events);
                self.toggle(clicked.id, &mut events);
            }
            Context::NoContext => {
                let selected = self.selected_cards();
                let completes_group = selected.len() == self.config.group_size() - 1
                    && self.selection_state(clicked.id) != CardState::Selected;

                if completes_group {
                    self.judge_group(selected, clicked, &mut events);
                } else {
                    self.toggle(clicked.id, &mut events);
                }
            }
        }

        events
    }

    /// Deal `count` cards from the top of the deck.
    ///
    /// Matched slots are refilled in place, in board order, before any
    /// card is appended; the operation emits one `Replaced` batch and
    /// one `Dealt` batch at most, never interleaved per card, followed
    /// by exactly one availability update.
    ///
    /// `with_penalty` applies the deal penalty and emits its score
    /// update ahead of the deal ("couldn't find a set, deal me more
    /// anyway").
    ///
    /// Panics when `count` is zero, the deck is short, or the board
    /// would overflow; check [`can_deal`](Self::can_deal) first.
    pub fn deal_cards(&mut self, count: usize, with_penalty: bool) -> Vec<GameEvent> {
        assert!(count > 0, "Cannot deal zero cards");
        assert!(
            self.can_deal(count),
            "Cannot deal {count}: {} in deck, {} on a board capped at {}",
            self.deck.len(),
            self.board.len(),
            self.config.max_board_size(),
        );

        let mut events = Vec::new();

        if with_penalty {
            self.score += DEAL_PENALTY;
            events.push(GameEvent::ScoreUpdated {
                total: self.score,
                tier: Some(ScoreTier::VeryNegative),
            });
        }

        self.deal_into(count, &mut events);
        self.check_finished(&mut events);
        events
    }

    // === Persistence ===

    /// Encode deck order, board order, and score.
    ///
    /// Selection flags are deliberately not persisted; a restored board
    /// always comes back fully unselected.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        codec::encode(&SavedState {
            deck: self.deck.clone(),
            board: self.board.clone(),
            score: self.score,
        })
    }

    /// Rebuild an engine from a state blob.
    ///
    /// Malformed bytes are a recoverable condition reported as
    /// [`CodecError`]; callers typically fall back to a fresh game. On
    /// success the returned events let an attaching observer rebuild its
    /// view exactly as if it had watched the saved game: one `Dealt`
    /// covering the whole board, one availability update, one score
    /// update with no tier.
    pub fn restore(bytes: &[u8], config: RulesConfig) -> Result<(Self, Vec<GameEvent>), CodecError> {
        let saved = codec::decode(bytes, &config)?;

        let selection: FxHashMap<CardId, CardState> = saved
            .board
            .iter()
            .map(|card| (card.id, CardState::Unselected))
            .collect();

        // The terminal latch is recomputed, not re-announced: a finish
        // that predates the save was already observed then.
        let finished = saved.deck.is_empty() && !contains_set(&saved.board, &config);

        let game = Self {
            config,
            deck: saved.deck,
            board: saved.board,
            score: saved.score,
            selection,
            finished,
        };

        let events = vec![
            GameEvent::Dealt {
                cards: game.board.clone(),
            },
            GameEvent::DeckAvailabilityChanged {
                remaining: game.deck.len(),
                can_deal_more: game.can_deal(game.config.group_size()),
            },
            GameEvent::ScoreUpdated {
                total: game.score,
                tier: None,
            },
        ];

        Ok((game, events))
    }

    // === Internals ===

    fn context(&self) -> Context {
        if !self.matched_cards().is_empty() {
            return Context::MatchedSetOnBoard;
        }
        if self
            .board
            .iter()
            .any(|c| self.selection_state(c.id) == CardState::Unmatched)
        {
            return Context::UnmatchedSetOnBoard;
        }
        Context::NoContext
    }

    fn matched_cards(&self) -> Vec<Card> {
        self.cards_in_state(CardState::Matched)
    }

    fn selected_cards(&self) -> Vec<Card> {
        self.cards_in_state(CardState::Selected)
    }

    fn cards_in_state(&self, state: CardState) -> Vec<Card> {
        self.board
            .iter()
            .filter(|c| self.selection_state(c.id) == state)
            .cloned()
            .collect()
    }

    fn toggle(&mut self, card: CardId, events: &mut Vec<GameEvent>) {
        let state = self.selection_state(card).toggled();
        self.selection.insert(card, state);
        events.push(GameEvent::SelectionChanged { card, state });
    }

    /// Complete a candidate group and judge it.
    fn judge_group(&mut self, selected: Vec<Card>, clicked: Card, events: &mut Vec<GameEvent>) {
        let mut candidate = selected;
        candidate.push(clicked);

        let matched = is_set(&candidate, self.config.feature_count());
        let state = if matched {
            CardState::Matched
        } else {
            CardState::Unmatched
        };

        for card in &candidate {
            self.selection.insert(card.id, state);
            events.push(GameEvent::SelectionChanged {
                card: card.id,
                state,
            });
        }

        let tier = if matched {
            self.score += MATCH_BONUS;
            score_for_set(&candidate)
        } else {
            self.score += MISMATCH_PENALTY;
            ScoreTier::Negative
        };
        log::debug!(
            "group judged {}: score {}",
            if matched { "matched" } else { "unmatched" },
            self.score
        );

        events.push(GameEvent::ScoreUpdated {
            total: self.score,
            tier: Some(tier),
        });

        if matched {
            // Vacating the matched slots may have changed eligibility.
            self.push_availability(events);
        }
    }

    /// Pop `count` cards off the deck, refilling matched slots in place
    /// before appending, then emit the batched events.
    fn deal_into(&mut self, count: usize, events: &mut Vec<GameEvent>) {
        let mut replaced_from = Vec::new();
        let mut replaced_to = Vec::new();
        let mut dealt = Vec::new();

        for _ in 0..count {
            let next = self
                .deck
                .pop()
                .unwrap_or_else(|| panic!("Deck underflow on deal"));
            self.selection.insert(next.id, CardState::Unselected);

            let matched_slot = self
                .board
                .iter()
                .position(|c| self.selection_state(c.id) == CardState::Matched);

            if let Some(slot) = matched_slot {
                let prev = std::mem::replace(&mut self.board[slot], next.clone());
                self.selection.remove(&prev.id);
                replaced_from.push(prev);
                replaced_to.push(next);
            } else {
                self.board.push(next.clone());
                dealt.push(next);
            }
        }

        log::debug!(
            "dealt {count}: {} replaced, {} appended, {} left in deck",
            replaced_from.len(),
            dealt.len(),
            self.deck.len()
        );

        if !replaced_from.is_empty() {
            events.push(GameEvent::Replaced {
                old_cards: replaced_from,
                new_cards: replaced_to,
            });
        }
        if !dealt.is_empty() {
            events.push(GameEvent::Dealt { cards: dealt });
        }
        self.push_availability(events);
    }

    /// Drop the matched cards from the board entirely.
    fn remove_matched(&mut self, events: &mut Vec<GameEvent>) {
        let removed = self.matched_cards();

        self.board
            .retain(|c| !removed.iter().any(|r| r.id == c.id));
        for card in &removed {
            self.selection.remove(&card.id);
        }

        log::debug!("removed {} matched cards, board at {}", removed.len(), self.board.len());
        events.push(GameEvent::Removed { cards: removed });
    }

    fn reset_selections(&mut self, events: &mut Vec<GameEvent>) {
        let flagged: Vec<CardId> = self
            .board
            .iter()
            .filter(|c| self.selection_state(c.id) != CardState::Unselected)
            .map(|c| c.id)
            .collect();

        for card in flagged {
            self.selection.insert(card, CardState::Unselected);
            events.push(GameEvent::SelectionChanged {
                card,
                state: CardState::Unselected,
            });
        }
    }

    fn push_availability(&self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::DeckAvailabilityChanged {
            remaining: self.deck.len(),
            can_deal_more: self.can_deal(self.config.group_size()),
        });
    }

    /// Latch the terminal state and announce it, once.
    fn check_finished(&mut self, events: &mut Vec<GameEvent>) {
        if !self.finished && self.deck.is_empty() && !contains_set(&self.board, &self.config) {
            self.finished = true;
            log::debug!("game finished with score {}", self.score);
            events.push(GameEvent::GameFinished {
                final_score: self.score,
            });
        }
    }
}
