//! State codec integration tests.
//!
//! Save/restore through the public engine API: exact round-trips,
//! selection reset, the restore event sequence, and recovery from
//! corrupt blobs.

use set_engine::{
    codec, CardState, CodecError, GameEvent, RulesConfig, SavedState, SetGame,
};

// =============================================================================
// Round-Trip
// =============================================================================

/// Deck order, board order, score, and card identities all survive.
#[test]
fn test_round_trip_reproduces_state() {
    let mut game = SetGame::new(RulesConfig::classic(), 42);
    game.deal_cards(12, false);
    game.deal_cards(3, true); // move the score off zero

    let bytes = game.serialize();
    let (restored, _) = SetGame::restore(&bytes, RulesConfig::classic()).unwrap();

    assert_eq!(restored.score(), game.score());
    assert_eq!(restored.deck_size(), game.deck_size());

    let board_ids: Vec<_> = game.board().iter().map(|c| c.id).collect();
    let restored_ids: Vec<_> = restored.board().iter().map(|c| c.id).collect();
    assert_eq!(board_ids, restored_ids);

    let board_features: Vec<_> = game.board().iter().map(|c| c.features.clone()).collect();
    let restored_features: Vec<_> = restored.board().iter().map(|c| c.features.clone()).collect();
    assert_eq!(board_features, restored_features);

    // Serializing the restored engine yields the same blob: deck order
    // is preserved too, not just its length.
    assert_eq!(restored.serialize(), bytes);
}

/// Selection flags are not part of the persisted state; whatever was
/// flagged before the save comes back unselected.
#[test]
fn test_selection_flags_reset_on_restore() {
    let mut game = SetGame::new(RulesConfig::classic(), 42);
    game.deal_cards(12, false);

    let picked = [game.board()[0].id, game.board()[5].id];
    game.select(picked[0]);
    game.select(picked[1]);
    assert_eq!(game.selection_state(picked[0]), CardState::Selected);

    let bytes = game.serialize();
    let (restored, _) = SetGame::restore(&bytes, RulesConfig::classic()).unwrap();

    for card in restored.board() {
        assert_eq!(restored.selection_state(card.id), CardState::Unselected);
    }
}

// =============================================================================
// Restore Event Sequence
// =============================================================================

/// An attaching observer sees: the whole board dealt, availability,
/// then an untiered score update. Exactly that, exactly in that order.
#[test]
fn test_restore_event_sequence() {
    let mut game = SetGame::new(RulesConfig::classic(), 42);
    game.deal_cards(12, false);
    let bytes = game.serialize();

    let (restored, events) = SetGame::restore(&bytes, RulesConfig::classic()).unwrap();

    assert_eq!(events.len(), 3);
    assert!(
        matches!(&events[0], GameEvent::Dealt { cards } if cards.len() == restored.board().len())
    );
    assert_eq!(
        events[1],
        GameEvent::DeckAvailabilityChanged {
            remaining: 69,
            can_deal_more: true,
        }
    );
    assert_eq!(
        events[2],
        GameEvent::ScoreUpdated {
            total: 0,
            tier: None,
        }
    );
}

// =============================================================================
// Corrupt Input
// =============================================================================

/// Truncated bytes are a recoverable decode failure, not a panic; the
/// caller is expected to fall back to a fresh game.
#[test]
fn test_truncated_blob_reports_decode_error() {
    let mut game = SetGame::new(RulesConfig::classic(), 42);
    game.deal_cards(12, false);
    let bytes = game.serialize();

    let result = SetGame::restore(&bytes[..10], RulesConfig::classic());
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

/// A blob from a different feature space fails validation against the
/// configuration it is restored under.
#[test]
fn test_cross_config_blob_rejected() {
    use set_engine::RulesConfigBuilder;

    let small = RulesConfigBuilder::new()
        .feature_count(2)
        .feature_options(2)
        .build();
    let mut game = SetGame::new(small, 42);
    game.deal_cards(2, false);
    let bytes = game.serialize();

    let result = SetGame::restore(&bytes, RulesConfig::classic());
    assert!(matches!(result, Err(CodecError::FeatureLength { .. })));
}

/// The schema itself is plain data; a hand-built snapshot decodes like
/// an engine-built one.
#[test]
fn test_schema_is_stable_plain_data() {
    let state = SavedState {
        deck: vec![],
        board: vec![],
        score: -4,
    };

    let bytes = codec::encode(&state);
    let decoded = codec::decode(&bytes, &RulesConfig::classic()).unwrap();
    assert_eq!(decoded, state);

    // Human-readable serialization keeps the same field names.
    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains("\"deck\""));
    assert!(json.contains("\"board\""));
    assert!(json.contains("\"score\""));
}
