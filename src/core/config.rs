//! Rules configuration.
//!
//! The feature space and board limits are configured at engine creation
//! rather than hardcoded. The classic ruleset is 4 features with 3
//! options each (an 81-card deck, groups of 3).

use serde::{Deserialize, Serialize};

/// Score delta applied when a completed group forms a set.
pub const MATCH_BONUS: i64 = 3;

/// Score delta applied when a completed group fails to form a set.
pub const MISMATCH_PENALTY: i64 = -1;

/// Score delta applied when the player deals extra cards with a penalty.
pub const DEAL_PENALTY: i64 = -3;

/// Rules configuration: feature space dimensions and board capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    feature_count: usize,
    feature_options: usize,
    max_board_size: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl RulesConfig {
    /// The classic ruleset: F = 4, K = 3, board capped at the deck size.
    #[must_use]
    pub fn classic() -> Self {
        RulesConfigBuilder::default().build()
    }

    /// Number of features per card (F).
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Options per feature (K). Also the group size.
    #[must_use]
    pub fn feature_options(&self) -> usize {
        self.feature_options
    }

    /// Maximum number of cards allowed on the board at once.
    #[must_use]
    pub fn max_board_size(&self) -> usize {
        self.max_board_size
    }

    /// Cards in a full deck: K^F.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.feature_options.pow(self.feature_count as u32)
    }

    /// Cards in a candidate group: K.
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.feature_options
    }

    /// Whether this is the classic K=3, F=4 feature space.
    ///
    /// The matcher's 21-card short-circuit bound only holds here.
    #[must_use]
    pub fn is_classic(&self) -> bool {
        self.feature_count == 4 && self.feature_options == 3
    }
}

/// Builder for `RulesConfig`.
pub struct RulesConfigBuilder {
    feature_count: usize,
    feature_options: usize,
    max_board_size: Option<usize>,
}

impl Default for RulesConfigBuilder {
    fn default() -> Self {
        Self {
            feature_count: 4,
            feature_options: 3,
            max_board_size: None,
        }
    }
}

impl RulesConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature_count(mut self, count: usize) -> Self {
        assert!(count > 0, "Feature count must be > 0");
        self.feature_count = count;
        self
    }

    pub fn feature_options(mut self, options: usize) -> Self {
        assert!(
            (2..=255).contains(&options),
            "Feature options must be 2-255"
        );
        self.feature_options = options;
        self
    }

    /// Cap the board. Defaults to the full deck size when unset.
    pub fn max_board_size(mut self, max: usize) -> Self {
        self.max_board_size = Some(max);
        self
    }

    pub fn build(self) -> RulesConfig {
        let deck_size = self.feature_options.pow(self.feature_count as u32);
        let max_board_size = self.max_board_size.unwrap_or(deck_size);

        assert!(
            max_board_size >= self.feature_options,
            "Board must hold at least one full group"
        );

        RulesConfig {
            feature_count: self.feature_count,
            feature_options: self.feature_options,
            max_board_size,
        }
    }
}
