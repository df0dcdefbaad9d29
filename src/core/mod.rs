//! Core engine types: cards, identity allocation, RNG, configuration.
//!
//! These are the building blocks the rest of the crate is assembled from;
//! nothing here knows about boards, matching, or scoring.

pub mod card;
pub mod config;
pub mod rng;

pub use card::{Card, CardId, CardIdAllocator, CardState, FeatureVec};
pub use config::{RulesConfig, RulesConfigBuilder, DEAL_PENALTY, MATCH_BONUS, MISMATCH_PENALTY};
pub use rng::GameRng;
