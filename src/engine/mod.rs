//! The game engine: selection state machine, dealing, scoring, events.

pub mod events;
pub mod game;
pub mod observer;

pub use events::GameEvent;
pub use game::SetGame;
pub use observer::{dispatch, GameObserver};
