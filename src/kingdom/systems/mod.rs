//! Turn systems - the per-turn rules the engine composes

pub mod election;
pub mod game_over;
pub mod random_events;

pub use election::ElectionOutcome;
pub use game_over::{GameOutcome, Vitals};
pub use random_events::RandomEvent;
