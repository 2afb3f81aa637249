pub mod config;
pub mod error;
pub mod pacing;
pub mod types;

pub use config::GameConfig;
pub use error::{KingdomError, Result};
pub use pacing::{NoPacer, Pacer, RecordingPacer, ThreadPacer};
pub use types::{Difficulty, ResourceType, Turn};
