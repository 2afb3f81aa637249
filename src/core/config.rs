//! Game configuration with documented constants
//!
//! Every balance number the turn engine consults is collected here.
//! Defaults reproduce the classic rules; a TOML file may override any
//! subset of them (missing keys fall back to the defaults).

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::core::types::{Difficulty, Turn};

/// Configuration for the turn engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === VICTORY / DEFEAT ===
    /// Surviving to this turn wins the game
    pub victory_turn: Turn,

    /// Treasury below this value bankrupts the kingdom
    ///
    /// Inventories never go negative through normal play, so this only
    /// trips on a hand-edited or legacy save.
    pub bankruptcy_threshold: i64,

    /// Happiness at or below this value triggers a revolt
    pub revolt_threshold: i32,

    /// With no soldiers, a neighbour conquers the kingdom with 1-in-N odds
    ///
    /// 0 disables conquest.
    pub conquest_odds: u32,

    // === ELECTIONS ===
    /// Turns between elections
    pub election_interval: Turn,

    /// Approval below this value deposes the king
    pub approval_threshold: i32,

    /// Upper bound (exclusive) of the random approval swing
    pub approval_roll_max: i32,

    /// Happiness granted when a new king is crowned
    pub coronation_bonus: i32,

    // === RANDOM EVENTS ===
    /// A random event is rolled with 1-in-N odds each turn
    ///
    /// 0 disables random events entirely.
    pub random_event_odds: u32,

    // === DISASTERS ===
    /// Disaster cooldown on Easy
    pub disaster_interval_easy: Turn,

    /// Disaster cooldown on Medium and Hard
    pub disaster_interval_hard: Turn,

    /// Whether a due disaster is actually applied
    ///
    /// The classic rules only reset the cooldown. Enable this to have the
    /// engine strike the kingdom whenever the cooldown elapses.
    pub disasters_enabled: bool,

    // === UPKEEP ===
    /// Gold paid per soldier each turn
    pub upkeep_per_soldier: i64,

    // === PACING ===
    /// Length of the drill pause when training soldiers (milliseconds)
    pub training_delay_ms: u64,

    /// Pause before the status screen is redrawn (milliseconds)
    pub status_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            victory_turn: 20,
            bankruptcy_threshold: -1000,
            revolt_threshold: 10,
            conquest_odds: 10,

            election_interval: 5,
            approval_threshold: 40,
            approval_roll_max: 30,
            coronation_bonus: 20,

            random_event_odds: 4,

            disaster_interval_easy: 3,
            disaster_interval_hard: 2,
            disasters_enabled: false,

            upkeep_per_soldier: 2,

            training_delay_ms: 1500,
            status_delay_ms: 2000,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns between disasters for the given difficulty
    pub fn disaster_interval(&self, difficulty: Difficulty) -> Turn {
        match difficulty {
            Difficulty::Easy => self.disaster_interval_easy,
            Difficulty::Medium | Difficulty::Hard => self.disaster_interval_hard,
        }
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.victory_turn < 2 {
            return Err(KingdomError::InvalidConfig(format!(
                "victory_turn ({}) must be at least 2",
                self.victory_turn
            )));
        }

        if self.election_interval < 1 {
            return Err(KingdomError::InvalidConfig(
                "election_interval must be positive".into(),
            ));
        }

        if self.approval_roll_max < 1 {
            return Err(KingdomError::InvalidConfig(
                "approval_roll_max must be positive".into(),
            ));
        }

        if self.disaster_interval_easy < 1 || self.disaster_interval_hard < 1 {
            return Err(KingdomError::InvalidConfig(
                "Disaster intervals must be positive".into(),
            ));
        }

        if !(0..=100).contains(&self.revolt_threshold) {
            return Err(KingdomError::InvalidConfig(format!(
                "revolt_threshold ({}) must lie within happiness bounds 0-100",
                self.revolt_threshold
            )));
        }

        if self.upkeep_per_soldier < 0 {
            return Err(KingdomError::InvalidConfig(
                "upkeep_per_soldier cannot be negative".into(),
            ));
        }

        Ok(())
    }
}
