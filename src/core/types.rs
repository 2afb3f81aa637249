//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};

/// Turn counter (simulation time unit)
pub type Turn = i64;

/// Game difficulty, chosen once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Difficulty {
    #[default]
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

impl Difficulty {
    /// Decode the persisted index (0 = Easy, 1 = Medium, 2 = Hard)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Decode a 1-based menu choice
    pub fn from_menu(choice: &str) -> Result<Self> {
        choice
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Self::from_index)
            .ok_or_else(|| KingdomError::InvalidChoice(choice.trim().to_string()))
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Starting stock for each resource, in `ResourceType::ALL` order
    pub fn starting_resources(&self) -> [i64; 6] {
        match self {
            Difficulty::Easy => [1000, 1000, 200, 200, 150, 100],
            Difficulty::Medium => [700, 700, 150, 150, 100, 70],
            Difficulty::Hard => [500, 500, 100, 100, 70, 50],
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = KingdomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "0" => Ok(Difficulty::Easy),
            "medium" | "1" => Ok(Difficulty::Medium),
            "hard" | "2" => Ok(Difficulty::Hard),
            other => Err(KingdomError::InvalidChoice(other.to_string())),
        }
    }
}

/// The six resources held in the royal stockpile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Food,
    Gold,
    Wood,
    Stone,
    Iron,
    Weapons,
}

impl ResourceType {
    /// All resources, in save-file order
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Food,
        ResourceType::Gold,
        ResourceType::Wood,
        ResourceType::Stone,
        ResourceType::Iron,
        ResourceType::Weapons,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Gold => "gold",
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::Iron => "iron",
            ResourceType::Weapons => "weapons",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
