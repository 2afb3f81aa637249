//! Leaders - the king and the officers who may one day serve beside him
//!
//! All leaders share a name, leadership and corruption. What they can do
//! depends on their role. Only the King is wired into the turn engine;
//! commanders and merchant leaders exist for future appointments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};

pub const MIN_TAX_RATE: u32 = 5;
pub const MAX_TAX_RATE: u32 = 50;
pub const DEFAULT_TAX_RATE: u32 = 15;

/// The office a leader holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    King {
        tax_rate: u32,
        commander: Option<String>,
    },
    Commander {
        loyalty: u32,
    },
    MerchantLeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub leadership: u32,
    pub corruption: u32,
    pub role: Role,
}

impl Leader {
    pub fn king(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leadership: 50,
            corruption: 10,
            role: Role::King {
                tax_rate: DEFAULT_TAX_RATE,
                commander: None,
            },
        }
    }

    pub fn commander(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leadership: 60,
            corruption: 5,
            role: Role::Commander { loyalty: 70 },
        }
    }

    pub fn merchant_leader(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leadership: 40,
            corruption: 30,
            role: Role::MerchantLeader,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(self.role, Role::King { .. })
    }

    /// What this leader does when called upon
    pub fn make_decision(&self) -> String {
        match &self.role {
            Role::King { .. } => format!("{} makes a royal decree.", self.name),
            Role::Commander { .. } => format!("{} gives military orders.", self.name),
            Role::MerchantLeader => format!("{} negotiates trade deals.", self.name),
        }
    }

    /// Current tax rate, if this leader wears the crown
    pub fn tax_rate(&self) -> Option<u32> {
        match self.role {
            Role::King { tax_rate, .. } => Some(tax_rate),
            _ => None,
        }
    }

    /// Set the royal tax rate (5-50%)
    pub fn set_tax_rate(&mut self, rate: u32) -> Result<()> {
        let Role::King { tax_rate, .. } = &mut self.role else {
            return Err(KingdomError::NotARuler(self.name.clone()));
        };
        if !(MIN_TAX_RATE..=MAX_TAX_RATE).contains(&rate) {
            return Err(KingdomError::TaxRateOutOfRange {
                rate,
                min: MIN_TAX_RATE,
                max: MAX_TAX_RATE,
            });
        }
        *tax_rate = rate;
        tracing::info!(king = %self.name, rate, "tax rate changed");
        Ok(())
    }

    /// Name a commander for the royal army
    pub fn appoint_commander(&mut self, commander_name: impl Into<String>) -> Result<()> {
        let Role::King { commander, .. } = &mut self.role else {
            return Err(KingdomError::NotARuler(self.name.clone()));
        };
        let commander_name = commander_name.into();
        tracing::info!(king = %self.name, commander = %commander_name, "commander appointed");
        *commander = Some(commander_name);
        Ok(())
    }

    pub fn appointed_commander(&self) -> Option<&str> {
        match &self.role {
            Role::King { commander, .. } => commander.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.role {
            Role::King { tax_rate, .. } => write!(f, "King {} (tax {}%)", self.name, tax_rate),
            Role::Commander { loyalty } => write!(f, "Commander {} (loyalty {})", self.name, loyalty),
            Role::MerchantLeader => write!(f, "Merchant {}", self.name),
        }
    }
}
