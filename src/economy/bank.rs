//! Bank - an external creditor with its own gold reserve
//!
//! The reserve and the kingdom treasury are separate pools. Loans move gold
//! from the reserve into the treasury; repayments move it back and build
//! trust. A failed repayment is a default and costs trust.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::economy::inventory::Inventory;

/// Reserve held by a freshly chartered bank
pub const DEFAULT_RESERVE: i64 = 10_000;

/// Trust lost on a default
pub const DEFAULT_PENALTY: f32 = 0.1;

/// Trust gained per repayment
pub const REPAYMENT_BONUS: f32 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    gold_reserve: i64,
    /// 1.0 = full trust, 0.0 = no trust
    trust_rate: f32,
    /// Gold lent out and not yet repaid
    outstanding: i64,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVE)
    }
}

impl Bank {
    pub fn new(reserve: i64) -> Self {
        Self {
            gold_reserve: reserve,
            trust_rate: 1.0,
            outstanding: 0,
        }
    }

    /// Lend `amount` from the reserve into the kingdom treasury
    pub fn give_loan(&mut self, amount: i64, kingdom_gold: &mut Inventory<i64>) -> Result<()> {
        if amount <= 0 {
            return Err(KingdomError::NonPositiveAmount(amount));
        }
        if amount > self.gold_reserve {
            return Err(KingdomError::InsufficientReserve {
                requested: amount,
                reserve: self.gold_reserve,
            });
        }

        self.gold_reserve -= amount;
        self.outstanding += amount;
        kingdom_gold.add(amount);
        tracing::info!(amount, reserve = self.gold_reserve, "bank issued loan");
        Ok(())
    }

    /// Take `amount` from the kingdom treasury back into the reserve
    ///
    /// A treasury that cannot cover the repayment counts as a default.
    pub fn receive_repayment(
        &mut self,
        amount: i64,
        kingdom_gold: &mut Inventory<i64>,
    ) -> Result<()> {
        if amount <= 0 {
            return Err(KingdomError::NonPositiveAmount(amount));
        }
        if let Err(shortfall) = kingdom_gold.remove(amount) {
            self.trust_rate = (self.trust_rate - DEFAULT_PENALTY).max(0.0);
            tracing::warn!(amount, trust = self.trust_rate, "kingdom defaulted on repayment");
            return Err(KingdomError::RepaymentDefault {
                amount,
                available: shortfall.available,
            });
        }

        self.gold_reserve += amount;
        self.outstanding = (self.outstanding - amount).max(0);
        self.trust_rate = (self.trust_rate + REPAYMENT_BONUS).min(1.0);
        tracing::info!(amount, trust = self.trust_rate, "loan repaid");
        Ok(())
    }

    pub fn reserve(&self) -> i64 {
        self.gold_reserve
    }

    pub fn trust_rate(&self) -> f32 {
        self.trust_rate
    }

    pub fn outstanding(&self) -> i64 {
        self.outstanding
    }

    /// Snapshot of the bank's books
    pub fn audit(&self) -> BankAudit {
        BankAudit {
            reserve: self.gold_reserve,
            trust_rate: self.trust_rate,
            outstanding: self.outstanding,
        }
    }
}

/// Result of a bank audit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BankAudit {
    pub reserve: i64,
    pub trust_rate: f32,
    pub outstanding: i64,
}

impl fmt::Display for BankAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bank Audit Report:")?;
        writeln!(f, "Gold Reserve: {}", self.reserve)?;
        writeln!(f, "Outstanding Loans: {}", self.outstanding)?;
        write!(f, "Trust Rate: {:.0}%", self.trust_rate * 100.0)
    }
}
