//! Population - four social classes and their happiness

use serde::{Deserialize, Serialize};

/// Share of the death toll borne by peasants, merchants, nobility and soldiers
pub const CLASS_SHARES: [f64; 4] = [0.7, 0.15, 0.1, 0.05];

/// Fraction of the population a plague kills
pub const PLAGUE_DEATH_RATE: f64 = 0.1;

/// Happiness lost to a plague
pub const PLAGUE_HAPPINESS_PENALTY: i32 = -30;

/// Happiness lost to starvation
pub const STARVATION_HAPPINESS_PENALTY: i32 = -20;

pub const HAPPINESS_MIN: i32 = 0;
pub const HAPPINESS_MAX: i32 = 100;

/// Deaths per social class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLosses {
    pub peasants: u32,
    pub merchants: u32,
    pub nobility: u32,
    pub soldiers: u32,
}

impl ClassLosses {
    /// Split a death toll across the classes, each share truncated on its own
    pub fn distribute(deaths: f64) -> Self {
        let share = |i: usize| (deaths * CLASS_SHARES[i]) as u32;
        Self {
            peasants: share(0),
            merchants: share(1),
            nobility: share(2),
            soldiers: share(3),
        }
    }

    pub fn total(&self) -> u32 {
        self.peasants + self.merchants + self.nobility + self.soldiers
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    peasants: u32,
    merchants: u32,
    nobility: u32,
    soldiers: u32,
    happiness: i32,
}

impl Default for Population {
    fn default() -> Self {
        Self::new(100, 20, 10, 30, 70)
    }
}

impl Population {
    pub fn new(peasants: u32, merchants: u32, nobility: u32, soldiers: u32, happiness: i32) -> Self {
        Self {
            peasants,
            merchants,
            nobility,
            soldiers,
            happiness: happiness.clamp(HAPPINESS_MIN, HAPPINESS_MAX),
        }
    }

    /// Rebuild the class split from a peasant count and a total
    ///
    /// Merchants take 20% of the total, nobility 10%, soldiers the remainder
    /// (never below zero).
    pub fn from_total(peasants: u32, total: u32, happiness: i32) -> Self {
        let merchants = (f64::from(total) * 0.2) as u32;
        let nobility = (f64::from(total) * 0.1) as u32;
        let soldiers = total
            .saturating_sub(peasants)
            .saturating_sub(merchants)
            .saturating_sub(nobility);
        Self::new(peasants, merchants, nobility, soldiers, happiness)
    }

    /// Headcount of all four classes, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.peasants
            .saturating_add(self.merchants)
            .saturating_add(self.nobility)
            .saturating_add(self.soldiers)
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn peasants(&self) -> u32 {
        self.peasants
    }

    pub fn merchants(&self) -> u32 {
        self.merchants
    }

    pub fn nobility(&self) -> u32 {
        self.nobility
    }

    pub fn soldiers(&self) -> u32 {
        self.soldiers
    }

    /// Shift happiness, clamped to 0-100
    pub fn update_happiness(&mut self, change: i32) {
        self.happiness = self
            .happiness
            .saturating_add(change)
            .clamp(HAPPINESS_MIN, HAPPINESS_MAX);
    }

    pub fn add_peasants(&mut self, count: u32) {
        self.peasants = self.peasants.saturating_add(count);
    }

    pub fn remove_peasants(&mut self, count: u32) {
        self.peasants = self.peasants.saturating_sub(count);
    }

    pub fn add_soldiers(&mut self, count: u32) {
        self.soldiers = self.soldiers.saturating_add(count);
    }

    pub fn remove_soldiers(&mut self, count: u32) {
        self.soldiers = self.soldiers.saturating_sub(count);
    }

    /// Hunger kills one peasant per two missing food; returns the deaths
    pub fn starve(&mut self, food_shortage: i64) -> u32 {
        let deaths = u32::try_from((food_shortage / 2).max(0)).unwrap_or(u32::MAX);
        let died = deaths.min(self.peasants);
        self.remove_peasants(deaths);
        self.update_happiness(STARVATION_HAPPINESS_PENALTY);
        died
    }

    /// Plague kills 10% of everyone, split 70/15/10/5 across the classes
    ///
    /// Returns the computed losses; classes too small to cover their share
    /// bottom out at zero.
    pub fn plague(&mut self) -> ClassLosses {
        let deaths = (f64::from(self.total()) * PLAGUE_DEATH_RATE) as u32;
        let losses = ClassLosses::distribute(f64::from(deaths));

        self.peasants = self.peasants.saturating_sub(losses.peasants);
        self.merchants = self.merchants.saturating_sub(losses.merchants);
        self.nobility = self.nobility.saturating_sub(losses.nobility);
        self.soldiers = self.soldiers.saturating_sub(losses.soldiers);
        self.update_happiness(PLAGUE_HAPPINESS_PENALTY);
        losses
    }
}
