//! Army - soldiers, morale and the war footing

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::core::pacing::Pacer;
use crate::core::types::ResourceType;
use crate::economy::inventory::Inventory;
use crate::kingdom::population::Population;

pub const MORALE_MIN: i32 = 0;
pub const MORALE_MAX: i32 = 100;

/// Morale gained from a full drill
pub const TRAINING_MORALE_BONUS: i32 = 10;

/// Morale gained when wages arrive
pub const PAY_MORALE_BONUS: i32 = 5;

/// Morale lost in every battle, win or lose
pub const BATTLE_MORALE_PENALTY: i32 = -15;

/// Outcome of a single battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub casualties: u32,
    pub survivors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    soldiers: u32,
    morale: i32,
    in_war: bool,
}

impl Default for Army {
    fn default() -> Self {
        Self::new(30, 60)
    }
}

impl Army {
    pub fn new(soldiers: u32, morale: i32) -> Self {
        Self {
            soldiers,
            morale: morale.clamp(MORALE_MIN, MORALE_MAX),
            in_war: false,
        }
    }

    pub fn soldiers(&self) -> u32 {
        self.soldiers
    }

    pub fn morale(&self) -> i32 {
        self.morale
    }

    pub fn in_war(&self) -> bool {
        self.in_war
    }

    /// Most soldiers a single levy may raise: a tenth of the peasants
    pub fn recruit_cap(population: &Population) -> u32 {
        population.peasants() / 10
    }

    /// Move `count` peasants into the ranks
    pub fn recruit(&mut self, count: u32, population: &mut Population) -> Result<u32> {
        let cap = Self::recruit_cap(population);
        if count > cap {
            return Err(KingdomError::RecruitCapExceeded {
                requested: count,
                cap,
            });
        }

        population.remove_peasants(count);
        population.add_soldiers(count);
        self.soldiers += count;
        tracing::info!(count, soldiers = self.soldiers, "recruited soldiers");
        Ok(self.soldiers)
    }

    /// Drill the troops; blocks on the pacer for `drill` before morale rises
    pub fn train(&mut self, pacer: &dyn Pacer, drill: Duration) -> i32 {
        tracing::debug!(?drill, "training soldiers");
        pacer.pause(drill);
        self.adjust_morale(TRAINING_MORALE_BONUS);
        self.morale
    }

    /// Pay wages out of the treasury
    pub fn pay_soldiers(&mut self, amount: i64, gold: &mut Inventory<i64>) -> Result<()> {
        gold.remove(amount)
            .map_err(|s| s.for_resource(ResourceType::Gold))?;
        self.adjust_morale(PAY_MORALE_BONUS);
        Ok(())
    }

    /// Fight a battle, losing up to a quarter of the soldiers
    pub fn battle<R: Rng>(&mut self, rng: &mut R) -> Result<BattleResult> {
        if self.soldiers == 0 {
            return Err(KingdomError::NoSoldiers);
        }

        self.in_war = true;
        let bound = self.soldiers / 4;
        let casualties = if bound == 0 { 0 } else { rng.gen_range(0..bound) };
        self.soldiers -= casualties;
        self.adjust_morale(BATTLE_MORALE_PENALTY);
        tracing::info!(casualties, survivors = self.soldiers, "battle fought");

        Ok(BattleResult {
            casualties,
            survivors: self.soldiers,
        })
    }

    fn adjust_morale(&mut self, change: i32) {
        self.morale = self.morale.saturating_add(change).clamp(MORALE_MIN, MORALE_MAX);
    }
}
