//! Kingdom - the aggregate root that owns every subsystem
//!
//! All state lives here and is mutated only through the methods below and
//! the turn pipeline in `turn.rs`. Every player-facing operation either
//! succeeds completely or returns an error with nothing changed.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::city::{BuildingSystem, BuildingType, Stockpile};
use crate::core::config::GameConfig;
use crate::core::error::{KingdomError, Result};
use crate::core::pacing::Pacer;
use crate::core::types::{Difficulty, ResourceType, Turn};
use crate::economy::{Bank, Market};
use crate::kingdom::army::{Army, BattleResult};
use crate::kingdom::chronicle::{Chronicle, EntryKind};
use crate::kingdom::leader::{Leader, DEFAULT_TAX_RATE};
use crate::kingdom::population::Population;
use crate::kingdom::systems::{GameOutcome, Vitals};

/// Happiness lost every time taxes are collected
pub const TAX_HAPPINESS_PENALTY: i32 = -5;

/// The kingdom state for a single game
#[derive(Debug, Clone)]
pub struct Kingdom {
    /// Current turn (starts at 1)
    pub turn: Turn,
    pub difficulty: Difficulty,
    /// The reigning king
    pub ruler: Leader,
    pub population: Population,
    pub army: Army,
    pub bank: Bank,
    pub market: Market,
    pub buildings: BuildingSystem,
    /// Food, gold, wood, stone, iron and weapons
    pub stockpile: Stockpile,
    pub last_disaster_turn: Turn,
    pub last_war_turn: Turn,
    pub last_election_turn: Turn,
    /// Set once the game has ended
    pub outcome: Option<GameOutcome>,
    pub chronicle: Chronicle,
    pub config: GameConfig,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
}

impl Kingdom {
    /// Found a kingdom with the default rules
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_config(difficulty, GameConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_config(difficulty: Difficulty, config: GameConfig, rng: ChaCha8Rng) -> Self {
        Self {
            turn: 1,
            difficulty,
            ruler: Leader::king("King_1"),
            population: Population::default(),
            army: Army::default(),
            bank: Bank::default(),
            market: Market::default(),
            buildings: BuildingSystem::default(),
            stockpile: Stockpile::for_difficulty(difficulty),
            last_disaster_turn: -5,
            last_war_turn: -5,
            last_election_turn: 0,
            outcome: None,
            chronicle: Chronicle::new(),
            config,
            rng,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Fail with `GameOver` once the game has ended
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_game_over() {
            return Err(KingdomError::GameOver);
        }
        Ok(())
    }

    pub fn tax_rate(&self) -> u32 {
        self.ruler.tax_rate().unwrap_or(DEFAULT_TAX_RATE)
    }

    pub fn resource(&self, resource: ResourceType) -> i64 {
        self.stockpile.get(resource)
    }

    /// The figures the game-over checks consult
    pub fn vitals(&self) -> Vitals {
        Vitals {
            turn: self.turn,
            population: self.population.total(),
            food: self.stockpile.get(ResourceType::Food),
            gold: self.stockpile.get(ResourceType::Gold),
            happiness: self.population.happiness(),
            soldiers: self.army.soldiers(),
        }
    }

    // ========================================================================
    // Player actions
    // ========================================================================

    /// Tax the whole population at the royal rate; returns the gold collected
    pub fn collect_taxes(&mut self) -> Result<i64> {
        self.ensure_active()?;
        let collected = i64::from(self.population.total()) * i64::from(self.tax_rate()) / 100;
        self.stockpile.add(ResourceType::Gold, collected);
        self.population.update_happiness(TAX_HAPPINESS_PENALTY);
        tracing::info!(collected, rate = self.tax_rate(), "taxes collected");
        Ok(collected)
    }

    pub fn set_tax_rate(&mut self, rate: u32) -> Result<()> {
        self.ensure_active()?;
        self.ruler.set_tax_rate(rate)
    }

    /// Raise soldiers from the peasantry; returns the new army size
    pub fn recruit(&mut self, count: u32) -> Result<u32> {
        self.ensure_active()?;
        self.army.recruit(count, &mut self.population)
    }

    /// Drill the army; returns the new morale
    pub fn train(&mut self, pacer: &dyn Pacer) -> Result<i32> {
        self.ensure_active()?;
        let drill = Duration::from_millis(self.config.training_delay_ms);
        Ok(self.army.train(pacer, drill))
    }

    /// Returns the gold spent
    pub fn buy_food(&mut self, amount: i64) -> Result<i64> {
        self.ensure_active()?;
        let Stockpile { food, gold, .. } = &mut self.stockpile;
        self.market.buy_food(amount, food, gold)
    }

    /// Returns the gold earned
    pub fn sell_food(&mut self, amount: i64) -> Result<i64> {
        self.ensure_active()?;
        let Stockpile { food, gold, .. } = &mut self.stockpile;
        self.market.sell_food(amount, food, gold)
    }

    /// Returns the gold spent
    pub fn buy_weapons(&mut self, amount: i64) -> Result<i64> {
        self.ensure_active()?;
        let Stockpile { weapons, gold, .. } = &mut self.stockpile;
        self.market.buy_weapons(amount, weapons, gold)
    }

    /// Returns the new farm count
    pub fn build_farm(&mut self) -> Result<u32> {
        self.ensure_active()?;
        let total = self.buildings.build_farm(&mut self.stockpile)?;
        self.record_construction(BuildingType::Farm, total);
        Ok(total)
    }

    /// Returns the new barracks count
    pub fn build_barracks(&mut self) -> Result<u32> {
        self.ensure_active()?;
        let total = self.buildings.build_barracks(&mut self.stockpile)?;
        self.record_construction(BuildingType::Barracks, total);
        Ok(total)
    }

    fn record_construction(&mut self, building: BuildingType, total: u32) {
        self.chronicle.record(
            self.turn,
            EntryKind::Construction {
                building: building.name().to_string(),
                total,
            },
        );
    }

    /// Borrow from the bank
    pub fn take_loan(&mut self, amount: i64) -> Result<()> {
        self.ensure_active()?;
        self.bank.give_loan(amount, &mut self.stockpile.gold)?;
        self.chronicle.record(self.turn, EntryKind::Loan { amount });
        Ok(())
    }

    /// Pay the bank back
    pub fn repay_loan(&mut self, amount: i64) -> Result<()> {
        self.ensure_active()?;
        self.bank.receive_repayment(amount, &mut self.stockpile.gold)?;
        self.chronicle.record(self.turn, EntryKind::Repayment { amount });
        Ok(())
    }

    /// Send the army into battle; the fallen leave the population too
    pub fn fight_battle(&mut self) -> Result<BattleResult> {
        self.ensure_active()?;
        let result = self.army.battle(&mut self.rng)?;
        self.population.remove_soldiers(result.casualties);
        self.last_war_turn = self.turn;
        self.chronicle.record(
            self.turn,
            EntryKind::Battle {
                casualties: result.casualties,
                survivors: result.survivors,
            },
        );
        Ok(result)
    }

    /// Leave the throne, ending the game
    pub fn abdicate(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.finish(GameOutcome::Abdication);
        Ok(())
    }

    pub(crate) fn finish(&mut self, outcome: GameOutcome) {
        tracing::info!(turn = self.turn, ?outcome, "game over");
        self.outcome = Some(outcome);
        self.chronicle.record(self.turn, EntryKind::GameOver(outcome));
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn status(&self) -> KingdomStatus {
        KingdomStatus {
            turn: self.turn,
            king: self.ruler.name.clone(),
            tax_rate: self.tax_rate(),
            population: self.population.total(),
            happiness: self.population.happiness(),
            resources: self.stockpile.amounts(),
            soldiers: self.army.soldiers(),
            morale: self.army.morale(),
            farms: self.buildings.farms(),
            barracks: self.buildings.barracks(),
        }
    }

    /// Full serializable picture of the kingdom
    pub fn snapshot(&self) -> KingdomSnapshot {
        KingdomSnapshot {
            turn: self.turn,
            difficulty: self.difficulty,
            ruler: self.ruler.clone(),
            population: self.population.clone(),
            army: self.army.clone(),
            bank: self.bank.clone(),
            market: self.market.clone(),
            buildings: self.buildings.clone(),
            stockpile: self.stockpile.clone(),
            outcome: self.outcome,
            chronicle: self.chronicle.clone(),
        }
    }
}

/// Status screen summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingdomStatus {
    pub turn: Turn,
    pub king: String,
    pub tax_rate: u32,
    pub population: u32,
    pub happiness: i32,
    /// Quantities in `ResourceType::ALL` order
    pub resources: [i64; 6],
    pub soldiers: u32,
    pub morale: i32,
    pub farms: u32,
    pub barracks: u32,
}

impl fmt::Display for KingdomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [food, gold, wood, stone, iron, weapons] = self.resources;
        writeln!(f, "=== KINGDOM STATUS (Turn {}) ===", self.turn)?;
        writeln!(f, "King: {}", self.king)?;
        writeln!(f, "Tax: {}%", self.tax_rate)?;
        writeln!(f, "Population: {}", self.population)?;
        writeln!(f, "Happiness: {}%", self.happiness)?;
        writeln!(f, "Food: {food}")?;
        writeln!(f, "Gold: {gold}")?;
        writeln!(f, "Resources: Wood={wood} Stone={stone} Iron={iron} Weapons={weapons}")?;
        writeln!(f, "Army: {} soldiers (Morale: {}%)", self.soldiers, self.morale)?;
        write!(f, "Buildings: Farms={} Barracks={}", self.farms, self.barracks)
    }
}

/// Serializable copy of the whole kingdom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KingdomSnapshot {
    pub turn: Turn,
    pub difficulty: Difficulty,
    pub ruler: Leader,
    pub population: Population,
    pub army: Army,
    pub bank: Bank,
    pub market: Market,
    pub buildings: BuildingSystem,
    pub stockpile: Stockpile,
    pub outcome: Option<GameOutcome>,
    pub chronicle: Chronicle,
}

impl KingdomSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pacing::NoPacer;

    fn kingdom() -> Kingdom {
        Kingdom::new(Difficulty::Easy, 42)
    }

    #[test]
    fn test_initial_state() {
        let k = kingdom();
        assert_eq!(k.turn, 1);
        assert_eq!(k.ruler.name, "King_1");
        assert_eq!(k.tax_rate(), 15);
        assert_eq!(k.population.total(), 160);
        assert_eq!(k.army.soldiers(), 30);
        assert_eq!(k.army.morale(), 60);
        assert_eq!(k.bank.reserve(), 10_000);
        assert_eq!(k.market.food_price(), 1);
        assert_eq!(k.market.weapon_price(), 5);
        assert_eq!(k.stockpile.amounts(), [1000, 1000, 200, 200, 150, 100]);
        assert_eq!((k.last_disaster_turn, k.last_war_turn, k.last_election_turn), (-5, -5, 0));
        assert!(!k.is_game_over());
    }

    #[test]
    fn test_collect_taxes() {
        let mut k = kingdom();
        // 160 * 15 / 100 = 24
        assert_eq!(k.collect_taxes().unwrap(), 24);
        assert_eq!(k.resource(ResourceType::Gold), 1024);
        assert_eq!(k.population.happiness(), 65);
    }

    #[test]
    fn test_actions_refused_after_game_over() {
        let mut k = kingdom();
        k.abdicate().unwrap();

        assert_eq!(k.outcome, Some(GameOutcome::Abdication));
        assert!(matches!(k.collect_taxes(), Err(KingdomError::GameOver)));
        assert!(matches!(k.build_farm(), Err(KingdomError::GameOver)));
        assert!(matches!(k.abdicate(), Err(KingdomError::GameOver)));
        assert_eq!(k.resource(ResourceType::Gold), 1000);
    }

    #[test]
    fn test_trade_uses_treasury_and_granary() {
        let mut k = kingdom();
        assert_eq!(k.buy_food(100).unwrap(), 100);
        assert_eq!(k.resource(ResourceType::Food), 1100);
        assert_eq!(k.resource(ResourceType::Gold), 900);

        assert_eq!(k.sell_food(100).unwrap(), 80);
        assert_eq!(k.resource(ResourceType::Gold), 980);

        assert_eq!(k.buy_weapons(10).unwrap(), 50);
        assert_eq!(k.resource(ResourceType::Weapons), 110);
    }

    #[test]
    fn test_loan_and_repayment() {
        let mut k = kingdom();
        k.take_loan(500).unwrap();
        assert_eq!(k.resource(ResourceType::Gold), 1500);
        assert_eq!(k.bank.reserve(), 9500);

        k.repay_loan(500).unwrap();
        assert_eq!(k.resource(ResourceType::Gold), 1000);
        assert_eq!(k.bank.reserve(), 10_000);
        assert_eq!(k.bank.outstanding(), 0);
    }

    #[test]
    fn test_battle_keeps_population_in_step() {
        let mut k = kingdom();
        k.turn = 4;
        let result = k.fight_battle().unwrap();

        assert_eq!(k.army.soldiers(), 30 - result.casualties);
        assert_eq!(k.population.soldiers(), 30 - result.casualties);
        assert_eq!(k.last_war_turn, 4);
        assert!(k.army.in_war());
    }

    #[test]
    fn test_train_with_no_pacer() {
        let mut k = kingdom();
        assert_eq!(k.train(&NoPacer).unwrap(), 70);
    }

    #[test]
    fn test_build_is_chronicled() {
        let mut k = kingdom();
        k.build_farm().unwrap();
        assert!(k
            .chronicle
            .entries
            .iter()
            .any(|e| matches!(&e.kind, EntryKind::Construction { building, total: 2 } if building == "farm")));
    }

    #[test]
    fn test_status_display() {
        let text = kingdom().status().to_string();
        assert!(text.contains("Turn 1"));
        assert!(text.contains("King: King_1"));
        assert!(text.contains("Wood=200 Stone=200 Iron=150 Weapons=100"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = kingdom().snapshot().to_json().unwrap();
        assert!(json.contains("\"King_1\""));
        assert!(json.contains("\"difficulty\": \"Easy\""));
    }
}
