//! Turn pipeline
//!
//! Each turn runs, in order: advance the counter, feed the people, pay the
//! army, harvest, maybe a random event, maybe an election, the disaster
//! cooldown, the market, and finally the end-of-game checks.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::{Production, Stockpile};
use crate::core::error::Result;
use crate::core::types::{ResourceType, Turn};
use crate::economy::PriceChange;
use crate::kingdom::chronicle::EntryKind;
use crate::kingdom::disaster::{DisasterKind, DisasterReport, Disasters};
use crate::kingdom::systems::{election, game_over, random_events};
use crate::kingdom::systems::{ElectionOutcome, GameOutcome, RandomEvent};
use crate::kingdom::Kingdom;

/// What happened during one call to [`Kingdom::next_turn`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The turn that was just entered
    pub turn: Turn,
    pub food_consumed: i64,
    pub starvation_deaths: u32,
    /// Wages owed to the army this turn
    pub upkeep_owed: i64,
    /// Whether the wages were paid in full
    pub upkeep_paid: bool,
    pub production: Production,
    pub event: Option<RandomEvent>,
    pub election: Option<ElectionOutcome>,
    pub disaster_due: bool,
    pub disaster: Option<DisasterReport>,
    pub prices: PriceChange,
    pub outcome: Option<GameOutcome>,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Turn {} ---", self.turn)?;
        writeln!(f, "The people ate {} food.", self.food_consumed)?;
        if self.starvation_deaths > 0 {
            writeln!(f, "Famine! {} peasants starved.", self.starvation_deaths)?;
        }
        if self.upkeep_paid {
            writeln!(f, "Paid {} gold to the army.", self.upkeep_owed)?;
        } else {
            writeln!(f, "Not enough gold to pay the army ({} owed).", self.upkeep_owed)?;
        }
        writeln!(
            f,
            "Farms produced {} food, mines produced {} iron.",
            self.production.food, self.production.iron
        )?;
        if let Some(event) = &self.event {
            writeln!(f, "{}", event.description())?;
        }
        match &self.election {
            Some(ElectionOutcome::Deposed { old_king, new_king, approval }) => {
                writeln!(f, "Election! {old_king} was overthrown ({approval}% approval). Long live {new_king}!")?;
            }
            Some(ElectionOutcome::Retained { king, approval }) => {
                writeln!(f, "Election! {king} remains in power ({approval}% approval).")?;
            }
            None => {}
        }
        if let Some(disaster) = &self.disaster {
            writeln!(
                f,
                "{} {} peasants were lost.",
                disaster.kind.flavor(),
                disaster.peasants_lost
            )?;
        }
        write!(
            f,
            "Market prices: food {}, weapons {}.",
            self.prices.food_price, self.prices.weapon_price
        )?;
        if let Some(outcome) = self.outcome {
            write!(f, "\n{outcome}")?;
        }
        Ok(())
    }
}

impl Kingdom {
    /// Advance the kingdom by one turn
    ///
    /// Fails with `GameOver` without touching anything once the game has
    /// ended.
    pub fn next_turn(&mut self) -> Result<TurnReport> {
        self.ensure_active()?;
        self.turn += 1;
        tracing::info!(turn = self.turn, "turn started");

        let (food_consumed, starvation_deaths) = self.feed_population();
        let (upkeep_owed, upkeep_paid) = self.pay_upkeep();

        let production = {
            let Stockpile { food, iron, .. } = &mut self.stockpile;
            self.buildings.produce_resources(food, iron)
        };

        let event = self.roll_random_event();
        let election = self.check_election();
        let (disaster_due, disaster) = self.check_disaster();
        let prices = self.market.update_prices(&mut self.rng);
        let outcome = self.check_game_over();

        Ok(TurnReport {
            turn: self.turn,
            food_consumed,
            starvation_deaths,
            upkeep_owed,
            upkeep_paid,
            production,
            event,
            election,
            disaster_due,
            disaster,
            prices,
            outcome,
        })
    }

    /// Each person eats half a unit of food; a shortage starves peasants
    ///
    /// The full need is charged, so the granary can go negative. The
    /// game-over check at the end of the turn turns that into starvation.
    fn feed_population(&mut self) -> (i64, u32) {
        let need = i64::from(self.population.total()) / 2;
        let food = self.stockpile.get(ResourceType::Food);
        let eaten = need.min(food.max(0));
        self.stockpile.food.set(food.saturating_sub(need));

        let shortage = need - eaten;
        if shortage == 0 {
            return (eaten, 0);
        }

        let deaths = self.population.starve(shortage);
        tracing::warn!(shortage, deaths, "food shortage");
        self.chronicle.record(self.turn, EntryKind::Starvation { deaths });
        (eaten, deaths)
    }

    fn pay_upkeep(&mut self) -> (i64, bool) {
        let owed = i64::from(self.army.soldiers()) * self.config.upkeep_per_soldier;
        match self.army.pay_soldiers(owed, &mut self.stockpile.gold) {
            Ok(()) => (owed, true),
            Err(e) => {
                tracing::warn!(owed, error = %e, "army went unpaid");
                (owed, false)
            }
        }
    }

    fn roll_random_event(&mut self) -> Option<RandomEvent> {
        if !random_events::triggers(self.config.random_event_odds, &mut self.rng) {
            return None;
        }
        let event = random_events::strike(&mut self.population, &mut self.stockpile, &mut self.rng)?;
        self.chronicle.record(self.turn, EntryKind::RandomEvent(event.clone()));
        Some(event)
    }

    /// Hold an election if one is due this turn
    pub fn check_election(&mut self) -> Option<ElectionOutcome> {
        if !election::is_due(self.turn, self.last_election_turn, self.config.election_interval) {
            return None;
        }

        let roll = self.rng.gen_range(0..self.config.approval_roll_max);
        let outcome = election::resolve(
            &mut self.ruler,
            &mut self.population,
            roll,
            self.turn,
            &self.config,
        );
        self.last_election_turn = self.turn;
        self.chronicle.record(self.turn, EntryKind::Election(outcome.clone()));
        Some(outcome)
    }

    /// Reset the disaster cooldown when it has elapsed
    ///
    /// The disaster only lands when `disasters_enabled` is set.
    pub fn check_disaster(&mut self) -> (bool, Option<DisasterReport>) {
        let interval = self.config.disaster_interval(self.difficulty);
        if self.turn - self.last_disaster_turn < interval {
            return (false, None);
        }

        self.last_disaster_turn = self.turn;
        if !self.config.disasters_enabled {
            tracing::debug!(turn = self.turn, "disaster cooldown elapsed");
            return (true, None);
        }

        let kind = DisasterKind::random(&mut self.rng);
        (true, Some(self.apply_disaster(kind)))
    }

    /// Strike the kingdom with the given disaster
    pub fn apply_disaster(&mut self, kind: DisasterKind) -> DisasterReport {
        Disasters::apply_disaster(self, kind)
    }

    fn check_game_over(&mut self) -> Option<GameOutcome> {
        let outcome = game_over::evaluate(&self.vitals(), &self.config, &mut self.rng)?;
        self.finish(outcome);
        Some(outcome)
    }
}
