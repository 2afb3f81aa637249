//! Random events - the fortunes and misfortunes of a season

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::stockpile::Stockpile;
use crate::core::types::ResourceType;
use crate::kingdom::population::{ClassLosses, Population};

/// Faces of the event die; only the first five carry an event
pub const EVENT_DIE_FACES: u32 = 10;

/// Happiness from a trade boom
pub const TRADE_BOOM_HAPPINESS: i32 = 5;

/// Gold bandits try to take
pub const BANDIT_RAID: i64 = 50;

/// Food from a bountiful harvest
pub const HARVEST_BONUS: i64 = 200;

/// Something that happened to the kingdom this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RandomEvent {
    Plague { losses: ClassLosses },
    GoldVein { gold: i64 },
    TradeBoom,
    /// `stolen` is zero when the treasury could not cover the raid
    Bandits { stolen: i64 },
    BountifulHarvest { food: i64 },
}

impl RandomEvent {
    pub fn description(&self) -> String {
        match self {
            RandomEvent::Plague { losses } => {
                format!("A plague has killed {} people!", losses.total())
            }
            RandomEvent::GoldVein { gold } => format!("Miners found a gold vein! +{gold} gold."),
            RandomEvent::TradeBoom => "Merchants report increased trade! Happiness +5".into(),
            RandomEvent::Bandits { stolen } if *stolen > 0 => {
                format!("Bandits attacked a trade route! Gold -{stolen}")
            }
            RandomEvent::Bandits { .. } => {
                "Bandits attacked a trade route but found the coffers empty.".into()
            }
            RandomEvent::BountifulHarvest { food } => {
                format!("Good harvest this season! Food +{food}")
            }
        }
    }
}

/// Whether an event fires this turn (1-in-`odds`; 0 never fires)
pub fn triggers<R: Rng>(odds: u32, rng: &mut R) -> bool {
    odds > 0 && rng.gen_ratio(1, odds)
}

/// Roll the event die and apply whatever comes up
pub fn strike<R: Rng>(
    population: &mut Population,
    stockpile: &mut Stockpile,
    rng: &mut R,
) -> Option<RandomEvent> {
    let face = rng.gen_range(0..EVENT_DIE_FACES);
    apply_face(face, population, stockpile, rng)
}

/// Apply the event on a given die face; faces 5-9 are a quiet season
pub fn apply_face<R: Rng>(
    face: u32,
    population: &mut Population,
    stockpile: &mut Stockpile,
    rng: &mut R,
) -> Option<RandomEvent> {
    let event = match face {
        0 => RandomEvent::Plague {
            losses: population.plague(),
        },
        1 => {
            let gold = 100 + rng.gen_range(0..200);
            stockpile.add(ResourceType::Gold, gold);
            RandomEvent::GoldVein { gold }
        }
        2 => {
            population.update_happiness(TRADE_BOOM_HAPPINESS);
            RandomEvent::TradeBoom
        }
        3 => {
            let stolen = match stockpile.remove(ResourceType::Gold, BANDIT_RAID) {
                Ok(()) => BANDIT_RAID,
                Err(_) => 0,
            };
            RandomEvent::Bandits { stolen }
        }
        4 => {
            stockpile.add(ResourceType::Food, HARVEST_BONUS);
            RandomEvent::BountifulHarvest { food: HARVEST_BONUS }
        }
        _ => return None,
    };

    tracing::info!(event = %event.description(), "random event");
    Some(event)
}
