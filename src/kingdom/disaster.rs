//! Disasters - earthquakes, famines and floods
//!
//! Every disaster has the same mechanical effect: a fifth of the people
//! are counted as lost (only the peasant share is actually removed), every
//! stockpile shrinks to 80% and happiness drops. The kind only changes the
//! story told about it.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::kingdom::chronicle::EntryKind;
use crate::kingdom::population::ClassLosses;
use crate::kingdom::Kingdom;

/// Fraction of the population a disaster claims
pub const DISASTER_DEATH_RATE: f64 = 0.2;

/// Fraction of every resource that survives
pub const RESOURCE_SURVIVAL: f64 = 0.8;

pub const DISASTER_HAPPINESS_PENALTY: i32 = -20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisasterKind {
    Earthquake,
    Famine,
    Flood,
}

impl DisasterKind {
    pub const ALL: [DisasterKind; 3] = [
        DisasterKind::Earthquake,
        DisasterKind::Famine,
        DisasterKind::Flood,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&DisasterKind::Earthquake)
    }

    pub fn flavor(&self) -> &'static str {
        match self {
            DisasterKind::Earthquake => "Buildings damaged! Resources lost!",
            DisasterKind::Famine => "Crops failed! Food halved!",
            DisasterKind::Flood => "Floods destroyed resources!",
        }
    }
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisasterKind::Earthquake => write!(f, "Earthquake"),
            DisasterKind::Famine => write!(f, "Famine"),
            DisasterKind::Flood => write!(f, "Flood"),
        }
    }
}

/// What a disaster did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterReport {
    pub kind: DisasterKind,
    /// Losses computed for every class
    pub computed_losses: ClassLosses,
    /// Peasants actually removed
    pub peasants_lost: u32,
}

/// Stateless disaster application
pub struct Disasters;

impl Disasters {
    /// Strike the kingdom with a disaster
    ///
    /// Losses are computed for all four classes but only peasants are
    /// deducted; `plague` is the path that thins every class.
    pub fn apply_disaster(kingdom: &mut Kingdom, kind: DisasterKind) -> DisasterReport {
        let total = kingdom.population.total();
        let computed_losses = ClassLosses::distribute(f64::from(total) * DISASTER_DEATH_RATE);

        let peasants_before = kingdom.population.peasants();
        kingdom.population.remove_peasants(computed_losses.peasants);
        let peasants_lost = peasants_before - kingdom.population.peasants();

        kingdom.stockpile.scale_all(RESOURCE_SURVIVAL);
        kingdom.population.update_happiness(DISASTER_HAPPINESS_PENALTY);

        let report = DisasterReport {
            kind,
            computed_losses,
            peasants_lost,
        };
        tracing::warn!(disaster = %kind, peasants_lost, "{}", kind.flavor());
        kingdom.chronicle.record(kingdom.turn, EntryKind::Disaster(report));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Difficulty, ResourceType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_disaster_effects() {
        let mut kingdom = Kingdom::new(Difficulty::Easy, 1);

        let report = Disasters::apply_disaster(&mut kingdom, DisasterKind::Flood);

        // 160 * 0.2 = 32 -> 22 / 4 / 3 / 1
        assert_eq!(
            report.computed_losses,
            ClassLosses { peasants: 22, merchants: 4, nobility: 3, soldiers: 1 }
        );
        assert_eq!(report.peasants_lost, 22);
        assert_eq!(kingdom.population.peasants(), 78);
        assert_eq!(kingdom.population.merchants(), 20);
        assert_eq!(kingdom.population.nobility(), 10);
        assert_eq!(kingdom.population.soldiers(), 30);
        assert_eq!(kingdom.population.happiness(), 50);
        assert_eq!(kingdom.stockpile.get(ResourceType::Food), 800);
        assert_eq!(kingdom.stockpile.get(ResourceType::Weapons), 80);
    }

    #[test]
    fn test_kind_is_cosmetic() {
        let mut a = Kingdom::new(Difficulty::Medium, 1);
        let mut b = Kingdom::new(Difficulty::Medium, 1);

        Disasters::apply_disaster(&mut a, DisasterKind::Earthquake);
        Disasters::apply_disaster(&mut b, DisasterKind::Famine);

        assert_eq!(a.population, b.population);
        assert_eq!(a.stockpile, b.stockpile);
    }

    #[test]
    fn test_disaster_is_chronicled() {
        let mut kingdom = Kingdom::new(Difficulty::Hard, 1);
        Disasters::apply_disaster(&mut kingdom, DisasterKind::Famine);
        assert!(kingdom
            .chronicle
            .entries
            .iter()
            .any(|e| matches!(e.kind, EntryKind::Disaster(_))));
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(DisasterKind::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
