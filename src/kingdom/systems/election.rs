//! Elections - the people's periodic verdict on the king

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::Turn;
use crate::kingdom::leader::Leader;
use crate::kingdom::population::Population;

/// Result of an election
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionOutcome {
    Retained { king: String, approval: i32 },
    Deposed { old_king: String, new_king: String, approval: i32 },
}

impl ElectionOutcome {
    pub fn approval(&self) -> i32 {
        match self {
            ElectionOutcome::Retained { approval, .. } | ElectionOutcome::Deposed { approval, .. } => {
                *approval
            }
        }
    }

    pub fn deposed(&self) -> bool {
        matches!(self, ElectionOutcome::Deposed { .. })
    }
}

/// Approval score: half the happiness plus a random swing
pub fn approval(happiness: i32, roll: i32) -> i32 {
    happiness / 2 + roll
}

/// Whether enough turns have passed since the last election
pub fn is_due(turn: Turn, last_election_turn: Turn, interval: Turn) -> bool {
    turn - last_election_turn >= interval
}

/// Decide the election given an already drawn approval roll
///
/// A king below the approval threshold is replaced by `King_<turn>`; the
/// old ruler is dropped and the coronation lifts happiness.
pub fn resolve(
    ruler: &mut Leader,
    population: &mut Population,
    roll: i32,
    turn: Turn,
    config: &GameConfig,
) -> ElectionOutcome {
    let approval = approval(population.happiness(), roll);

    if approval < config.approval_threshold {
        let new_king = Leader::king(format!("King_{turn}"));
        let old = std::mem::replace(ruler, new_king);
        population.update_happiness(config.coronation_bonus);
        tracing::info!(old_king = %old.name, new_king = %ruler.name, approval, "king overthrown");
        ElectionOutcome::Deposed {
            old_king: old.name,
            new_king: ruler.name.clone(),
            approval,
        }
    } else {
        tracing::info!(king = %ruler.name, approval, "king remains in power");
        ElectionOutcome::Retained {
            king: ruler.name.clone(),
            approval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_due() {
        assert!(!is_due(4, 0, 5));
        assert!(is_due(5, 0, 5));
        assert!(is_due(12, 5, 5));
    }

    #[test]
    fn test_happy_kingdom_retains_king_on_zero_roll() {
        let config = GameConfig::default();
        let mut ruler = Leader::king("King_1");
        let mut pop = Population::new(100, 20, 10, 30, 100);

        let outcome = resolve(&mut ruler, &mut pop, 0, 5, &config);

        assert_eq!(outcome, ElectionOutcome::Retained { king: "King_1".into(), approval: 50 });
        assert_eq!(ruler.name, "King_1");
        assert_eq!(pop.happiness(), 100);
    }

    #[test]
    fn test_unhappy_kingdom_deposes_king() {
        let config = GameConfig::default();
        let mut ruler = Leader::king("King_1");
        ruler.set_tax_rate(40).unwrap();
        let mut pop = Population::new(100, 20, 10, 30, 30);

        // 30 / 2 + 10 = 25 < 40
        let outcome = resolve(&mut ruler, &mut pop, 10, 7, &config);

        assert!(outcome.deposed());
        assert_eq!(outcome.approval(), 25);
        assert_eq!(ruler.name, "King_7");
        // The new king starts from the default tax rate
        assert_eq!(ruler.tax_rate(), Some(15));
        assert_eq!(pop.happiness(), 50);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = GameConfig::default();
        let mut ruler = Leader::king("King_1");
        let mut pop = Population::new(10, 0, 0, 0, 60);

        // 60 / 2 + 10 = 40, not below 40
        let outcome = resolve(&mut ruler, &mut pop, 10, 5, &config);
        assert!(!outcome.deposed());
    }
}
