//! Game-over evaluation
//!
//! The terminal conditions are checked in a fixed order and the first one
//! that holds is reported. They are not exclusive; order is the only ranking.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::Turn;

/// How the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Everyone has died
    Extinction,
    /// The granaries are empty
    Starvation,
    /// The treasury fell past the debt limit
    Bankruptcy,
    /// The people rose up
    Revolt,
    /// A neighbour overran an undefended realm
    Conquest,
    /// The kingdom survived long enough
    Victory,
    /// The player left the throne
    Abdication,
}

impl GameOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, GameOutcome::Victory)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            GameOutcome::Extinction => "GAME OVER: Everyone has died. The kingdom has fallen.",
            GameOutcome::Starvation => "GAME OVER: No food left. The kingdom has starved.",
            GameOutcome::Bankruptcy => "GAME OVER: The kingdom is bankrupt.",
            GameOutcome::Revolt => {
                "GAME OVER: The people have revolted and overthrown the kingdom."
            }
            GameOutcome::Conquest => {
                "GAME OVER: Enemy kingdom attacked and conquered your defenseless land."
            }
            GameOutcome::Victory => "YOU WIN! Your kingdom has survived and proven its stability!",
            GameOutcome::Abdication => "The ruler has left the throne.",
        };
        f.write_str(message)
    }
}

/// The figures the terminal checks look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    pub turn: Turn,
    pub population: u32,
    pub food: i64,
    pub gold: i64,
    pub happiness: i32,
    pub soldiers: u32,
}

/// Evaluate the terminal conditions in priority order
///
/// The conquest roll is only drawn when the realm has no soldiers and no
/// earlier condition has already ended the game.
pub fn evaluate<R: Rng>(vitals: &Vitals, config: &GameConfig, rng: &mut R) -> Option<GameOutcome> {
    if vitals.population == 0 {
        return Some(GameOutcome::Extinction);
    }
    if vitals.food <= 0 {
        return Some(GameOutcome::Starvation);
    }
    if vitals.gold < config.bankruptcy_threshold {
        return Some(GameOutcome::Bankruptcy);
    }
    if vitals.happiness <= config.revolt_threshold {
        return Some(GameOutcome::Revolt);
    }
    if vitals.soldiers == 0 && config.conquest_odds > 0 && rng.gen_ratio(1, config.conquest_odds) {
        return Some(GameOutcome::Conquest);
    }
    if vitals.turn >= config.victory_turn {
        return Some(GameOutcome::Victory);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn healthy() -> Vitals {
        Vitals {
            turn: 3,
            population: 160,
            food: 900,
            gold: 900,
            happiness: 70,
            soldiers: 30,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    #[test]
    fn test_healthy_kingdom_continues() {
        assert_eq!(evaluate(&healthy(), &GameConfig::default(), &mut rng()), None);
    }

    #[test]
    fn test_extinction_reported_before_starvation() {
        let vitals = Vitals { population: 0, food: 0, ..healthy() };
        assert_eq!(
            evaluate(&vitals, &GameConfig::default(), &mut rng()),
            Some(GameOutcome::Extinction)
        );
    }

    #[test]
    fn test_each_condition() {
        let config = GameConfig::default();
        let cases = [
            (Vitals { food: 0, ..healthy() }, GameOutcome::Starvation),
            (Vitals { gold: -1001, ..healthy() }, GameOutcome::Bankruptcy),
            (Vitals { happiness: 10, ..healthy() }, GameOutcome::Revolt),
            (Vitals { turn: 20, ..healthy() }, GameOutcome::Victory),
        ];
        for (vitals, expected) in cases {
            assert_eq!(evaluate(&vitals, &config, &mut rng()), Some(expected));
        }
    }

    #[test]
    fn test_debt_at_threshold_is_not_bankruptcy() {
        let vitals = Vitals { gold: -1000, ..healthy() };
        assert_eq!(evaluate(&vitals, &GameConfig::default(), &mut rng()), None);
    }

    #[test]
    fn test_revolt_outranks_victory() {
        let vitals = Vitals { happiness: 5, turn: 25, ..healthy() };
        assert_eq!(
            evaluate(&vitals, &GameConfig::default(), &mut rng()),
            Some(GameOutcome::Revolt)
        );
    }

    #[test]
    fn test_certain_conquest_without_soldiers() {
        let config = GameConfig { conquest_odds: 1, ..GameConfig::default() };
        let vitals = Vitals { soldiers: 0, ..healthy() };
        assert_eq!(evaluate(&vitals, &config, &mut rng()), Some(GameOutcome::Conquest));
    }

    #[test]
    fn test_conquest_disabled() {
        let config = GameConfig { conquest_odds: 0, ..GameConfig::default() };
        let vitals = Vitals { soldiers: 0, ..healthy() };
        assert_eq!(evaluate(&vitals, &config, &mut rng()), None);
    }

    #[test]
    fn test_conquest_is_occasional() {
        let config = GameConfig::default();
        let vitals = Vitals { soldiers: 0, ..healthy() };
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let conquered = (0..1000)
            .filter(|_| evaluate(&vitals, &config, &mut rng) == Some(GameOutcome::Conquest))
            .count();
        assert!((50..200).contains(&conquered), "conquered {conquered} of 1000");
    }
}
