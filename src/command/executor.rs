//! Action execution - applies one player action and advances the turn

use std::fmt;

use crate::core::error::{KingdomError, Result};
use crate::core::pacing::Pacer;
use crate::command::action::Action;
use crate::kingdom::{BattleResult, Kingdom, TurnReport};

/// Executes player actions against a kingdom
pub struct CommandExecutor;

impl CommandExecutor {
    /// Apply `action`, then run the turn pipeline
    ///
    /// A rejected action is reported in the result and the turn still
    /// advances. Only a finished game is an error.
    pub fn execute(kingdom: &mut Kingdom, action: Action, pacer: &dyn Pacer) -> Result<ExecutionResult> {
        kingdom.ensure_active()?;

        let outcome = apply(kingdom, action, pacer);
        let (effect, error) = match outcome {
            Ok(effect) => (Some(effect), None),
            Err(e) => {
                tracing::warn!(%action, error = %e, "action rejected");
                (None, Some(e))
            }
        };

        let report = if action.consumes_turn() && !kingdom.is_game_over() {
            Some(kingdom.next_turn()?)
        } else {
            None
        };

        Ok(ExecutionResult {
            action,
            effect,
            error,
            report,
        })
    }
}

fn apply(kingdom: &mut Kingdom, action: Action, pacer: &dyn Pacer) -> Result<ActionEffect> {
    let effect = match action {
        Action::CollectTaxes => ActionEffect::TaxesCollected(kingdom.collect_taxes()?),
        Action::SetTaxRate(rate) => {
            kingdom.set_tax_rate(rate)?;
            ActionEffect::TaxRateSet(rate)
        }
        Action::Recruit(count) => ActionEffect::Recruited {
            count,
            army: kingdom.recruit(count)?,
        },
        Action::Train => ActionEffect::Trained {
            morale: kingdom.train(pacer)?,
        },
        Action::BuyFood(amount) => ActionEffect::FoodBought {
            amount,
            cost: kingdom.buy_food(amount)?,
        },
        Action::SellFood(amount) => ActionEffect::FoodSold {
            amount,
            proceeds: kingdom.sell_food(amount)?,
        },
        Action::BuyWeapons(amount) => ActionEffect::WeaponsBought {
            amount,
            cost: kingdom.buy_weapons(amount)?,
        },
        Action::BuildFarm => ActionEffect::FarmBuilt {
            total: kingdom.build_farm()?,
        },
        Action::BuildBarracks => ActionEffect::BarracksBuilt {
            total: kingdom.build_barracks()?,
        },
        Action::TakeLoan { amount, term } => {
            kingdom.take_loan(amount)?;
            tracing::debug!(amount, term, "loan term noted");
            ActionEffect::LoanTaken { amount }
        }
        Action::RepayLoan(amount) => {
            kingdom.repay_loan(amount)?;
            ActionEffect::LoanRepaid { amount }
        }
        Action::Battle => ActionEffect::Fought(kingdom.fight_battle()?),
        Action::Quit => {
            kingdom.abdicate()?;
            ActionEffect::Abdicated
        }
    };
    Ok(effect)
}

/// What a successful action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    TaxesCollected(i64),
    TaxRateSet(u32),
    Recruited { count: u32, army: u32 },
    Trained { morale: i32 },
    FoodBought { amount: i64, cost: i64 },
    FoodSold { amount: i64, proceeds: i64 },
    WeaponsBought { amount: i64, cost: i64 },
    FarmBuilt { total: u32 },
    BarracksBuilt { total: u32 },
    LoanTaken { amount: i64 },
    LoanRepaid { amount: i64 },
    Fought(BattleResult),
    Abdicated,
}

impl fmt::Display for ActionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionEffect::TaxesCollected(gold) => {
                write!(f, "Collected {gold} gold in taxes. Happiness -5.")
            }
            ActionEffect::TaxRateSet(rate) => write!(f, "Tax rate set to {rate}%."),
            ActionEffect::Recruited { count, army } => {
                write!(f, "Recruited {count} soldiers. Army size: {army}.")
            }
            ActionEffect::Trained { morale } => {
                write!(f, "Soldiers trained. Morale: {morale}%.")
            }
            ActionEffect::FoodBought { amount, cost } => {
                write!(f, "Bought {amount} food for {cost} gold.")
            }
            ActionEffect::FoodSold { amount, proceeds } => {
                write!(f, "Sold {amount} food for {proceeds} gold.")
            }
            ActionEffect::WeaponsBought { amount, cost } => {
                write!(f, "Bought {amount} weapons for {cost} gold.")
            }
            ActionEffect::FarmBuilt { total } => write!(f, "Farm built! Total farms: {total}."),
            ActionEffect::BarracksBuilt { total } => {
                write!(f, "Barracks built! Total barracks: {total}.")
            }
            ActionEffect::LoanTaken { amount } => write!(f, "Loan of {amount} gold granted."),
            ActionEffect::LoanRepaid { amount } => write!(f, "Repaid {amount} gold to the bank."),
            ActionEffect::Fought(result) => write!(
                f,
                "Battle fought! Lost {} soldiers, {} remain.",
                result.casualties, result.survivors
            ),
            ActionEffect::Abdicated => write!(f, "The king has left the throne."),
        }
    }
}

/// Result of executing one action
#[derive(Debug)]
pub struct ExecutionResult {
    pub action: Action,
    pub effect: Option<ActionEffect>,
    /// Why the action was rejected, if it was
    pub error: Option<KingdomError>,
    /// The turn that followed, unless the action ended the game
    pub report: Option<TurnReport>,
}

impl Kingdom {
    /// Resolve one player action; see [`CommandExecutor::execute`]
    pub fn resolve_action(&mut self, action: Action, pacer: &dyn Pacer) -> Result<ExecutionResult> {
        CommandExecutor::execute(self, action, pacer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::pacing::NoPacer;
    use crate::core::types::{Difficulty, ResourceType};
    use crate::kingdom::GameOutcome;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn kingdom() -> Kingdom {
        let config = GameConfig {
            random_event_odds: 0,
            ..GameConfig::default()
        };
        Kingdom::with_config(Difficulty::Easy, config, ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_execute_collect_taxes() {
        let mut k = kingdom();
        let result = CommandExecutor::execute(&mut k, Action::CollectTaxes, &NoPacer).unwrap();

        assert_eq!(result.effect, Some(ActionEffect::TaxesCollected(24)));
        assert!(result.error.is_none());
        assert_eq!(result.report.unwrap().turn, 2);
        // 1000 + 24 taxes - 60 wages
        assert_eq!(k.resource(ResourceType::Gold), 964);
    }

    #[test]
    fn test_rejected_action_still_consumes_turn() {
        let mut k = kingdom();
        let result = k.resolve_action(Action::Recruit(50), &NoPacer).unwrap();

        assert!(result.effect.is_none());
        assert!(matches!(
            result.error,
            Some(KingdomError::RecruitCapExceeded { requested: 50, cap: 10 })
        ));
        assert_eq!(k.turn, 2);
        assert_eq!(k.army.soldiers(), 30);
    }

    #[test]
    fn test_quit_ends_without_turn() {
        let mut k = kingdom();
        let result = k.resolve_action(Action::Quit, &NoPacer).unwrap();

        assert_eq!(result.effect, Some(ActionEffect::Abdicated));
        assert!(result.report.is_none());
        assert_eq!(k.turn, 1);
        assert_eq!(k.outcome, Some(GameOutcome::Abdication));
        assert!(matches!(
            k.resolve_action(Action::Train, &NoPacer),
            Err(KingdomError::GameOver)
        ));
    }

    #[test]
    fn test_set_tax_rate_then_collect() {
        let mut k = kingdom();
        k.resolve_action(Action::SetTaxRate(50), &NoPacer).unwrap();
        assert_eq!(k.tax_rate(), 50);

        let result = k.resolve_action(Action::CollectTaxes, &NoPacer).unwrap();
        assert_eq!(result.effect, Some(ActionEffect::TaxesCollected(80)));
    }

    #[test]
    fn test_loan_term_is_accepted() {
        let mut k = kingdom();
        let result = k
            .resolve_action(Action::TakeLoan { amount: 2000, term: 5 }, &NoPacer)
            .unwrap();
        assert_eq!(result.effect, Some(ActionEffect::LoanTaken { amount: 2000 }));
        assert_eq!(k.bank.outstanding(), 2000);
    }

    #[test]
    fn test_effect_messages() {
        assert_eq!(
            ActionEffect::FarmBuilt { total: 2 }.to_string(),
            "Farm built! Total farms: 2."
        );
        assert_eq!(
            ActionEffect::TaxesCollected(24).to_string(),
            "Collected 24 gold in taxes. Happiness -5."
        );
    }
}
