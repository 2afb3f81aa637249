//! Player actions and the main menu

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};

/// One player decision; exactly one is resolved per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    CollectTaxes,
    SetTaxRate(u32),
    Recruit(u32),
    Train,
    BuyFood(i64),
    SellFood(i64),
    BuyWeapons(i64),
    BuildFarm,
    BuildBarracks,
    /// The term is recorded but the bank does not schedule repayments
    TakeLoan { amount: i64, term: u32 },
    RepayLoan(i64),
    Battle,
    Quit,
}

impl Action {
    /// Whether resolving this action advances the turn
    pub fn consumes_turn(&self) -> bool {
        !matches!(self, Action::Quit)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CollectTaxes => write!(f, "collect taxes"),
            Action::SetTaxRate(rate) => write!(f, "set tax rate to {rate}%"),
            Action::Recruit(count) => write!(f, "recruit {count} soldiers"),
            Action::Train => write!(f, "train soldiers"),
            Action::BuyFood(amount) => write!(f, "buy {amount} food"),
            Action::SellFood(amount) => write!(f, "sell {amount} food"),
            Action::BuyWeapons(amount) => write!(f, "buy {amount} weapons"),
            Action::BuildFarm => write!(f, "build farm"),
            Action::BuildBarracks => write!(f, "build barracks"),
            Action::TakeLoan { amount, term } => write!(f, "borrow {amount} gold over {term} turns"),
            Action::RepayLoan(amount) => write!(f, "repay {amount} gold"),
            Action::Battle => write!(f, "go to battle"),
            Action::Quit => write!(f, "quit"),
        }
    }
}

/// Entries of the main menu
///
/// Most entries still need a quantity from the player before they become
/// an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    CollectTaxes,
    ChangeTaxRate,
    Recruit,
    Train,
    TradeFood,
    BuildFarm,
    BuildBarracks,
    TakeLoan,
    BuyWeapons,
    RepayLoan,
    Battle,
    Quit,
}

impl MenuChoice {
    /// Menu order; `Quit` is listed last but keyed 0
    pub const ALL: [MenuChoice; 12] = [
        MenuChoice::CollectTaxes,
        MenuChoice::ChangeTaxRate,
        MenuChoice::Recruit,
        MenuChoice::Train,
        MenuChoice::TradeFood,
        MenuChoice::BuildFarm,
        MenuChoice::BuildBarracks,
        MenuChoice::TakeLoan,
        MenuChoice::BuyWeapons,
        MenuChoice::RepayLoan,
        MenuChoice::Battle,
        MenuChoice::Quit,
    ];

    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let choice = match input {
            "1" => MenuChoice::CollectTaxes,
            "2" => MenuChoice::ChangeTaxRate,
            "3" => MenuChoice::Recruit,
            "4" => MenuChoice::Train,
            "5" => MenuChoice::TradeFood,
            "6" => MenuChoice::BuildFarm,
            "7" => MenuChoice::BuildBarracks,
            "8" => MenuChoice::TakeLoan,
            "9" => MenuChoice::BuyWeapons,
            "10" => MenuChoice::RepayLoan,
            "11" => MenuChoice::Battle,
            "0" => MenuChoice::Quit,
            other => return Err(KingdomError::InvalidChoice(other.to_string())),
        };
        Ok(choice)
    }

    pub fn key(&self) -> u8 {
        match self {
            MenuChoice::CollectTaxes => 1,
            MenuChoice::ChangeTaxRate => 2,
            MenuChoice::Recruit => 3,
            MenuChoice::Train => 4,
            MenuChoice::TradeFood => 5,
            MenuChoice::BuildFarm => 6,
            MenuChoice::BuildBarracks => 7,
            MenuChoice::TakeLoan => 8,
            MenuChoice::BuyWeapons => 9,
            MenuChoice::RepayLoan => 10,
            MenuChoice::Battle => 11,
            MenuChoice::Quit => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CollectTaxes => "Collect Taxes",
            MenuChoice::ChangeTaxRate => "Change Tax Rate",
            MenuChoice::Recruit => "Recruit Soldiers",
            MenuChoice::Train => "Train Soldiers",
            MenuChoice::TradeFood => "Buy/Sell Food",
            MenuChoice::BuildFarm => "Build Farm",
            MenuChoice::BuildBarracks => "Build Barracks",
            MenuChoice::TakeLoan => "Take Loan",
            MenuChoice::BuyWeapons => "Buy Weapons",
            MenuChoice::RepayLoan => "Repay Loan",
            MenuChoice::Battle => "Go to Battle",
            MenuChoice::Quit => "Quit Game",
        }
    }

    /// The action for entries that need no further input
    pub fn immediate_action(&self) -> Option<Action> {
        match self {
            MenuChoice::CollectTaxes => Some(Action::CollectTaxes),
            MenuChoice::Train => Some(Action::Train),
            MenuChoice::BuildFarm => Some(Action::BuildFarm),
            MenuChoice::BuildBarracks => Some(Action::BuildBarracks),
            MenuChoice::Battle => Some(Action::Battle),
            MenuChoice::Quit => Some(Action::Quit),
            _ => None,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key(), self.label())
    }
}
