//! Stronghold - Turn-Based Kingdom Management
//!
//! A deterministic turn engine for running a medieval kingdom: a stockpile
//! of six resources, a population split into social classes, an army, a
//! bank, a market and a ruling king who faces periodic elections. The
//! player resolves one action per turn and the engine advances the realm.

pub mod city;
pub mod command;
pub mod core;
pub mod economy;
pub mod kingdom;

pub use crate::command::{Action, CommandExecutor, MenuChoice};
pub use crate::core::{Difficulty, GameConfig, KingdomError, Result};
pub use crate::kingdom::{GameOutcome, Kingdom, TurnReport};
