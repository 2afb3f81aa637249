//! Command pipeline
//!
//! Menu input -> MenuChoice -> Action -> CommandExecutor -> ExecutionResult

pub mod action;
pub mod executor;

pub use action::{Action, MenuChoice};
pub use executor::{ActionEffect, CommandExecutor, ExecutionResult};
