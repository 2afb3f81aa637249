//! Economy - guarded inventories, the bank and the market

pub mod bank;
pub mod inventory;
pub mod market;

pub use bank::{Bank, BankAudit};
pub use inventory::{Inventory, Shortfall};
pub use market::{Market, PriceChange, TradeRoute};
