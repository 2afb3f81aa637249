//! City layer - stockpile and buildings

pub mod building;
pub mod stockpile;

pub use building::{BuildingSystem, BuildingType, Production};
pub use stockpile::Stockpile;
