//! Building system - farms, barracks, mines and blacksmiths
//!
//! Buildings turn raw materials into production capacity. Farms and
//! barracks can be built; mines and blacksmiths stay at their charter count.

use serde::{Deserialize, Serialize};

use crate::city::stockpile::Stockpile;
use crate::core::error::Result;
use crate::core::types::ResourceType;
use crate::economy::inventory::Inventory;

/// Food produced by each farm per turn
pub const FOOD_PER_FARM: i64 = 100;

/// Iron produced by each mine per turn
pub const IRON_PER_MINE: i64 = 20;

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Farm,
    Barracks,
    Mine,
    Blacksmith,
}

impl BuildingType {
    /// Materials required to construct this building type
    ///
    /// `None` for types the crown cannot commission.
    pub fn required_materials(&self) -> Option<[(ResourceType, i64); 2]> {
        match self {
            BuildingType::Farm => Some([(ResourceType::Wood, 50), (ResourceType::Stone, 30)]),
            BuildingType::Barracks => Some([(ResourceType::Wood, 80), (ResourceType::Stone, 50)]),
            BuildingType::Mine | BuildingType::Blacksmith => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildingType::Farm => "farm",
            BuildingType::Barracks => "barracks",
            BuildingType::Mine => "mine",
            BuildingType::Blacksmith => "blacksmith",
        }
    }
}

/// What one turn of production yielded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub food: i64,
    pub iron: i64,
}

/// Building counts for the kingdom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSystem {
    farms: u32,
    barracks: u32,
    mines: u32,
    blacksmiths: u32,
}

impl Default for BuildingSystem {
    fn default() -> Self {
        Self {
            farms: 1,
            barracks: 1,
            mines: 1,
            blacksmiths: 1,
        }
    }
}

impl BuildingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, building: BuildingType) -> u32 {
        match building {
            BuildingType::Farm => self.farms,
            BuildingType::Barracks => self.barracks,
            BuildingType::Mine => self.mines,
            BuildingType::Blacksmith => self.blacksmiths,
        }
    }

    pub fn farms(&self) -> u32 {
        self.farms
    }

    pub fn barracks(&self) -> u32 {
        self.barracks
    }

    pub fn mines(&self) -> u32 {
        self.mines
    }

    pub fn blacksmiths(&self) -> u32 {
        self.blacksmiths
    }

    /// Build a farm; returns the new farm count
    pub fn build_farm(&mut self, stockpile: &mut Stockpile) -> Result<u32> {
        self.build(BuildingType::Farm, stockpile)
    }

    /// Build a barracks; returns the new barracks count
    pub fn build_barracks(&mut self, stockpile: &mut Stockpile) -> Result<u32> {
        self.build(BuildingType::Barracks, stockpile)
    }

    fn build(&mut self, building: BuildingType, stockpile: &mut Stockpile) -> Result<u32> {
        let Some(materials) = building.required_materials() else {
            return Ok(self.count(building));
        };
        stockpile.consume_materials(&materials)?;

        let count = match building {
            BuildingType::Farm => &mut self.farms,
            BuildingType::Barracks => &mut self.barracks,
            BuildingType::Mine => &mut self.mines,
            BuildingType::Blacksmith => &mut self.blacksmiths,
        };
        *count += 1;
        tracing::info!(building = building.name(), total = *count, "construction complete");
        Ok(*count)
    }

    /// Per-turn yield: each farm grows food, each mine digs iron
    pub fn produce_resources(
        &self,
        food: &mut Inventory<i64>,
        iron: &mut Inventory<i64>,
    ) -> Production {
        let production = Production {
            food: i64::from(self.farms) * FOOD_PER_FARM,
            iron: i64::from(self.mines) * IRON_PER_MINE,
        };
        food.add(production.food);
        iron.add(production.iron);
        production
    }
}
