//! Stockpile - the kingdom's six resource inventories

use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::core::types::{Difficulty, ResourceType};
use crate::economy::inventory::Inventory;

/// The royal stockpile holding every resource the kingdom owns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    pub food: Inventory<i64>,
    pub gold: Inventory<i64>,
    pub wood: Inventory<i64>,
    pub stone: Inventory<i64>,
    pub iron: Inventory<i64>,
    pub weapons: Inventory<i64>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every inventory from the difficulty table
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let mut stockpile = Self::new();
        stockpile.set_all(difficulty.starting_resources());
        stockpile
    }

    pub fn inventory(&self, resource: ResourceType) -> &Inventory<i64> {
        match resource {
            ResourceType::Food => &self.food,
            ResourceType::Gold => &self.gold,
            ResourceType::Wood => &self.wood,
            ResourceType::Stone => &self.stone,
            ResourceType::Iron => &self.iron,
            ResourceType::Weapons => &self.weapons,
        }
    }

    pub fn inventory_mut(&mut self, resource: ResourceType) -> &mut Inventory<i64> {
        match resource {
            ResourceType::Food => &mut self.food,
            ResourceType::Gold => &mut self.gold,
            ResourceType::Wood => &mut self.wood,
            ResourceType::Stone => &mut self.stone,
            ResourceType::Iron => &mut self.iron,
            ResourceType::Weapons => &mut self.weapons,
        }
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceType) -> i64 {
        self.inventory(resource).get()
    }

    pub fn add(&mut self, resource: ResourceType, amount: i64) {
        self.inventory_mut(resource).add(amount);
    }

    /// Remove a resource, leaving the stock untouched if there is not enough
    pub fn remove(&mut self, resource: ResourceType, amount: i64) -> Result<()> {
        self.inventory_mut(resource)
            .remove(amount)
            .map_err(|s| s.for_resource(resource))
    }

    /// Check if stockpile has enough of all required materials
    pub fn has_materials(&self, requirements: &[(ResourceType, i64)]) -> bool {
        requirements.iter().all(|(res, amount)| self.inventory(*res).has(*amount))
    }

    /// Consume all materials or none
    ///
    /// On failure the first missing resource is reported.
    pub fn consume_materials(&mut self, requirements: &[(ResourceType, i64)]) -> Result<()> {
        for (res, amount) in requirements {
            let available = self.get(*res);
            if available < *amount {
                return Err(KingdomError::InsufficientResource {
                    resource: *res,
                    needed: *amount,
                    available,
                });
            }
        }
        for (res, amount) in requirements {
            self.remove(*res, *amount)?;
        }
        Ok(())
    }

    /// Scale every inventory by `factor`, truncating
    pub fn scale_all(&mut self, factor: f64) {
        for res in ResourceType::ALL {
            self.inventory_mut(res).scale(factor);
        }
    }

    /// Quantities in `ResourceType::ALL` order
    pub fn amounts(&self) -> [i64; 6] {
        ResourceType::ALL.map(|res| self.get(res))
    }

    /// Overwrite quantities in `ResourceType::ALL` order (load and setup only)
    pub fn set_all(&mut self, amounts: [i64; 6]) {
        for (res, amount) in ResourceType::ALL.into_iter().zip(amounts) {
            self.inventory_mut(res).set(amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_difficulty_seeds_table() {
        let stockpile = Stockpile::for_difficulty(Difficulty::Medium);
        assert_eq!(stockpile.get(ResourceType::Food), 700);
        assert_eq!(stockpile.get(ResourceType::Gold), 700);
        assert_eq!(stockpile.get(ResourceType::Wood), 150);
        assert_eq!(stockpile.get(ResourceType::Stone), 150);
        assert_eq!(stockpile.get(ResourceType::Iron), 100);
        assert_eq!(stockpile.get(ResourceType::Weapons), 70);
    }

    #[test]
    fn test_stockpile_has_materials() {
        let stockpile = Stockpile::for_difficulty(Difficulty::Hard);

        let requirements = vec![(ResourceType::Wood, 50), (ResourceType::Stone, 30)];
        assert!(stockpile.has_materials(&requirements));

        let too_much = vec![(ResourceType::Wood, 101)];
        assert!(!stockpile.has_materials(&too_much));
    }

    #[test]
    fn test_stockpile_consume_materials() {
        let mut stockpile = Stockpile::for_difficulty(Difficulty::Hard);

        let requirements = vec![(ResourceType::Wood, 20), (ResourceType::Stone, 10)];
        stockpile.consume_materials(&requirements).unwrap();

        assert_eq!(stockpile.get(ResourceType::Wood), 80);
        assert_eq!(stockpile.get(ResourceType::Stone), 90);
    }

    #[test]
    fn test_consume_materials_is_all_or_nothing() {
        let mut stockpile = Stockpile::new();
        stockpile.add(ResourceType::Wood, 100);
        stockpile.add(ResourceType::Stone, 5);

        let result = stockpile.consume_materials(&[(ResourceType::Wood, 50), (ResourceType::Stone, 30)]);

        assert!(matches!(
            result,
            Err(KingdomError::InsufficientResource { resource: ResourceType::Stone, needed: 30, available: 5 })
        ));
        assert_eq!(stockpile.get(ResourceType::Wood), 100);
        assert_eq!(stockpile.get(ResourceType::Stone), 5);
    }

    #[test]
    fn test_scale_all() {
        let mut stockpile = Stockpile::for_difficulty(Difficulty::Easy);
        stockpile.scale_all(0.8);
        assert_eq!(stockpile.amounts(), [800, 800, 160, 160, 120, 80]);
    }
}
