//! Market - floating prices for food and weapons
//!
//! Prices drift by a small random step every turn and never fall below
//! their floors. Food sells back at 80% of the buying price.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{KingdomError, Result};
use crate::core::types::ResourceType;
use crate::economy::inventory::Inventory;

/// Cheapest food can get
pub const FOOD_PRICE_FLOOR: i64 = 1;

/// Cheapest weapons can get
pub const WEAPON_PRICE_FLOOR: i64 = 3;

/// Fraction of the buying price paid out when selling
pub const SELL_BACK_RATIO: f64 = 0.8;

/// A named trade partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    food_price: i64,
    weapon_price: i64,
    trade_routes: Vec<TradeRoute>,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            food_price: 1,
            weapon_price: 5,
            trade_routes: vec![TradeRoute {
                name: "Neighbor Kingdom".into(),
                value: 50,
            }],
        }
    }
}

/// Price movement produced by one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub food_price: i64,
    pub weapon_price: i64,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(food_price: i64, weapon_price: i64) -> Self {
        Self {
            food_price: food_price.max(FOOD_PRICE_FLOOR),
            weapon_price: weapon_price.max(WEAPON_PRICE_FLOOR),
            ..Self::default()
        }
    }

    pub fn food_price(&self) -> i64 {
        self.food_price
    }

    pub fn weapon_price(&self) -> i64 {
        self.weapon_price
    }

    pub fn trade_routes(&self) -> &[TradeRoute] {
        &self.trade_routes
    }

    /// Buy `amount` food; returns the gold spent
    pub fn buy_food(
        &self,
        amount: i64,
        food: &mut Inventory<i64>,
        gold: &mut Inventory<i64>,
    ) -> Result<i64> {
        let cost = total_cost(amount, self.food_price)?;
        gold.remove(cost)
            .map_err(|s| s.for_resource(ResourceType::Gold))?;
        food.add(amount);
        tracing::info!(amount, cost, "bought food");
        Ok(cost)
    }

    /// Sell `amount` food; returns the gold earned
    pub fn sell_food(
        &self,
        amount: i64,
        food: &mut Inventory<i64>,
        gold: &mut Inventory<i64>,
    ) -> Result<i64> {
        ensure_positive(amount)?;
        food.remove(amount)
            .map_err(|s| s.for_resource(ResourceType::Food))?;
        let proceeds = (amount as f64 * self.food_price as f64 * SELL_BACK_RATIO) as i64;
        gold.add(proceeds);
        tracing::info!(amount, proceeds, "sold food");
        Ok(proceeds)
    }

    /// Buy `amount` weapons for the armoury; returns the gold spent
    pub fn buy_weapons(
        &self,
        amount: i64,
        weapons: &mut Inventory<i64>,
        gold: &mut Inventory<i64>,
    ) -> Result<i64> {
        let cost = total_cost(amount, self.weapon_price)?;
        gold.remove(cost)
            .map_err(|s| s.for_resource(ResourceType::Gold))?;
        weapons.add(amount);
        tracing::info!(amount, cost, "bought weapons");
        Ok(cost)
    }

    /// Random-walk both prices: food by -1..=1, weapons by -2..=2
    pub fn update_prices<R: Rng>(&mut self, rng: &mut R) -> PriceChange {
        let food_delta = rng.gen_range(-1..=1);
        let weapon_delta = rng.gen_range(-2..=2);
        self.apply_deltas(food_delta, weapon_delta)
    }

    /// Apply explicit price deltas, honoring the floors
    pub fn apply_deltas(&mut self, food_delta: i64, weapon_delta: i64) -> PriceChange {
        self.food_price = (self.food_price + food_delta).max(FOOD_PRICE_FLOOR);
        self.weapon_price = (self.weapon_price + weapon_delta).max(WEAPON_PRICE_FLOOR);
        tracing::debug!(food = self.food_price, weapons = self.weapon_price, "market prices updated");
        PriceChange {
            food_price: self.food_price,
            weapon_price: self.weapon_price,
        }
    }
}

fn ensure_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(KingdomError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Price of `amount` units, refusing products that overflow
fn total_cost(amount: i64, price: i64) -> Result<i64> {
    ensure_positive(amount)?;
    amount
        .checked_mul(price)
        .ok_or(KingdomError::AmountTooLarge { amount, price })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_buy_food_charges_price() {
        let market = Market::with_prices(3, 5);
        let mut food = Inventory::new(0i64);
        let mut gold = Inventory::new(100i64);

        let cost = market.buy_food(20, &mut food, &mut gold).unwrap();

        assert_eq!(cost, 60);
        assert_eq!(food.get(), 20);
        assert_eq!(gold.get(), 40);
    }

    #[test]
    fn test_buy_food_rejected_without_gold() {
        let market = Market::with_prices(3, 5);
        let mut food = Inventory::new(0i64);
        let mut gold = Inventory::new(10i64);

        let result = market.buy_food(20, &mut food, &mut gold);

        assert!(matches!(
            result,
            Err(KingdomError::InsufficientResource { resource: ResourceType::Gold, .. })
        ));
        assert_eq!(food.get(), 0);
        assert_eq!(gold.get(), 10);
    }

    #[test]
    fn test_sell_food_pays_eighty_percent() {
        let market = Market::with_prices(2, 5);
        let mut food = Inventory::new(100i64);
        let mut gold = Inventory::new(0i64);

        let proceeds = market.sell_food(25, &mut food, &mut gold).unwrap();

        // 25 * 2 * 0.8 = 40
        assert_eq!(proceeds, 40);
        assert_eq!(food.get(), 75);
        assert_eq!(gold.get(), 40);
    }

    #[test]
    fn test_sell_food_truncates_fractional_gold() {
        let market = Market::new();
        let mut food = Inventory::new(10i64);
        let mut gold = Inventory::new(0i64);

        // 3 * 1 * 0.8 = 2.4
        assert_eq!(market.sell_food(3, &mut food, &mut gold).unwrap(), 2);
    }

    #[test]
    fn test_sell_food_rejected_without_food() {
        let market = Market::new();
        let mut food = Inventory::new(5i64);
        let mut gold = Inventory::new(0i64);

        assert!(market.sell_food(6, &mut food, &mut gold).is_err());
        assert_eq!(food.get(), 5);
        assert_eq!(gold.get(), 0);
    }

    #[test]
    fn test_huge_order_rejected_without_change() {
        let market = Market::with_prices(2, 5);
        let mut food = Inventory::new(10i64);
        let mut weapons = Inventory::new(10i64);
        let mut gold = Inventory::new(1_000i64);

        let result = market.buy_food(5_000_000_000_000_000_000, &mut food, &mut gold);
        assert!(matches!(
            result,
            Err(KingdomError::AmountTooLarge { price: 2, .. })
        ));

        let result = market.buy_weapons(i64::MAX / 4, &mut weapons, &mut gold);
        assert!(matches!(
            result,
            Err(KingdomError::AmountTooLarge { price: 5, .. })
        ));

        assert_eq!(food.get(), 10);
        assert_eq!(weapons.get(), 10);
        assert_eq!(gold.get(), 1_000);
    }

    #[test]
    fn test_buy_weapons() {
        let market = Market::new();
        let mut weapons = Inventory::new(0i64);
        let mut gold = Inventory::new(50i64);

        assert_eq!(market.buy_weapons(10, &mut weapons, &mut gold).unwrap(), 50);
        assert_eq!(weapons.get(), 10);
        assert_eq!(gold.get(), 0);
    }

    #[test]
    fn test_price_floors() {
        let mut market = Market::new();
        market.apply_deltas(-10, -10);
        assert_eq!(market.food_price(), FOOD_PRICE_FLOOR);
        assert_eq!(market.weapon_price(), WEAPON_PRICE_FLOOR);
    }

    #[test]
    fn test_random_walk_is_bounded_per_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut market = Market::with_prices(50, 50);

        for _ in 0..200 {
            let before = (market.food_price(), market.weapon_price());
            let after = market.update_prices(&mut rng);
            assert!((after.food_price - before.0).abs() <= 1);
            assert!((after.weapon_price - before.1).abs() <= 2);
            assert!(after.food_price >= FOOD_PRICE_FLOOR);
            assert!(after.weapon_price >= WEAPON_PRICE_FLOOR);
        }
    }

    #[test]
    fn test_default_has_trade_route() {
        let market = Market::new();
        assert_eq!(market.trade_routes().len(), 1);
        assert_eq!(market.trade_routes()[0].name, "Neighbor Kingdom");
    }
}
