//! Inventory - a single guarded quantity
//!
//! Additions always succeed. Removals only succeed for a non-negative
//! amount that is on hand, so an inventory never goes below zero through
//! `remove`.

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::KingdomError;
use crate::core::types::ResourceType;

/// A removal asked for more than the inventory holds, or for a negative amount
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("requested {requested}, only {available} available")]
pub struct Shortfall<T: Display + Debug> {
    pub requested: T,
    pub available: T,
}

impl Shortfall<i64> {
    /// Attach the resource name for reporting
    pub fn for_resource(self, resource: ResourceType) -> KingdomError {
        KingdomError::InsufficientResource {
            resource,
            needed: self.requested,
            available: self.available,
        }
    }
}

/// A scalar stock of some resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory<T> {
    quantity: T,
}

impl<T> Inventory<T>
where
    T: Copy + Default + PartialOrd + Add<Output = T> + Sub<Output = T> + Display + Debug,
{
    pub fn new(quantity: T) -> Self {
        Self { quantity }
    }

    /// Increase the quantity unconditionally
    pub fn add(&mut self, amount: T) {
        self.quantity = self.quantity + amount;
    }

    /// Decrease the quantity if enough is present, otherwise leave it untouched
    pub fn remove(&mut self, amount: T) -> Result<(), Shortfall<T>> {
        if amount < T::default() || amount > self.quantity {
            return Err(Shortfall {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity = self.quantity - amount;
        Ok(())
    }

    /// Whether at least `amount` is on hand
    pub fn has(&self, amount: T) -> bool {
        self.quantity >= amount
    }

    pub fn get(&self) -> T {
        self.quantity
    }

    /// Overwrite the quantity without validation (initialization and load only)
    pub fn set(&mut self, quantity: T) {
        self.quantity = quantity;
    }
}

impl Inventory<i64> {
    /// Scale the stock by `factor`, truncating toward zero
    pub fn scale(&mut self, factor: f64) {
        self.quantity = (self.quantity as f64 * factor) as i64;
    }
}
