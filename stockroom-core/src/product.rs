use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::CatalogError;

/// Primary key of a product within an inventory or a storage backend.
pub type ProductId = i64;

/// Core product structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
            category: category.into(),
        }
    }

    /// Overwrite the price. Negative prices are accepted as-is.
    pub fn update_price(&mut self, new_price: f64) {
        self.price = new_price;
    }

    /// Take `quantity` units out of stock.
    ///
    /// Fails without touching the stock level when fewer than `quantity`
    /// units are available.
    pub fn sell(&mut self, quantity: i32) -> Result<(), CatalogError> {
        if self.quantity < quantity {
            return Err(CatalogError::InsufficientStock {
                requested: quantity,
                available: self.quantity,
            });
        }

        self.quantity = self
            .quantity
            .checked_sub(quantity)
            .ok_or(CatalogError::QuantityOverflow {
                current: self.quantity,
                change: quantity,
            })?;
        Ok(())
    }

    /// Add `quantity` units to stock.
    ///
    /// Fails without touching the stock level when the result does not fit
    /// in an `i32`.
    // NOTE: negative input is not rejected; callers own that validation.
    pub fn restock(&mut self, quantity: i32) -> Result<(), CatalogError> {
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or(CatalogError::QuantityOverflow {
                current: self.quantity,
                change: quantity,
            })?;
        Ok(())
    }

    /// Stock value of this line (`price * quantity`).
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Price: {:.2}, Quantity: {}, Category: {}",
            self.id, self.name, self.price, self.quantity, self.category
        )
    }
}
