use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stock keeping unit identifying a product in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sku(String);

impl Sku {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: Sku,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// Creates a line item, rejecting zero quantities, negative prices and subtotals that
    /// do not fit in a `Decimal`.
    pub fn new(sku: Sku, quantity: u32, unit_price: Decimal) -> Result<Self> {
        if quantity == 0 {
            return Err(OrderError::ValidationError(format!(
                "quantity for {sku} must be positive"
            )));
        }
        if unit_price < Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "unit price for {sku} must not be negative"
            )));
        }
        let item = Self {
            sku,
            quantity,
            unit_price,
        };
        item.subtotal()?;
        Ok(item)
    }

    pub fn subtotal(&self) -> Result<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| {
                OrderError::ValidationError(format!("subtotal for {} overflows", self.sku))
            })
    }
}

/// An order handed through the workflow by reference.
///
/// The workflow never mutates an order; items are attached by whoever builds it
/// (the composition root or the CSV reader) before processing starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<LineItem>,
}

impl Order {
    /// Creates a new order with no line items.
    pub fn new(id: u32) -> Self {
        Self {
            id: OrderId(id),
            items: Vec::new(),
        }
    }

    /// Appends a line item. The order total is not checked here; see [`Order::total`].
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Sums the line item subtotals, failing instead of overflowing.
    pub fn total(&self) -> Result<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.subtotal()?).ok_or_else(|| {
                OrderError::ValidationError(format!("total for order {} overflows", self.id))
            })
        })
    }
}
