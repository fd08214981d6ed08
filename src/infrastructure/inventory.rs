use super::console::ConsoleRef;
use crate::domain::availability::Availability;
use crate::domain::order::{Order, Sku};
use crate::domain::ports::InventoryProcessor;
use crate::error::InventoryError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only stock check against configured levels.
///
/// SKUs without a configured level are treated as always in stock, so an inventory built
/// with no levels accepts every order. Verification never reserves stock.
pub struct InMemoryInventory {
    console: ConsoleRef,
    stock: HashMap<Sku, u32>,
}

impl InMemoryInventory {
    /// Creates a new inventory with no configured stock levels.
    pub fn new(console: ConsoleRef) -> Self {
        Self {
            console,
            stock: HashMap::new(),
        }
    }

    /// Sets the available quantity for `sku`, replacing any earlier level.
    pub fn with_stock(mut self, sku: Sku, available: u32) -> Self {
        self.stock.insert(sku, available);
        self
    }

    /// Sets several stock levels at once, e.g. from a stock CSV.
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = (Sku, u32)>) -> Self {
        self.stock.extend(levels);
        self
    }

    fn check(&self, order: &Order) -> Availability {
        // Quantities of repeated SKUs add up before comparing against stock.
        let mut requested: Vec<(&Sku, u32)> = Vec::new();
        for item in &order.items {
            match requested.iter_mut().find(|(sku, _)| *sku == &item.sku) {
                Some((_, quantity)) => *quantity = quantity.saturating_add(item.quantity),
                None => requested.push((&item.sku, item.quantity)),
            }
        }

        requested
            .into_iter()
            .find_map(|(sku, quantity)| match self.stock.get(sku) {
                Some(&available) if available < quantity => Some(Availability::Insufficient {
                    sku: sku.clone(),
                    requested: quantity,
                    available,
                }),
                _ => None,
            })
            .unwrap_or(Availability::Available)
    }
}

#[async_trait]
impl InventoryProcessor for InMemoryInventory {
    async fn verify(&self, order: &Order) -> Result<Availability, InventoryError> {
        self.console
            .write_line("verifying inventory")
            .map_err(|e| InventoryError::Unavailable(e.to_string()))?;
        Ok(self.check(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::LineItem;
    use crate::infrastructure::console::RecordingConsole;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn item(sku: &str, quantity: u32) -> LineItem {
        LineItem::new(Sku::new(sku), quantity, dec!(1.0)).unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_inventory_accepts_everything() {
        let console = RecordingConsole::new();
        let inventory = InMemoryInventory::new(Arc::new(console.clone()));

        let result = inventory
            .verify(&Order::new(1).with_item(item("ANY", 1_000)))
            .await
            .unwrap();

        assert_eq!(result, Availability::Available);
        assert_eq!(console.lines(), vec!["verifying inventory"]);
    }

    #[tokio::test]
    async fn test_insufficient_stock_reports_first_short_sku() {
        let inventory = InMemoryInventory::new(Arc::new(RecordingConsole::new()))
            .with_stock(Sku::new("BOOK"), 5)
            .with_stock(Sku::new("PEN"), 1);

        let order = Order::new(1)
            .with_item(item("BOOK", 2))
            .with_item(item("PEN", 2))
            .with_item(item("BOOK", 4));

        let result = inventory.verify(&order).await.unwrap();
        assert_eq!(
            result,
            Availability::Insufficient {
                sku: Sku::new("BOOK"),
                requested: 6,
                available: 5,
            }
        );
    }

    #[tokio::test]
    async fn test_exact_stock_is_enough() {
        let inventory = InMemoryInventory::new(Arc::new(RecordingConsole::new()))
            .with_stock(Sku::new("PEN"), 2);

        let result = inventory
            .verify(&Order::new(1).with_item(item("PEN", 2)))
            .await
            .unwrap();
        assert!(result.is_available());
    }
}
