use super::console::ConsoleRef;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::OrderRepository;
use crate::error::PersistenceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order store.
///
/// Keeps the latest snapshot per order id, so repeated updates with the same state leave
/// the store unchanged. Clones share the same map, which lets several managers write to one
/// repository.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    console: ConsoleRef,
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new, empty in-memory order repository reporting through `console`.
    pub fn new(console: ConsoleRef) -> Self {
        Self {
            console,
            orders: Arc::default(),
        }
    }

    /// Returns the last stored snapshot of the order, if any.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        let orders = self.orders.read().await;
        orders.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn update(&self, order: &Order) -> Result<(), PersistenceError> {
        self.console
            .write_line("updating order")
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(())
    }
}
