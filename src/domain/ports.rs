use super::availability::Availability;
use super::order::Order;
use crate::error::{InventoryError, NotificationError, PaymentError, PersistenceError};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process_payment(&self, order: &Order) -> Result<(), PaymentError>;

    /// Reverses a completed charge. Only invoked when a compensating policy unwinds a run.
    async fn refund(&self, _order: &Order) -> Result<(), PaymentError> {
        Ok(())
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the current state of `order`. Writing the same state twice must be a no-op.
    async fn update(&self, order: &Order) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait Notification: Send + Sync {
    async fn notify_customer(&self, message: &str) -> Result<(), NotificationError>;
}

#[async_trait]
pub trait InventoryProcessor: Send + Sync {
    async fn verify(&self, order: &Order) -> Result<Availability, InventoryError>;
}

pub type PaymentProcessorRef = Arc<dyn PaymentProcessor>;
pub type OrderRepositoryRef = Arc<dyn OrderRepository>;
pub type NotificationRef = Arc<dyn Notification>;
pub type InventoryProcessorRef = Arc<dyn InventoryProcessor>;
