use crate::domain::order::Sku;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("order storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification delivery failed, retryable: {0}")]
    Transient(String),
    #[error("notification delivery failed permanently: {0}")]
    Permanent(String),
}

impl NotificationError {
    /// Transient failures (gateway hiccups, closed channel) may succeed on a later attempt;
    /// permanent ones (invalid address or number) never will.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("insufficient stock for {sku}: requested {requested}, available {available}")]
    Insufficient {
        sku: Sku,
        requested: u32,
        available: u32,
    },
    #[error("inventory backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;
