#![allow(dead_code)]

use async_trait::async_trait;
use order_workflow::domain::availability::Availability;
use order_workflow::domain::order::Order;
use order_workflow::domain::ports::{
    InventoryProcessor, Notification, OrderRepository, PaymentProcessor,
};
use order_workflow::error::{InventoryError, NotificationError, PaymentError, PersistenceError};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of every capability call made by the spies.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct SpyPayment {
    pub log: CallLog,
    pub fail: Option<PaymentError>,
}

#[async_trait]
impl PaymentProcessor for SpyPayment {
    async fn process_payment(&self, order: &Order) -> Result<(), PaymentError> {
        self.log.push(format!("payment {}", order.id));
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn refund(&self, order: &Order) -> Result<(), PaymentError> {
        self.log.push(format!("refund {}", order.id));
        Ok(())
    }
}

pub struct SpyRepository {
    pub log: CallLog,
}

#[async_trait]
impl OrderRepository for SpyRepository {
    async fn update(&self, order: &Order) -> Result<(), PersistenceError> {
        self.log.push(format!("update {}", order.id));
        Ok(())
    }
}

pub struct SpyNotification {
    pub log: CallLog,
    pub fail: Option<NotificationError>,
}

#[async_trait]
impl Notification for SpyNotification {
    async fn notify_customer(&self, message: &str) -> Result<(), NotificationError> {
        self.log.push(format!("notify {message}"));
        match &self.fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

pub struct SpyInventory {
    pub log: CallLog,
    pub result: Availability,
}

#[async_trait]
impl InventoryProcessor for SpyInventory {
    async fn verify(&self, order: &Order) -> Result<Availability, InventoryError> {
        self.log.push(format!("verify {}", order.id));
        Ok(self.result.clone())
    }
}

pub fn payment(log: &CallLog) -> SpyPayment {
    SpyPayment {
        log: log.clone(),
        fail: None,
    }
}

pub fn repository(log: &CallLog) -> SpyRepository {
    SpyRepository { log: log.clone() }
}

pub fn notification(log: &CallLog) -> SpyNotification {
    SpyNotification {
        log: log.clone(),
        fail: None,
    }
}

pub fn inventory(log: &CallLog) -> SpyInventory {
    SpyInventory {
        log: log.clone(),
        result: Availability::Available,
    }
}
