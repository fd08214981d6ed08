use super::console::ConsoleRef;
use crate::domain::order::Order;
use crate::domain::ports::PaymentProcessor;
use crate::error::PaymentError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

/// Amount to charge for `order`. An order whose total cannot be represented is declined.
fn amount(order: &Order) -> Result<Decimal, PaymentError> {
    order
        .total()
        .map_err(|e| PaymentError::Declined(e.to_string()))
}

fn report(console: &ConsoleRef, line: &str) -> Result<(), PaymentError> {
    console
        .write_line(line)
        .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))
}

/// Default flat-rate handling.
pub struct StandardPaymentProcessor {
    console: ConsoleRef,
}

impl StandardPaymentProcessor {
    /// Creates a new standard processor reporting through `console`.
    pub fn new(console: ConsoleRef) -> Self {
        Self { console }
    }
}

#[async_trait]
impl PaymentProcessor for StandardPaymentProcessor {
    async fn process_payment(&self, order: &Order) -> Result<(), PaymentError> {
        let total = amount(order)?;
        debug!(order = %order.id, %total, "standard charge");
        report(&self.console, "processing standar payment")
    }

    async fn refund(&self, order: &Order) -> Result<(), PaymentError> {
        debug!(order = %order.id, "standard refund");
        report(&self.console, "refunding standar payment")
    }
}

/// Priority handling. Behaves like the standard processor apart from its label.
pub struct ExpressPaymentProcessor {
    console: ConsoleRef,
}

impl ExpressPaymentProcessor {
    /// Creates a new express processor reporting through `console`.
    pub fn new(console: ConsoleRef) -> Self {
        Self { console }
    }
}

#[async_trait]
impl PaymentProcessor for ExpressPaymentProcessor {
    async fn process_payment(&self, order: &Order) -> Result<(), PaymentError> {
        let total = amount(order)?;
        debug!(order = %order.id, %total, "express charge");
        report(&self.console, "processing express payment")
    }

    async fn refund(&self, order: &Order) -> Result<(), PaymentError> {
        debug!(order = %order.id, "express refund");
        report(&self.console, "refunding express payment")
    }
}
