use super::workflow::{
    AbortPolicy, ChargePayment, FailurePolicy, NotifyCustomer, PersistOrder, VerifyInventory,
    Workflow, WorkflowError, WorkflowReport,
};
use crate::domain::order::Order;
use crate::domain::ports::{
    InventoryProcessorRef, NotificationRef, OrderRepositoryRef, PaymentProcessorRef,
};
use std::sync::Arc;

pub const DEFAULT_MESSAGE: &str = "Order processed";

/// Processes orders through the fixed verify, charge, persist, notify sequence.
///
/// All four capabilities are required up front, so an order can never be processed by a
/// partially wired manager. Capabilities are shared handles; several managers may hold the
/// same repository or inventory.
pub struct OrderManager {
    payment: PaymentProcessorRef,
    repository: OrderRepositoryRef,
    notification: NotificationRef,
    inventory: InventoryProcessorRef,
    policy: Arc<dyn FailurePolicy>,
    message: String,
}

impl OrderManager {
    /// Creates a new manager using `AbortPolicy` and the default customer message.
    pub fn new(
        payment: PaymentProcessorRef,
        repository: OrderRepositoryRef,
        notification: NotificationRef,
        inventory: InventoryProcessorRef,
    ) -> Self {
        Self {
            payment,
            repository,
            notification,
            inventory,
            policy: Arc::new(AbortPolicy),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Replaces the failure policy.
    pub fn with_policy(mut self, policy: Arc<dyn FailurePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the message sent to the customer.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn workflow(&self) -> Workflow {
        Workflow::new(self.policy.clone())
            .step(VerifyInventory::new(self.inventory.clone()))
            .step(ChargePayment::new(self.payment.clone()))
            .step(PersistOrder::new(self.repository.clone()))
            .step(NotifyCustomer::new(
                self.notification.clone(),
                self.message.clone(),
            ))
    }

    pub async fn process_order(&self, order: &Order) -> Result<WorkflowReport, WorkflowError> {
        self.workflow().run(order).await
    }
}
