use crate::domain::availability::Availability;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{
    InventoryProcessorRef, NotificationRef, OrderRepositoryRef, PaymentProcessorRef,
};
use crate::error::{InventoryError, OrderError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Position of a run in the order workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Verifying,
    Charging,
    Persisting,
    Notifying,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verifying => "verifying",
            Self::Charging => "charging",
            Self::Persisting => "persisting",
            Self::Notifying => "notifying",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// One named, side-effecting unit of the workflow.
#[async_trait]
pub trait Step: Send + Sync {
    fn stage(&self) -> Stage;

    async fn run(&self, order: &Order) -> Result<()>;

    /// Whether `compensate` has an effect to undo. Steps returning `false` are skipped when
    /// a run is unwound.
    fn compensable(&self) -> bool {
        false
    }

    /// Undoes the effect of a successful `run`. Only called when `compensable` is `true`.
    async fn compensate(&self, _order: &Order) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Stop; completed steps stay in effect.
    Abort,
    /// Stop and compensate completed steps, most recent first.
    Compensate,
}

pub trait FailurePolicy: Send + Sync {
    fn on_failure(&self, stage: Stage, error: &OrderError) -> Decision;
}

/// Leaves completed steps in place. A failure at step N keeps steps 1..N-1 applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbortPolicy;

impl FailurePolicy for AbortPolicy {
    fn on_failure(&self, _stage: Stage, _error: &OrderError) -> Decision {
        Decision::Abort
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CompensatingPolicy;

impl FailurePolicy for CompensatingPolicy {
    fn on_failure(&self, _stage: Stage, _error: &OrderError) -> Decision {
        Decision::Compensate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub order: OrderId,
    pub completed: Vec<Stage>,
    pub final_stage: Stage,
}

#[derive(Error, Debug)]
#[error("order {order} failed while {stage}: {source}")]
pub struct WorkflowError {
    pub order: OrderId,
    pub stage: Stage,
    /// Steps that finished before the failure.
    pub completed: Vec<Stage>,
    /// Compensable steps whose undo succeeded, in the order it ran.
    pub compensated: Vec<Stage>,
    #[source]
    pub source: OrderError,
}

/// An ordered list of steps run against a single order.
pub struct Workflow {
    steps: Vec<Box<dyn Step>>,
    policy: Arc<dyn FailurePolicy>,
}

impl Workflow {
    /// Creates an empty workflow governed by `policy`.
    pub fn new(policy: Arc<dyn FailurePolicy>) -> Self {
        Self {
            steps: Vec::new(),
            policy,
        }
    }

    /// Appends a step; steps run in the order they were added.
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.steps.iter().map(|s| s.stage()).collect()
    }

    /// Runs every step in order, awaiting each before starting the next.
    ///
    /// The first failing step ends the run: later steps are never invoked, and the policy
    /// decides whether earlier ones are compensated.
    pub async fn run(&self, order: &Order) -> std::result::Result<WorkflowReport, WorkflowError> {
        info!(order = %order.id, "processing order");
        let mut completed: Vec<&dyn Step> = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let stage = step.stage();
            if let Err(source) = step.run(order).await {
                warn!(order = %order.id, %stage, error = %source, "step failed");
                let compensated = match self.policy.on_failure(stage, &source) {
                    Decision::Abort => Vec::new(),
                    Decision::Compensate => Self::compensate(order, &completed).await,
                };
                return Err(WorkflowError {
                    order: order.id,
                    stage,
                    completed: completed.iter().map(|s| s.stage()).collect(),
                    compensated,
                    source,
                });
            }
            debug!(order = %order.id, %stage, "step completed");
            completed.push(step.as_ref());
        }

        info!(order = %order.id, "order processed");
        Ok(WorkflowReport {
            order: order.id,
            completed: completed.iter().map(|s| s.stage()).collect(),
            final_stage: Stage::Done,
        })
    }

    async fn compensate(order: &Order, completed: &[&dyn Step]) -> Vec<Stage> {
        let mut compensated = Vec::with_capacity(completed.len());
        for step in completed.iter().rev().filter(|s| s.compensable()) {
            let stage = step.stage();
            match step.compensate(order).await {
                Ok(()) => {
                    warn!(order = %order.id, %stage, "step compensated");
                    compensated.push(stage);
                }
                // Keep unwinding; one failed compensation must not strand the others.
                Err(e) => warn!(order = %order.id, %stage, error = %e, "compensation failed"),
            }
        }
        compensated
    }
}

pub struct VerifyInventory {
    inventory: InventoryProcessorRef,
}

impl VerifyInventory {
    pub fn new(inventory: InventoryProcessorRef) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl Step for VerifyInventory {
    fn stage(&self) -> Stage {
        Stage::Verifying
    }

    async fn run(&self, order: &Order) -> Result<()> {
        match self.inventory.verify(order).await? {
            Availability::Available => Ok(()),
            Availability::Insufficient {
                sku,
                requested,
                available,
            } => Err(InventoryError::Insufficient {
                sku,
                requested,
                available,
            }
            .into()),
        }
    }
}

pub struct ChargePayment {
    payment: PaymentProcessorRef,
}

impl ChargePayment {
    pub fn new(payment: PaymentProcessorRef) -> Self {
        Self { payment }
    }
}

#[async_trait]
impl Step for ChargePayment {
    fn stage(&self) -> Stage {
        Stage::Charging
    }

    fn compensable(&self) -> bool {
        true
    }

    async fn run(&self, order: &Order) -> Result<()> {
        Ok(self.payment.process_payment(order).await?)
    }

    async fn compensate(&self, order: &Order) -> Result<()> {
        Ok(self.payment.refund(order).await?)
    }
}

pub struct PersistOrder {
    repository: OrderRepositoryRef,
}

impl PersistOrder {
    pub fn new(repository: OrderRepositoryRef) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Step for PersistOrder {
    fn stage(&self) -> Stage {
        Stage::Persisting
    }

    async fn run(&self, order: &Order) -> Result<()> {
        Ok(self.repository.update(order).await?)
    }
}

pub struct NotifyCustomer {
    notification: NotificationRef,
    message: String,
}

impl NotifyCustomer {
    pub fn new(notification: NotificationRef, message: impl Into<String>) -> Self {
        Self {
            notification,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Step for NotifyCustomer {
    fn stage(&self) -> Stage {
        Stage::Notifying
    }

    async fn run(&self, _order: &Order) -> Result<()> {
        Ok(self.notification.notify_customer(&self.message).await?)
    }
}
