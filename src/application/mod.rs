//! Application layer containing the order-processing orchestration.
//!
//! `OrderManager` wires the four capabilities into a fixed `Workflow`. The workflow runs its
//! steps one after another and hands the first failure to a `FailurePolicy`, which decides
//! whether completed steps stay in effect or are compensated in reverse order.

pub mod manager;
pub mod workflow;
