//! Domain types and the capability ports the order workflow depends on.

pub mod availability;
pub mod order;
pub mod ports;
