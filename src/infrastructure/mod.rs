//! Adapters implementing the capability ports.
//!
//! Every adapter reports its action as one console line; the line format is part of the
//! program's observable output and is asserted verbatim by the CLI tests.

pub mod console;
pub mod in_memory;
pub mod inventory;
pub mod notification;
pub mod payment;
