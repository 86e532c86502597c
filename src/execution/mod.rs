//! Execution context that transactions are applied to.
//!
//! - [`context::Context`]: juice budget, origin account and failure state
//! - [`ledger::Ledger`]: balance storage behind the context

pub mod context;
pub mod ledger;
