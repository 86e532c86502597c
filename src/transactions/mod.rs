//! Transactions: cells that can be applied to an execution context.

pub mod transfer;

use crate::cell::Cell;
use crate::execution::context::Context;
use crate::execution::ledger::Ledger;
use std::sync::Arc;

/// A signed, sequenced operation submitted by an account.
pub trait Transaction: Cell {
    /// Sequence number used for replay protection.
    fn sequence(&self) -> i64;

    /// Returns a transaction identical except for its sequence number.
    ///
    /// Returns `self` unchanged when the number already matches.
    fn with_sequence(self: Arc<Self>, sequence: i64) -> Arc<Self>
    where
        Self: Sized;

    /// Most juice this transaction can consume.
    fn max_juice(&self) -> i64;

    /// Applies the transaction's effect to `ctx`.
    ///
    /// Failure is recorded on the context rather than returned.
    fn apply<L: Ledger>(&self, ctx: &mut Context<L>);
}
