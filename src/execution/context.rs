use crate::constants::{DEFAULT_JUICE_LIMIT, MAX_SUPPLY};
use crate::execution::ledger::Ledger;
use crate::types::address::Address;
use thiserror::Error;

/// Reason an execution context became exceptional.
///
/// These are expected outcomes reported back to the submitter as a failed
/// execution, not faults of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    /// Juice budget exhausted.
    #[error("JUICE: insufficient juice")]
    Juice,
    /// Origin account cannot cover the amount.
    #[error("FUNDS: insufficient funds")]
    Funds,
    /// Target account does not exist.
    #[error("NOBODY: target account does not exist")]
    Nobody,
    /// Amount outside the valid range.
    #[error("ARGUMENT: invalid amount")]
    Argument,
}

/// Execution state for one transaction: juice accounting, the origin account
/// and access to balances.
///
/// Once exceptional, a context refuses further juice charges and transfers,
/// so no effect can follow a failed step.
pub struct Context<L: Ledger> {
    origin: Address,
    ledger: L,
    juice_limit: i64,
    juice_used: i64,
    exception: Option<ErrorCode>,
}

impl<L: Ledger> Context<L> {
    /// Creates a context for a transaction signed by `origin`.
    pub fn new(ledger: L, origin: Address, juice_limit: i64) -> Self {
        Self {
            origin,
            ledger,
            juice_limit,
            juice_used: 0,
            exception: None,
        }
    }

    /// Creates a context with [`DEFAULT_JUICE_LIMIT`].
    pub fn with_default_juice(ledger: L, origin: Address) -> Self {
        Self::new(ledger, origin, DEFAULT_JUICE_LIMIT)
    }

    /// Charges `gulp` juice.
    ///
    /// If the budget cannot cover it, the whole budget is consumed, the
    /// context becomes exceptional with [`ErrorCode::Juice`] and `false` is
    /// returned.
    pub fn consume_juice(&mut self, gulp: i64) -> bool {
        if self.is_exceptional() {
            return false;
        }
        match self.juice_used.checked_add(gulp) {
            Some(total) if gulp >= 0 && total <= self.juice_limit => {
                self.juice_used = total;
                true
            }
            _ => {
                self.juice_used = self.juice_limit;
                self.exception = Some(ErrorCode::Juice);
                false
            }
        }
    }

    /// Moves `amount` from the origin to `target`.
    ///
    /// Either both balances change or neither does. On failure the context
    /// becomes exceptional and `false` is returned.
    pub fn transfer(&mut self, target: &Address, amount: i64) -> bool {
        match self.try_transfer(target, amount) {
            Ok(()) => true,
            Err(code) => {
                self.exception = Some(code);
                false
            }
        }
    }

    fn try_transfer(&mut self, target: &Address, amount: i64) -> Result<(), ErrorCode> {
        if let Some(code) = self.exception {
            return Err(code);
        }
        if !(0..=MAX_SUPPLY).contains(&amount) {
            return Err(ErrorCode::Argument);
        }
        let source_balance = self.ledger.balance(&self.origin).ok_or(ErrorCode::Nobody)?;
        let target_balance = self.ledger.balance(target).ok_or(ErrorCode::Nobody)?;
        if source_balance < amount {
            return Err(ErrorCode::Funds);
        }
        if *target == self.origin {
            return Ok(());
        }
        let credited = target_balance
            .checked_add(amount)
            .ok_or(ErrorCode::Argument)?;

        self.ledger.set_balance(self.origin, source_balance - amount);
        self.ledger.set_balance(*target, credited);
        Ok(())
    }

    /// Returns true once any step has failed.
    pub fn is_exceptional(&self) -> bool {
        self.exception.is_some()
    }

    /// The failure that made this context exceptional, if any.
    pub fn exception(&self) -> Option<ErrorCode> {
        self.exception
    }

    /// Juice consumed so far.
    pub fn juice_used(&self) -> i64 {
        self.juice_used
    }

    /// Juice still available.
    pub fn juice_remaining(&self) -> i64 {
        self.juice_limit - self.juice_used
    }

    /// The account executing the transaction.
    pub fn origin(&self) -> Address {
        self.origin
    }

    /// Read access to balances.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Consumes the context and returns the ledger with any applied changes.
    pub fn into_ledger(self) -> L {
        self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::ledger::MemoryLedger;
    use crate::utils::test_utils::utils::{funded_ledger, test_address};

    #[test]
    fn consume_juice_within_budget() {
        let mut ctx = Context::new(MemoryLedger::new(), test_address(), 100);
        assert!(ctx.consume_juice(60));
        assert!(ctx.consume_juice(40));
        assert_eq!(ctx.juice_used(), 100);
        assert_eq!(ctx.juice_remaining(), 0);
        assert!(!ctx.is_exceptional());
    }

    #[test]
    fn consume_juice_over_budget_is_exceptional() {
        let mut ctx = Context::new(MemoryLedger::new(), test_address(), 100);
        assert!(ctx.consume_juice(30));
        assert!(!ctx.consume_juice(71));
        assert_eq!(ctx.exception(), Some(ErrorCode::Juice));
        assert_eq!(ctx.juice_used(), 100);
        assert!(!ctx.consume_juice(0));
    }

    #[test]
    fn negative_juice_rejected() {
        let mut ctx = Context::new(MemoryLedger::new(), test_address(), 100);
        assert!(!ctx.consume_juice(-1));
        assert_eq!(ctx.exception(), Some(ErrorCode::Juice));
    }

    #[test]
    fn transfer_moves_balance() {
        let (ledger, origin, target) = funded_ledger(1_000, 5);
        let mut ctx = Context::with_default_juice(ledger, origin);
        assert!(ctx.transfer(&target, 300));

        let ledger = ctx.into_ledger();
        assert_eq!(ledger.balance(&origin), Some(700));
        assert_eq!(ledger.balance(&target), Some(305));
    }

    #[test]
    fn transfer_insufficient_funds() {
        let (ledger, origin, target) = funded_ledger(10, 0);
        let mut ctx = Context::with_default_juice(ledger.clone(), origin);
        assert!(!ctx.transfer(&target, 11));
        assert_eq!(ctx.exception(), Some(ErrorCode::Funds));
        assert_eq!(ctx.into_ledger(), ledger);
    }

    #[test]
    fn transfer_to_missing_account() {
        let (ledger, origin, _) = funded_ledger(10, 0);
        let mut ctx = Context::with_default_juice(ledger.clone(), origin);
        assert!(!ctx.transfer(&test_address(), 1));
        assert_eq!(ctx.exception(), Some(ErrorCode::Nobody));
        assert_eq!(ctx.into_ledger(), ledger);
    }

    #[test]
    fn transfer_negative_amount() {
        let (ledger, origin, target) = funded_ledger(10, 0);
        let mut ctx = Context::with_default_juice(ledger, origin);
        assert!(!ctx.transfer(&target, -1));
        assert_eq!(ctx.exception(), Some(ErrorCode::Argument));
    }

    #[test]
    fn transfer_to_self_is_noop() {
        let (ledger, origin, _) = funded_ledger(10, 0);
        let mut ctx = Context::with_default_juice(ledger.clone(), origin);
        assert!(ctx.transfer(&origin, 10));
        assert_eq!(ctx.into_ledger(), ledger);
    }

    #[test]
    fn exceptional_context_refuses_transfer() {
        let (ledger, origin, target) = funded_ledger(10, 0);
        let mut ctx = Context::new(ledger.clone(), origin, 0);
        assert!(!ctx.consume_juice(1));
        assert!(!ctx.transfer(&target, 1));
        assert_eq!(ctx.exception(), Some(ErrorCode::Juice));
        assert_eq!(ctx.into_ledger(), ledger);
    }

    #[test]
    fn error_code_display() {
        assert_eq!(ErrorCode::Juice.to_string(), "JUICE: insufficient juice");
    }
}
