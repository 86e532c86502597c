//! Test utilities for cell and transaction testing.

#[cfg(test)]
pub mod utils {
    use crate::execution::ledger::MemoryLedger;
    use crate::types::address::{ADDRESS_SIZE, Address};
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(1);

    /// Returns a fresh non-zero address, unique within the test run.
    pub fn test_address() -> Address {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[ADDRESS_SIZE - 8..].copy_from_slice(&n.to_be_bytes());
        bytes[0] = 0xAC;
        Address(bytes)
    }

    /// Creates a ledger with two fresh accounts holding the given balances.
    ///
    /// Returns the ledger, the origin address and the target address.
    pub fn funded_ledger(origin_balance: i64, target_balance: i64) -> (MemoryLedger, Address, Address) {
        let origin = test_address();
        let target = test_address();
        let ledger = MemoryLedger::with_accounts([(origin, origin_balance), (target, target_balance)]);
        (ledger, origin, target)
    }
}
