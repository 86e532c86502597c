//! Account balance storage consulted by the execution context.

use crate::types::address::Address;
use std::collections::BTreeMap;

/// Balance storage for the accounts a transaction touches.
///
/// This core only reads and writes balances; account creation, persistence
/// and state roots belong to the storage layer behind this trait.
pub trait Ledger {
    /// Returns the balance of `address`, or `None` if no such account exists.
    fn balance(&self, address: &Address) -> Option<i64>;
    /// Overwrites the balance of an existing or new account.
    fn set_balance(&mut self, address: Address, balance: i64);
}

/// In-memory ledger backed by an ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    accounts: BTreeMap<Address, i64>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (Address, i64)>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the ledger has no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, saturating.
    pub fn total_supply(&self) -> i64 {
        self.accounts
            .values()
            .fold(0i64, |acc, &v| acc.saturating_add(v))
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, address: &Address) -> Option<i64> {
        self.accounts.get(address).copied()
    }

    fn set_balance(&mut self, address: Address, balance: i64) {
        self.accounts.insert(address, balance);
    }
}
