//! Canonical cell encoding core.
//!
//! Provides the binary encoding, hashing and printing of CVM cells, the
//! character and coin-transfer cell types, and the execution context a
//! transfer is applied to.

pub mod cell;
pub mod constants;
pub mod execution;
pub mod transactions;
pub mod types;
pub mod utils;
