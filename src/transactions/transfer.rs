//! Coin transfer from the origin account to a target account.
//!
//! # Encoding
//!
//! ```text
//! [0xd1][VLC nonce][20-byte target][VLC amount]
//! ```

use crate::cell::errors::InvalidDataError;
use crate::cell::tag;
use crate::cell::{Cell, EncodingCache};
use crate::constants::{MAX_SUPPLY, TRANSFER_JUICE};
use crate::execution::context::Context;
use crate::execution::ledger::Ledger;
use crate::info;
use crate::transactions::Transaction;
use crate::types::address::{ADDRESS_SIZE, Address};
use crate::types::blob_builder::BlobBuilder;
use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink};
use crate::types::vlc::{read_vlc_long, vlc_length, write_vlc_long};
use std::sync::Arc;

/// Transfer of `amount` coins to `target`.
///
/// Immutable: changing the nonce yields a new instance via
/// [`Transaction::with_sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Sequence number of the originating account.
    nonce: i64,
    /// Account receiving the coins.
    target: Address,
    /// Coins to move, valid in `0..=MAX_SUPPLY`.
    amount: i64,

    /// Cached canonical encoding, do not use directly.
    encoding: EncodingCache,
}

impl Transfer {
    /// Creates a transfer. The amount is checked by [`Cell::validate`], not here.
    pub fn create(nonce: i64, target: Address, amount: i64) -> Self {
        Self {
            nonce,
            target,
            amount,
            encoding: EncodingCache::new(),
        }
    }

    /// Reads the payload following the tag, rejecting out-of-range amounts.
    pub fn read(input: &mut &[u8]) -> Result<Transfer, DecodeError> {
        let nonce = read_vlc_long(input)?;
        let target = Address::decode(input)?;
        let amount = read_vlc_long(input)?;
        if !is_valid_amount(amount) {
            return Err(DecodeError::bad_format(format!("invalid amount: {amount}")));
        }
        Ok(Transfer::create(nonce, target, amount))
    }

    /// The account receiving the coins.
    pub fn target(&self) -> &Address {
        &self.target
    }

    /// The amount transferred.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The sequence number.
    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// Tagged EDN form, e.g. `#trans/transfer {:target 0x..,:amount 5}`.
    pub fn edn_string(&self) -> String {
        format!(
            "#trans/transfer {{:target {},:amount {}}}",
            self.target, self.amount
        )
    }
}

fn is_valid_amount(amount: i64) -> bool {
    (0..=MAX_SUPPLY).contains(&amount)
}

impl Cell for Transfer {
    fn tag(&self) -> u8 {
        tag::TRANSFER
    }

    fn encode_raw<S: EncodeSink>(&self, out: &mut S) {
        write_vlc_long(out, self.nonce);
        self.target.encode(out);
        write_vlc_long(out, self.amount);
    }

    fn estimated_encoding_size(&self) -> usize {
        1 + vlc_length(self.nonce) + ADDRESS_SIZE + vlc_length(self.amount)
    }

    fn encoding_cache(&self) -> &EncodingCache {
        &self.encoding
    }

    fn print_into(&self, bb: &mut BlobBuilder, limit: usize) -> bool {
        bb.append("{:transfer-to ");
        bb.append(&self.target.to_string());
        bb.append(",:amount ");
        bb.append(&self.amount.to_string());
        bb.append_char('}');
        bb.check(limit)
    }

    fn validate_cell(&self) -> Result<(), InvalidDataError> {
        if !is_valid_amount(self.amount) {
            return Err(InvalidDataError::new("invalid amount", self.print_default()));
        }
        if self.target.is_zero() {
            return Err(InvalidDataError::new("null target address", self.print_default()));
        }
        Ok(())
    }
}

impl Transaction for Transfer {
    fn sequence(&self) -> i64 {
        self.nonce
    }

    fn with_sequence(self: Arc<Self>, sequence: i64) -> Arc<Self> {
        if sequence == self.nonce {
            return self;
        }
        Arc::new(Transfer::create(sequence, self.target, self.amount))
    }

    fn max_juice(&self) -> i64 {
        TRANSFER_JUICE
    }

    fn apply<L: Ledger>(&self, ctx: &mut Context<L>) {
        if !ctx.consume_juice(TRANSFER_JUICE) {
            info!(
                "transfer {} from {} not applied: insufficient juice",
                self.nonce,
                ctx.origin()
            );
            return;
        }
        if !ctx.transfer(&self.target, self.amount)
            && let Some(code) = ctx.exception()
        {
            info!("transfer {} to {} failed: {}", self.nonce, self.target, code);
        }
    }
}
