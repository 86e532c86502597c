//! Cells: values with a canonical binary encoding.
//!
//! Every cell kind implements [`Cell`], which ties together three independent
//! views of a value:
//!
//! - **Encoding**: `[tag][payload]`, canonical and cached after first use.
//!   This is the hash input, the storage key and the bytes sent to peers.
//! - **Print**: bounded, human-readable text for diagnostics and the REPL.
//! - **Validation**: re-checks domain invariants on an already-built value.
//!
//! [`Value`] is the closed set of kinds this core can decode.

pub mod character;
pub mod errors;
pub mod tag;

use crate::constants::{PRINT_EXCEEDED_MESSAGE, PRINT_LIMIT};
use crate::transactions::transfer::Transfer;
use crate::types::blob::Blob;
use crate::types::blob_builder::BlobBuilder;
use crate::types::encoding::{Decode, DecodeError, EncodeSink, SizeCounter, read_byte};
use crate::types::hash::Hash;
use crate::{debug, error};
use character::CvmChar;
use errors::InvalidDataError;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tag::TagKind;

/// Set-once slot holding a cell's canonical encoding.
///
/// Computing an encoding is a pure function of the cell's fields, so racing
/// initialisers produce identical bytes and whichever write lands first is
/// kept. Equality always holds so that the cache never affects value
/// comparison.
#[derive(Default, Clone)]
pub struct EncodingCache(OnceLock<Blob>);

impl EncodingCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the cached encoding, if any.
    pub fn get(&self) -> Option<&Blob> {
        self.0.get()
    }

    /// Returns the cached encoding, computing and storing it on first use.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> Blob) -> Blob {
        self.0.get_or_init(compute).clone()
    }

    /// Stores `blob` if nothing is cached yet. Never validated.
    pub fn attach(&self, blob: Blob) {
        let _ = self.0.set(blob);
    }
}

impl PartialEq for EncodingCache {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for EncodingCache {}

impl fmt::Debug for EncodingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(blob) => write!(f, "EncodingCache({blob})"),
            None => write!(f, "EncodingCache(<empty>)"),
        }
    }
}

/// Contract shared by every encodable value.
pub trait Cell {
    /// Leading tag byte of this cell's encoding.
    fn tag(&self) -> u8;

    /// Writes the payload that follows the tag.
    fn encode_raw<S: EncodeSink>(&self, out: &mut S);

    /// Upper bound on the encoded size, used to size the encoding buffer.
    fn estimated_encoding_size(&self) -> usize;

    /// Slot holding this cell's cached encoding.
    fn encoding_cache(&self) -> &EncodingCache;

    /// Appends the printed form to `bb`.
    ///
    /// Returns `false` if the builder went past `limit` bytes.
    fn print_into(&self, bb: &mut BlobBuilder, limit: usize) -> bool;

    /// Checks this cell's domain invariants.
    fn validate_cell(&self) -> Result<(), InvalidDataError>;

    /// Writes the full encoding, tag included.
    fn write<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[self.tag()]);
        self.encode_raw(out);
    }

    /// Builds a fresh encoding without touching the cache.
    fn create_encoding(&self) -> Blob {
        let estimate = self.estimated_encoding_size();
        let capacity = if estimate > 0 {
            estimate
        } else {
            let mut counter = SizeCounter::new();
            self.write(&mut counter);
            counter.len()
        };
        let mut out = Blob::with_capacity(capacity);
        self.write(&mut out);
        out
    }

    /// Returns the canonical encoding, computing and caching it on first use.
    fn encoding(&self) -> Blob {
        self.encoding_cache()
            .get_or_compute(|| self.create_encoding())
    }

    /// Installs a pre-computed encoding if none is cached yet.
    ///
    /// The blob is trusted as-is. Attaching anything other than the canonical
    /// encoding of this value corrupts its hash and storage key silently.
    fn attach_encoding(&self, blob: Blob) {
        self.encoding_cache().attach(blob);
    }

    /// SHA3-256 of the canonical encoding.
    fn hash(&self) -> Hash {
        let mut h = Hash::sha3();
        h.update(&self.encoding());
        h.finalize()
    }

    /// Renders at most `limit` bytes of printed output.
    ///
    /// Output that does not fit is cut on a character boundary and followed
    /// by [`PRINT_EXCEEDED_MESSAGE`].
    fn print(&self, limit: usize) -> String {
        let mut bb = BlobBuilder::new(limit);
        if self.print_into(&mut bb, limit) {
            return bb.into_string();
        }
        let mut s = bb.truncated().to_string();
        s.push_str(PRINT_EXCEEDED_MESSAGE);
        s
    }

    /// [`print`](Self::print) with the default [`PRINT_LIMIT`].
    fn print_default(&self) -> String {
        self.print(PRINT_LIMIT)
    }

    /// Checks domain invariants, for values loaded from untrusted storage.
    fn validate(&self) -> Result<(), InvalidDataError> {
        self.validate_cell()
    }
}

/// Any cell this core knows how to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Char(Arc<CvmChar>),
    Transfer(Arc<Transfer>),
}

impl Value {
    /// Decodes one cell from the front of `input`, advancing it.
    ///
    /// The consumed bytes are attached as the cell's encoding: decoding only
    /// accepts canonical input, so they are exactly what `encoding()` would
    /// produce.
    pub fn decode_prefix(input: &mut &[u8]) -> Result<Value, DecodeError> {
        let start = *input;
        let tag = read_byte(input)?;
        let value = match TagKind::of(tag) {
            Some(TagKind::Char { len }) => Value::Char(CvmChar::read(len, input)?),
            Some(TagKind::Transfer) => Value::Transfer(Arc::new(Transfer::read(input)?)),
            None => {
                return Err(DecodeError::bad_format(format!(
                    "unrecognised tag 0x{tag:02x}"
                )));
            }
        };
        let consumed = start.len() - input.len();
        value.attach_encoding(Blob::from(&start[..consumed]));
        Ok(value)
    }

    /// Returns the cell as a character, if it is one.
    pub fn as_char(&self) -> Option<&Arc<CvmChar>> {
        match self {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the cell as a transfer, if it is one.
    pub fn as_transfer(&self) -> Option<&Arc<Transfer>> {
        match self {
            Value::Transfer(t) => Some(t),
            _ => None,
        }
    }
}

impl Decode for Value {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Value::decode_prefix(input).inspect_err(|e| debug!("rejected cell encoding: {e}"))
    }
}

impl Cell for Value {
    fn tag(&self) -> u8 {
        match self {
            Value::Char(c) => c.tag(),
            Value::Transfer(t) => t.tag(),
        }
    }

    fn encode_raw<S: EncodeSink>(&self, out: &mut S) {
        match self {
            Value::Char(c) => c.encode_raw(out),
            Value::Transfer(t) => t.encode_raw(out),
        }
    }

    fn estimated_encoding_size(&self) -> usize {
        match self {
            Value::Char(c) => c.estimated_encoding_size(),
            Value::Transfer(t) => t.estimated_encoding_size(),
        }
    }

    fn encoding_cache(&self) -> &EncodingCache {
        match self {
            Value::Char(c) => c.encoding_cache(),
            Value::Transfer(t) => t.encoding_cache(),
        }
    }

    fn print_into(&self, bb: &mut BlobBuilder, limit: usize) -> bool {
        match self {
            Value::Char(c) => c.print_into(bb, limit),
            Value::Transfer(t) => t.print_into(bb, limit),
        }
    }

    fn validate_cell(&self) -> Result<(), InvalidDataError> {
        let result = match self {
            Value::Char(c) => c.validate_cell(),
            Value::Transfer(t) => t.validate_cell(),
        };
        if let Err(e) = &result {
            error!("stored cell failed validation: {e}");
        }
        result
    }
}

impl From<Arc<CvmChar>> for Value {
    fn from(c: Arc<CvmChar>) -> Self {
        Value::Char(c)
    }
}

impl From<Arc<Transfer>> for Value {
    fn from(t: Arc<Transfer>) -> Self {
        Value::Transfer(t)
    }
}

impl From<Transfer> for Value {
    fn from(t: Transfer) -> Self {
        Value::Transfer(Arc::new(t))
    }
}
