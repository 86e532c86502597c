//! Encoding sinks and decoding primitives for the canonical wire format.
//!
//! Every cell encoding is written through an [`EncodeSink`], so the same
//! routine can fill a [`Blob`], count bytes with a [`SizeCounter`] or feed a
//! hasher without building an intermediate buffer.
//!
//! Decoders work on `&mut &[u8]`: each read advances the slice past the
//! consumed bytes, and [`Decode::from_bytes`] rejects trailing input so that a
//! byte string maps to at most one value.

use crate::types::blob::Blob;
use thiserror::Error;

/// Sink for writing encoded bytes.
pub trait EncodeSink {
    /// Writes the given bytes to the sink.
    fn write(&mut self, bytes: &[u8]);
}

/// Counter for computing encoded size without allocating memory.
#[derive(Debug, Default)]
pub struct SizeCounter {
    len: usize,
}

impl SizeCounter {
    /// Creates a new counter initialized to zero.
    pub fn new() -> Self {
        Self { len: 0 }
    }

    /// Returns the total number of bytes counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl EncodeSink for SizeCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.len += bytes.len();
    }
}

impl EncodeSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Trait for fixed-layout values written without a tag.
pub trait Encode {
    /// Writes the binary representation to the given sink.
    fn encode<S: EncodeSink>(&self, out: &mut S);

    /// Serializes to a new blob with exact capacity.
    ///
    /// Performs two passes: first to count bytes, then to encode.
    fn to_blob(&self) -> Blob {
        let mut counter = SizeCounter::new();
        self.encode(&mut counter);

        let mut out = Blob::with_capacity(counter.len());
        self.encode(&mut out);
        out
    }
}

/// Errors raised while decoding untrusted bytes.
///
/// All of these are recoverable: the caller rejects the message or block
/// that carried the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended before the expected data was read.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// Bytes are structurally present but not a canonical encoding of a valid value.
    #[error("bad format: {0}")]
    BadFormat(String),
    /// A complete value was decoded but input remained.
    #[error("{0} trailing bytes after encoding")]
    TrailingBytes(usize),
}

impl DecodeError {
    /// Shorthand for a [`DecodeError::BadFormat`] with the given reason.
    pub fn bad_format(reason: impl Into<String>) -> Self {
        DecodeError::BadFormat(reason.into())
    }
}

/// Trait for values that can be read back from the wire format.
pub trait Decode: Sized {
    /// Reads and decodes a value, advancing the input past the consumed bytes.
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError>;

    /// Decodes a value from a byte slice, requiring all bytes to be consumed.
    fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut input = data;
        let value = Self::decode(&mut input)?;

        if !input.is_empty() {
            return Err(DecodeError::TrailingBytes(input.len()));
        }

        Ok(value)
    }
}

/// Reads exactly `n` bytes from the input, advancing the slice.
pub fn read_bytes<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], DecodeError> {
    if input.len() < n {
        return Err(DecodeError::UnexpectedEof);
    }
    let (bytes, rest) = input.split_at(n);
    *input = rest;
    Ok(bytes)
}

/// Reads a single byte from the input, advancing the slice.
pub fn read_byte(input: &mut &[u8]) -> Result<u8, DecodeError> {
    let (&first, rest) = input.split_first().ok_or(DecodeError::UnexpectedEof)?;
    *input = rest;
    Ok(first)
}

impl Encode for u8 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[*self]);
    }
}

impl Decode for u8 {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        read_byte(input)
    }
}

// Fixed-size byte arrays carry no length prefix.
impl<const N: usize> Encode for [u8; N] {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(self);
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let bytes = read_bytes(input, N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counter_accumulates() {
        let mut counter = SizeCounter::new();
        assert!(counter.is_empty());

        counter.write(&[1, 2, 3]);
        assert_eq!(counter.len(), 3);

        counter.write(&[4, 5]);
        assert_eq!(counter.len(), 5);
    }

    #[test]
    fn to_blob_preallocates_exact_capacity() {
        let arr = [9u8; 20];
        let blob = arr.to_blob();
        assert_eq!(blob.len(), 20);
        assert_eq!(blob.capacity(), blob.len());
    }

    #[test]
    fn array_has_no_length_prefix() {
        let arr: [u8; 4] = [1, 2, 3, 4];
        assert_eq!(arr.to_blob().as_slice(), &[1, 2, 3, 4]);
        assert_eq!(<[u8; 4]>::from_bytes(&[1, 2, 3, 4]).unwrap(), arr);
    }

    #[test]
    fn unexpected_eof_on_short_input() {
        assert_eq!(u8::from_bytes(&[]), Err(DecodeError::UnexpectedEof));
        assert_eq!(
            <[u8; 4]>::from_bytes(&[1, 2]),
            Err(DecodeError::UnexpectedEof)
        );
    }

    #[test]
    fn trailing_bytes_rejected() {
        assert_eq!(
            u8::from_bytes(&[42, 0xFF, 0xFF]),
            Err(DecodeError::TrailingBytes(2))
        );
    }

    #[test]
    fn decode_advances_input() {
        let mut input: &[u8] = &[0x01, 0x02, 0x03];

        assert_eq!(u8::decode(&mut input).unwrap(), 0x01);
        assert_eq!(input.len(), 2);

        assert_eq!(read_bytes(&mut input, 2).unwrap(), &[0x02, 0x03]);
        assert!(input.is_empty());
    }

    #[test]
    fn bad_format_display_carries_reason() {
        let err = DecodeError::bad_format("leading zero");
        assert_eq!(err.to_string(), "bad format: leading zero");
    }
}
