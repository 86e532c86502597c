//! Reference-counted immutable byte sequence.

use crate::types::encoding::EncodeSink;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable, cheaply cloneable byte sequence compared by content.
///
/// Encodings are produced once and then shared between the cell cache, the
/// hasher and any transport, so cloning only bumps a reference count.
#[derive(Default, Eq, PartialEq, Hash)]
pub struct Blob(Arc<Vec<u8>>);

impl Blob {
    /// Creates a blob from anything convertible to `Vec<u8>`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(Arc::new(data.into()))
    }

    /// Creates an empty blob with the given capacity, for building in place.
    pub fn with_capacity(cap: usize) -> Self {
        Self(Arc::new(Vec::with_capacity(cap)))
    }

    /// Returns the number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the contents as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Copies the contents into a new `Vec<u8>`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Returns the allocated capacity of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// Appends bytes, copying the buffer first if it is shared.
    pub fn extend_from_slice(&mut self, s: &[u8]) {
        Arc::make_mut(&mut self.0).extend_from_slice(s);
    }

    /// Lower-case hex rendering of the contents.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(self.len() * 2);
        for byte in self.as_slice() {
            s.push_str(&format!("{:02x}", byte));
        }
        s
    }

    /// Parses lower- or upper-case hex into a blob.
    ///
    /// Returns `None` for odd-length input or non-hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() % 2 != 0 {
            return None;
        }
        let mut out = Vec::with_capacity(hex.len() / 2);
        for pair in hex.as_bytes().chunks(2) {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            out.push(((hi << 4) | lo) as u8);
        }
        Some(Self::new(out))
    }
}

impl Clone for Blob {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl Deref for Blob {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob(0x{})", self.to_hex())
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl EncodeSink for Blob {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl From<Vec<u8>> for Blob {
    fn from(v: Vec<u8>) -> Self {
        Self::new(v)
    }
}

impl From<&[u8]> for Blob {
    fn from(s: &[u8]) -> Self {
        Self::new(s)
    }
}

impl<const N: usize> From<[u8; N]> for Blob {
    fn from(arr: [u8; N]) -> Self {
        Self::new(arr)
    }
}

impl<const N: usize> From<&[u8; N]> for Blob {
    fn from(arr: &[u8; N]) -> Self {
        Self::new(arr.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_content() {
        let a = Blob::new(vec![1, 2, 3]);
        let b = Blob::from(&[1u8, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, Blob::new(vec![1, 2]));
    }

    #[test]
    fn clone_shares_storage_until_written() {
        let a = Blob::new(vec![7u8; 4]);
        let mut b = a.clone();
        assert_eq!(a.as_slice().as_ptr(), b.as_slice().as_ptr());

        b.extend_from_slice(&[8]);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 5);
    }

    #[test]
    fn hex_roundtrip() {
        let blob = Blob::new(vec![0x00, 0x3c, 0xd1, 0xff]);
        assert_eq!(blob.to_hex(), "003cd1ff");
        assert_eq!(Blob::from_hex("003CD1ff"), Some(blob));
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert_eq!(Blob::from_hex("abc"), None);
        assert_eq!(Blob::from_hex("zz"), None);
        assert_eq!(Blob::from_hex(""), Some(Blob::default()));
    }

    #[test]
    fn display_is_prefixed_hex() {
        assert_eq!(Blob::new(vec![0xab]).to_string(), "0xab");
    }
}
