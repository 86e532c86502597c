//! 20-byte account addresses.

use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink};
use std::fmt;

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Fixed-size 20-byte address identifying an account.
///
/// Encoded raw, without tag or length prefix, so every address occupies
/// exactly [`ADDRESS_SIZE`] bytes on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// The all-zero address, used as the "no account" sentinel.
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE]);

    /// Creates an address from a byte slice, or `None` if the length is wrong.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; ADDRESS_SIZE] = bytes.try_into().ok()?;
        Some(Address(arr))
    }

    /// Parses a 40-digit hex string, with or without a `0x` prefix.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.len() != ADDRESS_SIZE * 2 {
            return None;
        }
        let mut out = [0u8; ADDRESS_SIZE];
        for (slot, pair) in out.iter_mut().zip(hex.as_bytes().chunks(2)) {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            *slot = ((hi << 4) | lo) as u8;
        }
        Some(Address(out))
    }

    /// Returns true for the all-zero sentinel address.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Returns the address as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Encode for Address {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.0.encode(out);
    }
}

impl Decode for Address {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Address(<[u8; ADDRESS_SIZE]>::decode(input)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_hex() {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = 0xab;
        bytes[19] = 0x01;
        let addr = Address(bytes);
        assert_eq!(
            addr.to_string(),
            "0xab00000000000000000000000000000000000001"
        );
    }

    #[test]
    fn from_hex_accepts_display_output() {
        let addr = Address([0x5a; ADDRESS_SIZE]);
        assert_eq!(Address::from_hex(&addr.to_string()), Some(addr));
        assert_eq!(Address::from_hex(&addr.to_string()[2..]), Some(addr));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert_eq!(Address::from_hex("0xabcd"), None);
    }

    #[test]
    fn encodes_as_raw_twenty_bytes() {
        let addr = Address([7u8; ADDRESS_SIZE]);
        let blob = addr.to_blob();
        assert_eq!(blob.len(), ADDRESS_SIZE);
        assert_eq!(Address::from_bytes(&blob).unwrap(), addr);
    }

    #[test]
    fn zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address([1u8; ADDRESS_SIZE]).is_zero());
        assert_eq!(Address::from_slice(&[0u8; 3]), None);
    }
}
