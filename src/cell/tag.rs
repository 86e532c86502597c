//! One-byte discriminators that prefix every encoding.
//!
//! | Tag          | Kind                                  |
//! |--------------|---------------------------------------|
//! | `0x3c..=3f`  | character, low bits = payload len - 1 |
//! | `0xd1`       | transfer transaction                  |

/// Base tag for characters. `CHAR + (len - 1)` for a 1 to 4 byte payload.
pub const CHAR: u8 = 0x3c;

/// Highest tag in the character range.
pub const CHAR_MAX: u8 = CHAR + 3;

/// Tag for a coin transfer transaction.
pub const TRANSFER: u8 = 0xd1;

/// Decoded meaning of a tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// A character whose payload is this many bytes long.
    Char { len: usize },
    /// A transfer transaction.
    Transfer,
}

impl TagKind {
    /// Classifies a tag byte, or `None` if this core does not know it.
    pub const fn of(tag: u8) -> Option<TagKind> {
        match tag {
            CHAR..=CHAR_MAX => Some(TagKind::Char {
                len: (tag - CHAR) as usize + 1,
            }),
            TRANSFER => Some(TagKind::Transfer),
            _ => None,
        }
    }
}

/// Character tag for a payload of `len` bytes.
pub const fn char_tag(len: usize) -> u8 {
    debug_assert!(len >= 1 && len <= 4);
    CHAR + (len as u8 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_range_carries_length() {
        assert_eq!(TagKind::of(0x3c), Some(TagKind::Char { len: 1 }));
        assert_eq!(TagKind::of(0x3f), Some(TagKind::Char { len: 4 }));
        for len in 1..=4 {
            assert_eq!(TagKind::of(char_tag(len)), Some(TagKind::Char { len }));
        }
    }

    #[test]
    fn transfer_tag() {
        assert_eq!(TagKind::of(TRANSFER), Some(TagKind::Transfer));
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(TagKind::of(0x00), None);
        assert_eq!(TagKind::of(0x3b), None);
        assert_eq!(TagKind::of(0x40), None);
    }
}
