//! Variable-length coding (VLC) for signed 64-bit integers.
//!
//! # Format
//!
//! Big-endian groups of 7 bits. Every byte except the last has its high bit
//! set. Bit 6 of the first byte is the sign bit, and the first group is sign
//! extended, so values in `-64..64` take a single byte.
//!
//! ```text
//!     0 -> 00        63 -> 3f        -1 -> 7f
//!    64 -> 80 40    -65 -> ff 3f    300 -> 82 2c
//! ```
//!
//! # Canonical form
//!
//! A leading byte that carries only sign bits (`0x80` or `0xff`) is legal only
//! when the next group's top bit differs from the sign; otherwise the byte
//! could be dropped and the value would be the same. Such encodings are
//! rejected, as are encodings longer than [`MAX_VLC_LONG_LENGTH`] or whose
//! value does not fit in an `i64`.

use crate::constants::MAX_VLC_LONG_LENGTH;
use crate::types::encoding::{DecodeError, EncodeSink, read_byte};

/// Number of bytes needed to encode `x`.
pub const fn vlc_length(x: i64) -> usize {
    // Two's complement bit length including the sign bit.
    let magnitude = if x < 0 { !x } else { x };
    let bits = 65 - magnitude.leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Writes `x` in canonical VLC form.
pub fn write_vlc_long<S: EncodeSink>(out: &mut S, x: i64) {
    let mut buf = [0u8; MAX_VLC_LONG_LENGTH];
    let len = vlc_length(x);
    for (i, slot) in buf[..len].iter_mut().enumerate() {
        let shift = 7 * (len - 1 - i);
        let group = ((x >> shift) & 0x7f) as u8;
        *slot = if i + 1 < len { group | 0x80 } else { group };
    }
    out.write(&buf[..len]);
}

/// Reads a canonical VLC integer, advancing the input.
pub fn read_vlc_long(input: &mut &[u8]) -> Result<i64, DecodeError> {
    let mut octet = read_byte(input)?;
    // Sign-extend the first seven bits.
    let mut result: i128 = (((octet as i8) << 1) >> 1) as i128;
    let sign_only = matches!(octet & 0x7f, 0x00 | 0x7f);
    let mut len = 1;

    while octet & 0x80 != 0 {
        if len >= MAX_VLC_LONG_LENGTH {
            return Err(DecodeError::bad_format("VLC encoding too long"));
        }
        octet = read_byte(input)?;
        let group = octet & 0x7f;
        if sign_only && len == 1 {
            let next_negative = group & 0x40 != 0;
            if next_negative == (result < 0) {
                return Err(DecodeError::bad_format(
                    "VLC encoding not canonical: excess leading sign byte",
                ));
            }
        }
        result = (result << 7) | group as i128;
        len += 1;
    }

    i64::try_from(result).map_err(|_| DecodeError::bad_format("VLC value out of 64-bit range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(x: i64) -> Vec<u8> {
        let mut out = Vec::new();
        write_vlc_long(&mut out, x);
        out
    }

    fn decode(bytes: &[u8]) -> Result<i64, DecodeError> {
        let mut input = bytes;
        let value = read_vlc_long(&mut input)?;
        assert!(input.is_empty(), "decoder left {} bytes", input.len());
        Ok(value)
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(63), vec![0x3f]);
        assert_eq!(encode(-1), vec![0x7f]);
        assert_eq!(encode(-64), vec![0x40]);
        assert_eq!(encode(64), vec![0x80, 0x40]);
        assert_eq!(encode(-65), vec![0xff, 0x3f]);
        assert_eq!(encode(300), vec![0x82, 0x2c]);
    }

    #[test]
    fn length_matches_encoding() {
        for x in [0, 63, 64, 8191, 8192, -8192, -8193, i64::MAX, i64::MIN] {
            assert_eq!(encode(x).len(), vlc_length(x), "length of {x}");
        }
        assert_eq!(vlc_length(i64::MAX), MAX_VLC_LONG_LENGTH);
        assert_eq!(vlc_length(i64::MIN), MAX_VLC_LONG_LENGTH);
    }

    #[test]
    fn roundtrip_boundaries() {
        for x in [
            0,
            1,
            -1,
            63,
            64,
            -64,
            -65,
            100,
            1_000_000_000_000_000_000,
            i64::MAX,
            i64::MIN,
        ] {
            assert_eq!(decode(&encode(x)), Ok(x), "roundtrip of {x}");
        }
    }

    #[test]
    fn rejects_excess_leading_zero_group() {
        // 5 padded with a redundant positive sign byte
        assert!(matches!(decode(&[0x80, 0x05]), Err(DecodeError::BadFormat(_))));
    }

    #[test]
    fn rejects_excess_leading_sign_group() {
        // -1 padded with a redundant negative sign byte
        assert!(matches!(decode(&[0xff, 0x7f]), Err(DecodeError::BadFormat(_))));
    }

    #[test]
    fn rejects_overlong_encoding() {
        let mut bytes = vec![0x81; MAX_VLC_LONG_LENGTH];
        bytes.push(0x00);
        assert!(matches!(decode(&bytes), Err(DecodeError::BadFormat(_))));
    }

    #[test]
    fn rejects_value_beyond_i64() {
        // 0x01 followed by nine more groups: 2^63, one past i64::MAX
        let mut bytes = vec![0x81];
        bytes.extend_from_slice(&[0x80; 8]);
        bytes.push(0x00);
        assert!(matches!(decode(&bytes), Err(DecodeError::BadFormat(_))));
    }

    #[test]
    fn truncated_input_is_eof() {
        assert_eq!(decode(&[0x82]), Err(DecodeError::UnexpectedEof));
        assert_eq!(decode(&[]), Err(DecodeError::UnexpectedEof));
    }
}
