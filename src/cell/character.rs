//! CVM character values: single Unicode code points.
//!
//! # Encoding
//!
//! `[CHAR + len - 1][len bytes, big-endian]`, where `len` is the minimal
//! number of bytes holding the code point:
//!
//! | Code point             | Payload |
//! |------------------------|---------|
//! | `0x00 ..= 0xFF`        | 1 byte  |
//! | `0x100 ..= 0xFFFF`     | 2 bytes |
//! | `0x10000 ..= 0xFFFFFF` | 3 bytes |
//! | above                  | 4 bytes |
//!
//! These boundaries are not the UTF-8 ones; [`utf_length`] uses the UTF-8
//! table. The two must stay separate.
//!
//! # Printing
//!
//! EDN style: `\a`, `\newline`, `\return`, `\space`, `\tab`.

use crate::cell::errors::InvalidDataError;
use crate::cell::tag::char_tag;
use crate::cell::{Cell, EncodingCache};
use crate::constants::{BAD_CHARACTER, BAD_CHARACTER_STRING};
use crate::types::blob::Blob;
use crate::types::blob_builder::BlobBuilder;
use crate::types::encoding::{DecodeError, EncodeSink, read_byte};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Largest valid code point (21 bits).
pub const MAX_VALUE: u32 = 0x10FFFF;

/// Number of pre-built instances, covering ASCII.
const CACHE_SIZE: usize = 128;

static CACHE: LazyLock<[Arc<CvmChar>; CACHE_SIZE]> =
    LazyLock::new(|| std::array::from_fn(|i| Arc::new(CvmChar::new(i as u32))));

/// Named characters accepted by [`CvmChar::parse`] after the backslash.
const SPECIAL_CHARACTERS: [(&str, u32); 6] = [
    ("newline", '\n' as u32),
    ("return", '\r' as u32),
    ("space", ' ' as u32),
    ("tab", '\t' as u32),
    ("formfeed", 0x0C),
    ("backspace", 0x08),
];

/// A Unicode code point in `0..=MAX_VALUE`.
///
/// Surrogates are valid code points here even though Rust's `char` cannot
/// hold them; they print as [`BAD_CHARACTER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvmChar {
    value: u32,
    encoding: EncodingCache,
}

impl CvmChar {
    fn new(value: u32) -> Self {
        Self {
            value,
            encoding: EncodingCache::new(),
        }
    }

    /// Returns the character for `value`, or `None` outside `0..=MAX_VALUE`.
    ///
    /// ASCII values return a shared instance from a process-wide table.
    pub fn create(value: i64) -> Option<Arc<CvmChar>> {
        if value < 0 {
            return None;
        }
        if value < CACHE_SIZE as i64 {
            return Some(Arc::clone(&CACHE[value as usize]));
        }
        if value > MAX_VALUE as i64 {
            return None;
        }
        Some(Arc::new(CvmChar::new(value as u32)))
    }

    /// Returns the character for a Rust `char`, which is always in range.
    pub fn from_char(c: char) -> Arc<CvmChar> {
        let value = c as u32;
        if (value as usize) < CACHE_SIZE {
            return Arc::clone(&CACHE[value as usize]);
        }
        Arc::new(CvmChar::new(value))
    }

    /// The code point.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The code point widened to `i64`.
    pub fn long_value(&self) -> i64 {
        self.value as i64
    }

    /// The code point as a `char`, or `None` for surrogates.
    pub fn to_char(&self) -> Option<char> {
        char::from_u32(self.value)
    }

    /// The code point as a `char` if it lies in the Basic Multilingual Plane,
    /// otherwise [`BAD_CHARACTER`].
    pub fn char_value(&self) -> char {
        if self.value <= 0xFFFF {
            self.to_char().unwrap_or(BAD_CHARACTER)
        } else {
            BAD_CHARACTER
        }
    }

    /// Reads a `len`-byte payload (the tag has already been consumed).
    pub fn read(len: usize, input: &mut &[u8]) -> Result<Arc<CvmChar>, DecodeError> {
        // The sentinel keeps the first check from firing; after that a zero
        // accumulator means the previous byte was a superfluous leading zero.
        let mut value: u32 = 0xFF00_0000;
        for _ in 0..len {
            if value == 0 {
                return Err(DecodeError::bad_format("leading zero in character encoding"));
            }
            let b = read_byte(input)?;
            value = (value << 8) | b as u32;
        }
        CvmChar::create(value as i64)
            .ok_or_else(|| DecodeError::bad_format("character out of Unicode range"))
    }

    /// Parses the printed form, e.g. `\a`, `A` or `\newline`.
    ///
    /// Returns `None` for anything that is not a valid character literal.
    pub fn parse(s: &str) -> Option<Arc<CvmChar>> {
        let rest = s.strip_prefix('\\')?;
        let mut chars = rest.chars();
        let first = chars.next()?;
        if chars.as_str().is_empty() {
            return Some(CvmChar::from_char(first));
        }

        if let Some(hex) = rest.strip_prefix('u')
            && hex.len() == 4
            && hex.bytes().all(|b| b.is_ascii_hexdigit())
        {
            let value = u32::from_str_radix(hex, 16).ok()?;
            return CvmChar::create(value as i64);
        }

        special_character(rest)
    }

    /// Bytes of the UTF-8 form, packed by hand.
    ///
    /// Surrogates produce their 3-byte generalised UTF-8 form.
    pub fn to_utf_bytes(&self) -> Vec<u8> {
        let v = self.value;
        let n = utf_length(v as i64).unwrap_or(4);
        if n == 1 {
            return vec![v as u8];
        }
        let mut bs = vec![0u8; n];
        bs[0] = ((0xFF00u32 >> n) | (v >> ((n - 1) * 6))) as u8;
        for (i, b) in bs.iter_mut().enumerate().skip(1) {
            *b = (0x80 | (0x3F & (v >> ((n - 1 - i) * 6)))) as u8;
        }
        bs
    }

    /// UTF-8 form as a blob of 1 to 4 bytes.
    pub fn to_utf_blob(&self) -> Blob {
        Blob::new(self.to_utf_bytes())
    }
}

/// Payload length of the canonical encoding.
fn encoded_char_length(c: u32) -> usize {
    if c & 0xFFFF_0000 == 0 {
        if c & 0x0000_FF00 == 0 { 1 } else { 2 }
    } else if c & 0xFF00_0000 == 0 {
        3
    } else {
        4
    }
}

/// UTF-8 length of a code point, or `None` if it is not a valid code point.
pub fn utf_length(c: i64) -> Option<usize> {
    match c {
        0..=0x7F => Some(1),
        0x80..=0x7FF => Some(2),
        0x800..=0xFFFF => Some(3),
        0x10000..=0x10FFFF => Some(4),
        _ => None,
    }
}

/// Looks up a named character such as `newline`.
pub fn special_character(name: &str) -> Option<Arc<CvmChar>> {
    SPECIAL_CHARACTERS
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|&(_, value)| CvmChar::create(value as i64))
}

impl fmt::Display for CvmChar {
    /// The bare character, unlike `print` which adds the backslash syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(c) => write!(f, "{c}"),
            None => f.write_str(BAD_CHARACTER_STRING),
        }
    }
}

impl Cell for CvmChar {
    fn tag(&self) -> u8 {
        char_tag(encoded_char_length(self.value))
    }

    fn encode_raw<S: EncodeSink>(&self, out: &mut S) {
        let len = encoded_char_length(self.value);
        let bytes = self.value.to_be_bytes();
        out.write(&bytes[4 - len..]);
    }

    fn estimated_encoding_size(&self) -> usize {
        1 + encoded_char_length(self.value)
    }

    fn encoding_cache(&self) -> &EncodingCache {
        &self.encoding
    }

    fn print_into(&self, bb: &mut BlobBuilder, limit: usize) -> bool {
        match self.to_char() {
            Some('\n') => bb.append("\\newline"),
            Some('\r') => bb.append("\\return"),
            Some(' ') => bb.append("\\space"),
            Some('\t') => bb.append("\\tab"),
            _ => {
                bb.append_char('\\');
                bb.append(&self.to_string());
            }
        }
        bb.check(limit)
    }

    fn validate_cell(&self) -> Result<(), InvalidDataError> {
        if self.value > MAX_VALUE {
            return Err(InvalidDataError::new(
                "character out of Unicode range",
                format!("0x{:x}", self.value),
            ));
        }
        Ok(())
    }
}
