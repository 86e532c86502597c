//! Protocol-wide constants shared by the encoding core.
//!
//! Changing any value here changes consensus behaviour: every node must agree on
//! the supply cap, juice costs and encoding bounds.

/// Maximum number of coins that can ever exist, in base units.
///
/// Any amount outside `0..=MAX_SUPPLY` is invalid on the wire and in storage.
pub const MAX_SUPPLY: i64 = 1_000_000_000_000_000_000;

/// Default byte limit for [`print`](crate::cell::Cell::print) output.
pub const PRINT_LIMIT: usize = 65_536;

/// Marker appended to printed output that hit its byte limit.
pub const PRINT_EXCEEDED_MESSAGE: &str = "<<limit exceeded>>";

/// Replacement character used when a code point has no `char` representation.
pub const BAD_CHARACTER: char = '\u{FFFD}';

/// String form of [`BAD_CHARACTER`].
pub const BAD_CHARACTER_STRING: &str = "\u{FFFD}";

/// Maximum length of a VLC-encoded 64-bit integer (65 significant bits, 7 per byte).
pub const MAX_VLC_LONG_LENGTH: usize = 10;

/// Juice charged for a single coin transfer.
pub const TRANSFER_JUICE: i64 = 100;

/// Juice budget given to a fresh execution context when none is specified.
pub const DEFAULT_JUICE_LIMIT: i64 = 100_000;
