//! Byte-level building blocks for the cell encoding.
//!
//! - `Blob`: immutable, shared byte sequence produced by encoding
//! - `BlobBuilder`: bounded text accumulator used for printing
//! - `encoding`: sinks, decode helpers and [`encoding::DecodeError`]
//! - `vlc`: canonical variable-length integers
//! - `Address`, `Hash`: fixed-width identifiers

pub mod address;
pub mod blob;
pub mod blob_builder;
pub mod encoding;
pub mod hash;
pub mod vlc;
