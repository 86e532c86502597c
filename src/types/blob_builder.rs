//! Append-only text accumulator with a byte limit, used by the print path.

use crate::types::blob::Blob;

/// Accumulates UTF-8 text while tracking a byte limit.
///
/// Appends never fail. Once the running count passes the limit, the builder
/// keeps growing but reports itself as exceeded; callers check
/// [`check`](Self::check) after printing and decide how to truncate.
#[derive(Debug, Clone)]
pub struct BlobBuilder {
    buf: String,
    limit: usize,
}

impl BlobBuilder {
    /// Creates an empty builder with the given byte limit.
    pub fn new(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
        }
    }

    /// Appends a string.
    pub fn append(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends a single character.
    pub fn append_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Number of bytes appended so far.
    pub fn count(&self) -> usize {
        self.buf.len()
    }

    /// The configured byte limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns true while the builder is within `limit` bytes.
    pub fn check(&self, limit: usize) -> bool {
        self.count() <= limit
    }

    /// Returns true once more bytes than the configured limit were appended.
    pub fn is_exceeded(&self) -> bool {
        !self.check(self.limit)
    }

    /// Returns the accumulated text.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns the accumulated text cut to at most `limit` bytes on a
    /// character boundary.
    pub fn truncated(&self) -> &str {
        if !self.is_exceeded() {
            return &self.buf;
        }
        let mut end = self.limit;
        while !self.buf.is_char_boundary(end) {
            end -= 1;
        }
        &self.buf[..end]
    }

    /// Consumes the builder and returns the full accumulated text.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Consumes the builder and returns its UTF-8 bytes.
    pub fn into_blob(self) -> Blob {
        Blob::new(self.buf.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes_not_chars() {
        let mut bb = BlobBuilder::new(16);
        bb.append("ab");
        bb.append_char('\u{20AC}');
        assert_eq!(bb.count(), 5);
        assert!(bb.check(5));
        assert!(!bb.check(4));
    }

    #[test]
    fn keeps_growing_past_limit() {
        let mut bb = BlobBuilder::new(2);
        bb.append("abcd");
        assert!(bb.is_exceeded());
        assert_eq!(bb.as_str(), "abcd");
        assert_eq!(bb.truncated(), "ab");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut bb = BlobBuilder::new(2);
        bb.append("a\u{20AC}");
        assert_eq!(bb.truncated(), "a");
    }

    #[test]
    fn within_limit_is_untouched() {
        let mut bb = BlobBuilder::new(10);
        bb.append("hello");
        assert!(!bb.is_exceeded());
        assert_eq!(bb.truncated(), "hello");
        assert_eq!(bb.into_blob().as_slice(), b"hello");
    }
}
