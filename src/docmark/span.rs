//! Position and range tracking over shared source buffers
//!
//! Every structure produced by the parser points back into the original source
//! text through a [`TextRange`]: an immutable `(buffer, pos, end)` view over a
//! shared, reference-counted buffer. Sub-ranging never copies the underlying
//! text, which is what makes exact round-trip reconstruction cheap.
//!
//! Line/column conversion is a linear scan of the buffer, so callers should
//! only ask for a [`Position`] when they are actually formatting a diagnostic
//! for display.

use std::fmt;
use std::sync::Arc;

/// A line:column position in source text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An immutable view over a region of a shared source buffer.
///
/// Invariant: `pos <= end <= buffer.len()`, checked at construction.
/// Violations are programming errors, not parse errors, and panic.
#[derive(Clone, PartialEq, Eq)]
pub struct TextRange {
    buffer: Arc<str>,
    pos: usize,
    end: usize,
}

impl TextRange {
    /// Create a range covering an entire string.
    pub fn from_string(text: &str) -> Self {
        let buffer: Arc<str> = Arc::from(text);
        let end = buffer.len();
        Self { buffer, pos: 0, end }
    }

    /// Create a range over `[pos, end)` of a shared buffer.
    pub fn with_range(buffer: Arc<str>, pos: usize, end: usize) -> Self {
        assert!(
            pos <= end && end <= buffer.len(),
            "TextRange bounds out of order: pos={} end={} len={}",
            pos,
            end,
            buffer.len()
        );
        Self { buffer, pos, end }
    }

    /// A zero-length range over an empty buffer.
    pub fn empty() -> Self {
        Self::from_string("")
    }

    /// The shared buffer this range points into (the whole buffer, not the slice).
    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// The text this range covers.
    pub fn as_str(&self) -> &str {
        &self.buffer[self.pos..self.end]
    }

    /// A new range over the same buffer with different (absolute) bounds.
    pub fn sub_range(&self, pos: usize, end: usize) -> TextRange {
        TextRange::with_range(Arc::clone(&self.buffer), pos, end)
    }

    /// Convert an absolute buffer offset to a 1-based line:column position.
    ///
    /// This scans the buffer from the beginning, so it is O(n); call it only
    /// when formatting output. Out-of-range offsets yield `0:0`.
    pub fn location_of(&self, offset: usize) -> Position {
        if offset > self.buffer.len() {
            return Position::new(0, 0);
        }
        let mut line = 1;
        let mut column = 1;
        let mut chars = self.buffer[..offset].chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    line += 1;
                    column = 1;
                }
                '\r' => {
                    // A CRLF pair counts as a single line ending; defer to the LF.
                    if chars.peek() != Some(&'\n') {
                        line += 1;
                        column = 1;
                    }
                }
                _ => column += 1,
            }
        }
        Position::new(line, column)
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextRange({}..{} {:?})", self.pos, self.end, self.as_str())
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range() {
        let range = TextRange::from_string("hello");
        assert_eq!(range.pos(), 0);
        assert_eq!(range.end(), 5);
        assert_eq!(range.as_str(), "hello");
        assert!(!range.is_empty());
    }

    #[test]
    fn test_sub_range_shares_buffer() {
        let range = TextRange::from_string("hello world");
        let sub = range.sub_range(6, 11);
        assert_eq!(sub.as_str(), "world");
        assert!(Arc::ptr_eq(range.buffer(), sub.buffer()));
    }

    #[test]
    fn test_empty_range() {
        let range = TextRange::empty();
        assert!(range.is_empty());
        assert_eq!(range.as_str(), "");
    }

    #[test]
    #[should_panic(expected = "TextRange bounds out of order")]
    fn test_invalid_bounds_panics() {
        let range = TextRange::from_string("abc");
        let _ = range.sub_range(2, 1);
    }

    #[test]
    fn test_location_single_line() {
        let range = TextRange::from_string("hello");
        assert_eq!(range.location_of(0), Position::new(1, 1));
        assert_eq!(range.location_of(4), Position::new(1, 5));
    }

    #[test]
    fn test_location_multiline() {
        let range = TextRange::from_string("ab\ncd\nef");
        assert_eq!(range.location_of(0), Position::new(1, 1));
        assert_eq!(range.location_of(3), Position::new(2, 1));
        assert_eq!(range.location_of(7), Position::new(3, 2));
    }

    #[test]
    fn test_location_crlf() {
        let range = TextRange::from_string("ab\r\ncd");
        assert_eq!(range.location_of(4), Position::new(2, 1));
        assert_eq!(range.location_of(5), Position::new(2, 2));
    }

    #[test]
    fn test_location_lone_cr() {
        let range = TextRange::from_string("ab\rcd");
        assert_eq!(range.location_of(3), Position::new(2, 1));
    }

    #[test]
    fn test_location_out_of_range() {
        let range = TextRange::from_string("ab");
        assert_eq!(range.location_of(99), Position::new(0, 0));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(3, 7)), "3:7");
    }
}
