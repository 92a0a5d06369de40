//! # Source Positions
//!
//! Byte offsets plus zero-based line/column pairs for tokens and CST nodes.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::span::{Position, Span};
//!
//! let span = Span::new(Position::new(0, 0, 0), Position::new(4, 0, 4));
//! assert_eq!(span.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A point in the source text.
///
/// `line` and `column` are zero-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column number in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A half-open range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First position covered.
    pub start: Position,
    /// Position just past the last character covered.
    pub end: Position,
}

impl Span {
    /// Create a span between two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a single position.
    ///
    /// Used for nodes the parser synthesizes, such as a missing `;`.
    pub const fn empty_at(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Span over byte offsets on the first line.
    ///
    /// Only meaningful for single-line test inputs.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, start),
            end: Position::new(end, 0, end),
        }
    }

    /// Span of length zero at the start of the source.
    pub const fn zero() -> Self {
        Self::from_bytes(0, 0)
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True for zero-width spans.
    pub const fn is_empty(&self) -> bool {
        self.end.byte <= self.start.byte
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Anything that knows where it came from in the source.
pub trait Spanned {
    /// Source range of this item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::from_bytes(3, 9).len(), 6);
        assert!(Span::from_bytes(4, 4).is_empty());
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(Position::new(0, 0, 0), Position::new(4, 0, 4));
        let b = Span::new(Position::new(6, 1, 0), Position::new(9, 1, 3));
        let merged = a.merge(&b);
        assert_eq!(merged.start.byte, 0);
        assert_eq!(merged.end, Position::new(9, 1, 3));
    }

    #[test]
    fn test_empty_at() {
        let at = Position::new(5, 0, 5);
        let span = Span::empty_at(at);
        assert!(span.is_empty());
        assert_eq!(span.start, span.end);
    }
}
