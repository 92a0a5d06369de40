//! # Source Span
//!
//! Represents a range in the source code for error reporting and source mapping.
//! Every AST node owns exactly one span, carried unchanged from the CST node
//! it was built from.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::Span;
//!
//! let span = Span::new(0..10, (0, 0), (0, 10));
//! assert_eq!(span.len(), 10);
//! assert!(span.contains(&Span::new(2..4, (0, 2), (0, 4))));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A range in the source code.
///
/// Byte offsets are half-open (`start_byte..end_byte`); rows and columns are
/// zero-based, columns count characters.
///
/// # Invariant
///
/// `start_byte <= end_byte`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Starting byte offset (inclusive)
    pub start_byte: usize,
    /// Ending byte offset (exclusive)
    pub end_byte: usize,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
    /// Source text covered, kept for leaves (names and literals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Span {
    /// Creates a span from a byte range and `(row, column)` endpoints.
    pub fn new(bytes: Range<usize>, start: (usize, usize), end: (usize, usize)) -> Self {
        debug_assert!(bytes.start <= bytes.end);
        Self {
            start_byte: bytes.start,
            end_byte: bytes.end,
            start_row: start.0,
            start_col: start.1,
            end_row: end.0,
            end_col: end.1,
            text: None,
        }
    }

    /// Zero-width span at a single point.
    pub fn empty_at(byte: usize, row: usize, col: usize) -> Self {
        Self::new(byte..byte, (row, col), (row, col))
    }

    /// Zero-width span at the start of this one.
    pub fn start_point(&self) -> Self {
        Self::empty_at(self.start_byte, self.start_row, self.start_col)
    }

    /// Zero-width span at the end of this one.
    pub fn end_point(&self) -> Self {
        Self::empty_at(self.end_byte, self.end_row, self.end_col)
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end_byte - self.start_byte
    }

    /// Returns true if the span has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }

    /// Byte range covered.
    pub fn range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// True if `other` lies within this span (inclusive at both ends).
    pub fn contains(&self, other: &Span) -> bool {
        self.start_byte <= other.start_byte && other.end_byte <= self.end_byte
    }

    /// Creates a span that encompasses both this span and another.
    ///
    /// The merged span carries no text.
    pub fn merge(&self, other: &Span) -> Span {
        let (start, start_point) = if self.start_byte <= other.start_byte {
            (self.start_byte, (self.start_row, self.start_col))
        } else {
            (other.start_byte, (other.start_row, other.start_col))
        };
        let (end, end_point) = if self.end_byte >= other.end_byte {
            (self.end_byte, (self.end_row, self.end_col))
        } else {
            (other.end_byte, (other.end_row, other.end_col))
        };
        Span::new(start..end, start_point, end_point)
    }

    /// Attach the covered slice of `source`.
    pub fn with_text(mut self, source: &str) -> Self {
        self.text = source.get(self.range()).map(str::to_string);
        self
    }
}

impl From<openscad_parser::Span> for Span {
    fn from(span: openscad_parser::Span) -> Self {
        Span::new(
            span.start.byte..span.end.byte.max(span.start.byte),
            (span.start.line, span.start.column),
            (span.end.line, span.end.column),
        )
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start_row + 1, self.start_col + 1)
    }
}

/// Anything that owns a source span.
pub trait Spanned {
    fn span(&self) -> &Span;
}

impl Spanned for Span {
    fn span(&self) -> &Span {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_merge() {
        let outer = Span::new(0..10, (0, 0), (1, 3));
        let inner = Span::new(4..6, (0, 4), (0, 6));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));

        let merged = inner.merge(&Span::new(8..12, (1, 1), (1, 5)));
        assert_eq!(merged.range(), 4..12);
        assert_eq!((merged.end_row, merged.end_col), (1, 5));
    }

    #[test]
    fn test_empty_points() {
        let span = Span::new(3..7, (0, 3), (0, 7));
        assert!(span.end_point().is_empty());
        assert_eq!(span.end_point().start_byte, 7);
        assert!(span.contains(&span.end_point()));
        assert!(span.contains(&span.start_point()));
    }

    #[test]
    fn test_with_text() {
        let source = "cube(10);";
        let span = Span::new(0..4, (0, 0), (0, 4)).with_text(source);
        assert_eq!(span.text.as_deref(), Some("cube"));
    }

    #[test]
    fn test_from_parser_span() {
        use openscad_parser::Position;
        let span: Span =
            openscad_parser::Span::new(Position::new(5, 1, 2), Position::new(9, 1, 6)).into();
        assert_eq!(span.range(), 5..9);
        assert_eq!((span.start_row, span.start_col), (1, 2));
        assert_eq!(span.to_string(), "2:3");
    }
}
