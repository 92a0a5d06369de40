//! # CST Diagnostics
//!
//! The parser never aborts. Each problem is recorded in
//! [`Cst::errors`](crate::cst::Cst) and also marked in the tree, by an
//! `ERROR` node over the skipped tokens or a zero-width missing node where a
//! closing token was expected. The list here is for tooling; the AST
//! converter reads the tree.
//!
//! ```rust
//! let cst = openscad_parser::parse("cube(1");
//! assert_eq!(cst.errors[0].to_string(), "missing ')' at byte 6");
//! ```

use crate::lexer::TokenKind;
use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {}", span.start.byte)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A closing token the parser synthesized at `span`.
    pub fn missing(token: TokenKind, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Missing {
                expected: token.text().to_string(),
            },
            span,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: String },

    /// Recovered by inserting a missing node.
    #[error("missing '{expected}'")]
    Missing { expected: String },

    #[error("unterminated string literal")]
    UnterminatedString,

    /// `include <` or `use <` with no closing `>` on the line.
    #[error("unterminated include path")]
    UnterminatedPath,

    #[error("unexpected character '{text}'")]
    UnexpectedCharacter { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn first_error(source: &str) -> ParseErrorKind {
        let cst = parse(source);
        cst.errors.into_iter().next().map(|e| e.kind).unwrap()
    }

    #[test]
    fn test_unexpected_token_names_both_sides() {
        let kind = first_error("module (a) cube(1);");
        assert_eq!(
            kind,
            ParseErrorKind::UnexpectedToken {
                found: "(".to_string(),
                expected: "module name".to_string(),
            }
        );
    }

    #[test]
    fn test_unexpected_eof() {
        assert!(matches!(first_error("x = "), ParseErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn test_lexical_errors() {
        assert_eq!(first_error("s = \"open;"), ParseErrorKind::UnterminatedString);
        assert_eq!(first_error("include <lib.scad\ncube(1);"), ParseErrorKind::UnterminatedPath);
        assert_eq!(first_error("x = @;"), ParseErrorKind::UnexpectedCharacter { text: "@".to_string() });
    }

    #[test]
    fn test_missing_display() {
        let error = ParseError::missing(TokenKind::Semicolon, Span::from_bytes(10, 10));
        assert_eq!(error.to_string(), "missing ';' at byte 10");
    }
}
