//! # Tokens
//!
//! A token is a kind tag, the exact span it covers, and its source text.
//! Fixed-spelling tokens report that spelling through [`TokenKind::text`];
//! the parser uses it to name missing tokens, so a zero-width `")"` node
//! means a closing parenthesis was expected there.
//!
//! ```rust
//! use openscad_parser::lexer::TokenKind;
//!
//! assert_eq!(TokenKind::keyword("module"), Some(TokenKind::Module));
//! assert_eq!(TokenKind::keyword("assert"), None);
//! assert_eq!(TokenKind::Semicolon.text(), ";");
//! ```

use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Exact source slice, escapes and quotes included.
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// Lexical categories of OpenSCAD.
///
/// `assert`, `echo`, `assign` and `intersection_for` are not reserved; they
/// lex as [`TokenKind::Identifier`] and the parser recognizes them by
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Number,
    String,
    True,
    False,
    Undef,
    /// `<lib/shapes.scad>` right after `include` or `use`.
    IncludePath,
    Identifier,
    /// `$fn`, `$t`, or any other `$`-prefixed name.
    SpecialVariable,

    Module,
    Function,
    If,
    Else,
    For,
    Let,
    Each,
    Include,
    Use,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,
    Eq,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    Question,
    Colon,
    Hash,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Dot,

    Eof,
    /// A character that starts no token, or an unterminated string or path.
    Error,
}

impl TokenKind {
    /// Reserved word spelled `word`, if any.
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "true" => Self::True,
            "false" => Self::False,
            "undef" => Self::Undef,
            "module" => Self::Module,
            "function" => Self::Function,
            "if" => Self::If,
            "else" => Self::Else,
            "for" => Self::For,
            "let" => Self::Let,
            "each" => Self::Each,
            "include" => Self::Include,
            "use" => Self::Use,
            _ => return None,
        };
        Some(kind)
    }

    /// `*`, `!`, `#` and `%` in statement position.
    pub const fn is_modifier(&self) -> bool {
        matches!(self, Self::Star | Self::Bang | Self::Hash | Self::Percent)
    }

    /// Spelling for fixed tokens, a category name for the rest.
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::True => "true",
            Self::False => "false",
            Self::Undef => "undef",
            Self::IncludePath => "include path",
            Self::Identifier => "identifier",
            Self::SpecialVariable => "special variable",
            Self::Module => "module",
            Self::Function => "function",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::Let => "let",
            Self::Each => "each",
            Self::Include => "include",
            Self::Use => "use",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Bang => "!",
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Hash => "#",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Eof => "end of file",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_reserved() {
        for word in ["module", "function", "if", "else", "for", "let", "each", "include", "use", "true"] {
            let kind = TokenKind::keyword(word).unwrap();
            assert_eq!(kind.text(), word);
        }
    }

    #[test]
    fn test_positional_words_are_identifiers() {
        for word in ["assert", "echo", "assign", "intersection_for", "cube", "Module"] {
            assert_eq!(TokenKind::keyword(word), None, "{word}");
        }
    }

    #[test]
    fn test_modifiers() {
        assert!(TokenKind::Hash.is_modifier());
        assert!(TokenKind::Percent.is_modifier());
        assert!(!TokenKind::Minus.is_modifier());
    }

    #[test]
    fn test_display_uses_spelling() {
        assert_eq!(TokenKind::RParen.to_string(), ")");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
    }
}
