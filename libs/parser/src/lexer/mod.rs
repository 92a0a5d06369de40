//! # OpenSCAD Lexer
//!
//! Tokenizes OpenSCAD source code into tokens.
//! Comments and whitespace are dropped; every token keeps its exact span.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("cube(10);").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// OpenSCAD lexer.
///
/// Never fails: characters that start no token become
/// [`TokenKind::Error`] tokens and the parser reports them.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
    /// Set after `include`/`use` so the next `<` starts a path.
    expect_path: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            expect_path: false,
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens, always terminated by a single EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            self.skip_whitespace_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::empty_at(eof), String::new()));
        self.tokens
    }

    /// Skip whitespace, `//` line comments and `/* */` block comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.advance_while(char::is_whitespace);

            let rest = self.cursor.rest();
            if rest.starts_with("//") {
                self.cursor.advance_while(|c| c != '\n');
            } else if rest.starts_with("/*") {
                self.cursor.advance();
                self.cursor.advance();
                while !self.cursor.is_eof() && !self.cursor.rest().starts_with("*/") {
                    self.cursor.advance();
                }
                // Unterminated block comments run to the end of input.
                self.cursor.eat('*');
                self.cursor.eat('/');
            } else {
                break;
            }
        }
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();

        if std::mem::take(&mut self.expect_path) && self.cursor.peek() == Some('<') {
            return self.scan_include_path(start);
        }

        let Some(c) = self.cursor.advance() else {
            return;
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '#' => TokenKind::Hash,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '.' if self.cursor.peek().is_some_and(|d| d.is_ascii_digit()) => {
                return self.scan_number(start);
            }
            '.' => TokenKind::Dot,
            '=' => self.pick('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.pick('=', TokenKind::BangEq, TokenKind::Bang),
            '<' => self.pick('=', TokenKind::LtEq, TokenKind::Lt),
            '>' => self.pick('=', TokenKind::GtEq, TokenKind::Gt),
            '&' => self.pick('&', TokenKind::AmpAmp, TokenKind::Error),
            '|' => self.pick('|', TokenKind::PipePipe, TokenKind::Error),
            '"' => return self.scan_string(start),
            '0'..='9' => return self.scan_number(start),
            '$' => return self.scan_word(start, true),
            c if c.is_alphabetic() || c == '_' => return self.scan_word(start, false),
            _ => TokenKind::Error,
        };

        self.push(kind, start);
    }

    /// Two-character operator if the next character is `second`.
    fn pick(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.eat(second) {
            double
        } else {
            single
        }
    }

    fn push(&mut self, kind: TokenKind, start: Position) {
        let text = self.cursor.slice_from(start).to_string();
        let span = Span::new(start, self.cursor.position());
        self.tokens.push(Token::new(kind, span, text));
    }

    /// Scan a string literal. The token text keeps the quotes and the raw
    /// escapes; decoding happens when the AST is built.
    fn scan_string(&mut self, start: Position) {
        loop {
            match self.cursor.advance() {
                Some('"') => return self.push(TokenKind::String, start),
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(_) => {}
                None => return self.push(TokenKind::Error, start),
            }
        }
    }

    /// Scan a number literal: `10`, `3.14`, `.5`, `1e-3`, `2.5E+4`.
    fn scan_number(&mut self, start: Position) {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        let leading_dot = self.cursor.slice_from(start).starts_with('.');
        if !leading_dot
            && self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        } else if !leading_dot && self.cursor.peek() == Some('.') {
            // `1.` is a complete number in OpenSCAD.
            self.cursor.advance();
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            let rest = self.cursor.rest();
            let after_e = rest[1..]
                .strip_prefix(['+', '-'])
                .unwrap_or(&rest[1..]);
            if after_e.starts_with(|c: char| c.is_ascii_digit()) {
                self.cursor.advance();
                if matches!(self.cursor.peek(), Some('+' | '-')) {
                    self.cursor.advance();
                }
                self.cursor.advance_while(|c| c.is_ascii_digit());
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan an identifier, keyword, or `$`-special variable.
    fn scan_word(&mut self, start: Position, special: bool) {
        self.cursor.advance_while(|c| c.is_alphanumeric() || c == '_');

        let kind = if special {
            TokenKind::SpecialVariable
        } else {
            TokenKind::keyword(self.cursor.slice_from(start)).unwrap_or(TokenKind::Identifier)
        };

        self.expect_path = matches!(kind, TokenKind::Include | TokenKind::Use);
        self.push(kind, start);
    }

    /// Scan `<path>` following `include` or `use`.
    fn scan_include_path(&mut self, start: Position) {
        self.cursor.advance();
        self.cursor.advance_while(|c| c != '>' && c != '\n');
        let kind = if self.cursor.eat('>') {
            TokenKind::IncludePath
        } else {
            TokenKind::Error
        };
        self.push(kind, start);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_cube() {
        let tokens = Lexer::new("cube(10);").tokenize();
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].text, "cube");
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_with_comments() {
        assert_eq!(
            kinds("// line\n/* block\n */ x"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("3.14 .5 1e-3 2. 7E+2").tokenize();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["3.14", ".5", "1e-3", "2.", "7E+2", ""]);
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_exponent_needs_digits() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("== != <= >= && || !"),
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_include_path() {
        let tokens = Lexer::new("include <MCAD/gears.scad>\nuse <a.scad>").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::IncludePath);
        assert_eq!(tokens[1].text, "<MCAD/gears.scad>");
        assert_eq!(tokens[3].kind, TokenKind::IncludePath);
    }

    #[test]
    fn test_less_than_is_not_a_path_elsewhere() {
        assert_eq!(
            kinds("a < b"),
            vec![TokenKind::Identifier, TokenKind::Lt, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_keeps_escapes() {
        let tokens = Lexer::new(r#""a\"b""#).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#""a\"b""#);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert_eq!(kinds("\"open"), vec![TokenKind::Error, TokenKind::Eof]);
    }

    #[test]
    fn test_special_variable_and_positions() {
        let tokens = Lexer::new("x\n  $fn").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::SpecialVariable);
        assert_eq!(tokens[1].span.start, Position::new(4, 1, 2));
    }
}
