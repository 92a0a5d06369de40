//! # OpenSCAD Parser
//!
//! Recursive descent parser for OpenSCAD.
//! Produces a Concrete Syntax Tree (CST) that always covers the whole input.
//!
//! ## Error Recovery
//!
//! - A missing closing delimiter or `;` is replaced by a zero-width
//!   *missing* node and parsing continues as if it had been there.
//! - Any other failure turns the statement being parsed into an `ERROR`
//!   node spanning the skipped tokens, then parsing resumes at the next
//!   statement boundary.
//!
//! Every recovery is also recorded in [`Cst::errors`].
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::parser::Parser;
//! use openscad_parser::lexer::Lexer;
//!
//! let tokens = Lexer::new("cube(10);").tokenize();
//! let mut parser = Parser::new("cube(10);", tokens);
//! let cst = parser.parse();
//! assert!(cst.is_ok());
//! ```

mod collections;
mod control_flow;
mod declarations;
mod module_call;
mod operators;
mod postfix;
mod primaries;
mod statements;

use crate::cst::{Cst, CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::span::{Position, Span};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for OpenSCAD.
pub struct Parser<'a> {
    /// Source text, used to describe offending tokens.
    source: &'a str,
    /// Token stream, terminated by EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `source`: Original source text
    /// - `tokens`: Tokens from lexer; an EOF token is appended if absent
    pub fn new(source: &'a str, mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| !t.is_eof()) {
            let end = tokens.last().map_or(Position::default(), |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::empty_at(end), String::new()));
        }
        Self {
            source,
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire source into a CST.
    ///
    /// ## Returns
    ///
    /// CST whose root spans the whole source, plus any parse errors
    pub fn parse(&mut self) -> Cst {
        let mut children = Vec::new();
        while !self.is_at_end() {
            children.push(self.parse_statement_or_recover());
        }

        let end = self.peek().span.end;
        let root = CstNode::with_children(
            NodeKind::SourceFile,
            Span::new(Position::default(), end),
            children,
        );

        Cst::new(root, std::mem::take(&mut self.errors))
    }

    /// Parse one statement, turning a failure into an `ERROR` node.
    fn parse_statement_or_recover(&mut self) -> CstNode {
        let start = self.current_position();
        let start_index = self.current;
        match self.parse_statement() {
            Ok(node) => node,
            Err(error) => {
                self.errors.push(error);
                self.synchronize(start_index);
                CstNode::new(NodeKind::Error, self.span_from(start))
            }
        }
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token. The stream always ends with EOF, which is
    /// returned again once reached.
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.current.min(last)]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token `n` positions ahead of the current one.
    fn peek_nth_kind(&self, n: usize) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.current + n).min(last)].kind
    }

    /// Check if the token after the current one matches kind.
    fn peek_next_is(&self, kind: TokenKind) -> bool {
        self.peek_nth_kind(1) == kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check for an identifier spelled `word` (contextual keywords such as
    /// `assert` or `intersection_for`).
    fn check_word(&self, word: &str) -> bool {
        self.check(TokenKind::Identifier) && self.peek().text == word
    }

    /// Check if at end of file.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Get current position.
    fn current_position(&self) -> Position {
        self.peek().span.start
    }

    /// Advance to next token.
    ///
    /// ## Returns
    ///
    /// The token that was consumed
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Get previous token.
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Consume token if it matches expected kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(kind.text()))
        }
    }

    /// Consume a closing token, or synthesize a missing node for it.
    ///
    /// ## Returns
    ///
    /// `None` when the token was present, otherwise the missing node the
    /// caller must attach to the node under construction
    fn expect_closing(&mut self, kind: TokenKind) -> Option<CstNode> {
        if self.match_token(kind) {
            return None;
        }
        let at = if self.current == 0 {
            self.current_position()
        } else {
            self.previous().span.end
        };
        let span = Span::empty_at(at);
        self.errors.push(ParseError::missing(kind, span));
        Some(CstNode::missing(kind, span))
    }

    /// Try to consume token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token as a leaf node of `kind`.
    fn leaf(&mut self, kind: NodeKind) -> CstNode {
        let token = self.advance();
        CstNode::new(kind, token.span)
    }

    /// Error describing the current token.
    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let kind = match token.kind {
            TokenKind::Eof => ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            TokenKind::Error if token.text.starts_with('"') => ParseErrorKind::UnterminatedString,
            TokenKind::Error if token.text.starts_with('<') => ParseErrorKind::UnterminatedPath,
            TokenKind::Error => ParseErrorKind::UnexpectedCharacter {
                text: token.text.clone(),
            },
            _ => ParseErrorKind::UnexpectedToken {
                found: self.source[token.span.start.byte..token.span.end.byte].to_string(),
                expected: expected.to_string(),
            },
        };
        ParseError::new(kind, token.span)
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Skip tokens until a statement boundary.
    ///
    /// Always makes progress when the failed statement consumed nothing,
    /// and never consumes a `}` that may close an enclosing block. A stray
    /// `}` is skipped on its own so the statement after it survives.
    fn synchronize(&mut self, start_index: usize) {
        if self.current == start_index && self.advance().kind == TokenKind::RBrace {
            return;
        }

        while !self.is_at_end() {
            if self.current > start_index && self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek_kind() {
                TokenKind::Module
                | TokenKind::Function
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Include
                | TokenKind::Use
                | TokenKind::RBrace => return,
                _ => {}
            }

            self.advance();
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Create span from start to the end of the last consumed token.
    fn span_from(&self, start: Position) -> Span {
        let end = self.previous().span.end;
        if self.current == 0 || end.byte < start.byte {
            Span::empty_at(start)
        } else {
            Span::new(start, end)
        }
    }

    /// Run `f` with a guaranteed stack margin.
    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || f(self))
    }
}

// =============================================================================
// TESTS
// =============================================================================
