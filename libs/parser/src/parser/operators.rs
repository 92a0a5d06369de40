//! # Operator Parsing
//!
//! Parses binary and unary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | ?: (ternary) | Right |
//! | 2 | \|\| | Left |
//! | 3 | && | Left |
//! | 4 | == != | Left |
//! | 5 | < > <= >= | Left |
//! | 6 | + - | Left |
//! | 7 | * / % | Left |
//! | 8 | ^ | Right |
//! | 9 | ! - + (unary) | Right |
//!
//! Unary operators bind looser than `^`: `-2^2` is `-(2^2)`.
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_precedence(Precedence::Ternary)?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Ternary: `?:`
    Ternary = 1,
    /// Logical or: `||`
    Or = 2,
    /// Logical and: `&&`
    And = 3,
    /// Equality: `== !=`
    Equality = 4,
    /// Comparison: `< > <= >=`
    Comparison = 5,
    /// Addition/subtraction: `+ -`
    Term = 6,
    /// Multiplication/division: `* / %`
    Factor = 7,
    /// Power: `^`
    Power = 8,
    /// Unary: `! - +`
    Unary = 9,
}

impl Precedence {
    /// Get precedence for binary operator.
    ///
    /// ## Returns
    ///
    /// Precedence level if token is a binary operator, None otherwise
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Question => Some(Self::Ternary),
            TokenKind::PipePipe => Some(Self::Or),
            TokenKind::AmpAmp => Some(Self::And),
            TokenKind::EqEq | TokenKind::BangEq => Some(Self::Equality),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Some(Self::Comparison),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Self::Factor),
            TokenKind::Caret => Some(Self::Power),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    ///
    /// Used for left-associative operators.
    pub(super) fn next(self) -> Self {
        match self {
            Self::Ternary => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Power,
            Self::Power | Self::Unary => Self::Unary,
        }
    }

    fn is_right_associative(self) -> bool {
        matches!(self, Self::Ternary | Self::Power)
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl<'a> Parser<'a> {
    /// Any expression, ternary included.
    pub(super) fn parse_expression(&mut self) -> Result<CstNode, ParseError> {
        self.parse_precedence(Precedence::Ternary)
    }

    /// Parse expression with minimum precedence.
    ///
    /// ## Parameters
    ///
    /// - `min_prec`: Minimum precedence level to parse
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        self.guarded(|parser| parser.parse_precedence_inner(min_prec))
    }

    fn parse_precedence_inner(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut left = self.parse_unary()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }

            if prec == Precedence::Ternary {
                left = self.parse_ternary(start, left)?;
                continue;
            }

            let operator = self.leaf(NodeKind::Operator).in_field("operator");
            let next = if prec.is_right_associative() { prec } else { prec.next() };
            let right = self.parse_precedence(next)?.in_field("right");

            left = CstNode::with_children(
                NodeKind::BinaryExpression,
                self.span_from(start),
                vec![left.in_field("left"), operator, right],
            );
        }

        Ok(left)
    }

    /// Parse the `? a : b` tail of a conditional.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// ternary = expression "?" expression ":" expression
    /// ```
    fn parse_ternary(
        &mut self,
        start: crate::span::Position,
        condition: CstNode,
    ) -> Result<CstNode, ParseError> {
        self.expect(TokenKind::Question)?;
        let consequence = self.parse_expression()?.in_field("consequence");
        self.expect(TokenKind::Colon)?;
        let alternative = self.parse_expression()?.in_field("alternative");

        Ok(CstNode::with_children(
            NodeKind::TernaryExpression,
            self.span_from(start),
            vec![condition.in_field("condition"), consequence, alternative],
        ))
    }

    /// Parse unary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// unary = ("!" | "-" | "+") power_expression | postfix
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// -5
    /// !true
    /// +x
    /// ```
    pub(super) fn parse_unary(&mut self) -> Result<CstNode, ParseError> {
        if matches!(self.peek_kind(), TokenKind::Bang | TokenKind::Minus | TokenKind::Plus) {
            let start = self.current_position();
            let operator = self.leaf(NodeKind::Operator).in_field("operator");
            let operand = self.parse_precedence(Precedence::Power)?.in_field("operand");

            return Ok(CstNode::with_children(
                NodeKind::UnaryExpression,
                self.span_from(start),
                vec![operator, operand],
            ));
        }

        self.parse_postfix()
    }
}

// =============================================================================
// TESTS
// =============================================================================
