//! # Control Flow Parsing
//!
//! Statement-level `for`, `intersection_for`, `if`/`else`, `let` and
//! `assign`.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a block introduced by a binding list.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// for_block              = "for" "(" assignments ")" statement
    /// intersection_for_block = "intersection_for" "(" assignments ")" statement
    /// let_block              = "let" "(" assignments ")" statement
    /// assign_block           = "assign" "(" assignments ")" statement
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// for (i = [0:10]) translate([i, 0, 0]) cube(1);
    /// intersection_for (n = [1, 2]) rotate(n * 30) cube(5, center=true);
    /// ```
    pub(super) fn parse_bound_statement(&mut self, kind: NodeKind) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance();
        let mut children = self.parse_bindings()?;
        children.push(self.parse_body_statement()?.in_field("body"));

        Ok(CstNode::with_children(kind, self.span_from(start), children))
    }

    /// Parse if statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// if_block = "if" "(" expression ")" statement ("else" statement)?
    /// ```
    ///
    /// A dangling `else` binds to the nearest `if`.
    pub(super) fn parse_if_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;

        let mut children = vec![self.parse_expression()?.in_field("condition")];
        children.extend(self.expect_closing(TokenKind::RParen));
        children.push(self.parse_body_statement()?.in_field("consequence"));

        if self.match_token(TokenKind::Else) {
            children.push(self.parse_body_statement()?.in_field("alternative"));
        }

        Ok(CstNode::with_children(NodeKind::IfBlock, self.span_from(start), children))
    }
}

// =============================================================================
// TESTS
// =============================================================================
