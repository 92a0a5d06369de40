//! # Postfix Expression Parsing
//!
//! Parses postfix expressions: function calls, index access, member access.
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_postfix()?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse postfix expressions (call, index, dot).
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("(" arguments ")" | "[" expression "]" | "." identifier)*
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// sin(x)
    /// arr[0]
    /// v.x
    /// f(a)(b)
    /// ```
    pub(super) fn parse_postfix(&mut self) -> Result<CstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            expr = match self.peek_kind() {
                TokenKind::LParen => self.parse_function_call(expr)?,
                TokenKind::LBracket => self.parse_index_access(expr)?,
                TokenKind::Dot => self.parse_member_access(expr)?,
                _ => break,
            };
        }

        Ok(expr)
    }

    fn parse_function_call(&mut self, callee: CstNode) -> Result<CstNode, ParseError> {
        let start = callee.span.start;
        let mut children = vec![callee.in_field("function")];
        children.extend(self.parse_call_arguments()?);

        Ok(CstNode::with_children(NodeKind::FunctionCall, self.span_from(start), children))
    }

    fn parse_index_access(&mut self, object: CstNode) -> Result<CstNode, ParseError> {
        let start = object.span.start;
        self.expect(TokenKind::LBracket)?;
        let mut children = vec![object.in_field("value"), self.parse_expression()?.in_field("index")];
        children.extend(self.expect_closing(TokenKind::RBracket));

        Ok(CstNode::with_children(NodeKind::IndexExpression, self.span_from(start), children))
    }

    fn parse_member_access(&mut self, object: CstNode) -> Result<CstNode, ParseError> {
        let start = object.span.start;
        self.expect(TokenKind::Dot)?;
        if !self.check(TokenKind::Identifier) {
            return Err(self.error_here("member name"));
        }
        let field = self.leaf(NodeKind::Identifier).in_field("field");

        Ok(CstNode::with_children(
            NodeKind::DotIndexExpression,
            self.span_from(start),
            vec![object.in_field("value"), field],
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
