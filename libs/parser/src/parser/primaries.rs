//! # Primary Expression Parsing
//!
//! Parses primary expressions: literals, names, parenthesized expressions,
//! `let`, `assert`/`echo` expressions and function literals.
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_primary()?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse primary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// primary = number | string | boolean | undef | identifier
    ///         | special_variable | list | "(" expression ")"
    ///         | let_expression | assert_expression | echo_expression
    ///         | function_literal
    /// ```
    pub(super) fn parse_primary(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => Ok(self.leaf(NodeKind::Number)),
            TokenKind::String => Ok(self.leaf(NodeKind::String)),
            TokenKind::True | TokenKind::False => Ok(self.leaf(NodeKind::Boolean)),
            TokenKind::Undef => Ok(self.leaf(NodeKind::Undef)),
            TokenKind::SpecialVariable => Ok(self.leaf(NodeKind::SpecialVariable)),

            TokenKind::Identifier if self.peek_next_is(TokenKind::LParen) && self.check_word("assert") => {
                self.parse_echo_or_assert(NodeKind::AssertExpression)
            }
            TokenKind::Identifier if self.peek_next_is(TokenKind::LParen) && self.check_word("echo") => {
                self.parse_echo_or_assert(NodeKind::EchoExpression)
            }
            TokenKind::Identifier => Ok(self.leaf(NodeKind::Identifier)),

            TokenKind::LBracket => self.parse_list_or_range(),
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::Let => self.parse_let_expression(),
            TokenKind::Function => self.parse_function_literal(),

            _ => Err(self.error_here("expression")),
        }
    }

    /// Parse `( expression )`, keeping the parentheses as a node.
    fn parse_parenthesized(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::LParen)?;
        let mut children = vec![self.parse_expression()?.in_field("expression")];
        children.extend(self.expect_closing(TokenKind::RParen));

        Ok(CstNode::with_children(
            NodeKind::ParenthesizedExpression,
            self.span_from(start),
            children,
        ))
    }

    /// Parse let expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// let_expression = "let" "(" assignments ")" expression
    /// ```
    fn parse_let_expression(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::Let)?;
        let mut children = self.parse_bindings()?;
        children.push(self.parse_expression()?.in_field("body"));

        Ok(CstNode::with_children(NodeKind::LetExpression, self.span_from(start), children))
    }

    /// Parse `assert(...)` or `echo(...)` in expression position.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// assert_expression = "assert" "(" arguments ")" expression?
    /// echo_expression   = "echo" "(" arguments ")" expression?
    /// ```
    ///
    /// The trailing expression is optional; it is only parsed when the next
    /// token can begin one.
    fn parse_echo_or_assert(&mut self, kind: NodeKind) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance();
        let mut children = self.parse_call_arguments()?;
        if self.starts_expression() {
            children.push(self.parse_expression()?.in_field("body"));
        }

        Ok(CstNode::with_children(kind, self.span_from(start), children))
    }

    /// Parse anonymous function.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// function_literal = "function" "(" parameters ")" expression
    /// ```
    fn parse_function_literal(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::Function)?;
        let mut children = self.parse_parameters()?;
        children.push(self.parse_expression()?.in_field("body"));

        Ok(CstNode::with_children(NodeKind::FunctionLiteral, self.span_from(start), children))
    }

    /// True if the current token can begin an expression.
    fn starts_expression(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Number
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Undef
                | TokenKind::Identifier
                | TokenKind::SpecialVariable
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Bang
                | TokenKind::Let
                | TokenKind::Function
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::{CstNode, NodeKind};
    use crate::parse;

    fn value(source: &str) -> CstNode {
        let cst = parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        cst.root.children[0].child_by_field("value").cloned().expect("value")
    }

    #[test]
    fn test_literals() {
        assert_eq!(value("x = 42;").kind, NodeKind::Number);
        assert_eq!(value("x = \"hi\";").kind, NodeKind::String);
        assert_eq!(value("x = false;").kind, NodeKind::Boolean);
        assert_eq!(value("x = undef;").kind, NodeKind::Undef);
        assert_eq!(value("x = $fn;").kind, NodeKind::SpecialVariable);
    }

    #[test]
    fn test_parenthesized_kept() {
        let expr = value("x = (1 + 2);");
        assert_eq!(expr.kind, NodeKind::ParenthesizedExpression);
        assert_eq!(expr.span.start.byte, 4);
        assert_eq!(expr.span.end.byte, 11);
    }

    #[test]
    fn test_let_expression() {
        let expr = value("x = let (a = 1, b = 2) a + b;");
        assert_eq!(expr.kind, NodeKind::LetExpression);
        assert_eq!(expr.child_by_field("bindings").map(|b| b.children.len()), Some(2));
        assert!(expr.child_by_field("body").is_some());
    }

    #[test]
    fn test_assert_and_echo_expressions() {
        let expr = value("x = assert(y > 0, \"neg\") y;");
        assert_eq!(expr.kind, NodeKind::AssertExpression);
        assert!(expr.child_by_field("body").is_some());

        let expr = value("x = echo(\"trace\");");
        assert_eq!(expr.kind, NodeKind::EchoExpression);
        assert!(expr.child_by_field("body").is_none());
    }

    #[test]
    fn test_echo_is_identifier_without_call() {
        assert_eq!(value("x = echo;").kind, NodeKind::Identifier);
    }

    #[test]
    fn test_function_literal() {
        let expr = value("f = function (x, y = 2) x * y;");
        assert_eq!(expr.kind, NodeKind::FunctionLiteral);
        assert_eq!(expr.child_by_field("parameters").map(|p| p.children.len()), Some(2));
    }

    #[test]
    fn test_missing_operand() {
        let cst = parse("x = ;");
        assert!(!cst.is_ok());
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
    }
}
