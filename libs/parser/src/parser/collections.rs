//! # Collection Parsing
//!
//! Parses list, range and list comprehension expressions.
//!
//! ## Responsibilities
//!
//! - List literals: `[1, 2, 3]`
//! - Range expressions: `[0:10]`, `[0:2:10]`
//! - Comprehension elements: `for`, `if`/`else`, `each` and `let` inside
//!   a list, freely mixed with plain elements
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_list_or_range()?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::span::Position;

impl<'a> Parser<'a> {
    /// Parse list or range.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// list = "[" (element ("," element)* ","?)? "]"
    /// range = "[" expression ":" expression (":" expression)? "]"
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// []                  // empty list
    /// [1, 2, 3,]          // list with trailing comma
    /// [0:2:10]            // range (start:step:end)
    /// [for (i = [0:3]) i * i]
    /// ```
    pub(super) fn parse_list_or_range(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::LBracket)?;

        if self.match_token(TokenKind::RBracket) {
            return Ok(CstNode::new(NodeKind::List, self.span_from(start)));
        }

        let plain_head = !matches!(
            self.peek_kind(),
            TokenKind::For | TokenKind::If | TokenKind::Each | TokenKind::Let
        );
        let first = self.parse_list_element()?;

        if plain_head && self.check(TokenKind::Colon) {
            return self.parse_range(start, first);
        }

        self.parse_list(start, first)
    }

    /// Parse the remaining elements of a list.
    fn parse_list(&mut self, start: Position, first: CstNode) -> Result<CstNode, ParseError> {
        let mut elements = vec![first];

        while self.match_token(TokenKind::Comma) {
            if self.check(TokenKind::RBracket) {
                break;
            }
            elements.push(self.parse_list_element()?);
        }

        elements.extend(self.expect_closing(TokenKind::RBracket));
        Ok(CstNode::with_children(NodeKind::List, self.span_from(start), elements))
    }

    /// Parse range.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// range = "[" start ":" end "]"
    ///       | "[" start ":" step ":" end "]"
    /// ```
    fn parse_range(&mut self, start: Position, first: CstNode) -> Result<CstNode, ParseError> {
        self.expect(TokenKind::Colon)?;
        let second = self.parse_expression()?;

        let mut children = if self.match_token(TokenKind::Colon) {
            let third = self.parse_expression()?;
            vec![first.in_field("start"), second.in_field("step"), third.in_field("end")]
        } else {
            vec![first.in_field("start"), second.in_field("end")]
        };

        children.extend(self.expect_closing(TokenKind::RBracket));
        Ok(CstNode::with_children(NodeKind::Range, self.span_from(start), children))
    }

    /// Parse one list element.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// element = "for" "(" (assignments | assignments ";" expression ";" assignments) ")" element
    ///         | "if" "(" expression ")" element ("else" element)?
    ///         | "each" element
    ///         | "let" "(" assignments ")" element
    ///         | expression
    /// ```
    fn parse_list_element(&mut self) -> Result<CstNode, ParseError> {
        self.guarded(|parser| match parser.peek_kind() {
            TokenKind::For => parser.parse_comprehension_for(),
            TokenKind::If => parser.parse_comprehension_if(),
            TokenKind::Each => {
                let start = parser.current_position();
                parser.advance();
                let value = parser.parse_list_element()?.in_field("value");
                Ok(CstNode::with_children(NodeKind::Each, parser.span_from(start), vec![value]))
            }
            TokenKind::Let => {
                let start = parser.current_position();
                parser.advance();
                let mut children = parser.parse_bindings()?;
                children.push(parser.parse_list_element()?.in_field("body"));
                Ok(CstNode::with_children(NodeKind::LetExpression, parser.span_from(start), children))
            }
            _ => parser.parse_expression(),
        })
    }

    fn parse_comprehension_for(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = self.parse_assignments()?;
        let mut children = if self.match_token(TokenKind::Semicolon) {
            let condition = self.parse_expression()?.in_field("condition");
            self.expect(TokenKind::Semicolon)?;
            let update = self.parse_assignments()?.in_field("update");
            vec![init.in_field("init"), condition, update]
        } else {
            vec![init.in_field("bindings")]
        };

        children.extend(self.expect_closing(TokenKind::RParen));
        children.push(self.parse_list_element()?.in_field("body"));

        Ok(CstNode::with_children(NodeKind::ListComprehension, self.span_from(start), children))
    }

    fn parse_comprehension_if(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;

        let mut children = vec![self.parse_expression()?.in_field("condition")];
        children.extend(self.expect_closing(TokenKind::RParen));
        children.push(self.parse_list_element()?.in_field("consequence"));
        if self.match_token(TokenKind::Else) {
            children.push(self.parse_list_element()?.in_field("alternative"));
        }

        Ok(CstNode::with_children(NodeKind::IfComprehension, self.span_from(start), children))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::{CstNode, NodeKind};
    use crate::parse;

    fn parse_expr(source: &str) -> CstNode {
        let full = format!("x = {};", source);
        let cst = parse(&full);
        assert!(cst.errors.is_empty(), "Errors: {:?}", cst.errors);
        cst.root.children[0].child_by_field("value").cloned().expect("value")
    }

    #[test]
    fn test_parse_empty_list() {
        let expr = parse_expr("[]");
        assert_eq!(expr.kind, NodeKind::List);
        assert!(expr.children.is_empty());
    }

    #[test]
    fn test_parse_list_trailing_comma() {
        let expr = parse_expr("[1, 2, 3,]");
        assert_eq!(expr.kind, NodeKind::List);
        assert_eq!(expr.children.len(), 3);
    }

    #[test]
    fn test_parse_nested_list() {
        let expr = parse_expr("[[1, 2], [3, 4]]");
        assert_eq!(expr.children.len(), 2);
        assert_eq!(expr.children[0].kind, NodeKind::List);
    }

    #[test]
    fn test_parse_range() {
        let expr = parse_expr("[0:10]");
        assert_eq!(expr.kind, NodeKind::Range);
        assert!(expr.child_by_field("step").is_none());
    }

    #[test]
    fn test_parse_range_with_step() {
        let expr = parse_expr("[0:2:10]");
        assert_eq!(expr.kind, NodeKind::Range);
        assert!(expr.child_by_field("step").is_some());
        assert!(expr.child_by_field("end").is_some());
    }

    #[test]
    fn test_parse_range_with_expressions() {
        let expr = parse_expr("[1+1:5*2]");
        assert_eq!(
            expr.child_by_field("start").map(|n| n.kind),
            Some(NodeKind::BinaryExpression)
        );
    }

    #[test]
    fn test_list_comprehension() {
        let expr = parse_expr("[for (i = [0:3]) if (i % 2 == 0) i * i]");
        let comp = &expr.children[0];
        assert_eq!(comp.kind, NodeKind::ListComprehension);
        assert_eq!(
            comp.child_by_field("body").map(|n| n.kind),
            Some(NodeKind::IfComprehension)
        );
    }

    #[test]
    fn test_c_style_comprehension() {
        let expr = parse_expr("[for (i = 0; i < 5; i = i + 1) i]");
        let comp = &expr.children[0];
        assert!(comp.child_by_field("init").is_some());
        assert!(comp.child_by_field("condition").is_some());
        assert!(comp.child_by_field("update").is_some());
    }

    #[test]
    fn test_mixed_elements_and_each() {
        let expr = parse_expr("[0, each [1, 2], for (i = [3:4]) i, let (a = 5) a]");
        let kinds: Vec<_> = expr.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Number,
                NodeKind::Each,
                NodeKind::ListComprehension,
                NodeKind::LetExpression,
            ]
        );
    }

    #[test]
    fn test_if_else_comprehension() {
        let expr = parse_expr("[for (i = v) if (i > 0) i else -i]");
        let body = expr.children[0].child_by_field("body").expect("body");
        assert!(body.child_by_field("alternative").is_some());
    }

    #[test]
    fn test_unclosed_list_is_recovered() {
        let cst = parse("x = [1, 2;");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.root.children[0].kind, NodeKind::VarDeclaration);
    }
}
