//! # Module Call Parsing
//!
//! Parses module calls and argument lists.
//!
//! ## Responsibilities
//!
//! - Module call parsing: `cube(10);`
//! - Transform with child: `translate([1,2,3]) cube(5);`
//! - Argument parsing (positional and named), shared with function calls,
//!   `assert` and `echo`
//!
//! ## Example
//!
//! ```rust,ignore
//! let node = parser.parse_module_call()?;
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse module call.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// module_call = identifier "(" arguments ")" (";" | statement)
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// cube(10);
    /// translate([1,2,3]) cube(5);
    /// union() { cube(10); sphere(5); }
    /// ```
    pub(super) fn parse_module_call(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let name = self.leaf(NodeKind::Identifier).in_field("name");

        let mut children = vec![name];
        children.extend(self.parse_call_arguments()?);
        self.parse_child_statement(&mut children)?;

        Ok(CstNode::with_children(NodeKind::ModuleCall, self.span_from(start), children))
    }

    /// Parse a parenthesized argument list.
    ///
    /// ## Returns
    ///
    /// The `arguments` node, followed by a missing `)` node when the list
    /// was not closed
    pub(super) fn parse_call_arguments(&mut self) -> Result<Vec<CstNode>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut nodes = vec![self.parse_arguments()?.in_field("arguments")];
        nodes.extend(self.expect_closing(TokenKind::RParen));
        Ok(nodes)
    }

    /// Parse arguments between the parentheses.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// arguments = (argument ("," argument)* ","?)?
    /// argument = expression | (identifier | special_variable) "=" expression
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// (10, 20, 30)
    /// (size=10, center=true)
    /// (5, $fn=32)
    /// ```
    fn parse_arguments(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut children = Vec::new();

        if !self.check(TokenKind::RParen) && !self.is_at_end() {
            children.push(self.parse_argument()?);
            while self.match_token(TokenKind::Comma) {
                if self.check(TokenKind::RParen) {
                    break;
                }
                children.push(self.parse_argument()?);
            }
        }

        Ok(CstNode::with_children(NodeKind::Arguments, self.span_from(start), children))
    }

    /// Parse single argument.
    ///
    /// Positional arguments are the expression node itself; named
    /// arguments get a `named_argument` wrapper.
    fn parse_argument(&mut self) -> Result<CstNode, ParseError> {
        let is_named = matches!(self.peek_kind(), TokenKind::Identifier | TokenKind::SpecialVariable)
            && self.peek_next_is(TokenKind::Eq);

        if !is_named {
            return self.parse_expression();
        }

        let start = self.current_position();
        let name_kind = if self.check(TokenKind::SpecialVariable) {
            NodeKind::SpecialVariable
        } else {
            NodeKind::Identifier
        };
        let name = self.leaf(name_kind).in_field("name");
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?.in_field("value");

        Ok(CstNode::with_children(
            NodeKind::NamedArgument,
            self.span_from(start),
            vec![name, value],
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::{CstNode, NodeKind};
    use crate::parse;

    fn call(source: &str) -> CstNode {
        let cst = parse(source);
        assert!(cst.is_ok(), "Errors: {:?}", cst.errors);
        cst.root.children[0].clone()
    }

    fn arguments(node: &CstNode) -> &CstNode {
        node.child_by_field("arguments").expect("arguments")
    }

    #[test]
    fn test_module_call_without_body() {
        let node = call("cube(10);");
        assert_eq!(node.kind, NodeKind::ModuleCall);
        assert!(node.child_by_field("body").is_none());
        assert_eq!(arguments(&node).children.len(), 1);
    }

    #[test]
    fn test_named_and_special_arguments() {
        let node = call("sphere(5, center=true, $fn=32);");
        let args = arguments(&node);
        assert_eq!(args.children[0].kind, NodeKind::Number);
        assert_eq!(args.children[1].kind, NodeKind::NamedArgument);
        assert_eq!(
            args.children[2].child_by_field("name").map(|n| n.kind),
            Some(NodeKind::SpecialVariable)
        );
    }

    #[test]
    fn test_trailing_comma() {
        let node = call("cube([1, 2, 3],);");
        assert_eq!(arguments(&node).children.len(), 1);
    }

    #[test]
    fn test_transform_with_child() {
        let node = call("translate([1, 2, 3]) cube(10);");
        let body = node.child_by_field("body").expect("body");
        assert_eq!(body.kind, NodeKind::ModuleCall);
    }

    #[test]
    fn test_union_with_block() {
        let node = call("union() { cube(10); sphere(5); }");
        let body = node.child_by_field("body").expect("body");
        assert_eq!(body.kind, NodeKind::UnionBlock);
        assert_eq!(body.children.len(), 2);
    }

    #[test]
    fn test_comparison_is_not_named_argument() {
        let node = call("echo(a == 1);");
        assert_eq!(arguments(&node).children[0].kind, NodeKind::BinaryExpression);
    }
}
