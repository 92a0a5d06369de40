//! # Declaration Parsing
//!
//! Module and function definitions, their parameter lists, and the
//! `name = value` binding lists shared by `let`, `for` and `assign`.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse module definition.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// module_item = "module" identifier "(" parameters ")" statement
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// module box(size = 10) { cube(size); }
    /// module dot() sphere(1);
    /// ```
    pub(super) fn parse_module_item(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::Module)?;
        if !self.check(TokenKind::Identifier) {
            return Err(self.error_here("module name"));
        }
        let mut children = vec![self.leaf(NodeKind::Identifier).in_field("name")];
        children.extend(self.parse_parameters()?);
        children.push(self.parse_statement()?.in_field("body"));

        Ok(CstNode::with_children(NodeKind::ModuleItem, self.span_from(start), children))
    }

    /// Parse function definition.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// function_item = "function" identifier "(" parameters ")" "=" expression ";"
    /// ```
    pub(super) fn parse_function_item(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::Function)?;
        if !self.check(TokenKind::Identifier) {
            return Err(self.error_here("function name"));
        }
        let mut children = vec![self.leaf(NodeKind::Identifier).in_field("name")];
        children.extend(self.parse_parameters()?);
        self.expect(TokenKind::Eq)?;
        children.push(self.parse_expression()?.in_field("body"));
        children.extend(self.expect_closing(TokenKind::Semicolon));

        Ok(CstNode::with_children(NodeKind::FunctionItem, self.span_from(start), children))
    }

    /// Parse a parenthesized parameter list.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// parameters = "(" (parameter ("," parameter)* ","?)? ")"
    /// parameter = (identifier | special_variable) ("=" expression)?
    /// ```
    pub(super) fn parse_parameters(&mut self) -> Result<Vec<CstNode>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let start = self.current_position();
        let mut params = Vec::new();

        while !self.check(TokenKind::RParen) && !self.is_at_end() {
            params.push(self.parse_parameter()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        let mut nodes = vec![CstNode::with_children(NodeKind::Parameters, self.span_from(start), params)
            .in_field("parameters")];
        nodes.extend(self.expect_closing(TokenKind::RParen));
        Ok(nodes)
    }

    fn parse_parameter(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let name = match self.peek_kind() {
            TokenKind::Identifier => self.leaf(NodeKind::Identifier),
            TokenKind::SpecialVariable => self.leaf(NodeKind::SpecialVariable),
            _ => return Err(self.error_here("parameter name")),
        };

        let mut children = vec![name.in_field("name")];
        if self.match_token(TokenKind::Eq) {
            children.push(self.parse_expression()?.in_field("default"));
        }

        Ok(CstNode::with_children(NodeKind::Parameter, self.span_from(start), children))
    }

    /// Parse a binding list up to (not including) `)` or `;`.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// assignments = (assignment ("," assignment)* ","?)?
    /// assignment = (identifier | special_variable) "=" expression
    /// ```
    pub(super) fn parse_assignments(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut bindings = Vec::new();

        while !matches!(self.peek_kind(), TokenKind::RParen | TokenKind::Semicolon | TokenKind::Eof) {
            bindings.push(self.parse_assignment()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(CstNode::with_children(NodeKind::Assignments, self.span_from(start), bindings))
    }

    fn parse_assignment(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let name = match self.peek_kind() {
            TokenKind::Identifier => self.leaf(NodeKind::Identifier),
            TokenKind::SpecialVariable => self.leaf(NodeKind::SpecialVariable),
            _ => return Err(self.error_here("binding name")),
        };
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?.in_field("value");

        Ok(CstNode::with_children(
            NodeKind::Assignment,
            self.span_from(start),
            vec![name.in_field("name"), value],
        ))
    }

    /// Parse `( assignments )` as used by `let`, `for` and `assign`.
    pub(super) fn parse_bindings(&mut self) -> Result<Vec<CstNode>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut nodes = vec![self.parse_assignments()?.in_field("bindings")];
        nodes.extend(self.expect_closing(TokenKind::RParen));
        Ok(nodes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
