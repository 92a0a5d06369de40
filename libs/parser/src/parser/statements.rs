//! # Statement Parsing
//!
//! Dispatches on the first token of a statement.
//!
//! ## Grammar
//!
//! ```text
//! statement = ";"
//!           | "{" statement* "}"
//!           | modifier statement
//!           | module_item | function_item
//!           | for_block | intersection_for_block | if_block
//!           | let_block | assign_block | assert_statement
//!           | include_statement | use_statement
//!           | var_declaration
//!           | module_call
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a statement.
    ///
    /// ## Example
    ///
    /// ```text
    /// cube(10);
    /// x = 5;
    /// #translate([1, 0, 0]) sphere(2);
    /// ```
    pub(super) fn parse_statement(&mut self) -> Result<CstNode, ParseError> {
        self.guarded(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<CstNode, ParseError> {
        match self.peek_kind() {
            kind if kind.is_modifier() => self.parse_modifier_chain(),

            TokenKind::Module => self.parse_module_item(),
            TokenKind::Function => self.parse_function_item(),

            TokenKind::For => self.parse_bound_statement(NodeKind::ForBlock),
            TokenKind::If => self.parse_if_block(),
            TokenKind::Let => self.parse_bound_statement(NodeKind::LetBlock),

            TokenKind::Include => self.parse_include(NodeKind::IncludeStatement),
            TokenKind::Use => self.parse_include(NodeKind::UseStatement),

            TokenKind::LBrace => self.parse_union_block(),

            TokenKind::Semicolon => Ok(self.leaf(NodeKind::EmptyStatement)),

            TokenKind::SpecialVariable => self.parse_var_declaration(NodeKind::SpecialVariable),

            TokenKind::Identifier => self.parse_identifier_statement(),

            _ => Err(self.error_here("statement")),
        }
    }

    /// Parse statement starting with identifier.
    ///
    /// `intersection_for`, `assign` and `assert` are only keywords when
    /// followed by `(`; `name =` is a declaration; anything else is a
    /// module call.
    fn parse_identifier_statement(&mut self) -> Result<CstNode, ParseError> {
        if self.peek_next_is(TokenKind::LParen) {
            if self.check_word("intersection_for") {
                return self.parse_bound_statement(NodeKind::IntersectionForBlock);
            }
            if self.check_word("assign") {
                return self.parse_bound_statement(NodeKind::AssignBlock);
            }
            if self.check_word("assert") {
                return self.parse_assert_statement();
            }
        }

        if self.peek_next_is(TokenKind::Eq) {
            return self.parse_var_declaration(NodeKind::Identifier);
        }

        self.parse_module_call()
    }

    /// Parse modifier applied to statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// modifier_chain = ("*" | "!" | "#" | "%") statement
    /// ```
    fn parse_modifier_chain(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let modifier = self.leaf(NodeKind::Modifier).in_field("modifier");
        let statement = self.parse_body_statement()?.in_field("statement");

        Ok(CstNode::with_children(
            NodeKind::ModifierChain,
            self.span_from(start),
            vec![modifier, statement],
        ))
    }

    /// Parse braced block.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// union_block = "{" statement* "}"
    /// ```
    pub(super) fn parse_union_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::LBrace)?;

        let mut children = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            children.push(self.parse_statement_or_recover());
        }
        children.extend(self.expect_closing(TokenKind::RBrace));

        Ok(CstNode::with_children(NodeKind::UnionBlock, self.span_from(start), children))
    }

    /// Parse variable declaration.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// var_declaration = (identifier | special_variable) "=" expression ";"
    /// ```
    fn parse_var_declaration(&mut self, name_kind: NodeKind) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let name = self.leaf(name_kind).in_field("name");
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?.in_field("value");

        let mut children = vec![name, value];
        children.extend(self.expect_closing(TokenKind::Semicolon));

        Ok(CstNode::with_children(NodeKind::VarDeclaration, self.span_from(start), children))
    }

    /// Parse `include <path>` or `use <path>`.
    fn parse_include(&mut self, kind: NodeKind) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance();
        if !self.check(TokenKind::IncludePath) {
            return Err(self.error_here("<path>"));
        }
        let path = self.leaf(NodeKind::IncludePath).in_field("path");

        Ok(CstNode::with_children(kind, self.span_from(start), vec![path]))
    }

    /// Parse assert in statement position.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// assert_statement = "assert" "(" arguments ")" (";" | statement)
    /// ```
    fn parse_assert_statement(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance();
        let mut children = self.parse_call_arguments()?;
        self.parse_child_statement(&mut children)?;

        Ok(CstNode::with_children(NodeKind::AssertStatement, self.span_from(start), children))
    }

    /// Parse the statement a call applies to, if any.
    ///
    /// A `;` ends the call with no child; end of input yields a missing `;`.
    pub(super) fn parse_child_statement(&mut self, children: &mut Vec<CstNode>) -> Result<(), ParseError> {
        if self.match_token(TokenKind::Semicolon) {
            return Ok(());
        }
        if self.is_at_end() {
            children.extend(self.expect_closing(TokenKind::Semicolon));
            return Ok(());
        }
        children.push(self.parse_body_statement()?.in_field("body"));
        Ok(())
    }

    /// Parse a statement in child position.
    ///
    /// Declarations (`x = 1;`, `module`, `function`, `include`, `use`) are
    /// only allowed at top level, in braces, or as a module body.
    pub(super) fn parse_body_statement(&mut self) -> Result<CstNode, ParseError> {
        let declaration = match self.peek_kind() {
            TokenKind::Module | TokenKind::Function | TokenKind::Include | TokenKind::Use => true,
            TokenKind::Identifier | TokenKind::SpecialVariable => self.peek_next_is(TokenKind::Eq),
            _ => false,
        };
        if declaration {
            return Err(self.error_here("child statement"));
        }
        self.parse_statement()
    }
}

// =============================================================================
// TESTS
// =============================================================================
