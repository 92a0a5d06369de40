//! # Statement Transformation
//!
//! Transforms CST statement nodes to AST items and statements.
//!
//! Every module call becomes a [`Stmt::TransformChain`], whatever its name:
//!
//! ```text
//! cube(1);               -> TransformChain { name: cube, tail: Empty }
//! translate(v) cube(1);  -> TransformChain { name: translate, tail: TransformChain(cube) }
//! union() { a(); b(); }  -> TransformChain { name: union, tail: UnionBlock([a, b]) }
//! ```

use super::literals::include_path;
use super::{required, Converter};
use crate::ast::{Item, Modifier, Stmt};
use crate::context::ScopeKind;
use crate::cst::SyntaxNode;
use crate::error::ParseError;
use tracing::trace;

impl<'s> Converter<'s> {
    // =========================================================================
    // ITEMS
    // =========================================================================

    /// Transform a node found in item position: top level, a `{ }` block or
    /// a module body.
    pub(crate) fn convert_item<N: SyntaxNode>(&mut self, node: &N) -> Result<Item, ParseError> {
        match node.kind() {
            "module_item" => self.convert_module_item(node),
            "function_item" => self.convert_function_item(node),
            "var_declaration" => self.convert_var_declaration(node),
            _ => Ok(Item::Stmt(self.convert_stmt(node)?)),
        }
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Transform a node found in statement position.
    ///
    /// Declarations are not statements; meeting one here means the CST
    /// nests it where the language does not allow it.
    pub(crate) fn convert_stmt<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        self.guarded(|this| {
            trace!(kind = node.kind(), "statement");
            match node.kind() {
                "module_call" => this.convert_module_call(node),
                "union_block" => this.convert_union_block(node),
                "empty_statement" => Ok(Stmt::Empty(node.span())),
                "modifier_chain" => this.convert_modifier_chain(node),
                "for_block" => this.convert_for_block(node),
                "intersection_for_block" => this.convert_intersection_for_block(node),
                "if_block" => this.convert_if_block(node),
                "let_block" => this.convert_let_block(node),
                "assign_block" => this.convert_assign_block(node),
                "assert_statement" => this.convert_assert_statement(node),
                "include_statement" => Ok(Stmt::Include {
                    path: include_path(required(node, "path")?, this.source)?,
                    span: node.span(),
                }),
                "use_statement" => Ok(Stmt::Use {
                    path: include_path(required(node, "path")?, this.source)?,
                    span: node.span(),
                }),
                other => Err(ParseError::unsupported(other, node.span())),
            }
        })
    }

    /// `name(args) tail`
    fn convert_module_call<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let name = self.name_field(node)?;
        let args = self.arguments_field(node)?;
        let tail = self.child_statement(node)?;

        Ok(Stmt::TransformChain {
            name,
            args,
            tail: Box::new(tail),
            span: node.span(),
        })
    }

    /// Statement under the `body` field, or an empty statement at the end of
    /// `node` when the call is closed by `;`.
    pub(crate) fn child_statement<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        match node.child("body") {
            Some(body) => self.convert_stmt(body),
            None => Ok(Stmt::Empty(node.span().end_point())),
        }
    }

    /// `{ items }`
    pub(crate) fn convert_union_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::Block, span.clone(), |this| {
            let items = this.block_items(node)?;
            Ok(Stmt::UnionBlock { items, span })
        })
    }

    pub(crate) fn block_items<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Item>, ParseError> {
        node.children().iter().map(|child| self.convert_item(child)).collect()
    }

    fn convert_modifier_chain<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let symbol = required(node, "modifier")?;
        let modifier = Modifier::from_str(symbol.text(self.source)).ok_or_else(|| {
            ParseError::syntax(
                format!("unknown modifier '{}'", symbol.text(self.source)),
                symbol.span(),
            )
        })?;
        let stmt = self.convert_stmt(required(node, "statement")?)?;

        Ok(Stmt::Modified {
            modifier,
            stmt: Box::new(stmt),
            span: node.span(),
        })
    }

    /// `assert(cond, message) body`
    fn convert_assert_statement<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let args = self.arguments_field(node)?;
        let body = self.child_statement(node)?;

        Ok(Stmt::AssertStmt {
            args,
            body: Box::new(body),
            span: node.span(),
        })
    }
}
