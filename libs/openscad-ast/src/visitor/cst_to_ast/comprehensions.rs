//! # List Transformation
//!
//! Transforms lists, ranges and list comprehensions.
//!
//! A comprehension's nested generators are flattened: after the first
//! `for`, every directly nested `for`, `if` without `else`, and `let`
//! becomes a [`CompClause`]; the first other element is the body.
//!
//! ```text
//! [for (i = v) if (i > 0) let (j = i * 2) j]
//!   -> ListComp { binds: i = v, clauses: [If(i > 0), Let(j = i * 2)], body: j }
//! ```

use super::{required, Converter};
use crate::ast::{CompClause, Expr, ForBinds};
use crate::context::ScopeKind;
use crate::cst::SyntaxNode;
use crate::error::ParseError;

impl<'s> Converter<'s> {
    pub(crate) fn convert_list<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let elements = node
            .children()
            .iter()
            .map(|child| self.convert_expr(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expr::List {
            elements,
            span: node.span(),
        })
    }

    /// `[start : end]` or `[start : step : end]`
    pub(crate) fn convert_range<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let start = self.convert_expr(required(node, "start")?)?;
        let step = node
            .child("step")
            .map(|step| self.convert_expr(step).map(Box::new))
            .transpose()?;
        let end = self.convert_expr(required(node, "end")?)?;

        Ok(Expr::Range {
            start: Box::new(start),
            step,
            end: Box::new(end),
            span: node.span(),
        })
    }

    pub(crate) fn convert_list_comprehension<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let span = node.span();
        let mut opened = 1;
        self.ctx.push_scope(ScopeKind::Comprehension, span.clone());
        let result = self.flatten_comprehension(node, &mut opened);
        for _ in 0..opened {
            self.ctx.pop_scope();
        }

        let (binds, clauses, body) = result?;
        Ok(Expr::ListComp {
            binds,
            clauses,
            body: Box::new(body),
            span,
        })
    }

    /// Walk the chain below the first `for`. Every nested `for` and `let`
    /// opens a scope of its own; `opened` counts them for the caller.
    fn flatten_comprehension<N: SyntaxNode>(
        &mut self,
        node: &N,
        opened: &mut usize,
    ) -> Result<(ForBinds, Vec<CompClause>, Expr), ParseError> {
        let binds = self.for_binds(node)?;
        let mut clauses = Vec::new();
        let mut current = required(node, "body")?;

        loop {
            match current.kind() {
                "list_comprehension" => {
                    self.ctx.push_scope(ScopeKind::Comprehension, current.span());
                    *opened += 1;
                    clauses.push(CompClause::For {
                        binds: self.for_binds(current)?,
                        span: current.span(),
                    });
                    current = required(current, "body")?;
                }
                "if_comprehension" if current.child("alternative").is_none() => {
                    clauses.push(CompClause::If {
                        cond: self.convert_expr(required(current, "condition")?)?,
                        span: current.span(),
                    });
                    current = required(current, "consequence")?;
                }
                "let_expression" => {
                    self.ctx.push_scope(ScopeKind::Let, current.span());
                    *opened += 1;
                    clauses.push(CompClause::Let {
                        bindings: self.bindings_field(current)?,
                        span: current.span(),
                    });
                    current = required(current, "body")?;
                }
                _ => break,
            }
        }

        let body = self.convert_expr(current)?;
        Ok((binds, clauses, body))
    }

    /// Generator of a comprehension `for`: either `bindings`, or the C-style
    /// `init`, `condition` and `update` triple.
    fn for_binds<N: SyntaxNode>(&mut self, node: &N) -> Result<ForBinds, ParseError> {
        if let Some(bindings) = node.child("bindings") {
            return Ok(ForBinds::Assigns(self.assignments(bindings)?));
        }
        let init = self.assignments(required(node, "init")?)?;
        let cond = self.convert_expr(required(node, "condition")?)?;
        let update = self.assignments(required(node, "update")?)?;
        Ok(ForBinds::CStyle {
            init,
            cond: Box::new(cond),
            update,
        })
    }

    /// A list-element `if` that is not a filter clause of an enclosing
    /// comprehension.
    pub(crate) fn convert_if_comprehension<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let cond = self.convert_expr(required(node, "condition")?)?;
        let then_branch = self.convert_expr(required(node, "consequence")?)?;
        let else_branch = node
            .child("alternative")
            .map(|alt| self.convert_expr(alt).map(Box::new))
            .transpose()?;

        Ok(Expr::CompIf {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch,
            span: node.span(),
        })
    }
}
