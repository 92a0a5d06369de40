//! # Control Flow Transformation
//!
//! Transforms `for`, `intersection_for`, `if`, `let` and `assign` blocks.
//! Each binding block opens a scope spanning the whole block, so its names
//! are visible to the body only.

use super::{required, Converter};
use crate::ast::Stmt;
use crate::context::ScopeKind;
use crate::cst::SyntaxNode;
use crate::error::ParseError;

impl<'s> Converter<'s> {
    pub(crate) fn convert_for_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::For, span.clone(), |this| {
            let bindings = this.bindings_field(node)?;
            let body = Box::new(this.convert_stmt(required(node, "body")?)?);
            Ok(Stmt::ForBlock { bindings, body, span })
        })
    }

    pub(crate) fn convert_intersection_for_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::For, span.clone(), |this| {
            let bindings = this.bindings_field(node)?;
            let body = Box::new(this.convert_stmt(required(node, "body")?)?);
            Ok(Stmt::IntersectionForBlock { bindings, body, span })
        })
    }

    pub(crate) fn convert_let_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::Let, span.clone(), |this| {
            let bindings = this.bindings_field(node)?;
            let body = Box::new(this.convert_stmt(required(node, "body")?)?);
            Ok(Stmt::LetBlock { bindings, body, span })
        })
    }

    pub(crate) fn convert_assign_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::Assign, span.clone(), |this| {
            let assignments = this.bindings_field(node)?;
            let body = Box::new(this.convert_stmt(required(node, "body")?)?);
            Ok(Stmt::AssignBlock {
                assignments,
                body,
                span,
            })
        })
    }

    /// `if (cond) then_branch [else else_branch]`; an `else` binds to the
    /// nearest `if`.
    pub(crate) fn convert_if_block<N: SyntaxNode>(&mut self, node: &N) -> Result<Stmt, ParseError> {
        let cond = self.convert_expr(required(node, "condition")?)?;
        let then_branch = self.convert_stmt(required(node, "consequence")?)?;
        let else_branch = node
            .child("alternative")
            .map(|alt| self.convert_stmt(alt).map(Box::new))
            .transpose()?;

        Ok(Stmt::IfBlock {
            cond,
            then_branch: Box::new(then_branch),
            else_branch,
            span: node.span(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::context::ScopeKind;
    use crate::parse;

    fn only_stmt(source: &str) -> Stmt {
        match parse(source).unwrap().items.remove(0) {
            Item::Stmt(stmt) => stmt,
            other => panic!("expected statement, got {other:?}"),
        }
    }

    #[test]
    fn test_for_block() {
        let Stmt::ForBlock { bindings, body, .. } = only_stmt("for (i = [0:3], j = [1, 2]) translate([i, j]) cube(1);")
        else {
            panic!("expected for");
        };
        assert_eq!(bindings.len(), 2);
        assert!(matches!(bindings[0].value, Expr::Range { .. }));
        assert!(matches!(*body, Stmt::TransformChain { .. }));
    }

    #[test]
    fn test_intersection_for_and_assign() {
        assert!(matches!(
            only_stmt("intersection_for (a = [0, 90]) rotate(a) cube(1);"),
            Stmt::IntersectionForBlock { .. }
        ));
        let Stmt::AssignBlock { assignments, .. } = only_stmt("assign (w = 2, h = 3) cube([w, h, 1]);") else {
            panic!("expected assign");
        };
        assert_eq!(assignments.len(), 2);
    }

    #[test]
    fn test_let_block_allows_zero_bindings() {
        let Stmt::LetBlock { bindings, .. } = only_stmt("let () cube(1);") else {
            panic!("expected let");
        };
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_if_else_chain() {
        let Stmt::IfBlock { else_branch, .. } = only_stmt("if (a) cube(1); else if (b) sphere(1); else cylinder(1);")
        else {
            panic!("expected if");
        };
        let Some(else_branch) = else_branch else {
            panic!("expected else");
        };
        let Stmt::IfBlock { else_branch, .. } = *else_branch else {
            panic!("expected nested if");
        };
        assert!(else_branch.is_some());
    }

    #[test]
    fn test_dangling_else_binds_inner() {
        let Stmt::IfBlock {
            then_branch,
            else_branch,
            ..
        } = only_stmt("if (a) if (b) cube(1); else sphere(1);")
        else {
            panic!("expected if");
        };
        assert!(else_branch.is_none());
        assert!(matches!(*then_branch, Stmt::IfBlock { else_branch: Some(_), .. }));
    }

    #[test]
    fn test_binding_scopes() {
        let ast = parse("for (i = [0:2]) let (r = i * 2, $fn = 8) sphere(r);").unwrap();
        let kinds: Vec<_> = ast.context.scopes.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![ScopeKind::Root, ScopeKind::For, ScopeKind::Let]);
        assert!(ast.context.scopes[2].names.contains_key("r"));
        assert!(ast.context.special("$fn").is_some());
    }
}
