//! # AST Visitors
//!
//! Read-only traversal protocol over the AST, plus the CST to AST
//! transformation.
//!
//! ## Structure
//!
//! ```text
//! visitor/
//! ├── mod.rs            - Visitor trait and walk functions
//! └── cst_to_ast/       - CST to AST transformation
//! ```
//!
//! ## Traversal Order
//!
//! Children are visited left to right, depth first, in source order: a
//! parameter's default before the body, a binding's value before the body
//! it scopes, the callee before its arguments. The converter, the
//! validator and the printer all follow this order, so the "first" node any
//! of them reports is the same node.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::visitor::{walk_expr, Visitor};
//! use openscad_ast::Expr;
//!
//! #[derive(Default)]
//! struct CountIdents(usize);
//!
//! impl Visitor for CountIdents {
//!     fn visit_expr(&mut self, expr: &Expr) {
//!         if matches!(expr, Expr::Ident(_)) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//!
//! let ast = openscad_ast::parse("translate([x, y, 0]) cube(size);").unwrap();
//! let mut counter = CountIdents::default();
//! counter.visit_ast(&ast);
//! assert_eq!(counter.0, 3);
//! ```

pub mod cst_to_ast;

use crate::ast::*;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

/// Capability set for AST consumers.
///
/// Override only the hooks you need; the defaults recurse into every
/// child so partial visitors still see the whole tree.
pub trait Visitor {
    fn visit_ast(&mut self, ast: &Ast) {
        for item in &ast.items {
            self.visit_item(item);
        }
    }

    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

// =============================================================================
// WALKERS
// =============================================================================

pub fn walk_item<V: Visitor + ?Sized>(visitor: &mut V, item: &Item) {
    match item {
        Item::ModuleDef(def) => {
            walk_params(visitor, &def.params);
            for item in &def.body_items {
                visitor.visit_item(item);
            }
        }
        Item::FunctionDef(def) => {
            walk_params(visitor, &def.params);
            visitor.visit_expr(&def.body_expr);
        }
        Item::VarDecl(decl) => visitor.visit_expr(&decl.value_expr),
        Item::Stmt(stmt) => visitor.visit_stmt(stmt),
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match stmt {
        Stmt::TransformChain { args, tail, .. } => {
            walk_args(visitor, args);
            visitor.visit_stmt(tail);
        }
        Stmt::UnionBlock { items, .. } => {
            for item in items {
                visitor.visit_item(item);
            }
        }
        Stmt::ForBlock { bindings, body, .. }
        | Stmt::IntersectionForBlock { bindings, body, .. }
        | Stmt::LetBlock { bindings, body, .. }
        | Stmt::AssignBlock {
            assignments: bindings,
            body,
            ..
        } => {
            walk_assignments(visitor, bindings);
            visitor.visit_stmt(body);
        }
        Stmt::IfBlock {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::AssertStmt { args, body, .. } => {
            walk_args(visitor, args);
            visitor.visit_stmt(body);
        }
        Stmt::Modified { stmt, .. } => visitor.visit_stmt(stmt),
        Stmt::Include { .. } | Stmt::Use { .. } | Stmt::Empty(_) => {}
    })
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match expr {
        Expr::Literal { .. } | Expr::Ident(_) | Expr::SpecialIdent(_) => {}
        Expr::Call { callee, args, .. } => {
            visitor.visit_expr(callee);
            walk_args(visitor, args);
        }
        Expr::Index { base, index, .. } => {
            visitor.visit_expr(base);
            visitor.visit_expr(index);
        }
        Expr::DotIndex { base, .. } => visitor.visit_expr(base),
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Ternary {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
        Expr::Paren { inner, .. } => visitor.visit_expr(inner),
        Expr::LetExpr { bindings, body, .. } => {
            walk_assignments(visitor, bindings);
            visitor.visit_expr(body);
        }
        Expr::AssertExpr { args, body, .. } | Expr::EchoExpr { args, body, .. } => {
            walk_args(visitor, args);
            if let Some(body) = body {
                visitor.visit_expr(body);
            }
        }
        Expr::List { elements, .. } => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        Expr::Range { start, step, end, .. } => {
            visitor.visit_expr(start);
            if let Some(step) = step {
                visitor.visit_expr(step);
            }
            visitor.visit_expr(end);
        }
        Expr::FunctionLit { params, body, .. } => {
            walk_params(visitor, params);
            visitor.visit_expr(body);
        }
        Expr::Each { expr, .. } => visitor.visit_expr(expr),
        Expr::ListComp {
            binds, clauses, body, ..
        } => {
            walk_for_binds(visitor, binds);
            for clause in clauses {
                match clause {
                    CompClause::For { binds, .. } => walk_for_binds(visitor, binds),
                    CompClause::If { cond, .. } => visitor.visit_expr(cond),
                    CompClause::Let { bindings, .. } => walk_assignments(visitor, bindings),
                }
            }
            visitor.visit_expr(body);
        }
        Expr::CompIf {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_expr(else_branch);
            }
        }
    })
}

fn walk_args<V: Visitor + ?Sized>(visitor: &mut V, args: &[Arg]) {
    for arg in args {
        visitor.visit_expr(arg.value());
    }
}

fn walk_params<V: Visitor + ?Sized>(visitor: &mut V, params: &[Param]) {
    for default in params.iter().filter_map(|p| p.default_expr.as_ref()) {
        visitor.visit_expr(default);
    }
}

fn walk_assignments<V: Visitor + ?Sized>(visitor: &mut V, assignments: &[Assignment]) {
    for assignment in assignments {
        visitor.visit_expr(&assignment.value);
    }
}

fn walk_for_binds<V: Visitor + ?Sized>(visitor: &mut V, binds: &ForBinds) {
    match binds {
        ForBinds::Assigns(assigns) => walk_assignments(visitor, assigns),
        ForBinds::CStyle { init, cond, update } => {
            walk_assignments(visitor, init);
            visitor.visit_expr(cond);
            walk_assignments(visitor, update);
        }
    }
}
