//! # Strict Validation
//!
//! Read-only pass rejecting constructs that parse but mean nothing. Runs as
//! a [`Visitor`], so it meets nodes in the same order as every other
//! consumer and reports only the first violation.
//!
//! | Rule | Kind |
//! |------|------|
//! | binding block or comprehension with no bindings | [`SemanticKind::EmptyBinding`] |
//! | `multmatrix` matrix not 3 or 4 rows of 4 | [`SemanticKind::InvalidMatrixShape`] |
//! | named argument repeated in one call | [`SemanticKind::DuplicateNamedArg`] |
//! | `assert` condition or message bound twice | [`SemanticKind::DuplicateNamedArg`] |
//! | parameter repeated in one list | [`SemanticKind::DuplicateParameter`] |
//! | range step written as `0`, `-0` or `(0)` | [`SemanticKind::ZeroRangeStep`] |

use crate::ast::*;
use crate::context::Context;
use crate::error::{ParseError, SemanticKind};
use crate::span::{Span, Spanned};
use crate::visitor::{walk_expr, walk_item, walk_stmt, Visitor};
use config::constants::{
    MULTMATRIX_ARGUMENT, MULTMATRIX_COLUMNS, MULTMATRIX_MAX_ROWS, MULTMATRIX_MIN_ROWS, MULTMATRIX_MODULE,
    MULTMATRIX_RESOLVE_DEPTH,
};
use std::collections::HashSet;
use tracing::debug;

/// Check `ast` against the strict-mode rules.
///
/// # Errors
///
/// The first [`ParseError::Semantic`] met in depth-first, left-to-right
/// order.
pub fn validate(ast: &Ast) -> Result<(), ParseError> {
    let mut validator = Validator {
        context: &ast.context,
        error: None,
    };
    validator.visit_ast(ast);
    match validator.error {
        Some(error) => {
            debug!(%error, "strict validation failed");
            Err(error)
        }
        None => Ok(()),
    }
}

struct Validator<'a> {
    context: &'a Context,
    error: Option<ParseError>,
}

impl Validator<'_> {
    fn fail(&mut self, kind: SemanticKind, span: &Span, details: String) {
        if self.error.is_none() {
            self.error = Some(ParseError::semantic(kind, span.clone(), details));
        }
    }

    fn check_bindings(&mut self, construct: &str, bindings: &[Assignment], span: &Span) {
        if bindings.is_empty() {
            self.fail(
                SemanticKind::EmptyBinding,
                span,
                format!("`{construct}` has no bindings"),
            );
        }
    }

    fn check_for_binds(&mut self, binds: &ForBinds, span: &Span) {
        if let ForBinds::Assigns(assigns) = binds {
            self.check_bindings("for", assigns, span);
        }
    }

    fn check_params(&mut self, params: &[Param]) {
        let mut seen = HashSet::new();
        if let Some(dup) = params.iter().find(|&p| !seen.insert(p.name.as_str())) {
            self.fail(
                SemanticKind::DuplicateParameter,
                &dup.span,
                format!("parameter `{}` is declared more than once", dup.name.as_str()),
            );
        }
    }

    fn check_args(&mut self, args: &[Arg]) {
        let mut seen = HashSet::new();
        let duplicate = args
            .iter()
            .filter_map(|arg| arg.name().map(|name| (name, arg.span())))
            .find(|&(name, _)| !seen.insert(name.as_str()));
        if let Some((name, span)) = duplicate {
            self.fail(
                SemanticKind::DuplicateNamedArg,
                span,
                format!("argument `{}` is given more than once", name.as_str()),
            );
        }
    }

    fn check_assert_args(&mut self, args: &[Arg]) {
        self.check_args(args);
        if let Some((param, arg)) = AssertParam::first_rebinding(args) {
            self.fail(
                SemanticKind::DuplicateNamedArg,
                arg.span(),
                format!("assert `{}` is given more than once", param.as_str()),
            );
        }
    }

    // =========================================================================
    // MULTMATRIX
    // =========================================================================

    fn check_multmatrix(&mut self, args: &[Arg]) {
        let matrix = args.iter().find_map(|arg| match arg {
            Arg::Positional(value) => Some(value),
            Arg::Named { name, value, .. } if name.as_str() == MULTMATRIX_ARGUMENT => Some(value),
            Arg::Named { .. } => None,
        });
        let Some(matrix) = matrix else {
            return;
        };
        if let Some(details) = self.matrix_defect(matrix) {
            self.fail(SemanticKind::InvalidMatrixShape, matrix.span(), details);
        }
    }

    /// Why `expr` is not a 3x4 or 4x4 matrix, if that can be decided
    /// without evaluating anything.
    fn matrix_defect(&self, expr: &Expr) -> Option<String> {
        let expr = self.resolve(expr)?;
        let rows = match expr {
            Expr::List { elements, .. } => elements,
            Expr::Literal { .. } | Expr::Range { .. } => return Some("matrix is not a list".to_string()),
            _ => return None,
        };
        if rows.iter().any(is_generated) {
            return None;
        }
        if !(MULTMATRIX_MIN_ROWS..=MULTMATRIX_MAX_ROWS).contains(&rows.len()) {
            return Some(format!(
                "matrix has {} rows, expected {MULTMATRIX_MIN_ROWS} or {MULTMATRIX_MAX_ROWS}",
                rows.len()
            ));
        }
        rows.iter().enumerate().find_map(|(index, row)| match self.resolve(row)? {
            Expr::List { elements, .. } if elements.iter().any(is_generated) => None,
            Expr::List { elements, .. } if elements.len() != MULTMATRIX_COLUMNS => Some(format!(
                "row {} has {} columns, expected {MULTMATRIX_COLUMNS}",
                index + 1,
                elements.len()
            )),
            Expr::Literal { .. } | Expr::Range { .. } => Some(format!("row {} is not a list", index + 1)),
            _ => None,
        })
    }

    /// Follow parentheses and identifiers to the expression they stand for.
    /// `None` when a name has no known value.
    fn resolve<'e>(&'e self, mut expr: &'e Expr) -> Option<&'e Expr> {
        for _ in 0..MULTMATRIX_RESOLVE_DEPTH {
            expr = match expr {
                Expr::Paren { inner, .. } => inner,
                Expr::Ident(name) => {
                    let scope = self.context.scope_at(&name.span);
                    self.context.lookup(scope, name.as_str())?.value.as_ref()?
                }
                _ => return Some(expr),
            };
        }
        None
    }
}

/// `0` written directly, behind a sign, or in parentheses.
fn is_literal_zero(expr: &Expr) -> bool {
    match expr {
        Expr::Unary {
            op: UnaryOp::Neg | UnaryOp::Pos,
            operand,
            ..
        }
        | Expr::Paren { inner: operand, .. } => is_literal_zero(operand),
        _ => expr.as_number() == Some(0.0),
    }
}

/// Elements whose count is only known after evaluation.
fn is_generated(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Each { .. } | Expr::ListComp { .. } | Expr::CompIf { .. } | Expr::LetExpr { .. }
    )
}

impl Visitor for Validator<'_> {
    fn visit_item(&mut self, item: &Item) {
        if self.error.is_some() {
            return;
        }
        match item {
            Item::ModuleDef(def) => self.check_params(&def.params),
            Item::FunctionDef(def) => self.check_params(&def.params),
            Item::VarDecl(_) | Item::Stmt(_) => {}
        }
        walk_item(self, item);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        if self.error.is_some() {
            return;
        }
        match stmt {
            Stmt::TransformChain { name, args, .. } => {
                self.check_args(args);
                if name.as_str() == MULTMATRIX_MODULE {
                    self.check_multmatrix(args);
                }
            }
            Stmt::ForBlock { bindings, span, .. } => self.check_bindings("for", bindings, span),
            Stmt::IntersectionForBlock { bindings, span, .. } => {
                self.check_bindings("intersection_for", bindings, span)
            }
            Stmt::LetBlock { bindings, span, .. } => self.check_bindings("let", bindings, span),
            Stmt::AssignBlock { assignments, span, .. } => self.check_bindings("assign", assignments, span),
            Stmt::AssertStmt { args, .. } => self.check_assert_args(args),
            _ => {}
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if self.error.is_some() {
            return;
        }
        match expr {
            Expr::Call { args, .. } | Expr::EchoExpr { args, .. } => self.check_args(args),
            Expr::LetExpr { bindings, span, .. } => self.check_bindings("let", bindings, span),
            Expr::FunctionLit { params, .. } => self.check_params(params),
            Expr::AssertExpr { args, .. } => self.check_assert_args(args),
            Expr::Range { step: Some(step), .. } if is_literal_zero(step) => self.fail(
                SemanticKind::ZeroRangeStep,
                step.span(),
                "range step is zero".to_string(),
            ),
            Expr::ListComp { binds, clauses, span, .. } => {
                self.check_for_binds(binds, span);
                for clause in clauses {
                    match clause {
                        CompClause::For { binds, span } => self.check_for_binds(binds, span),
                        CompClause::Let { bindings, span } => self.check_bindings("let", bindings, span),
                        CompClause::If { .. } => {}
                    }
                }
            }
            _ => {}
        }
        walk_expr(self, expr);
    }
}
