//! # Structural Equality
//!
//! [`SpanlessEq`] compares trees while ignoring every [`Span`](crate::Span)
//! and its text slice. `parse(print(ast))` must be spanless-equal to `ast`.

use crate::ast::*;
use crate::context::{Binding, Context, FunctionSig, ModuleSig, Scope, SpecialBinding};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use indexmap::IndexMap;

/// Equality that ignores source positions.
pub trait SpanlessEq {
    fn spanless_eq(&self, other: &Self) -> bool;
}

impl<T: SpanlessEq + ?Sized> SpanlessEq for Box<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        (**self).spanless_eq(&**other)
    }
}

impl<T: SpanlessEq> SpanlessEq for Option<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.spanless_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: SpanlessEq> SpanlessEq for [T] {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.spanless_eq(b))
    }
}

impl<T: SpanlessEq> SpanlessEq for Vec<T> {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.as_slice().spanless_eq(other.as_slice())
    }
}

impl<V: SpanlessEq> SpanlessEq for IndexMap<String, V> {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|((ka, va), (kb, vb))| ka == kb && va.spanless_eq(vb))
    }
}

// =============================================================================
// AST
// =============================================================================

impl SpanlessEq for Ast {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.items.spanless_eq(&other.items) && self.context.spanless_eq(&other.context)
    }
}

impl SpanlessEq for Name {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl SpanlessEq for Item {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::ModuleDef(a), Item::ModuleDef(b)) => {
                a.name.spanless_eq(&b.name)
                    && a.params.spanless_eq(&b.params)
                    && a.body_items.spanless_eq(&b.body_items)
            }
            (Item::FunctionDef(a), Item::FunctionDef(b)) => {
                a.name.spanless_eq(&b.name)
                    && a.params.spanless_eq(&b.params)
                    && a.body_expr.spanless_eq(&b.body_expr)
            }
            (Item::VarDecl(a), Item::VarDecl(b)) => {
                a.name.spanless_eq(&b.name) && a.value_expr.spanless_eq(&b.value_expr)
            }
            (Item::Stmt(a), Item::Stmt(b)) => a.spanless_eq(b),
            _ => false,
        }
    }
}

impl SpanlessEq for Param {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name.spanless_eq(&other.name) && self.default_expr.spanless_eq(&other.default_expr)
    }
}

impl SpanlessEq for Assignment {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name.spanless_eq(&other.name) && self.value.spanless_eq(&other.value)
    }
}

impl SpanlessEq for Arg {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Positional(a), Arg::Positional(b)) => a.spanless_eq(b),
            (
                Arg::Named {
                    name: na, value: va, ..
                },
                Arg::Named {
                    name: nb, value: vb, ..
                },
            ) => na.spanless_eq(nb) && va.spanless_eq(vb),
            _ => false,
        }
    }
}

impl SpanlessEq for Stmt {
    fn spanless_eq(&self, other: &Self) -> bool {
        use Stmt::*;
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match (self, other) {
            (
                TransformChain { name: na, args: aa, tail: ta, .. },
                TransformChain { name: nb, args: ab, tail: tb, .. },
            ) => na.spanless_eq(nb) && aa.spanless_eq(ab) && ta.spanless_eq(tb),
            (UnionBlock { items: a, .. }, UnionBlock { items: b, .. }) => a.spanless_eq(b),
            (
                ForBlock { bindings: ba, body: a, .. },
                ForBlock { bindings: bb, body: b, .. },
            )
            | (
                IntersectionForBlock { bindings: ba, body: a, .. },
                IntersectionForBlock { bindings: bb, body: b, .. },
            )
            | (
                LetBlock { bindings: ba, body: a, .. },
                LetBlock { bindings: bb, body: b, .. },
            )
            | (
                AssignBlock { assignments: ba, body: a, .. },
                AssignBlock { assignments: bb, body: b, .. },
            ) => ba.spanless_eq(bb) && a.spanless_eq(b),
            (
                IfBlock { cond: ca, then_branch: ta, else_branch: ea, .. },
                IfBlock { cond: cb, then_branch: tb, else_branch: eb, .. },
            ) => ca.spanless_eq(cb) && ta.spanless_eq(tb) && ea.spanless_eq(eb),
            (Include { path: a, .. }, Include { path: b, .. }) | (Use { path: a, .. }, Use { path: b, .. }) => {
                a == b
            }
            (AssertStmt { args: aa, body: ba, .. }, AssertStmt { args: ab, body: bb, .. }) => {
                aa.spanless_eq(ab) && ba.spanless_eq(bb)
            }
            (
                Modified { modifier: ma, stmt: sa, .. },
                Modified { modifier: mb, stmt: sb, .. },
            ) => ma == mb && sa.spanless_eq(sb),
            (Empty(_), Empty(_)) => true,
            _ => false,
        })
    }
}

impl SpanlessEq for Literal {
    fn spanless_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl SpanlessEq for ForBinds {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ForBinds::Assigns(a), ForBinds::Assigns(b)) => a.spanless_eq(b),
            (
                ForBinds::CStyle { init: ia, cond: ca, update: ua },
                ForBinds::CStyle { init: ib, cond: cb, update: ub },
            ) => ia.spanless_eq(ib) && ca.spanless_eq(cb) && ua.spanless_eq(ub),
            _ => false,
        }
    }
}

impl SpanlessEq for CompClause {
    fn spanless_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompClause::For { binds: a, .. }, CompClause::For { binds: b, .. }) => a.spanless_eq(b),
            (CompClause::If { cond: a, .. }, CompClause::If { cond: b, .. }) => a.spanless_eq(b),
            (CompClause::Let { bindings: a, .. }, CompClause::Let { bindings: b, .. }) => a.spanless_eq(b),
            _ => false,
        }
    }
}

impl SpanlessEq for Expr {
    fn spanless_eq(&self, other: &Self) -> bool {
        use Expr::*;
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match (self, other) {
            (Literal { value: a, .. }, Literal { value: b, .. }) => a.spanless_eq(b),
            (Ident(a), Ident(b)) | (SpecialIdent(a), SpecialIdent(b)) => a.spanless_eq(b),
            (Call { callee: ca, args: aa, .. }, Call { callee: cb, args: ab, .. }) => {
                ca.spanless_eq(cb) && aa.spanless_eq(ab)
            }
            (Index { base: ba, index: ia, .. }, Index { base: bb, index: ib, .. }) => {
                ba.spanless_eq(bb) && ia.spanless_eq(ib)
            }
            (DotIndex { base: ba, field: fa, .. }, DotIndex { base: bb, field: fb, .. }) => {
                ba.spanless_eq(bb) && fa.spanless_eq(fb)
            }
            (Unary { op: oa, operand: a, .. }, Unary { op: ob, operand: b, .. }) => oa == ob && a.spanless_eq(b),
            (
                Binary { op: oa, left: la, right: ra, .. },
                Binary { op: ob, left: lb, right: rb, .. },
            ) => oa == ob && la.spanless_eq(lb) && ra.spanless_eq(rb),
            (
                Ternary { cond: ca, then_branch: ta, else_branch: ea, .. },
                Ternary { cond: cb, then_branch: tb, else_branch: eb, .. },
            ) => ca.spanless_eq(cb) && ta.spanless_eq(tb) && ea.spanless_eq(eb),
            (Paren { inner: a, .. }, Paren { inner: b, .. }) => a.spanless_eq(b),
            (LetExpr { bindings: ba, body: a, .. }, LetExpr { bindings: bb, body: b, .. }) => {
                ba.spanless_eq(bb) && a.spanless_eq(b)
            }
            (AssertExpr { args: aa, body: ba, .. }, AssertExpr { args: ab, body: bb, .. })
            | (EchoExpr { args: aa, body: ba, .. }, EchoExpr { args: ab, body: bb, .. }) => {
                aa.spanless_eq(ab) && ba.spanless_eq(bb)
            }
            (List { elements: a, .. }, List { elements: b, .. }) => a.spanless_eq(b),
            (
                Range { start: sa, step: ta, end: ea, .. },
                Range { start: sb, step: tb, end: eb, .. },
            ) => sa.spanless_eq(sb) && ta.spanless_eq(tb) && ea.spanless_eq(eb),
            (FunctionLit { params: pa, body: a, .. }, FunctionLit { params: pb, body: b, .. }) => {
                pa.spanless_eq(pb) && a.spanless_eq(b)
            }
            (Each { expr: a, .. }, Each { expr: b, .. }) => a.spanless_eq(b),
            (
                ListComp { binds: ba, clauses: ca, body: a, .. },
                ListComp { binds: bb, clauses: cb, body: b, .. },
            ) => ba.spanless_eq(bb) && ca.spanless_eq(cb) && a.spanless_eq(b),
            (
                CompIf { cond: ca, then_branch: ta, else_branch: ea, .. },
                CompIf { cond: cb, then_branch: tb, else_branch: eb, .. },
            ) => ca.spanless_eq(cb) && ta.spanless_eq(tb) && ea.spanless_eq(eb),
            _ => false,
        })
    }
}

// =============================================================================
// CONTEXT
// =============================================================================

impl SpanlessEq for Context {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.scopes.spanless_eq(&other.scopes)
            && self.specials.spanless_eq(&other.specials)
            && self.modules.spanless_eq(&other.modules)
            && self.functions.spanless_eq(&other.functions)
    }
}

impl SpanlessEq for Scope {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.parent == other.parent
            && self.kind == other.kind
            && self.names.spanless_eq(&other.names)
    }
}

impl SpanlessEq for Binding {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name.spanless_eq(&other.name) && self.value.spanless_eq(&other.value)
    }
}

impl SpanlessEq for SpecialBinding {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.value.spanless_eq(&other.value)
    }
}

impl SpanlessEq for ModuleSig {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name.spanless_eq(&other.name) && self.params.spanless_eq(&other.params) && self.scope == other.scope
    }
}

impl SpanlessEq for FunctionSig {
    fn spanless_eq(&self, other: &Self) -> bool {
        self.name.spanless_eq(&other.name) && self.params.spanless_eq(&other.params) && self.scope == other.scope
    }
}
