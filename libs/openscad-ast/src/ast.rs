//! # AST Types
//!
//! Typed, span-carrying syntax tree for OpenSCAD programs.
//!
//! Every call that may apply to following geometry (primitives, transforms,
//! boolean operations) is a [`Stmt::TransformChain`]; only its `tail`
//! distinguishes `cube(1);` (empty tail) from `translate(v) cube(1);`
//! (a nested statement) or `union() { ... }` (a [`Stmt::UnionBlock`]).
//!
//! The tree is produced in one pass by [`crate::parse`] and is read-only
//! afterwards.

use crate::context::Context;
use crate::span::{Span, Spanned};
use config::constants::{SPECIAL_VARIABLE_SIGIL, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROOT
// =============================================================================

/// A converted source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ast {
    pub items: Vec<Item>,
    /// Covers the whole source.
    pub span: Span,
    pub context: Context,
}

// =============================================================================
// ITEMS
// =============================================================================

/// Top-level unit, also the element type of blocks and module bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    ModuleDef(ModuleDef),
    FunctionDef(FunctionDef),
    VarDecl(VarDecl),
    Stmt(Stmt),
}

/// `module name(params) body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub name: Name,
    pub params: Vec<Param>,
    /// Items of the body block; a single-statement body becomes one item.
    pub body_items: Vec<Item>,
    pub span: Span,
}

/// `function name(params) = body;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Param>,
    pub body_expr: Expr,
    pub span: Span,
}

/// `name = value;`, including `$special = value;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: Name,
    pub value_expr: Expr,
    pub span: Span,
}

/// Module, function or function-literal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Name,
    pub default_expr: Option<Expr>,
    pub span: Span,
}

// =============================================================================
// STATEMENTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Any module call; `tail` is [`Stmt::Empty`], a single statement, or a
    /// [`Stmt::UnionBlock`].
    TransformChain {
        name: Name,
        args: Vec<Arg>,
        tail: Box<Stmt>,
        span: Span,
    },
    /// `{ items }`
    UnionBlock { items: Vec<Item>, span: Span },
    ForBlock {
        bindings: Vec<Assignment>,
        body: Box<Stmt>,
        span: Span,
    },
    IntersectionForBlock {
        bindings: Vec<Assignment>,
        body: Box<Stmt>,
        span: Span,
    },
    IfBlock {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    LetBlock {
        bindings: Vec<Assignment>,
        body: Box<Stmt>,
        span: Span,
    },
    AssignBlock {
        assignments: Vec<Assignment>,
        body: Box<Stmt>,
        span: Span,
    },
    Include { path: String, span: Span },
    Use { path: String, span: Span },
    /// `assert(args) body`; `body` is [`Stmt::Empty`] for `assert(c);`.
    ///
    /// `args` are kept as written. [`AssertParam::bound_in`] resolves the
    /// condition and message.
    AssertStmt {
        args: Vec<Arg>,
        body: Box<Stmt>,
        span: Span,
    },
    /// A statement prefixed with `*`, `!`, `#` or `%`.
    Modified {
        modifier: Modifier,
        stmt: Box<Stmt>,
        span: Span,
    },
    Empty(Span),
}

impl Stmt {
    pub fn is_empty(&self) -> bool {
        matches!(self, Stmt::Empty(_))
    }
}

/// Statement modifier characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// `*`: not rendered
    Disable,
    /// `!`: only this subtree is rendered
    Root,
    /// `#`: highlighted
    Highlight,
    /// `%`: transparent background
    Background,
}

impl Modifier {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "*" => Some(Self::Disable),
            "!" => Some(Self::Root),
            "#" => Some(Self::Highlight),
            "%" => Some(Self::Background),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disable => "*",
            Self::Root => "!",
            Self::Highlight => "#",
            Self::Background => "%",
        }
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Expression tree.
///
/// `Clone` and `PartialEq` are written out so that deep nesting grows the
/// stack instead of overflowing it; `Drop` is already iterative enough.
#[derive(Debug, Serialize, Deserialize)]
pub enum Expr {
    Literal { value: Literal, span: Span },
    Ident(Name),
    /// `$fn`, `$children` and other `$`-prefixed reads.
    SpecialIdent(Name),
    /// `callee(args)`; `callee` is usually an [`Expr::Ident`].
    Call {
        callee: Box<Expr>,
        args: Vec<Arg>,
        span: Span,
    },
    /// `base[index]`
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    /// `base.x`; any identifier is accepted as `field`.
    DotIndex {
        base: Box<Expr>,
        field: Name,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// `cond ? then_branch : else_branch`
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        span: Span,
    },
    /// Parentheses are kept so printing needs no precedence rules.
    Paren { inner: Box<Expr>, span: Span },
    /// `let (bindings) body`
    LetExpr {
        bindings: Vec<Assignment>,
        body: Box<Expr>,
        span: Span,
    },
    /// `assert(args) body` in expression position; arguments as for
    /// [`Stmt::AssertStmt`].
    AssertExpr {
        args: Vec<Arg>,
        body: Option<Box<Expr>>,
        span: Span,
    },
    /// `echo(args) body`; the value is `body`, or undef without one.
    EchoExpr {
        args: Vec<Arg>,
        body: Option<Box<Expr>>,
        span: Span,
    },
    List { elements: Vec<Expr>, span: Span },
    /// `[start : end]` or `[start : step : end]`
    Range {
        start: Box<Expr>,
        step: Option<Box<Expr>>,
        end: Box<Expr>,
        span: Span,
    },
    /// `function (params) body`
    FunctionLit {
        params: Vec<Param>,
        body: Box<Expr>,
        span: Span,
    },
    /// `each value` inside a list.
    Each { expr: Box<Expr>, span: Span },
    /// `for (binds) clauses... body` inside a list.
    ListComp {
        binds: ForBinds,
        clauses: Vec<CompClause>,
        body: Box<Expr>,
        span: Span,
    },
    /// A list-element `if` that is not a plain filter clause.
    CompIf {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
        span: Span,
    },
}

impl Expr {
    /// The literal number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Literal {
                value: Literal::Number(n),
                ..
            } => Some(*n),
            _ => None,
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.clone_node())
    }
}

impl Expr {
    fn clone_node(&self) -> Self {
        match self {
            Expr::Literal { value, span } => Expr::Literal {
                value: value.clone(),
                span: span.clone(),
            },
            Expr::Ident(name) => Expr::Ident(name.clone()),
            Expr::SpecialIdent(name) => Expr::SpecialIdent(name.clone()),
            Expr::Call { callee, args, span } => Expr::Call {
                callee: callee.clone(),
                args: args.clone(),
                span: span.clone(),
            },
            Expr::Index { base, index, span } => Expr::Index {
                base: base.clone(),
                index: index.clone(),
                span: span.clone(),
            },
            Expr::DotIndex { base, field, span } => Expr::DotIndex {
                base: base.clone(),
                field: field.clone(),
                span: span.clone(),
            },
            Expr::Unary { op, operand, span } => Expr::Unary {
                op: *op,
                operand: operand.clone(),
                span: span.clone(),
            },
            Expr::Binary { op, left, right, span } => Expr::Binary {
                op: *op,
                left: left.clone(),
                right: right.clone(),
                span: span.clone(),
            },
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
                span,
            } => Expr::Ternary {
                cond: cond.clone(),
                then_branch: then_branch.clone(),
                else_branch: else_branch.clone(),
                span: span.clone(),
            },
            Expr::Paren { inner, span } => Expr::Paren {
                inner: inner.clone(),
                span: span.clone(),
            },
            Expr::LetExpr { bindings, body, span } => Expr::LetExpr {
                bindings: bindings.clone(),
                body: body.clone(),
                span: span.clone(),
            },
            Expr::AssertExpr { args, body, span } => Expr::AssertExpr {
                args: args.clone(),
                body: body.clone(),
                span: span.clone(),
            },
            Expr::EchoExpr { args, body, span } => Expr::EchoExpr {
                args: args.clone(),
                body: body.clone(),
                span: span.clone(),
            },
            Expr::List { elements, span } => Expr::List {
                elements: elements.clone(),
                span: span.clone(),
            },
            Expr::Range { start, step, end, span } => Expr::Range {
                start: start.clone(),
                step: step.clone(),
                end: end.clone(),
                span: span.clone(),
            },
            Expr::FunctionLit { params, body, span } => Expr::FunctionLit {
                params: params.clone(),
                body: body.clone(),
                span: span.clone(),
            },
            Expr::Each { expr, span } => Expr::Each {
                expr: expr.clone(),
                span: span.clone(),
            },
            Expr::ListComp {
                binds,
                clauses,
                body,
                span,
            } => Expr::ListComp {
                binds: binds.clone(),
                clauses: clauses.clone(),
                body: body.clone(),
                span: span.clone(),
            },
            Expr::CompIf {
                cond,
                then_branch,
                else_branch,
                span,
            } => Expr::CompIf {
                cond: cond.clone(),
                then_branch: then_branch.clone(),
                else_branch: else_branch.clone(),
                span: span.clone(),
            },
        }
    }

    fn eq_node(&self, other: &Self) -> bool {
        use Expr::*;
        match (self, other) {
            (Expr::Literal { value: a, span: sa }, Expr::Literal { value: b, span: sb }) => a == b && sa == sb,
            (Ident(a), Ident(b)) | (SpecialIdent(a), SpecialIdent(b)) => a == b,
            (
                Call { callee: ca, args: aa, span: sa },
                Call { callee: cb, args: ab, span: sb },
            ) => sa == sb && aa == ab && ca == cb,
            (
                Index { base: ba, index: ia, span: sa },
                Index { base: bb, index: ib, span: sb },
            ) => sa == sb && ia == ib && ba == bb,
            (
                DotIndex { base: ba, field: fa, span: sa },
                DotIndex { base: bb, field: fb, span: sb },
            ) => sa == sb && fa == fb && ba == bb,
            (
                Unary { op: oa, operand: a, span: sa },
                Unary { op: ob, operand: b, span: sb },
            ) => oa == ob && sa == sb && a == b,
            (
                Binary { op: oa, left: la, right: ra, span: sa },
                Binary { op: ob, left: lb, right: rb, span: sb },
            ) => oa == ob && sa == sb && la == lb && ra == rb,
            (
                Ternary { cond: ca, then_branch: ta, else_branch: ea, span: sa },
                Ternary { cond: cb, then_branch: tb, else_branch: eb, span: sb },
            )
            | (
                CompIf { cond: ca, then_branch: ta, else_branch: Some(ea), span: sa },
                CompIf { cond: cb, then_branch: tb, else_branch: Some(eb), span: sb },
            ) => sa == sb && ca == cb && ta == tb && ea == eb,
            (
                CompIf { cond: ca, then_branch: ta, else_branch: None, span: sa },
                CompIf { cond: cb, then_branch: tb, else_branch: None, span: sb },
            ) => sa == sb && ca == cb && ta == tb,
            (Paren { inner: a, span: sa }, Paren { inner: b, span: sb })
            | (Each { expr: a, span: sa }, Each { expr: b, span: sb }) => sa == sb && a == b,
            (
                LetExpr { bindings: ba, body: a, span: sa },
                LetExpr { bindings: bb, body: b, span: sb },
            ) => sa == sb && ba == bb && a == b,
            (
                AssertExpr { args: aa, body: a, span: sa },
                AssertExpr { args: ab, body: b, span: sb },
            )
            | (
                EchoExpr { args: aa, body: a, span: sa },
                EchoExpr { args: ab, body: b, span: sb },
            ) => sa == sb && aa == ab && a == b,
            (List { elements: a, span: sa }, List { elements: b, span: sb }) => sa == sb && a == b,
            (
                Range { start: ba, step: ta, end: ea, span: sa },
                Range { start: bb, step: tb, end: eb, span: sb },
            ) => sa == sb && ba == bb && ta == tb && ea == eb,
            (
                FunctionLit { params: pa, body: a, span: sa },
                FunctionLit { params: pb, body: b, span: sb },
            ) => sa == sb && pa == pb && a == b,
            (
                ListComp { binds: ba, clauses: ca, body: a, span: sa },
                ListComp { binds: bb, clauses: cb, body: b, span: sb },
            ) => sa == sb && ba == bb && ca == cb && a == b,
            _ => false,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.eq_node(other))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Undef,
}

/// Generator of a comprehension `for`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForBinds {
    /// `for (a = x, b = y)`
    Assigns(Vec<Assignment>),
    /// `for (init; cond; update)`
    CStyle {
        init: Vec<Assignment>,
        cond: Box<Expr>,
        update: Vec<Assignment>,
    },
}

impl ForBinds {
    /// Every assignment, in source order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        let (first, second): (&[Assignment], &[Assignment]) = match self {
            ForBinds::Assigns(assigns) => (assigns, &[]),
            ForBinds::CStyle { init, update, .. } => (init, update),
        };
        first.iter().chain(second)
    }
}

/// Clause between a comprehension's first `for` and its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompClause {
    For { binds: ForBinds, span: Span },
    If { cond: Expr, span: Span },
    Let { bindings: Vec<Assignment>, span: Span },
}

// =============================================================================
// ARGUMENTS, BINDINGS, NAMES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    Positional(Expr),
    Named { name: Name, value: Expr, span: Span },
}

impl Arg {
    pub fn value(&self) -> &Expr {
        match self {
            Arg::Positional(value) | Arg::Named { value, .. } => value,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        match self {
            Arg::Positional(_) => None,
            Arg::Named { name, .. } => Some(name),
        }
    }
}

/// Parameters of `assert`, in positional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertParam {
    Condition,
    Message,
}

impl AssertParam {
    pub const ALL: [Self; 2] = [Self::Condition, Self::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Condition => "condition",
            Self::Message => "message",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.as_str() == s)
    }

    /// The value `args` bind to this parameter. Positional arguments bind
    /// by position, named ones by name; the first binding wins.
    pub fn bound_in(self, args: &[Arg]) -> Option<&Expr> {
        assert_bindings(args)
            .find(|&(param, _)| param == Some(self))
            .map(|(_, arg)| arg.value())
    }

    /// The first argument binding a parameter some earlier argument
    /// already bound, with that parameter.
    pub fn first_rebinding(args: &[Arg]) -> Option<(Self, &Arg)> {
        let mut bound = Vec::with_capacity(Self::ALL.len());
        assert_bindings(args)
            .filter_map(|(param, arg)| param.map(|param| (param, arg)))
            .find(|&(param, _)| {
                let again = bound.contains(&param);
                bound.push(param);
                again
            })
    }
}

/// Each argument with the parameter it binds; `None` past the second
/// positional or for an unknown name.
fn assert_bindings(args: &[Arg]) -> impl Iterator<Item = (Option<AssertParam>, &Arg)> {
    let mut position = 0;
    args.iter().map(move |arg| {
        let param = match arg {
            Arg::Positional(_) => {
                position += 1;
                AssertParam::ALL.get(position - 1).copied()
            }
            Arg::Named { name, .. } => AssertParam::from_str(name.as_str()),
        };
        (param, arg)
    })
}

/// `name = value` in `let`, `for` and `assign` binding lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: Name,
    pub value: Expr,
    pub span: Span,
}

/// An identifier or `$special` name plus its declaring span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub text: String,
    pub span: Span,
}

impl Name {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// True for `$`-prefixed names.
    pub fn is_special(&self) -> bool {
        self.text.starts_with(SPECIAL_VARIABLE_SIGIL)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "||" => Self::Or,
            "&&" => Self::And,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "^" => Self::Pow,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
}

impl UnaryOp {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "!" => Some(Self::Not),
            "-" => Some(Self::Neg),
            "+" => Some(Self::Pos),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
            Self::Pos => "+",
        }
    }
}

// =============================================================================
// SPANS
// =============================================================================

impl Spanned for Ast {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Spanned for Item {
    fn span(&self) -> &Span {
        match self {
            Item::ModuleDef(def) => &def.span,
            Item::FunctionDef(def) => &def.span,
            Item::VarDecl(decl) => &decl.span,
            Item::Stmt(stmt) => stmt.span(),
        }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> &Span {
        match self {
            Stmt::TransformChain { span, .. }
            | Stmt::UnionBlock { span, .. }
            | Stmt::ForBlock { span, .. }
            | Stmt::IntersectionForBlock { span, .. }
            | Stmt::IfBlock { span, .. }
            | Stmt::LetBlock { span, .. }
            | Stmt::AssignBlock { span, .. }
            | Stmt::Include { span, .. }
            | Stmt::Use { span, .. }
            | Stmt::AssertStmt { span, .. }
            | Stmt::Modified { span, .. }
            | Stmt::Empty(span) => span,
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> &Span {
        match self {
            Expr::Ident(name) | Expr::SpecialIdent(name) => &name.span,
            Expr::Literal { span, .. }
            | Expr::Call { span, .. }
            | Expr::Index { span, .. }
            | Expr::DotIndex { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Paren { span, .. }
            | Expr::LetExpr { span, .. }
            | Expr::AssertExpr { span, .. }
            | Expr::EchoExpr { span, .. }
            | Expr::List { span, .. }
            | Expr::Range { span, .. }
            | Expr::FunctionLit { span, .. }
            | Expr::Each { span, .. }
            | Expr::ListComp { span, .. }
            | Expr::CompIf { span, .. } => span,
        }
    }
}

impl Spanned for CompClause {
    fn span(&self) -> &Span {
        match self {
            CompClause::For { span, .. } | CompClause::If { span, .. } | CompClause::Let { span, .. } => {
                span
            }
        }
    }
}

impl Spanned for Arg {
    fn span(&self) -> &Span {
        match self {
            Arg::Positional(expr) => expr.span(),
            Arg::Named { span, .. } => span,
        }
    }
}

impl Spanned for Param {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Spanned for Assignment {
    fn span(&self) -> &Span {
        &self.span
    }
}

impl Spanned for Name {
    fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tables_agree() {
        for op in [
            BinaryOp::Or,
            BinaryOp::And,
            BinaryOp::Eq,
            BinaryOp::Ne,
            BinaryOp::Lt,
            BinaryOp::Gt,
            BinaryOp::Le,
            BinaryOp::Ge,
            BinaryOp::Add,
            BinaryOp::Sub,
            BinaryOp::Mul,
            BinaryOp::Div,
            BinaryOp::Mod,
            BinaryOp::Pow,
        ] {
            assert_eq!(BinaryOp::from_str(op.as_str()), Some(op));
        }
        for op in [UnaryOp::Not, UnaryOp::Neg, UnaryOp::Pos] {
            assert_eq!(UnaryOp::from_str(op.as_str()), Some(op));
        }
        assert_eq!(Modifier::from_str("#"), Some(Modifier::Highlight));
        assert_eq!(Modifier::from_str("&"), None);
    }

    #[test]
    fn test_name_is_special() {
        assert!(Name::new("$fn", Span::default()).is_special());
        assert!(!Name::new("fn", Span::default()).is_special());
    }

    #[test]
    fn test_for_binds_assignments_in_order() {
        let assign = |text: &str| Assignment {
            name: Name::new(text, Span::default()),
            value: Expr::Literal {
                value: Literal::Undef,
                span: Span::default(),
            },
            span: Span::default(),
        };
        let binds = ForBinds::CStyle {
            init: vec![assign("i")],
            cond: Box::new(Expr::Ident(Name::new("i", Span::default()))),
            update: vec![assign("j")],
        };
        let names: Vec<_> = binds.assignments().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["i", "j"]);
    }
}
