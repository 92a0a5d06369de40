//! # Expression Transformation
//!
//! Transforms CST expression nodes to AST expressions.
//!
//! ## Supported Expressions
//!
//! - Literals, identifiers and `$special` variables
//! - Operators (see [`super::operators`])
//! - Calls, indexing and `.member` access
//! - `let`, `assert` and `echo` expressions
//! - Function literals: `function(x) x * 2`
//! - Lists, ranges and comprehensions (see [`super::comprehensions`])
//!
//! Parentheses are kept as [`Expr::Paren`].

use super::literals::{boolean, number, string};
use super::{required, Converter};
use crate::ast::{Expr, Literal};
use crate::context::ScopeKind;
use crate::cst::SyntaxNode;
use crate::error::ParseError;

impl<'s> Converter<'s> {
    pub(crate) fn convert_expr<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        self.guarded(|this| match node.kind() {
            "identifier" => Ok(Expr::Ident(this.name(node)?)),
            "special_variable" => Ok(Expr::SpecialIdent(this.name(node)?)),
            "number" => this.literal(node, number(node, this.source)?),
            "string" => this.literal(node, Literal::String(string(node.text(this.source)))),
            "boolean" => this.literal(node, boolean(node, this.source)?),
            "undef" => this.literal(node, Literal::Undef),

            "binary_expression" => this.convert_binary(node),
            "unary_expression" => this.convert_unary(node),
            "ternary_expression" => this.convert_ternary(node),
            "parenthesized_expression" => Ok(Expr::Paren {
                inner: Box::new(this.convert_expr(required(node, "expression")?)?),
                span: node.span(),
            }),

            "function_call" => this.convert_call(node),
            "index_expression" => Ok(Expr::Index {
                base: Box::new(this.convert_expr(required(node, "value")?)?),
                index: Box::new(this.convert_expr(required(node, "index")?)?),
                span: node.span(),
            }),
            "dot_index_expression" => Ok(Expr::DotIndex {
                base: Box::new(this.convert_expr(required(node, "value")?)?),
                field: this.name(required(node, "field")?)?,
                span: node.span(),
            }),

            "let_expression" => this.convert_let_expression(node),
            "assert_expression" => this.convert_assert_expression(node),
            "echo_expression" => this.convert_echo_expression(node),
            "function_literal" => this.convert_function_literal(node),

            "list" => this.convert_list(node),
            "range" => this.convert_range(node),
            "list_comprehension" => this.convert_list_comprehension(node),
            "if_comprehension" => this.convert_if_comprehension(node),
            "each" => Ok(Expr::Each {
                expr: Box::new(this.convert_expr(required(node, "value")?)?),
                span: node.span(),
            }),

            other => Err(ParseError::unsupported(other, node.span())),
        })
    }

    fn literal<N: SyntaxNode>(&self, node: &N, value: Literal) -> Result<Expr, ParseError> {
        Ok(Expr::Literal {
            value,
            span: self.span_with_text(node),
        })
    }

    fn convert_call<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let callee = self.convert_expr(required(node, "function")?)?;
        let args = self.arguments_field(node)?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            span: node.span(),
        })
    }

    /// `let (bindings) body`, also used for a `let` list element.
    pub(crate) fn convert_let_expression<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let span = node.span();
        self.scoped(ScopeKind::Let, span.clone(), |this| {
            let bindings = this.bindings_field(node)?;
            let body = Box::new(this.convert_expr(required(node, "body")?)?);
            Ok(Expr::LetExpr { bindings, body, span })
        })
    }

    fn convert_assert_expression<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let args = self.arguments_field(node)?;
        let body = self.optional_body(node)?;
        Ok(Expr::AssertExpr {
            args,
            body,
            span: node.span(),
        })
    }

    fn convert_echo_expression<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let args = self.arguments_field(node)?;
        let body = self.optional_body(node)?;
        Ok(Expr::EchoExpr {
            args,
            body,
            span: node.span(),
        })
    }

    fn optional_body<N: SyntaxNode>(&mut self, node: &N) -> Result<Option<Box<Expr>>, ParseError> {
        node.child("body")
            .map(|body| self.convert_expr(body).map(Box::new))
            .transpose()
    }

    /// `function (params) body`
    fn convert_function_literal<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let params = self.parameters(node)?;
        let span = node.span();
        self.scoped(ScopeKind::FunctionLiteral, span.clone(), |this| {
            this.declare_params(&params);
            let body = Box::new(this.convert_expr(required(node, "body")?)?);
            Ok(Expr::FunctionLit { params, body, span })
        })
    }
}
