//! # Declaration Transformation
//!
//! Transforms module, function and variable declarations, registering each
//! in the [`crate::context::Context`] as it is converted.
//!
//! Registration happens after the parameter list and before the body, so
//! a recursive call inside the body already sees its own definition.

use super::{required, Converter};
use crate::ast::{FunctionDef, Item, ModuleDef, VarDecl};
use crate::context::ScopeKind;
use crate::cst::SyntaxNode;
use crate::error::ParseError;
use tracing::trace;

impl<'s> Converter<'s> {
    /// `module name(params) body`
    pub(crate) fn convert_module_item<N: SyntaxNode>(&mut self, node: &N) -> Result<Item, ParseError> {
        let name = self.name_field(node)?;
        let params = self.parameters(node)?;
        let span = node.span();
        trace!(name = %name.text, params = params.len(), "module definition");
        self.ctx.define_module(&name, &params, &span);

        let body = required(node, "body")?;
        let body_items = self.scoped(ScopeKind::Module, span.clone(), |this| {
            this.declare_params(&params);
            match body.kind() {
                "union_block" => this.block_items(body),
                _ => Ok(vec![this.convert_item(body)?]),
            }
        })?;

        Ok(Item::ModuleDef(ModuleDef {
            name,
            params,
            body_items,
            span,
        }))
    }

    /// `function name(params) = body;`
    pub(crate) fn convert_function_item<N: SyntaxNode>(&mut self, node: &N) -> Result<Item, ParseError> {
        let name = self.name_field(node)?;
        let params = self.parameters(node)?;
        let span = node.span();
        trace!(name = %name.text, params = params.len(), "function definition");
        self.ctx.define_function(&name, &params, &span);

        let body_expr = self.scoped(ScopeKind::Function, span.clone(), |this| {
            this.declare_params(&params);
            this.convert_expr(required(node, "body")?)
        })?;

        Ok(Item::FunctionDef(FunctionDef {
            name,
            params,
            body_expr,
            span,
        }))
    }

    /// `name = value;` and `$special = value;`
    pub(crate) fn convert_var_declaration<N: SyntaxNode>(&mut self, node: &N) -> Result<Item, ParseError> {
        let name = self.name_field(node)?;
        let value_expr = self.convert_expr(required(node, "value")?)?;
        let span = node.span();
        self.ctx.assign(&name, &value_expr, &span);

        Ok(Item::VarDecl(VarDecl {
            name,
            value_expr,
            span,
        }))
    }
}
