//! # CST to AST Transformation
//!
//! Transforms a Concrete Syntax Tree into the typed AST in one top-down
//! pass, filling the [`Context`] as declarations are met.
//!
//! ## Structure
//!
//! ```text
//! cst_to_ast/
//! ├── mod.rs            - Converter state, error pre-pass, shared helpers
//! ├── statements.rs     - Items and statements, module calls, modifiers
//! ├── declarations.rs   - module, function and variable declarations
//! ├── control_flow.rs   - for, intersection_for, if, let, assign blocks
//! ├── arguments.rs      - call arguments and assert argument slots
//! ├── expressions.rs    - expression dispatch and postfix forms
//! ├── operators.rs      - unary, binary and ternary operators
//! ├── comprehensions.rs - lists, ranges and list comprehensions
//! └── literals.rs       - numbers, strings, booleans, include paths
//! ```
//!
//! Every category is one `match` over kind tags; a tag with no arm is
//! reported as [`ParseError::Unsupported`].
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::visitor::cst_to_ast::convert;
//!
//! let source = "cube(10);";
//! let cst = openscad_parser::parse(source);
//! let ast = convert(&cst.root, source).unwrap();
//! assert_eq!(ast.items.len(), 1);
//! ```

mod arguments;
mod comprehensions;
mod control_flow;
mod declarations;
mod expressions;
mod literals;
mod operators;
mod statements;

use crate::ast::{Assignment, Ast, Name, Param};
use crate::context::{Context, ScopeKind};
use crate::cst::SyntaxNode;
use crate::error::ParseError;
use crate::span::Span;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use tracing::debug;

pub(crate) const SOURCE_FILE: &str = "source_file";

// =============================================================================
// PUBLIC API
// =============================================================================

/// Convert a `source_file` CST into an [`Ast`].
///
/// Fails with [`ParseError::Syntax`] at the first error or missing node
/// (depth first, leftmost first) before any AST is built.
pub fn convert<N: SyntaxNode>(root: &N, source: &str) -> Result<Ast, ParseError> {
    debug!(bytes = source.len(), "converting CST");

    if let Some(error) = first_error(root, source) {
        debug!(%error, "CST contains errors");
        return Err(error);
    }
    if root.kind() != SOURCE_FILE {
        return Err(ParseError::unsupported(root.kind(), root.span()));
    }

    let span = root.span();
    let mut converter = Converter::new(source, span.clone());
    let items = root
        .children()
        .iter()
        .map(|child| converter.convert_item(child))
        .collect::<Result<Vec<_>, _>>()?;

    let mut context = converter.ctx;
    context.finish();
    debug!(
        items = items.len(),
        scopes = context.scopes.len(),
        modules = context.modules.len(),
        functions = context.functions.len(),
        "converted CST"
    );

    Ok(Ast { items, span, context })
}

// =============================================================================
// ERROR PRE-PASS
// =============================================================================

/// Leftmost, outermost error or missing node as a syntax error.
pub(crate) fn first_error<N: SyntaxNode>(node: &N, source: &str) -> Option<ParseError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        if node.is_missing() {
            return Some(ParseError::syntax(format!("missing '{}'", node.kind()), node.span()));
        }
        if node.is_error() {
            let text = node.text(source).trim();
            let message = match text.chars().next() {
                None => "unexpected end of input".to_string(),
                Some(_) => format!("unexpected '{}'", first_line(text)),
            };
            return Some(ParseError::syntax(message, node.span()));
        }
        node.children().iter().find_map(|child| first_error(child, source))
    })
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

// =============================================================================
// CONVERTER STATE
// =============================================================================

/// Conversion state threaded through the recursive descent.
pub(crate) struct Converter<'s> {
    pub(crate) source: &'s str,
    pub(crate) ctx: Context,
}

impl<'s> Converter<'s> {
    pub(crate) fn new(source: &'s str, span: Span) -> Self {
        Self {
            source,
            ctx: Context::new(span),
        }
    }

    /// Run `f` inside a fresh scope, closing it on every exit path.
    pub(crate) fn scoped<T>(
        &mut self,
        kind: ScopeKind,
        span: Span,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.ctx.push_scope(kind, span);
        let result = f(self);
        self.ctx.pop_scope();
        result
    }

    pub(crate) fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || f(self))
    }

    /// Span of `node` carrying its source text.
    pub(crate) fn span_with_text<N: SyntaxNode>(&self, node: &N) -> Span {
        node.span().with_text(self.source)
    }

    pub(crate) fn name<N: SyntaxNode>(&self, node: &N) -> Result<Name, ParseError> {
        match node.kind() {
            "identifier" | "special_variable" => {
                Ok(Name::new(node.text(self.source), self.span_with_text(node)))
            }
            other => Err(ParseError::unsupported(other, node.span())),
        }
    }

    pub(crate) fn name_field<N: SyntaxNode>(&self, node: &N) -> Result<Name, ParseError> {
        self.name(required(node, "name")?)
    }

    // =========================================================================
    // BINDINGS AND PARAMETERS
    // =========================================================================

    /// Convert an `assignments` node, recording each binding in the current
    /// scope as it is met.
    pub(crate) fn assignments<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Assignment>, ParseError> {
        if node.kind() != "assignments" {
            return Err(ParseError::unsupported(node.kind(), node.span()));
        }
        let mut bindings = Vec::with_capacity(node.children().len());
        for child in node.children() {
            if child.kind() != "assignment" {
                return Err(ParseError::unsupported(child.kind(), child.span()));
            }
            let name = self.name_field(child)?;
            let value = self.convert_expr(required(child, "value")?)?;
            let span = child.span();
            self.ctx.assign(&name, &value, &span);
            bindings.push(Assignment { name, value, span });
        }
        Ok(bindings)
    }

    pub(crate) fn bindings_field<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Assignment>, ParseError> {
        self.assignments(required(node, "bindings")?)
    }

    /// Convert a `parameters` node. Defaults are converted in the enclosing
    /// scope; declaring the names is left to the caller's new scope.
    pub(crate) fn parameters<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Param>, ParseError> {
        let Some(list) = node.child("parameters") else {
            return Ok(Vec::new());
        };
        if list.kind() != "parameters" {
            return Err(ParseError::unsupported(list.kind(), list.span()));
        }
        list.children()
            .iter()
            .map(|child| {
                if child.kind() != "parameter" {
                    return Err(ParseError::unsupported(child.kind(), child.span()));
                }
                Ok(Param {
                    name: self.name_field(child)?,
                    default_expr: child.child("default").map(|d| self.convert_expr(d)).transpose()?,
                    span: child.span(),
                })
            })
            .collect()
    }

    pub(crate) fn declare_params(&mut self, params: &[Param]) {
        for param in params {
            self.ctx.declare(&param.name, param.default_expr.as_ref());
        }
    }
}

/// Child stored under `field`, or a syntax error naming the gap.
pub(crate) fn required<'n, N: SyntaxNode>(node: &'n N, field: &str) -> Result<&'n N, ParseError> {
    node.child(field)
        .ok_or_else(|| ParseError::syntax(format!("`{}` has no {field}", node.kind()), node.span()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Item, Stmt};

    fn convert_source(source: &str) -> Result<Ast, ParseError> {
        convert(&openscad_parser::parse(source).root, source)
    }

    #[test]
    fn test_convert_items() {
        let ast = convert_source("cube(10); sphere(5);").unwrap();
        assert_eq!(ast.items.len(), 2);
        assert!(matches!(ast.items[0], Item::Stmt(Stmt::TransformChain { .. })));
    }

    #[test]
    fn test_empty_source() {
        let ast = convert_source("").unwrap();
        assert!(ast.items.is_empty());
        assert_eq!(ast.context.scopes.len(), 1);
    }

    #[test]
    fn test_missing_token_message() {
        let err = convert_source("cube(").unwrap_err();
        match err {
            ParseError::Syntax { message, span } => {
                assert_eq!(message, "missing ')'");
                assert!(span.is_empty());
                assert_eq!(span.start_byte, 5);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_node_message() {
        let err = convert_source("cube(1); ) sphere(2);").unwrap_err();
        match err {
            ParseError::Syntax { message, span } => {
                assert!(message.starts_with("unexpected ')"), "{message}");
                assert_eq!(span.start_byte, 9);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_leftmost_error_wins() {
        let err = convert_source("a = (1;\nb = [2;").unwrap_err();
        assert_eq!(err.span().start_row, 0);
    }

    #[test]
    fn test_scopes_are_closed_after_conversion() {
        let ast = convert_source("module m() { let (a = 1) cube(a); }").unwrap();
        assert_eq!(ast.context.current_scope(), crate::context::ScopeId::ROOT);
        assert_eq!(ast.context.scopes.len(), 3);
    }
}
