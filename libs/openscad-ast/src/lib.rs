//! # OpenSCAD AST Crate
//!
//! Converts the OpenSCAD CST into a typed AST for OpenSCAD programs, builds
//! the semantic [`Context`] in the same pass, and prints the AST back to
//! source. Every node carries source span information for diagnostics.
//!
//! ## Architecture
//!
//! ```text
//! OpenSCAD Source → openscad-parser (CST) → openscad-ast (AST + Context)
//!                                              ├── validate (strict mode)
//!                                              ├── Visitor consumers
//!                                              └── print
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::{parse, parse_strict, print, SemanticKind, SpanlessEq};
//!
//! let ast = parse("union() { cube(10); sphere(5); }").unwrap();
//! let again = parse(&print(&ast)).unwrap();
//! assert!(ast.spanless_eq(&again));
//!
//! let err = parse_strict("let () cube(1);").unwrap_err();
//! assert_eq!(err.semantic_kind(), Some(SemanticKind::EmptyBinding));
//! ```
//!
//! ## Design Principles
//!
//! - **Typed AST**: All nodes are strongly typed Rust enums/structs
//! - **Source Mapping**: Every node carries a byte and row/column [`Span`]
//! - **No Evaluation**: Pure syntax transformation; values stay unevaluated
//! - **Closed World**: CST kinds without a mapping fail as `Unsupported`
//! - **Read-Only Result**: an [`Ast`] is never mutated after conversion, so
//!   any number of threads may walk one tree at once

pub mod ast;
pub mod context;
pub mod cst;
pub mod diagnostic;
pub mod eq;
pub mod error;
pub mod printer;
pub mod span;
pub mod validate;
pub mod visitor;

// Re-exports for convenience
pub use ast::*;
pub use context::{Binding, Context, FunctionSig, ModuleSig, Scope, ScopeId, ScopeKind, SpecialBinding};
pub use cst::SyntaxNode;
pub use diagnostic::{special_variable_warnings, Diagnostic, Severity};
pub use eq::SpanlessEq;
pub use error::{ParseError, SemanticKind};
pub use printer::{print, print_with};
pub use span::{Span, Spanned};
pub use validate::validate;
pub use visitor::{walk_expr, walk_item, walk_stmt, Visitor};

use tracing::debug;

/// Parse OpenSCAD source into an [`Ast`].
///
/// # Errors
///
/// [`ParseError::Syntax`] at the first malformed construct, or
/// [`ParseError::Unsupported`] for a CST node kind with no mapping.
pub fn parse(source: &str) -> Result<Ast, ParseError> {
    let cst = openscad_parser::parse(source);
    debug!(errors = cst.errors.len(), "CST built");
    visitor::cst_to_ast::convert(&cst.root, source)
}

/// [`parse`], then reject the first strict-mode violation.
///
/// # Errors
///
/// Everything [`parse`] returns, plus [`ParseError::Semantic`].
pub fn parse_strict(source: &str) -> Result<Ast, ParseError> {
    let ast = parse(source)?;
    validate(&ast)?;
    Ok(ast)
}

/// Convert a CST produced elsewhere. `root` must be a `source_file` node
/// whose byte ranges index into `source`.
///
/// # Errors
///
/// As [`parse`].
pub fn parse_from_cst<N: SyntaxNode>(root: &N, source: &str) -> Result<Ast, ParseError> {
    visitor::cst_to_ast::convert(root, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_strict_agree_on_valid_input() {
        let source = "$fn = 16; module m(r) sphere(r); m(2);";
        let loose = parse(source).unwrap();
        let strict = parse_strict(source).unwrap();
        assert_eq!(loose, strict);
    }

    #[test]
    fn test_parse_from_cst_matches_parse() {
        let source = "translate([1, 2, 3]) cube(1);";
        let cst = openscad_parser::parse(source);
        assert_eq!(parse_from_cst(&cst.root, source).unwrap(), parse(source).unwrap());
    }

    #[test]
    fn test_strict_reports_syntax_before_semantics() {
        let err = parse_strict("let () cube(").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
