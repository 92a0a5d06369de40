//! # OpenSCAD Parser (Pure Rust)
//!
//! A pure Rust parser for OpenSCAD source code.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CST
//! ```
//!
//! The CST always covers the whole input. Syntax problems are reported in
//! [`Cst::errors`] and also appear in the tree as `ERROR` or missing nodes,
//! so a consumer can locate the first one by walking the tree.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::parse;
//!
//! let result = parse("cube(10);");
//! assert!(result.errors.is_empty());
//! ```

pub mod cst;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use cst::{Cst, CstNode, NodeKind};
pub use error::{ParseError, ParseErrorKind};
pub use span::{Position, Span, Spanned};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse OpenSCAD source code into a Concrete Syntax Tree.
///
/// ## Example
///
/// ```rust
/// use openscad_parser::parse;
///
/// let cst = parse("cube(10);");
/// assert!(cst.is_ok());
/// assert_eq!(cst.root.kind, openscad_parser::NodeKind::SourceFile);
///
/// let broken = parse("cube(;");
/// assert!(!broken.is_ok());
/// ```
pub fn parse(source: &str) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    let mut parser = parser::Parser::new(source, tokens);
    parser.parse()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_cube() {
        let cst = parse("cube(10);");
        assert!(cst.is_ok(), "Expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.children[0].kind, NodeKind::ModuleCall);
    }

    #[test]
    fn test_parse_program() {
        let cst = parse(indoc! {r#"
            include <MCAD/units.scad>
            $fn = 48;
            module ring(r = 10, w = 2) {
                difference() {
                    circle(r);
                    circle(r - w);
                }
            }
            function area(r) = PI * r ^ 2;
            pts = [for (a = [0:60:359]) [cos(a), sin(a)]];
            for (p = pts) translate(p) %ring(w = 1);
            echo(str("area: ", area(3)));
        "#});
        assert!(cst.is_ok(), "Expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 7);
    }

    #[test]
    fn test_error_recovery() {
        let cst = parse("cube(; sphere(5);");
        assert!(!cst.is_ok());
        assert!(!cst.root.children.is_empty());
        assert!(cst.root.has_error());
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let cst = parse("echo(\"abc);");
        assert!(cst
            .errors
            .iter()
            .any(|e| e.kind == ParseErrorKind::UnterminatedString));
    }
}
