//! # Argument Transformation
//!
//! Transforms CST argument lists to AST arguments.
//! Shared between module calls, function calls, `echo` and `assert`.
//!
//! ```text
//! cube(10, center = true);  // [Positional(10), Named(center, true)]
//! sphere(5, $fn = 32);      // [Positional(5), Named($fn, 32)]
//! ```

use super::Converter;
use crate::ast::Arg;
use crate::cst::SyntaxNode;
use crate::error::ParseError;

impl<'s> Converter<'s> {
    /// Arguments under the `arguments` field; none when the field is absent.
    pub(crate) fn arguments_field<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Arg>, ParseError> {
        match node.child("arguments") {
            Some(list) => self.arguments(list),
            None => Ok(Vec::new()),
        }
    }

    fn arguments<N: SyntaxNode>(&mut self, node: &N) -> Result<Vec<Arg>, ParseError> {
        if node.kind() != "arguments" {
            return Err(ParseError::unsupported(node.kind(), node.span()));
        }
        node.children().iter().map(|child| self.argument(child)).collect()
    }

    fn argument<N: SyntaxNode>(&mut self, node: &N) -> Result<Arg, ParseError> {
        if node.kind() != "named_argument" {
            return Ok(Arg::Positional(self.convert_expr(node)?));
        }
        let name = self.name_field(node)?;
        let value = self.convert_expr(super::required(node, "value")?)?;
        Ok(Arg::Named {
            name,
            value,
            span: node.span(),
        })
    }
}
