//! # CST Contract
//!
//! The converter reads the concrete syntax tree through [`SyntaxNode`] only:
//! a kind tag, a source range, the ordered named children (each optionally
//! tagged with a field name), and the error/missing flags. Leaf text is
//! sliced from the source by byte range.
//!
//! [`openscad_parser::CstNode`] implements the trait; any other producer
//! that follows the same kind tags can be converted with
//! [`crate::parse_from_cst`].

use crate::span::Span;
use openscad_parser::CstNode;

/// Read-only view of a CST node.
pub trait SyntaxNode {
    /// Grammar kind tag, such as `"module_call"` or `"ERROR"`.
    fn kind(&self) -> &str;

    fn span(&self) -> Span;

    /// Named children in source order.
    fn children(&self) -> &[Self]
    where
        Self: Sized;

    /// Field name under which the parent holds this node.
    fn field(&self) -> Option<&str>;

    /// True for nodes wrapping tokens the parser could not fit.
    fn is_error(&self) -> bool;

    /// True for zero-width placeholders of expected tokens.
    fn is_missing(&self) -> bool;

    /// First child stored under `field`.
    fn child(&self, field: &str) -> Option<&Self>
    where
        Self: Sized,
    {
        self.children().iter().find(|c| c.field() == Some(field))
    }

    /// Source text covered by this node.
    fn text<'s>(&self, source: &'s str) -> &'s str
    where
        Self: Sized,
    {
        source.get(self.span().range()).unwrap_or_default()
    }
}

impl SyntaxNode for CstNode {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn span(&self) -> Span {
        self.span.into()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn field(&self) -> Option<&str> {
        self.field
    }

    fn is_error(&self) -> bool {
        CstNode::is_error(self)
    }

    fn is_missing(&self) -> bool {
        self.missing
    }
}
