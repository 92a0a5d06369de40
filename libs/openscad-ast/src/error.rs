//! # Conversion Errors
//!
//! Every failure aborts the `parse`/`parse_strict` call; no partial tree is
//! returned.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic rule broken in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SemanticKind {
    /// `let`, `for`, `assign`, `intersection_for` or comprehension with no bindings.
    #[error("empty binding list")]
    EmptyBinding,
    /// `multmatrix` matrix that is not 3 or 4 rows of 4 columns.
    #[error("invalid matrix shape")]
    InvalidMatrixShape,
    /// The same named argument given twice in one call.
    #[error("duplicate named argument")]
    DuplicateNamedArg,
    /// The same parameter declared twice in one parameter list.
    #[error("duplicate parameter")]
    DuplicateParameter,
    /// A range whose step is the literal `0`.
    #[error("zero range step")]
    ZeroRangeStep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum ParseError {
    /// The CST contains an error or missing node.
    #[error("syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    /// Strict-mode rule violation.
    #[error("{kind} at {span}: {details}")]
    Semantic {
        kind: SemanticKind,
        span: Span,
        details: String,
    },

    /// A CST node kind the converter has no mapping for.
    #[error("unsupported syntax node `{node_type}` at {span}")]
    Unsupported { node_type: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::Semantic { span, .. }
            | ParseError::Unsupported { span, .. } => span,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::Syntax {
            message: message.into(),
            span,
        }
    }

    pub(crate) fn semantic(kind: SemanticKind, span: Span, details: impl Into<String>) -> Self {
        ParseError::Semantic {
            kind,
            span,
            details: details.into(),
        }
    }

    pub(crate) fn unsupported(node_type: impl Into<String>, span: Span) -> Self {
        ParseError::Unsupported {
            node_type: node_type.into(),
            span,
        }
    }

    /// The semantic rule broken, for strict-mode failures.
    pub fn semantic_kind(&self) -> Option<SemanticKind> {
        match self {
            ParseError::Semantic { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let span = Span::new(4..5, (1, 2), (1, 3));
        let err = ParseError::semantic(SemanticKind::EmptyBinding, span.clone(), "let has no bindings");
        assert_eq!(err.to_string(), "empty binding list at 2:3: let has no bindings");
        assert_eq!(err.semantic_kind(), Some(SemanticKind::EmptyBinding));

        let err = ParseError::unsupported("mystery", span);
        assert_eq!(err.to_string(), "unsupported syntax node `mystery` at 2:3");
        assert_eq!(err.semantic_kind(), None);
    }
}
