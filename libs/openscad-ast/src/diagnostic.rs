//! # Diagnostics
//!
//! Editor-facing view of a [`ParseError`]. Unsupported nodes are reported
//! with [`Severity::Internal`] because they point at a grammar/converter
//! mismatch, not at the user's code.
//!
//! [`special_variable_warnings`] flags `$` assignments whose names OpenSCAD
//! does not define, which are usually misspellings such as `$Fn`.

use crate::context::Context;
use crate::error::ParseError;
use crate::span::Span;
use config::constants::KNOWN_SPECIAL_VARIABLES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    /// A tooling bug rather than a problem in the source.
    Internal,
}

/// A diagnostic message with severity and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
            hint: None,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.severity != Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Internal => "internal error",
        })
    }
}

/// `severity at row:col: message`, rows and columns 1-based, then the
/// hint on its own line.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}: {}",
            self.severity,
            self.span.start_row + 1,
            self.span.start_col + 1,
            self.message
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::from(&err)
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::Syntax { message, span } => Diagnostic::error(message.as_str(), span.clone()),
            ParseError::Semantic {
                kind,
                span,
                details,
            } => Diagnostic::error(format!("{kind}: {details}"), span.clone()),
            ParseError::Unsupported { node_type, span } => Diagnostic::new(
                Severity::Internal,
                format!("no conversion for syntax node `{node_type}`"),
                span.clone(),
            )
            .with_hint("the parser and converter are out of sync; please report this as a bug"),
        }
    }
}

/// One warning per assigned special variable that OpenSCAD does not know,
/// in order of first assignment.
pub fn special_variable_warnings(context: &Context) -> Vec<Diagnostic> {
    context
        .specials
        .iter()
        .filter(|(name, _)| !KNOWN_SPECIAL_VARIABLES.contains(&name.as_str()))
        .map(|(name, binding)| {
            Diagnostic::warning(
                format!("`{name}` is not a built-in special variable"),
                binding.span.clone(),
            )
            .with_hint("user-defined `$` variables are dynamically scoped; check the spelling")
        })
        .collect()
}
