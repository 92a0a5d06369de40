//! # Literal Transformation
//!
//! Decodes literal leaves into AST values.
//!
//! ## Supported Literals
//!
//! - Numbers: `42`, `3.14`, `.5`, `1.`, `1e-3`
//! - Strings: `"hello"`, with `\n \t \r \" \\ \xNN \uNNNN \UNNNNNN` escapes
//! - Booleans: `true`, `false`
//! - Include paths: `<lib/file.scad>`

use crate::ast::Literal;
use crate::cst::SyntaxNode;
use crate::error::ParseError;

// =============================================================================
// NUMBER
// =============================================================================

/// Decode a number leaf. Literals too large for `f64` become infinity.
pub(crate) fn number<N: SyntaxNode>(node: &N, source: &str) -> Result<Literal, ParseError> {
    let text = node.text(source);
    text.parse::<f64>()
        .map(Literal::Number)
        .map_err(|_| ParseError::syntax(format!("invalid number '{text}'"), node.span()))
}

// =============================================================================
// STRING
// =============================================================================

/// Strip the quotes of a string leaf and decode its escapes.
///
/// Unknown or malformed escapes are kept as written.
pub(crate) fn string(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .map(|s| s.strip_suffix('"').unwrap_or(s))
        .unwrap_or(raw);
    unescape(inner)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(kind @ ('x' | 'u' | 'U')) => {
                let digits = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 6,
                };
                let hex: String = chars.clone().take(digits).collect();
                let decoded = (hex.len() == digits && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .filter(|&code| code != 0)
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..digits {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(kind);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

// =============================================================================
// BOOLEAN
// =============================================================================

pub(crate) fn boolean<N: SyntaxNode>(node: &N, source: &str) -> Result<Literal, ParseError> {
    match node.text(source) {
        "true" => Ok(Literal::Bool(true)),
        "false" => Ok(Literal::Bool(false)),
        other => Err(ParseError::syntax(format!("invalid boolean '{other}'"), node.span())),
    }
}

// =============================================================================
// INCLUDE PATH
// =============================================================================

/// Path of an `include`/`use` statement without its angle brackets.
pub(crate) fn include_path<N: SyntaxNode>(node: &N, source: &str) -> Result<String, ParseError> {
    let text = node.text(source);
    text.strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .map(str::to_string)
        .ok_or_else(|| ParseError::syntax(format!("malformed include path '{text}'"), node.span()))
}
