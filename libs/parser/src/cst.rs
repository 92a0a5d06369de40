//! # Concrete Syntax Tree (CST)
//!
//! CST types representing parsed OpenSCAD source code.
//!
//! Every node exposes a stable kind tag ([`NodeKind::as_str`]), a source
//! span, the ordered list of its named children (each optionally tagged
//! with a field name such as `"name"` or `"body"`), and two recovery flags:
//! `ERROR` nodes wrap tokens the parser had to skip, and *missing* nodes
//! are zero-width placeholders for a delimiter that was not there.
//!
//! Anonymous punctuation (`(`, `,`, `;`, ...) never appears as a node;
//! operators and modifiers are kept as named leaves because they carry
//! meaning.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::cst::NodeKind;
//!
//! let cst = openscad_parser::parse("cube(10);");
//! assert_eq!(cst.root.kind, NodeKind::SourceFile);
//! assert_eq!(cst.root.children[0].kind.as_str(), "module_call");
//! ```

use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// CST
// =============================================================================

/// Concrete Syntax Tree result.
///
/// Contains the root node and any parse errors. The tree is always
/// complete: errors are also present in it as `ERROR`/missing nodes.
#[derive(Debug, Clone)]
pub struct Cst {
    /// Root node of the syntax tree.
    pub root: CstNode,
    /// Parse errors encountered, in source order.
    pub errors: Vec<ParseError>,
}

impl Cst {
    /// Create a new CST.
    pub fn new(root: CstNode, errors: Vec<ParseError>) -> Self {
        Self { root, errors }
    }

    /// Check if parsing was successful (no errors).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// CST NODE
// =============================================================================

/// A node in the Concrete Syntax Tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CstNode {
    /// Node type.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Field name under which the parent holds this node.
    pub field: Option<&'static str>,
    /// Named child nodes, in source order.
    pub children: Vec<CstNode>,
    /// True for zero-width placeholders inserted during error recovery.
    pub missing: bool,
}

impl CstNode {
    /// Create a leaf node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            field: None,
            children: Vec::new(),
            missing: false,
        }
    }

    /// Create node with children.
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            children,
            ..Self::new(kind, span)
        }
    }

    /// Zero-width placeholder for a token the parser expected but did not
    /// find. Its kind is the missing token itself.
    pub fn missing(expected: TokenKind, span: Span) -> Self {
        Self {
            missing: true,
            ..Self::new(NodeKind::Token(expected), span)
        }
    }

    /// Tag this node with the field name its parent stores it under.
    pub fn in_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: CstNode) {
        self.children.push(child);
    }

    /// True for `ERROR` nodes.
    pub fn is_error(&self) -> bool {
        self.kind == NodeKind::Error
    }

    /// Source text of this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.span.start.byte..self.span.end.byte)
            .unwrap_or_default()
    }

    /// First child stored under `field`.
    pub fn child_by_field(&self, field: &str) -> Option<&CstNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    /// Find first child with given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// True when this node or any descendant is an error or missing node.
    pub fn has_error(&self) -> bool {
        self.is_error() || self.missing || self.children.iter().any(CstNode::has_error)
    }
}

impl Spanned for CstNode {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of CST nodes.
///
/// [`NodeKind::as_str`] yields the grammar name consumers dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Top-level
    /// Root node containing all statements.
    SourceFile,

    // Statements
    /// Module call like `cube(10);` or `translate(v) child`.
    ModuleCall,
    /// Braced statement list `{ ... }`.
    UnionBlock,
    /// Lone `;`.
    EmptyStatement,
    /// Modifier applied to a statement, like `#cube(1);`.
    ModifierChain,
    /// Variable assignment like `x = 10;`.
    VarDeclaration,
    /// Module definition like `module foo() { ... }`.
    ModuleItem,
    /// Function definition like `function foo() = ...;`.
    FunctionItem,
    /// `for (i = [0:10]) ...`.
    ForBlock,
    /// `intersection_for (i = [0:3]) ...`.
    IntersectionForBlock,
    /// `if (c) ... else ...`.
    IfBlock,
    /// `let (x = 1) ...`.
    LetBlock,
    /// `assign (x = 1) ...`.
    AssignBlock,
    /// `include <path>`.
    IncludeStatement,
    /// `use <path>`.
    UseStatement,
    /// `assert(cond, msg) ...` in statement position.
    AssertStatement,

    // Bindings, arguments, parameters
    /// Comma-separated `name = value` list.
    Assignments,
    /// Single `name = value` binding.
    Assignment,
    /// Call arguments `(10, center=true)`.
    Arguments,
    /// Named argument `center=true`.
    NamedArgument,
    /// Parameter list `(x, y=0)`.
    Parameters,
    /// Single parameter.
    Parameter,

    // Expressions
    /// Binary operation like `a + b`.
    BinaryExpression,
    /// Unary operation like `-x` or `!x`.
    UnaryExpression,
    /// Ternary operation like `a ? b : c`.
    TernaryExpression,
    /// Parenthesized expression `(a)`.
    ParenthesizedExpression,
    /// Function call like `sin(x)`.
    FunctionCall,
    /// Index access like `arr[0]`.
    IndexExpression,
    /// Dot access like `v.x`.
    DotIndexExpression,
    /// `let (a = 1) expr`.
    LetExpression,
    /// `assert(cond) expr`.
    AssertExpression,
    /// `echo(args) expr`.
    EchoExpression,
    /// Function literal `function (x) x * 2`.
    FunctionLiteral,
    /// List literal like `[1, 2, 3]`.
    List,
    /// Range like `[0:10]` or `[0:1:10]`.
    Range,
    /// `for (...) element` inside a list.
    ListComprehension,
    /// `if (c) element else element` inside a list.
    IfComprehension,
    /// `each expr` inside a list.
    Each,

    // Terminals
    /// Identifier like `cube` or `myVar`.
    Identifier,
    /// Special variable like `$fn` or `$fa`.
    SpecialVariable,
    /// Number literal like `10` or `3.14`.
    Number,
    /// String literal like `"hello"`.
    String,
    /// Boolean literal `true` or `false`.
    Boolean,
    /// Undef literal.
    Undef,
    /// Operator of a unary or binary expression.
    Operator,
    /// Statement modifier `*`, `!`, `#` or `%`.
    Modifier,
    /// `<path>` of an include or use.
    IncludePath,

    // Recovery
    /// Tokens skipped during error recovery.
    Error,
    /// A token-shaped node; only produced as a missing placeholder.
    Token(TokenKind),
}

impl NodeKind {
    /// Stable grammar name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SourceFile => "source_file",
            Self::ModuleCall => "module_call",
            Self::UnionBlock => "union_block",
            Self::EmptyStatement => "empty_statement",
            Self::ModifierChain => "modifier_chain",
            Self::VarDeclaration => "var_declaration",
            Self::ModuleItem => "module_item",
            Self::FunctionItem => "function_item",
            Self::ForBlock => "for_block",
            Self::IntersectionForBlock => "intersection_for_block",
            Self::IfBlock => "if_block",
            Self::LetBlock => "let_block",
            Self::AssignBlock => "assign_block",
            Self::IncludeStatement => "include_statement",
            Self::UseStatement => "use_statement",
            Self::AssertStatement => "assert_statement",
            Self::Assignments => "assignments",
            Self::Assignment => "assignment",
            Self::Arguments => "arguments",
            Self::NamedArgument => "named_argument",
            Self::Parameters => "parameters",
            Self::Parameter => "parameter",
            Self::BinaryExpression => "binary_expression",
            Self::UnaryExpression => "unary_expression",
            Self::TernaryExpression => "ternary_expression",
            Self::ParenthesizedExpression => "parenthesized_expression",
            Self::FunctionCall => "function_call",
            Self::IndexExpression => "index_expression",
            Self::DotIndexExpression => "dot_index_expression",
            Self::LetExpression => "let_expression",
            Self::AssertExpression => "assert_expression",
            Self::EchoExpression => "echo_expression",
            Self::FunctionLiteral => "function_literal",
            Self::List => "list",
            Self::Range => "range",
            Self::ListComprehension => "list_comprehension",
            Self::IfComprehension => "if_comprehension",
            Self::Each => "each",
            Self::Identifier => "identifier",
            Self::SpecialVariable => "special_variable",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Undef => "undef",
            Self::Operator => "operator",
            Self::Modifier => "modifier",
            Self::IncludePath => "include_path",
            Self::Error => "ERROR",
            Self::Token(kind) => kind.text(),
        }
    }

    /// Check if this is a literal node.
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Number | Self::String | Self::Boolean | Self::Undef
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cst_node_fields() {
        let mut parent = CstNode::new(NodeKind::ModuleCall, Span::from_bytes(0, 9));
        parent.add_child(CstNode::new(NodeKind::Identifier, Span::from_bytes(0, 4)).in_field("name"));
        parent.add_child(CstNode::new(NodeKind::Arguments, Span::from_bytes(4, 8)).in_field("arguments"));

        assert_eq!(
            parent.child_by_field("name").map(|n| n.kind),
            Some(NodeKind::Identifier)
        );
        assert!(parent.child_by_field("body").is_none());
        assert!(parent.find_child(NodeKind::Arguments).is_some());
    }

    #[test]
    fn test_missing_node_kind_is_token_text() {
        let node = CstNode::missing(TokenKind::RParen, Span::from_bytes(5, 5));
        assert!(node.missing);
        assert_eq!(node.kind.as_str(), ")");
        assert!(node.span.is_empty());
    }

    #[test]
    fn test_has_error_searches_descendants() {
        let mut root = CstNode::new(NodeKind::SourceFile, Span::zero());
        let mut call = CstNode::new(NodeKind::ModuleCall, Span::zero());
        assert!(!call.has_error());
        call.add_child(CstNode::new(NodeKind::Error, Span::zero()));
        root.add_child(call);
        assert!(root.has_error());
    }

    #[test]
    fn test_text_slices_source() {
        let node = CstNode::new(NodeKind::Identifier, Span::from_bytes(0, 4));
        assert_eq!(node.text("cube(1);"), "cube");
    }

    #[test]
    fn test_node_kind_names() {
        assert_eq!(NodeKind::Error.as_str(), "ERROR");
        assert_eq!(NodeKind::ListComprehension.as_str(), "list_comprehension");
        assert!(NodeKind::Number.is_literal());
        assert!(!NodeKind::Identifier.is_literal());
    }
}
