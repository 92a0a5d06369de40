//! # Semantic Context
//!
//! Side table built alongside the AST: nested scopes with their declared
//! names, the special-variable registry, and the module/function registries.
//!
//! Scopes nest with block constructs and are popped on block exit. The
//! registries are flat: they record every definition seen anywhere, and a
//! later definition of the same name replaces the earlier one.
//!
//! ## Example
//!
//! ```rust
//! let ast = openscad_ast::parse("$fn = 32; module m() cube(1); module m() sphere(1);").unwrap();
//! assert!(ast.context.special("$fn").is_some());
//! assert_eq!(ast.context.modules.len(), 1);
//! ```

use crate::ast::{Expr, Name, Param};
use crate::span::Span;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Index of a scope in [`Context::scopes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Construct that opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Root,
    Module,
    Function,
    Let,
    For,
    Assign,
    Comprehension,
    FunctionLiteral,
    Block,
}

/// One lexical scope. Its span covers the construct that opened it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub id: ScopeId,
    /// `None` only for the root.
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub span: Span,
    /// Declared names; redeclaring replaces the value.
    pub names: IndexMap<String, Binding>,
}

/// A declared name in a [`Scope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// The name as declared, with the span of its declaring identifier.
    pub name: Name,
    /// Unevaluated value; `None` for a parameter without a default.
    pub value: Option<Expr>,
}

/// Last assignment seen for a special variable such as `$fn`.
///
/// Specials are dynamically scoped in OpenSCAD, so the registry is flat and
/// keeps only the latest assignment in source order, whichever scope it
/// appears in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialBinding {
    /// Right-hand side, unevaluated.
    pub value: Expr,
    /// Span of the assignment.
    pub span: Span,
}

/// Registered `module` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSig {
    pub name: Name,
    /// Parameters in declaration order, defaults included.
    pub params: Vec<Param>,
    /// Span of the whole definition.
    pub span: Span,
    /// Scope enclosing the definition.
    pub scope: ScopeId,
}

/// Registered `function` definition. Function literals are not registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSig {
    pub name: Name,
    /// Parameters in declaration order, defaults included.
    pub params: Vec<Param>,
    /// Span of the whole definition.
    pub span: Span,
    /// Scope enclosing the definition.
    pub scope: ScopeId,
}

/// Scopes and registries of one converted source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Every scope opened, in opening order; index 0 is the root.
    pub scopes: Vec<Scope>,
    /// Keyed by name including the `$`, in order of first assignment.
    pub specials: IndexMap<String, SpecialBinding>,
    pub modules: IndexMap<String, ModuleSig>,
    pub functions: IndexMap<String, FunctionSig>,
    /// Open scopes, innermost last. Only meaningful while building.
    #[serde(skip)]
    stack: Vec<ScopeId>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Span::default())
    }
}

impl Context {
    /// Context holding only the root scope.
    pub fn new(span: Span) -> Self {
        Self {
            scopes: vec![Scope {
                id: ScopeId::ROOT,
                parent: None,
                kind: ScopeKind::Root,
                span,
                names: IndexMap::new(),
            }],
            specials: IndexMap::new(),
            modules: IndexMap::new(),
            functions: IndexMap::new(),
            stack: vec![ScopeId::ROOT],
        }
    }

    // =========================================================================
    // BUILDING
    // =========================================================================

    /// Innermost open scope.
    pub fn current_scope(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Open a child of the current scope.
    pub fn push_scope(&mut self, kind: ScopeKind, span: Span) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let parent = Some(self.current_scope());
        trace!(?id, ?kind, "push scope");
        self.scopes.push(Scope {
            id,
            parent,
            kind,
            span,
            names: IndexMap::new(),
        });
        self.stack.push(id);
        id
    }

    /// Close the current scope. The root scope is never popped.
    pub fn pop_scope(&mut self) -> Option<ScopeId> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Declare a name in the current scope.
    pub fn declare(&mut self, name: &Name, value: Option<&Expr>) {
        let id = self.current_scope();
        if let Some(scope) = self.scopes.get_mut(id.0) {
            scope.names.insert(
                name.text.clone(),
                Binding {
                    name: name.clone(),
                    value: value.cloned(),
                },
            );
        }
    }

    /// Record an assignment: declares the name and, for `$` names, updates
    /// the special-variable registry.
    pub fn assign(&mut self, name: &Name, value: &Expr, span: &Span) {
        self.declare(name, Some(value));
        if name.is_special() {
            self.specials.insert(
                name.text.clone(),
                SpecialBinding {
                    value: value.clone(),
                    span: span.clone(),
                },
            );
        }
    }

    /// Close every scope; the context is read-only from here on.
    pub(crate) fn finish(&mut self) {
        self.stack.clear();
    }

    pub fn define_module(&mut self, name: &Name, params: &[Param], span: &Span) {
        let sig = ModuleSig {
            name: name.clone(),
            params: params.to_vec(),
            span: span.clone(),
            scope: self.current_scope(),
        };
        if self.modules.insert(name.text.clone(), sig).is_some() {
            trace!(name = %name.text, "module redefined");
        }
    }

    pub fn define_function(&mut self, name: &Name, params: &[Param], span: &Span) {
        let sig = FunctionSig {
            name: name.clone(),
            params: params.to_vec(),
            span: span.clone(),
            scope: self.current_scope(),
        };
        if self.functions.insert(name.text.clone(), sig).is_some() {
            trace!(name = %name.text, "function redefined");
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleSig> {
        self.modules.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSig> {
        self.functions.get(name)
    }

    pub fn special(&self, name: &str) -> Option<&SpecialBinding> {
        self.specials.get(name)
    }

    /// Resolve `name` starting at `scope`, walking outwards; the innermost
    /// declaration wins.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        let mut current = self.scope(scope);
        while let Some(s) = current {
            if let Some(binding) = s.names.get(name) {
                return Some(binding);
            }
            current = s.parent.and_then(|p| self.scope(p));
        }
        None
    }

    /// Innermost scope whose span contains `span`.
    pub fn scope_at(&self, span: &Span) -> ScopeId {
        // Children are pushed after their parents, so the last match is the
        // innermost one.
        self.scopes
            .iter()
            .rev()
            .find(|s| s.span.contains(span))
            .map_or(ScopeId::ROOT, |s| s.id)
    }
}
