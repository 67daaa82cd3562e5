//! Named type declarations grouped by scope.
//!
//! A [`Scope`] corresponds to a Go package: the declarations in it can refer
//! to each other by bare name. Declarations are kept in insertion order and
//! a redeclared name silently replaces the earlier shape.

use indexmap::IndexMap;
use log::trace;

use crate::type_expr::TypeExpr;

/// All extracted scopes, keyed by scope id.
pub type Scopes = IndexMap<String, Scope>;

/// A declared type name together with its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    shape: TypeExpr,
}

impl Declaration {
    /// Creates a declaration of `name` with the given shape.
    pub fn new(name: impl Into<String>, shape: TypeExpr) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Returns the declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared shape.
    pub fn shape(&self) -> &TypeExpr {
        &self.shape
    }
}

/// A package-like namespace of declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    id: String,
    declarations: IndexMap<String, Declaration>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            declarations: IndexMap::new(),
        }
    }

    /// Returns the scope id (the package name).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Inserts a declaration, replacing any earlier one with the same name.
    ///
    /// Returns the replaced declaration, if any.
    pub fn insert(&mut self, declaration: Declaration) -> Option<Declaration> {
        let replaced = self
            .declarations
            .insert(declaration.name.clone(), declaration);
        if let Some(old) = &replaced {
            trace!(scope = self.id, name = old.name; "Declaration replaced");
        }
        replaced
    }

    /// Looks up a declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Returns `true` if `name` is declared in this scope.
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Iterates declarations in insertion order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Returns the declarations sorted by name.
    pub fn sorted_declarations(&self) -> Vec<&Declaration> {
        let mut declarations: Vec<_> = self.declarations.values().collect();
        declarations.sort_by(|a, b| a.name.cmp(&b.name));
        declarations
    }

    /// Returns the number of declarations.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if nothing is declared in this scope.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
