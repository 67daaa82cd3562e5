//! Dependency resolution between declarations of one scope.
//!
//! [`depends_on`] lists every type name a shape mentions. [`resolve_edges`]
//! applies the port policy on top of it and keeps only the names declared in
//! the same scope.
//!
//! # Port policy
//!
//! - `Struct` and `Interface` declarations get one port per field or method,
//!   numbered from zero in declaration order.
//! - `Func` and `Channel` declarations get a single port `0` that collects
//!   every name found anywhere in the signature or element type.
//! - Every other shape produces no edges.
//!
//! A name referenced twice from the same port yields two edges.

use crate::{
    declaration::{Declaration, Scope},
    type_expr::TypeExpr,
};

/// A reference from one port of a declaration to another declaration of the
/// same scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    from: String,
    port: usize,
    to: String,
}

impl DependencyEdge {
    /// Creates an edge from `from` at `port` to `to`.
    pub fn new(from: impl Into<String>, port: usize, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            port,
            to: to.into(),
        }
    }

    /// Returns the name of the referencing declaration.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the structural position the reference originates from.
    pub fn port(&self) -> usize {
        self.port
    }

    /// Returns the name of the referenced declaration.
    pub fn to(&self) -> &str {
        &self.to
    }
}

/// Collects the type names referenced by `shape`, in a fixed order.
///
/// Pointers, arrays, channels and variadics unwrap to their element; maps
/// yield the key before the value; structs, interfaces and functions yield
/// their members in declaration order (parameters before results).
/// Qualified references appear as a single `scope.name` token, which never
/// matches a declaration. Opaque shapes contribute nothing.
pub fn depends_on(shape: &TypeExpr) -> Vec<String> {
    let mut names = Vec::new();
    collect(shape, &mut names);
    names
}

fn collect(shape: &TypeExpr, names: &mut Vec<String>) {
    match shape {
        TypeExpr::Named(name) => names.push(name.clone()),
        TypeExpr::Qualified { scope, name } => names.push(format!("{scope}.{name}")),
        TypeExpr::Pointer(inner)
        | TypeExpr::Array(inner)
        | TypeExpr::Channel(inner)
        | TypeExpr::Variadic(inner) => collect(inner, names),
        TypeExpr::Map { key, value } => {
            collect(key, names);
            collect(value, names);
        }
        TypeExpr::Func { params, results } => {
            for field in params.iter().chain(results) {
                collect(field.ty(), names);
            }
        }
        TypeExpr::Struct(fields) | TypeExpr::Interface(fields) => {
            for field in fields {
                collect(field.ty(), names);
            }
        }
        TypeExpr::Opaque(_) => {}
    }
}

/// Returns the referenced names of each port of a top-level shape.
///
/// The outer vector is indexed by port number. Shapes that do not take part
/// in edge construction return an empty vector.
pub fn port_dependencies(shape: &TypeExpr) -> Vec<Vec<String>> {
    match shape {
        TypeExpr::Func { .. } | TypeExpr::Channel(_) => vec![depends_on(shape)],
        TypeExpr::Struct(fields) | TypeExpr::Interface(fields) => {
            fields.iter().map(|field| depends_on(field.ty())).collect()
        }
        TypeExpr::Named(_)
        | TypeExpr::Qualified { .. }
        | TypeExpr::Pointer(_)
        | TypeExpr::Array(_)
        | TypeExpr::Map { .. }
        | TypeExpr::Variadic(_)
        | TypeExpr::Opaque(_) => Vec::new(),
    }
}

/// Resolves the edges leaving `declaration` within `scope`.
///
/// Names not declared in `scope` are dropped without error.
pub fn resolve_edges(declaration: &Declaration, scope: &Scope) -> Vec<DependencyEdge> {
    port_dependencies(declaration.shape())
        .into_iter()
        .enumerate()
        .flat_map(move |(port, names)| {
            names
                .into_iter()
                .filter(move |name| scope.contains(name))
                .map(move |name| DependencyEdge::new(declaration.name(), port, name))
        })
        .collect()
}
