//! The shape model of a declared type.
//!
//! A [`TypeExpr`] describes the right-hand side of a type declaration such as
//! `type Server struct { ... }`. The variant set is closed: anything the front
//! end cannot express with the structural variants becomes
//! [`TypeExpr::Opaque`] carrying a textual description, so that every walk
//! over a shape can stay total.

use std::fmt;

/// Structural shape of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A type referenced by a bare identifier, e.g. `Config`.
    Named(String),
    /// A type referenced through another package, e.g. `http.Handler`.
    ///
    /// Qualified references are never resolved to a declaration.
    Qualified { scope: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T` and `[N]T`
    Array(Box<TypeExpr>),
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `<-chan T` and `chan<- T`
    Channel(Box<TypeExpr>),
    /// `...T`, only valid as the type of a final parameter.
    Variadic(Box<TypeExpr>),
    /// `func(params) (results)`
    Func { params: Vec<Field>, results: Vec<Field> },
    /// `struct { fields }`
    Struct(Vec<Field>),
    /// `interface { methods }`
    Interface(Vec<Field>),
    /// Any shape outside the variants above, kept as display text.
    Opaque(String),
}

/// A group of names sharing one type.
///
/// Used for struct fields (`a, b int`), function parameters and results, and
/// interface methods. Embedded fields and unnamed parameters have no names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    names: Vec<String>,
    ty: TypeExpr,
}

impl Field {
    /// Creates a field with the given names.
    pub fn new<I, S>(names: I, ty: TypeExpr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    /// Creates a field without names, e.g. an embedded field or an unnamed
    /// parameter.
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    /// Returns the declared names, in source order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the type shared by all names of this field.
    pub fn ty(&self) -> &TypeExpr {
        &self.ty
    }
}

/// Top-level kind of a [`TypeExpr`], used to pick how a declaration is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `Named` and `Qualified`: the declaration aliases another type.
    Alias,
    Pointer,
    Array,
    Map,
    Channel,
    Variadic,
    Func,
    Struct,
    Interface,
    Opaque,
}

impl ShapeKind {
    /// Returns a lowercase name suitable for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Alias => "alias",
            ShapeKind::Pointer => "pointer",
            ShapeKind::Array => "array",
            ShapeKind::Map => "map",
            ShapeKind::Channel => "channel",
            ShapeKind::Variadic => "variadic",
            ShapeKind::Func => "func",
            ShapeKind::Struct => "struct",
            ShapeKind::Interface => "interface",
            ShapeKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TypeExpr {
    /// Creates a [`TypeExpr::Named`] reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a [`TypeExpr::Qualified`] reference.
    pub fn qualified(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// Creates a [`TypeExpr::Pointer`] to `inner`.
    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Creates a [`TypeExpr::Array`] of `element`.
    pub fn array(element: TypeExpr) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates a [`TypeExpr::Map`] from `key` to `value`.
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a [`TypeExpr::Channel`] of `element`.
    pub fn channel(element: TypeExpr) -> Self {
        Self::Channel(Box::new(element))
    }

    /// Creates a [`TypeExpr::Variadic`] of `element`.
    pub fn variadic(element: TypeExpr) -> Self {
        Self::Variadic(Box::new(element))
    }

    /// Creates a [`TypeExpr::Func`] signature.
    pub fn func(params: Vec<Field>, results: Vec<Field>) -> Self {
        Self::Func { params, results }
    }

    /// Returns the top-level kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            TypeExpr::Named(_) | TypeExpr::Qualified { .. } => ShapeKind::Alias,
            TypeExpr::Pointer(_) => ShapeKind::Pointer,
            TypeExpr::Array(_) => ShapeKind::Array,
            TypeExpr::Map { .. } => ShapeKind::Map,
            TypeExpr::Channel(_) => ShapeKind::Channel,
            TypeExpr::Variadic(_) => ShapeKind::Variadic,
            TypeExpr::Func { .. } => ShapeKind::Func,
            TypeExpr::Struct(_) => ShapeKind::Struct,
            TypeExpr::Interface(_) => ShapeKind::Interface,
            TypeExpr::Opaque(_) => ShapeKind::Opaque,
        }
    }

    /// Returns the members of a struct or interface, one per port.
    ///
    /// Other shapes have no members.
    pub fn members(&self) -> &[Field] {
        match self {
            TypeExpr::Struct(fields) | TypeExpr::Interface(fields) => fields,
            _ => &[],
        }
    }
}
