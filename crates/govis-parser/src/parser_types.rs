use std::fmt;

use crate::span::Spanned;

/// Syntax tree of a Go source file, restricted to what type extraction needs.
///
/// Leaf names are wrapped in [`Spanned`]; composite nodes derive their
/// position from their leaves.
#[derive(Debug)]
pub struct SourceFile<'a> {
    pub package: Spanned<&'a str>,
    pub items: Vec<Item<'a>>,
}

/// A top-level syntax node found while scanning a file.
#[derive(Debug)]
pub enum Item<'a> {
    Comment,
    /// A `type` declaration, either a single spec or a parenthesized group.
    TypeDecl(Vec<TypeSpec<'a>>),
}

/// One `Name[TypeParams] = Type` entry of a type declaration. Type
/// parameters are parsed but not kept.
#[derive(Debug)]
pub struct TypeSpec<'a> {
    pub name: Spanned<&'a str>,
    pub alias: bool,
    pub ty: TypeNode<'a>,
}

/// A field, parameter or type parameter group: `a, b T "tag"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl<'a> {
    pub names: Vec<Spanned<&'a str>>,
    pub ty: TypeNode<'a>,
    pub tag: Option<Spanned<&'a str>>,
}

impl<'a> FieldDecl<'a> {
    pub fn new(names: Vec<Spanned<&'a str>>, ty: TypeNode<'a>) -> Self {
        Self {
            names,
            ty,
            tag: None,
        }
    }

    pub fn unnamed(ty: TypeNode<'a>) -> Self {
        Self::new(Vec::new(), ty)
    }
}

/// Parameters and results of a function type or method.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature<'a> {
    pub params: Vec<FieldDecl<'a>>,
    pub results: Vec<FieldDecl<'a>>,
}

/// An element of an interface body.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem<'a> {
    Method {
        name: Spanned<&'a str>,
        signature: Signature<'a>,
    },
    /// An embedded interface or a type-set constraint such as `~int | string`.
    Embedded(TypeNode<'a>),
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A type expression as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode<'a> {
    Name(Spanned<&'a str>),
    Qualified {
        package: Spanned<&'a str>,
        name: Spanned<&'a str>,
    },
    /// A generic instantiation `Base[Args]`.
    Generic {
        base: Box<TypeNode<'a>>,
        args: Vec<TypeNode<'a>>,
    },
    Pointer(Box<TypeNode<'a>>),
    Slice(Box<TypeNode<'a>>),
    Array {
        /// Length expression with spaces removed.
        length: String,
        elem: Box<TypeNode<'a>>,
    },
    Map {
        key: Box<TypeNode<'a>>,
        value: Box<TypeNode<'a>>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeNode<'a>>,
    },
    Ellipsis(Box<TypeNode<'a>>),
    Func(Signature<'a>),
    Struct(Vec<FieldDecl<'a>>),
    Interface(Vec<InterfaceElem<'a>>),
    Paren(Box<TypeNode<'a>>),
    Union(Vec<TypeNode<'a>>),
    Tilde(Box<TypeNode<'a>>),
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[FieldDecl<'_>], sep: &str) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

impl fmt::Display for FieldDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        if !self.names.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_fields(f, &self.params, ", ")?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {single}"),
            results => {
                f.write_str(" (")?;
                write_fields(f, results, ", ")?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for TypeNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Name(name) => write!(f, "{name}"),
            TypeNode::Qualified { package, name } => write!(f, "{package}.{name}"),
            TypeNode::Generic { base, args } => {
                write!(f, "{base}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
            TypeNode::Pointer(inner) => write!(f, "*{inner}"),
            TypeNode::Slice(elem) => write!(f, "[]{elem}"),
            TypeNode::Array { length, elem } => write!(f, "[{length}]{elem}"),
            TypeNode::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeNode::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeNode::Ellipsis(elem) => write!(f, "...{elem}"),
            TypeNode::Func(signature) => write!(f, "func{signature}"),
            TypeNode::Struct(fields) => {
                f.write_str("struct{")?;
                write_fields(f, fields, "; ")?;
                f.write_str("}")
            }
            TypeNode::Interface(elems) => {
                f.write_str("interface{")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match elem {
                        InterfaceElem::Method { name, signature } => write!(f, "{name}{signature}")?,
                        InterfaceElem::Embedded(ty) => write!(f, "{ty}")?,
                    }
                }
                f.write_str("}")
            }
            TypeNode::Paren(inner) => write!(f, "({inner})"),
            TypeNode::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{term}")?;
                }
                Ok(())
            }
            TypeNode::Tilde(inner) => write!(f, "~{inner}"),
        }
    }
}
