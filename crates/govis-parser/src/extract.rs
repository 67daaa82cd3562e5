//! Conversion of parsed Go syntax into the declaration model.
//!
//! Every [`types::TypeNode`] maps onto a [`TypeExpr`]. Parenthesized types
//! are unwrapped; generic instantiations, unions and `~T` terms have no
//! structural counterpart and become [`TypeExpr::Opaque`] holding their Go
//! text.

use std::collections::HashMap;

use govis_core::{
    declaration::{Declaration, Scope, Scopes},
    type_expr::{Field, TypeExpr},
};
use log::{debug, trace};

use crate::{error::Diagnostic, parser_types as types, span::Span};

/// Declarations found in one source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    package: String,
    declarations: Vec<Declaration>,
    warnings: Vec<Diagnostic>,
}

impl ParsedFile {
    pub fn new(package: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            package: package.into(),
            declarations,
            warnings: Vec::new(),
        }
    }

    /// Name from the file's `package` clause.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Declarations in source order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Problems that did not stop extraction, such as a type name declared
    /// twice in the file.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Collects the declarations of a source file, skipping comments.
///
/// A name declared again, e.g. in two function bodies, keeps only its last
/// declaration and gets a warning pointing at both.
pub(crate) fn parsed_file(file: &types::SourceFile<'_>) -> ParsedFile {
    let mut seen: HashMap<&str, Span> = HashMap::new();
    let mut declarations = Vec::new();
    let mut warnings = Vec::new();

    let specs = file.items.iter().filter_map(|item| match item {
        types::Item::TypeDecl(specs) => Some(specs),
        types::Item::Comment => None,
    });
    for spec in specs.flatten() {
        let name = *spec.name.inner();
        trace!(name = name, alias = spec.alias; "extracted declaration");

        if let Some(earlier) = seen.insert(name, spec.name.span()) {
            warnings.push(
                Diagnostic::warning(format!("type `{name}` is declared more than once"))
                    .with_label(spec.name.span(), "only this declaration is drawn")
                    .with_secondary_label(earlier, "earlier declaration"),
            );
        }
        declarations.push(Declaration::new(name, type_expr(&spec.ty)));
    }

    ParsedFile {
        package: (*file.package.inner()).to_owned(),
        declarations,
        warnings,
    }
}

/// Converts a syntax tree type into its shape.
pub(crate) fn type_expr(node: &types::TypeNode<'_>) -> TypeExpr {
    match node {
        types::TypeNode::Name(name) => TypeExpr::named(*name.inner()),
        types::TypeNode::Qualified { package, name } => {
            TypeExpr::qualified(*package.inner(), *name.inner())
        }
        types::TypeNode::Pointer(inner) => TypeExpr::pointer(type_expr(inner)),
        types::TypeNode::Slice(elem) | types::TypeNode::Array { elem, .. } => {
            TypeExpr::array(type_expr(elem))
        }
        types::TypeNode::Map { key, value } => TypeExpr::map(type_expr(key), type_expr(value)),
        types::TypeNode::Chan { elem, .. } => TypeExpr::channel(type_expr(elem)),
        types::TypeNode::Ellipsis(elem) => TypeExpr::variadic(type_expr(elem)),
        types::TypeNode::Func(signature) => func(signature),
        types::TypeNode::Struct(fields) => TypeExpr::Struct(fields.iter().map(field).collect()),
        types::TypeNode::Interface(elems) => {
            TypeExpr::Interface(elems.iter().map(interface_member).collect())
        }
        types::TypeNode::Paren(inner) => type_expr(inner),
        types::TypeNode::Generic { .. } | types::TypeNode::Union(_) | types::TypeNode::Tilde(_) => {
            TypeExpr::Opaque(node.to_string())
        }
    }
}

fn field(decl: &types::FieldDecl<'_>) -> Field {
    Field::new(decl.names.iter().map(|name| *name.inner()), type_expr(&decl.ty))
}

fn func(signature: &types::Signature<'_>) -> TypeExpr {
    TypeExpr::func(
        signature.params.iter().map(field).collect(),
        signature.results.iter().map(field).collect(),
    )
}

/// A method becomes a field named after it holding its signature; an
/// embedded element becomes an unnamed field.
fn interface_member(elem: &types::InterfaceElem<'_>) -> Field {
    match elem {
        types::InterfaceElem::Method { name, signature } => {
            Field::new([*name.inner()], func(signature))
        }
        types::InterfaceElem::Embedded(ty) => Field::unnamed(type_expr(ty)),
    }
}

/// Groups parsed files into scopes keyed by package name.
///
/// A later declaration replaces an earlier one of the same name in the same
/// scope.
#[derive(Debug, Default)]
pub struct Extractor {
    scopes: Scopes,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the declarations of one file to its package scope.
    pub fn add(&mut self, file: ParsedFile) {
        let ParsedFile {
            package,
            declarations,
            ..
        } = file;

        debug!(package = package.as_str(), count = declarations.len(); "adding declarations");

        let scope = self
            .scopes
            .entry(package.clone())
            .or_insert_with(|| Scope::new(package));
        for declaration in declarations {
            if let Some(previous) = scope.insert(declaration) {
                debug!(name = previous.name(); "declaration replaced");
            }
        }
    }

    /// Returns the scopes collected so far.
    pub fn finish(self) -> Scopes {
        self.scopes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn shape_of(source: &str) -> TypeExpr {
        let tokens = lexer::tokenize(source).unwrap();
        type_expr(&parser::build_type_expr(&tokens).unwrap())
    }

    fn file_of(source: &str) -> ParsedFile {
        let tokens = lexer::tokenize(source).unwrap();
        parsed_file(&parser::build_source_file(&tokens).unwrap())
    }

    #[test]
    fn test_structural_shapes() {
        assert_eq!(shape_of("int"), TypeExpr::named("int"));
        assert_eq!(shape_of("io.Reader"), TypeExpr::qualified("io", "Reader"));
        assert_eq!(
            shape_of("*[]T"),
            TypeExpr::pointer(TypeExpr::array(TypeExpr::named("T")))
        );
        assert_eq!(shape_of("[16]byte"), TypeExpr::array(TypeExpr::named("byte")));
        assert_eq!(
            shape_of("map[K]V"),
            TypeExpr::map(TypeExpr::named("K"), TypeExpr::named("V"))
        );
        assert_eq!(
            shape_of("<-chan T"),
            TypeExpr::channel(TypeExpr::named("T"))
        );
        assert_eq!(shape_of("(T)"), TypeExpr::named("T"));
    }

    #[test]
    fn test_func_shape() {
        assert_eq!(
            shape_of("func(a, b int, rest ...string) error"),
            TypeExpr::func(
                vec![
                    Field::new(["a", "b"], TypeExpr::named("int")),
                    Field::new(["rest"], TypeExpr::variadic(TypeExpr::named("string"))),
                ],
                vec![Field::unnamed(TypeExpr::named("error"))],
            )
        );
    }

    #[test]
    fn test_struct_and_interface_members() {
        assert_eq!(
            shape_of("struct {\n\tBase\n\tx, y int `json:\"x\"`\n}"),
            TypeExpr::Struct(vec![
                Field::unnamed(TypeExpr::named("Base")),
                Field::new(["x", "y"], TypeExpr::named("int")),
            ])
        );
        assert_eq!(
            shape_of("interface {\n\tio.Closer\n\tRead(p []byte) (int, error)\n}"),
            TypeExpr::Interface(vec![
                Field::unnamed(TypeExpr::qualified("io", "Closer")),
                Field::new(
                    ["Read"],
                    TypeExpr::func(
                        vec![Field::new(["p"], TypeExpr::array(TypeExpr::named("byte")))],
                        vec![
                            Field::unnamed(TypeExpr::named("int")),
                            Field::unnamed(TypeExpr::named("error")),
                        ],
                    )
                ),
            ])
        );
    }

    #[test]
    fn test_unsupported_forms_are_opaque() {
        assert_eq!(shape_of("List[T]"), TypeExpr::Opaque("List[T]".to_string()));
        assert_eq!(
            shape_of("*pkg.Set[int]"),
            TypeExpr::pointer(TypeExpr::Opaque("pkg.Set[int]".to_string()))
        );
        assert_eq!(
            shape_of("interface{ ~int | ~string }"),
            TypeExpr::Interface(vec![Field::unnamed(TypeExpr::Opaque(
                "~int | ~string".to_string()
            ))])
        );
    }

    #[test]
    fn test_parsed_file_skips_comments() {
        let file = file_of("package shapes\n// A comment\ntype (\n\tA int\n\tB *A\n)\n");

        assert_eq!(file.package(), "shapes");
        let names: Vec<_> = file.declarations().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_extractor_groups_by_package() {
        let mut extractor = Extractor::new();
        extractor.add(file_of("package a\ntype X int\n"));
        extractor.add(file_of("package b\ntype Y int\n"));
        extractor.add(file_of("package a\ntype Z int\n"));

        let scopes = extractor.finish();
        let ids: Vec<_> = scopes.keys().map(String::as_str).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(scopes["a"].len(), 2);
        assert_eq!(scopes["b"].len(), 1);
    }

    #[test]
    fn test_last_declaration_wins() {
        let mut extractor = Extractor::new();
        extractor.add(file_of("package a\ntype X int\n"));
        extractor.add(file_of("package a\ntype X string\n"));

        let scopes = extractor.finish();
        let x = scopes["a"].get("X").unwrap();
        assert_eq!(x.shape(), &TypeExpr::named("string"));
    }

    #[test]
    fn test_redeclaration_in_one_file_warns() {
        let source = "package a
func f() { type T int }
func g() { type T string }
";
        let file = file_of(source);

        assert_eq!(file.declarations().len(), 2);
        let [warning] = file.warnings() else {
            panic!("expected one warning, got {:?}", file.warnings());
        };
        assert!(!warning.severity().is_error());
        assert_eq!(warning.message(), "type `T` is declared more than once");

        let second = source.rfind("T string").unwrap();
        let first = source.find("T int").unwrap();
        assert_eq!(warning.primary_span(), Some(Span::new(second..second + 1)));
        assert!(!warning.labels()[1].is_primary());
        assert_eq!(warning.labels()[1].span(), Span::new(first..first + 1));
    }

    #[test]
    fn test_distinct_names_have_no_warnings() {
        assert!(file_of("package a
type A int
type B A
").warnings().is_empty());
    }
}
