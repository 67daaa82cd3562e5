//! # go-vis Parser
//!
//! Go front end for go-vis. This crate turns the text of a Go source file
//! into the package name and the type declarations it contains.
//!
//! ## Usage
//!
//! ```
//! # use govis_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         package shapes
//!
//!         type Point struct {
//!             X, Y float64
//!         }
//!         type Path []*Point
//!     "#;
//!
//!     let file = parse(source)?;
//!     assert_eq!(file.package(), "shapes");
//!     assert_eq!(file.declarations().len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod extract;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod span;
mod tokens;

pub use extract::{Extractor, ParsedFile};
pub use span::Span;

use govis_core::type_expr::TypeExpr;

use error::ParseError;

/// Parse the text of a Go source file.
///
/// The pipeline has three steps:
///
/// 1. **Tokenize** - Convert source text to tokens
/// 2. **Parse** - Find the package clause and every `type` declaration
/// 3. **Extract** - Convert each declared type into a [`TypeExpr`]
///
/// Declarations nested in function bodies are included. Everything else in
/// the file is skipped without being checked.
///
/// # Errors
///
/// Returns a [`ParseError`] with located diagnostics when the file has no
/// package clause, when a token cannot be lexed, or when a type declaration
/// is malformed.
pub fn parse(source: &str) -> Result<ParsedFile, ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;

    // Step 2: Parse
    let file = parser::build_source_file(&tokens)?;

    // Step 3: Extract
    Ok(extract::parsed_file(&file))
}

/// Parse a single Go type expression such as `map[string][]*Node`.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not exactly one type.
pub fn parse_type(source: &str) -> Result<TypeExpr, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let node = parser::build_type_expr(&tokens)?;
    Ok(extract::type_expr(&node))
}

#[cfg(test)]
mod tests {
    use govis_core::{render::render, type_expr::Field};
    use proptest::prelude::*;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_reports_lexer_errors() {
        let err = parse("package main\ntype S struct { s string `tag }\n").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E003));
    }

    #[test]
    fn test_parse_reports_parser_errors() {
        let err = parse("type S struct{}\n").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_parse_type_rejects_trailing_tokens() {
        assert!(parse_type("int int").is_err());
        assert!(parse_type("").is_err());
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        "T[a-z]{0,4}"
    }

    fn field_list(element: BoxedStrategy<TypeExpr>) -> impl Strategy<Value = Vec<Field>> {
        prop_oneof![
            prop::collection::vec(element.clone(), 0..3)
                .prop_map(|types| types.into_iter().map(Field::unnamed).collect()),
            prop::collection::vec((prop::collection::vec("v[a-z]{0,3}", 1..3), element), 1..3)
                .prop_map(|groups| {
                    groups
                        .into_iter()
                        .map(|(names, ty)| Field::new(names, ty))
                        .collect()
                }),
        ]
    }

    fn shape_strategy() -> impl Strategy<Value = TypeExpr> {
        let leaf = prop_oneof![
            name_strategy().prop_map(TypeExpr::named),
            ("p[a-z]{0,3}", name_strategy())
                .prop_map(|(scope, name)| TypeExpr::qualified(scope, name)),
            Just(TypeExpr::Struct(Vec::new())),
            Just(TypeExpr::Interface(Vec::new())),
        ];

        leaf.prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeExpr::pointer),
                inner.clone().prop_map(TypeExpr::array),
                (inner.clone(), inner.clone()).prop_map(|(key, value)| TypeExpr::map(key, value)),
                inner.clone().prop_map(TypeExpr::channel),
                (
                    field_list(inner.clone()),
                    prop::option::of(inner.clone()),
                    field_list(inner),
                )
                    .prop_map(|(mut params, variadic, results)| {
                        // `...T` is only valid as the last parameter
                        if let Some(element) = variadic {
                            let named = params.first().is_some_and(|p| !p.names().is_empty());
                            let ty = TypeExpr::variadic(element);
                            params.push(if named {
                                Field::new(["rest"], ty)
                            } else {
                                Field::unnamed(ty)
                            });
                        }
                        TypeExpr::func(params, results)
                    }),
            ]
        })
    }

    proptest! {
        #[test]
        fn rendered_shapes_parse_back(shape in shape_strategy()) {
            let text = render(&shape);
            let parsed = parse_type(&text).map_err(|err| TestCaseError::fail(format!("{text}: {err}")))?;
            prop_assert_eq!(parsed, shape, "rendered as {}", text);
        }
    }
}
