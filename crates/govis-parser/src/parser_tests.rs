//! Unit tests for the Go type declaration parser
//!
//! These tests verify that the parser finds every type declaration of a file,
//! builds the expected syntax tree for each type form, and reports errors
//! with the right codes.

use crate::{
    error::ErrorCode,
    lexer, parser,
    parser_types::{ChanDir, InterfaceElem, Item, SourceFile, TypeNode, TypeSpec},
};

/// Helper function to parse a source string and print each declared type
fn parse_specs(source: &str) -> Vec<String> {
    let tokens = lexer::tokenize(source).expect("lexer should succeed");
    let file = parser::build_source_file(&tokens)
        .unwrap_or_else(|err| panic!("Expected parsing to succeed, but got error: {err}"));
    specs(&file)
        .map(|spec| format!("{} {}", spec.name, spec.ty))
        .collect()
}

fn specs<'a>(file: &'a SourceFile<'a>) -> impl Iterator<Item = &'a TypeSpec<'a>> {
    file.items.iter().flat_map(|item| match item {
        Item::TypeDecl(specs) => specs.as_slice(),
        Item::Comment => &[],
    })
}

/// Helper function to parse a source string and return the first error code
fn parse_error_code(source: &str) -> Option<ErrorCode> {
    let tokens = lexer::tokenize(source).expect("lexer should succeed");
    let err = parser::build_source_file(&tokens).expect_err("Expected parsing to fail");
    err.code()
}

/// Helper to parse a standalone type expression and print it back
fn type_text(source: &str) -> String {
    let tokens = lexer::tokenize(source).expect("lexer should succeed");
    parser::build_type_expr(&tokens)
        .unwrap_or_else(|err| panic!("failed to parse `{source}`: {err}"))
        .to_string()
}

mod declaration_tests {
    use super::*;

    #[test]
    fn test_package_clause() {
        let tokens = lexer::tokenize("// Package doc\npackage server\n").unwrap();
        let file = parser::build_source_file(&tokens).unwrap();

        assert_eq!(*file.package.inner(), "server");
        assert!(matches!(file.items.as_slice(), [Item::Comment]));
    }

    #[test]
    fn test_single_declarations() {
        let specs = parse_specs(
            "package main\n\ntype ID string\ntype Point struct {\n\tX, Y float64\n}\n",
        );
        assert_eq!(specs, ["ID string", "Point struct{X, Y float64}"]);
    }

    #[test]
    fn test_grouped_declarations() {
        let specs = parse_specs(
            "package main\n\ntype (\n\tA int\n\tB []A // trailing\n\n\tC = map[string]B; D chan int\n)\n",
        );
        assert_eq!(specs, ["A int", "B []A", "C map[string]B", "D chan int"]);
    }

    #[test]
    fn test_alias_flag() {
        let tokens = lexer::tokenize("package main\ntype A = B\ntype C B\n").unwrap();
        let file = parser::build_source_file(&tokens).unwrap();
        let aliases: Vec<_> = specs(&file).map(|spec| spec.alias).collect();
        assert_eq!(aliases, [true, false]);
    }

    #[test]
    fn test_declaration_inside_function_body() {
        let source = r#"package main

func run(x interface{}) error {
	type local struct{ n int }
	switch v := x.(type) {
	case string:
		_ = v
	}
	s := "type Fake int"
	return nil
}
"#;
        assert_eq!(parse_specs(source), ["local struct{n int}"]);
    }

    #[test]
    fn test_comments_are_items() {
        let tokens =
            lexer::tokenize("package main\n// one\ntype A int /* two */\n").unwrap();
        let file = parser::build_source_file(&tokens).unwrap();
        let comments = file
            .items
            .iter()
            .filter(|item| matches!(item, Item::Comment))
            .count();
        assert_eq!(comments, 2);
    }

    #[test]
    fn test_generic_declaration() {
        let source = "package main\ntype Pair[K comparable, V any] struct {\n\tKey K\n\tValue V\n}\ntype Arr [N]int\n";
        assert_eq!(
            parse_specs(source),
            ["Pair struct{Key K; Value V}", "Arr [N]int"]
        );
    }

    #[test]
    fn test_shared_constraint_type_params() {
        assert_eq!(
            parse_specs("package main\ntype M[K, V any] map[K]V\n"),
            ["M map[K]V"]
        );
    }

    #[test]
    fn test_array_length_products() {
        let source = "package p\nconst N, M = 2, 3\ntype A [N*M]int\ntype B [N * 4]int\ntype C [N * M.K]int\n";
        assert_eq!(
            parse_specs(source),
            ["A [N*M]int", "B [N*4]int", "C [N*M.K]int"]
        );
    }

    #[test]
    fn test_pointer_constraints() {
        let source = "package p\ntype S[P *C, Q any] struct{}\ntype U[T *[]int] []T\n";
        assert_eq!(parse_specs(source), ["S struct{}", "U []T"]);
    }
}

mod type_expression_tests {
    use super::*;

    #[test]
    fn test_basic_forms() {
        assert_eq!(type_text("int"), "int");
        assert_eq!(type_text("pkg.Type"), "pkg.Type");
        assert_eq!(type_text("*T"), "*T");
        assert_eq!(type_text("[]T"), "[]T");
        assert_eq!(type_text("[4]T"), "[4]T");
        assert_eq!(type_text("[2 * N]T"), "[2*N]T");
        assert_eq!(type_text("map[string][]*T"), "map[string][]*T");
        assert_eq!(type_text("(T)"), "(T)");
    }

    #[test]
    fn test_channel_directions() {
        let tokens = lexer::tokenize("<-chan T").unwrap();
        let ty = parser::build_type_expr(&tokens).unwrap();
        assert!(matches!(
            ty,
            TypeNode::Chan {
                dir: ChanDir::Recv,
                ..
            }
        ));

        assert_eq!(type_text("chan<- T"), "chan<- T");
        assert_eq!(type_text("chan T"), "chan T");
    }

    #[test]
    fn test_generic_instantiation() {
        assert_eq!(type_text("List[int]"), "List[int]");
        assert_eq!(type_text("pkg.Map[K, []V]"), "pkg.Map[K, []V]");
    }

    #[test]
    fn test_func_signatures() {
        assert_eq!(type_text("func()"), "func()");
        assert_eq!(type_text("func(int, string) error"), "func(int, string) error");
        assert_eq!(
            type_text("func(a, b int, opts ...Option) (n int, err error)"),
            "func(a, b int, opts ...Option) (n int, err error)"
        );
        assert_eq!(
            type_text("func(\n\tctx context.Context,\n\treq *Request,\n) (*Response, error)"),
            "func(ctx context.Context, req *Request) (*Response, error)"
        );
        assert_eq!(type_text("func(List[int])"), "func(List[int])");
        assert_eq!(type_text("func(xs []int) func() int"), "func(xs []int) func() int");
    }

    #[test]
    fn test_struct_fields() {
        let source = "struct {\n\tBase\n\t*pkg.Mixin\n\tList[T]\n\tbuf [8]byte `json:\"buf\"`\n\ta, b int \"tag\"\n\tcb func() error\n}";
        assert_eq!(
            type_text(source),
            "struct{Base; *pkg.Mixin; List[T]; buf [8]byte `json:\"buf\"`; a, b int \"tag\"; cb func() error}"
        );
    }

    #[test]
    fn test_single_line_struct() {
        assert_eq!(type_text("struct{ x int; y int }"), "struct{x int; y int}");
        assert_eq!(type_text("struct{}"), "struct{}");
    }

    #[test]
    fn test_interface_elements() {
        let tokens = lexer::tokenize(
            "interface {\n\tfmt.Stringer\n\tDo(x int) error\n\t~int | ~string\n}",
        )
        .unwrap();
        let ty = parser::build_type_expr(&tokens).unwrap();

        let TypeNode::Interface(elems) = &ty else {
            panic!("expected interface, got {ty:?}");
        };
        assert_eq!(elems.len(), 3);
        assert!(matches!(elems[0], InterfaceElem::Embedded(TypeNode::Qualified { .. })));
        assert!(matches!(elems[1], InterfaceElem::Method { .. }));
        assert!(matches!(elems[2], InterfaceElem::Embedded(TypeNode::Union(_))));
        assert_eq!(ty.to_string(), "interface{fmt.Stringer; Do(x int) error; ~int | ~string}");
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_missing_package_clause() {
        assert_eq!(parse_error_code("type A int\n"), Some(ErrorCode::E102));
        assert_eq!(parse_error_code(""), Some(ErrorCode::E102));
        assert_eq!(parse_error_code("package\n"), Some(ErrorCode::E102));
    }

    #[test]
    fn test_mixed_parameters() {
        assert_eq!(
            parse_error_code("package main\ntype F func(a int, string)\n"),
            Some(ErrorCode::E103)
        );
        assert_eq!(
            parse_error_code("package main\ntype F func(a int, []string)\n"),
            Some(ErrorCode::E103)
        );
    }

    #[test]
    fn test_malformed_declarations() {
        assert_eq!(
            parse_error_code("package main\ntype A struct {\n"),
            Some(ErrorCode::E100)
        );
        assert_eq!(parse_error_code("package main\ntype A\n"), Some(ErrorCode::E100));
        assert_eq!(
            parse_error_code("package main\ntype A map[string\n"),
            Some(ErrorCode::E100)
        );
        assert_eq!(
            parse_error_code("package main\ntype A struct { x int y int }\n"),
            Some(ErrorCode::E100)
        );
    }

    #[test]
    fn test_error_span_points_into_declaration() {
        let source = "package main\n\ntype A struct {\n\tx ]\n}\n";
        let tokens = lexer::tokenize(source).unwrap();
        let err = parser::build_source_file(&tokens).unwrap_err();

        let span = err.labels()[0].span();
        assert!(span.start() >= source.find("type").unwrap());
        assert!(span.end() <= source.len());
    }
}
