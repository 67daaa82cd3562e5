//! Integration tests for the Visualizer API
//!
//! These tests run Go sources through the whole pipeline and check the
//! emitted DOT text.

use govis::{
    GovisError, SourceUnit, Visualizer,
    config::{AppConfig, GraphConfig},
    graph::NodeShape,
    type_expr::TypeExpr,
};

const SERVER_GO: &str = r#"package server

import "net/http"

// Handler serves one route.
type Handler func(req *Request) (*Response, error)

type (
	Request struct {
		Path    string
		Headers map[string][]string `json:"headers"`
		Body    []byte
	}

	Response struct {
		Status int
		Body   []byte
	}
)

type Router interface {
	Handle(path string, h Handler)
	http.Handler
}

type Mux struct {
	routes map[string]Handler
	next   *Mux
	client http.Client
}

func (m *Mux) Handle(path string, h Handler) {
	type entry struct{ h Handler }
	m.routes[path] = h
}
"#;

fn run(units: &[SourceUnit]) -> String {
    Visualizer::default()
        .run(units)
        .unwrap_or_else(|err| panic!("pipeline failed: {err}"))
}

#[test]
fn test_visualizer_api_exists() {
    let _visualizer = Visualizer::default();
    let _visualizer = Visualizer::new(AppConfig::default());
}

#[test]
fn test_extract_groups_units_by_package() {
    let units = [
        SourceUnit::new("server.go", SERVER_GO),
        SourceUnit::new("extra.go", "package server\ntype Extra int\n"),
        SourceUnit::new("util.go", "package util\ntype Set map[string]struct{}\n"),
    ];

    let scopes = Visualizer::default().extract(&units).unwrap();

    assert_eq!(scopes.len(), 2);
    let server = &scopes["server"];
    for name in ["Handler", "Request", "Response", "Router", "Mux", "entry", "Extra"] {
        assert!(server.contains(name), "missing {name}");
    }
    assert!(scopes["util"].contains("Set"));
}

#[test]
fn test_struct_reference_edge() {
    let units = [SourceUnit::new(
        "s.go",
        "package s\ntype A struct { f B }\ntype B struct {}\n",
    )];
    let dot = run(&units);

    assert_eq!(dot.matches(" -> ").count(), 1, "{dot}");
    assert!(dot.contains("\"A\":f0 -> \"B\""), "{dot}");
}

#[test]
fn test_qualified_reference_is_text_only() {
    let units = [SourceUnit::new("s.go", "package s\ntype A struct { f pkg.B }\n")];
    let dot = run(&units);

    assert!(!dot.contains(" -> "), "{dot}");
    assert!(dot.contains("pkg.B"), "{dot}");
}

#[test]
fn test_test_package_is_excluded() {
    let units = [
        SourceUnit::new("a.go", "package foo\ntype A int\n"),
        SourceUnit::new("a_test.go", "package foo_test\ntype T struct { a A }\n"),
    ];

    let visualizer = Visualizer::default();
    let scopes = visualizer.extract(&units).unwrap();
    assert!(scopes.contains_key("foo_test"));

    let dot = visualizer.render_dot(&visualizer.build_graph(&scopes));
    assert!(!dot.contains("foo_test"), "{dot}");
    assert!(!dot.contains("\"T\""), "{dot}");
}

#[test]
fn test_map_field_label_is_escaped() {
    let units = [SourceUnit::new("s.go", "package s\ntype A struct { m map[string]int }\n")];
    let dot = run(&units);

    assert!(dot.contains("<f0>m\\ map\\[string\\]int"), "{dot}");
}

#[test]
fn test_interface_with_external_result() {
    let units = [SourceUnit::new(
        "s.go",
        "package s\ntype Iface interface {\n\tDo(x int) error\n}\n",
    )];
    let dot = run(&units);

    assert!(dot.contains("shape=Mrecord"), "{dot}");
    assert!(
        dot.contains("{Iface\\ interface|<f0>Do\\ func\\(x\\ int\\)\\ \\(error\\)}"),
        "{dot}"
    );
    assert!(!dot.contains(" -> "), "{dot}");
}

#[test]
fn test_full_package() {
    let dot = run(&[SourceUnit::new("server.go", SERVER_GO)]);

    // Handler: func port folds request and response
    assert!(dot.contains("\"Handler\":f0 -> \"Request\""), "{dot}");
    assert!(dot.contains("\"Handler\":f0 -> \"Response\""), "{dot}");
    // Router: method on port 0, embedded http.Handler unresolved
    assert!(dot.contains("\"Router\":f0 -> \"Handler\""), "{dot}");
    assert!(!dot.contains("\"Router\":f1"), "{dot}");
    // Mux: map value and self reference
    assert!(dot.contains("\"Mux\":f0 -> \"Handler\""), "{dot}");
    assert!(dot.contains("\"Mux\":f1 -> \"Mux\""), "{dot}");
    assert!(!dot.contains("\"Mux\":f2"), "{dot}");
    // Declaration nested in a method body
    assert!(dot.contains("\"entry\":f0 -> \"Handler\""), "{dot}");
}

#[test]
fn test_output_is_deterministic() {
    let units = [
        SourceUnit::new("b.go", "package b\ntype Z int\ntype A int\n"),
        SourceUnit::new("a.go", "package a\ntype M int\n"),
    ];
    let first = run(&units);
    let second = run(&units);
    assert_eq!(first, second);

    let a = first.find("subgraph \"a\"").unwrap();
    let b = first.find("subgraph \"b\"").unwrap();
    assert!(a < b);
    assert!(first.find("\"A\"").unwrap() < first.find("\"Z\"").unwrap());
}

#[test]
fn test_custom_graph_config() {
    let config = AppConfig::new(GraphConfig::new("types", vec!["_gen".to_string()]));
    let units = [
        SourceUnit::new("a.go", "package a_gen\ntype A int\n"),
        SourceUnit::new("b_test.go", "package b_test\ntype B int\n"),
    ];

    let dot = Visualizer::new(config).run(&units).unwrap();
    assert!(dot.starts_with("digraph \"types\""), "{dot}");
    assert!(!dot.contains("a_gen"), "{dot}");
    assert!(dot.contains("subgraph \"b_test\""), "{dot}");
}

#[test]
fn test_parse_failure_names_the_unit() {
    let units = [
        SourceUnit::new("good.go", "package p\ntype A int\n"),
        SourceUnit::new("bad.go", "package p\ntype B struct {\n"),
    ];

    let err = Visualizer::default().extract(&units).unwrap_err();
    match err {
        GovisError::Parse { unit, err, src } => {
            assert_eq!(unit, "bad.go");
            assert!(!err.diagnostics().is_empty());
            assert!(src.contains("type B"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_graph_node_shapes() {
    let units = [SourceUnit::new(
        "s.go",
        "package s\ntype P *int\ntype C chan int\ntype L List[int]\n",
    )];
    let visualizer = Visualizer::default();
    let scopes = visualizer.extract(&units).unwrap();
    let graph = visualizer.build_graph(&scopes);

    let shapes: Vec<_> = graph.subgraphs()[0]
        .nodes()
        .iter()
        .map(|node| (node.id(), node.shape()))
        .collect();
    assert_eq!(
        shapes,
        [
            ("C", NodeShape::Box),
            ("L", NodeShape::Ellipse),
            ("P", NodeShape::Box),
        ]
    );
    assert_eq!(
        scopes["s"].get("L").unwrap().shape(),
        &TypeExpr::Opaque("List[int]".to_string())
    );
}
