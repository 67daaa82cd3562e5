//! Graphviz DOT serialization.
//!
//! The [`Graph`] is converted into a [`dot_structures::Graph`] and printed
//! with the `graphviz-rust` printer. Every identifier and label is emitted as
//! a double-quoted string; labels are already escaped for record syntax and
//! only their double quotes need escaping here.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph as DotGraph, Id, Node, NodeId, Port, Stmt,
    Subgraph as DotSubgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::debug;

use govis_core::resolve::DependencyEdge;

use crate::graph::{Graph, GraphNode, Subgraph};

/// Wraps `text` in double quotes, escaping the quotes inside it.
fn quoted(text: &str) -> Id {
    Id::Escaped(format!("\"{}\"", text.replace('"', "\\\"")))
}

fn attribute(key: &str, value: Id) -> Attribute {
    Attribute(Id::Plain(key.to_owned()), value)
}

fn node_stmt(node: &GraphNode) -> Stmt {
    Stmt::Node(Node {
        id: NodeId(quoted(node.id()), None),
        attributes: vec![
            attribute("shape", Id::Plain(node.shape().as_str().to_owned())),
            attribute("label", quoted(node.label())),
        ],
    })
}

fn edge_stmt(edge: &DependencyEdge) -> Stmt {
    let port = Port(Some(Id::Plain(format!("f{}", edge.port()))), None);
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(
            Vertex::N(NodeId(quoted(edge.from()), Some(port))),
            Vertex::N(NodeId(quoted(edge.to()), None)),
        ),
        attributes: Vec::new(),
    })
}

fn subgraph_stmt(subgraph: &Subgraph) -> Stmt {
    let mut stmts = Vec::with_capacity(1 + subgraph.nodes().len() + subgraph.edges().len());
    stmts.push(Stmt::Attribute(attribute("label", quoted(subgraph.label()))));
    stmts.extend(subgraph.nodes().iter().map(node_stmt));
    stmts.extend(subgraph.edges().iter().map(edge_stmt));

    Stmt::Subgraph(DotSubgraph {
        id: quoted(subgraph.id()),
        stmts,
    })
}

/// Builds the DOT model of `graph` without printing it.
pub fn to_dot_graph(graph: &Graph) -> DotGraph {
    DotGraph::DiGraph {
        id: quoted(graph.name()),
        strict: false,
        stmts: graph.subgraphs().iter().map(subgraph_stmt).collect(),
    }
}

/// Serializes `graph` as DOT text, terminated by a newline.
pub fn to_dot(graph: &Graph) -> String {
    let mut dot = to_dot_graph(graph).print(&mut PrinterContext::default());
    dot.truncate(dot.trim_end().len());
    dot.push('\n');
    debug!(bytes = dot.len(); "DOT serialized");
    dot
}
