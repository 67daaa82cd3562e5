//! Intermediate graph built from extracted scopes.
//!
//! The graph mirrors the DOT output one to one: one [`Subgraph`] per
//! rendered scope, one [`GraphNode`] per declaration and one
//! [`DependencyEdge`] per resolved reference. It is built once by
//! [`Graph::build`] and only read afterwards.
//!
//! Scopes are visited in ascending id order and declarations in ascending
//! name order, so the same input always yields the same graph.

use std::fmt;

use log::{debug, trace};

use govis_core::{
    declaration::{Declaration, Scope, Scopes},
    render,
    resolve::{self, DependencyEdge},
    type_expr::ShapeKind,
};

/// Graphviz node shape of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Ellipse,
    Box,
    Rectangle,
    MRecord,
    Record,
}

impl NodeShape {
    /// Returns the Graphviz shape name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Ellipse => "ellipse",
            NodeShape::Box => "box",
            NodeShape::Rectangle => "rectangle",
            NodeShape::MRecord => "Mrecord",
            NodeShape::Record => "record",
        }
    }

    /// Returns `true` for shapes whose label is split into ports.
    pub fn is_record(&self) -> bool {
        matches!(self, NodeShape::MRecord | NodeShape::Record)
    }
}

impl From<ShapeKind> for NodeShape {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Alias | ShapeKind::Opaque => NodeShape::Ellipse,
            ShapeKind::Channel | ShapeKind::Pointer => NodeShape::Box,
            // A variadic cannot be declared; draw it like the slice it is
            ShapeKind::Func | ShapeKind::Array | ShapeKind::Map | ShapeKind::Variadic => {
                NodeShape::Rectangle
            }
            ShapeKind::Interface => NodeShape::MRecord,
            ShapeKind::Struct => NodeShape::Record,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration drawn as a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: String,
    shape: NodeShape,
    label: String,
}

impl GraphNode {
    /// Builds the node of `declaration`, picking its shape and label.
    pub fn from_declaration(declaration: &Declaration) -> Self {
        let shape = NodeShape::from(declaration.shape().kind());
        let label = if shape.is_record() {
            render::record_label(declaration.name(), declaration.shape())
        } else {
            render::simple_label(declaration.name(), declaration.shape())
        };

        Self {
            id: declaration.name().to_owned(),
            shape,
            label,
        }
    }

    /// Returns the node id, which is the declared name.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    /// Returns the escaped label text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The nodes and edges of one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    id: String,
    label: String,
    nodes: Vec<GraphNode>,
    edges: Vec<DependencyEdge>,
}

impl Subgraph {
    /// Builds the subgraph of `scope`.
    pub fn from_scope(scope: &Scope) -> Self {
        let declarations = scope.sorted_declarations();

        let nodes = declarations
            .iter()
            .map(|declaration| GraphNode::from_declaration(declaration))
            .collect();
        let edges: Vec<_> = declarations
            .iter()
            .flat_map(|declaration| resolve::resolve_edges(declaration, scope))
            .collect();

        debug!(
            scope = scope.id(),
            nodes = declarations.len(),
            edges = edges.len();
            "Subgraph built"
        );

        Self {
            id: scope.id().to_owned(),
            label: render::label([scope.id()]),
            nodes,
            edges,
        }
    }

    /// Returns the subgraph id, which is the scope id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the escaped label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

/// The complete graph of all rendered scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    name: String,
    subgraphs: Vec<Subgraph>,
}

impl Graph {
    /// Builds the graph of `scopes`, skipping every scope for which
    /// `is_excluded` returns `true`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the top-level graph.
    /// * `scopes` - Extracted scopes, in any order.
    /// * `is_excluded` - Exclusion predicate over scope ids.
    pub fn build<F>(name: impl Into<String>, scopes: &Scopes, is_excluded: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut sorted: Vec<&Scope> = scopes.values().collect();
        sorted.sort_by(|a, b| a.id().cmp(b.id()));

        let subgraphs = sorted
            .into_iter()
            .filter(|scope| {
                let excluded = is_excluded(scope.id());
                if excluded {
                    trace!(scope = scope.id(); "Scope excluded");
                }
                !excluded
            })
            .map(Subgraph::from_scope)
            .collect();

        Self {
            name: name.into(),
            subgraphs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }
}
