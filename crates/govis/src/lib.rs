//! go-vis - Graphviz graphs of the type dependencies of Go packages.
//!
//! Extraction, dependency resolution and DOT rendering for the type
//! declarations of Go source files. Each Go package becomes a subgraph, each
//! declared type a node, and each reference from one declared type to another
//! of the same package an edge.

pub mod config;
pub mod export;
pub mod graph;

mod error;

pub use govis_core::{declaration, render, resolve, type_expr};

pub use error::GovisError;

use log::{debug, info, trace, warn};

use govis_parser::Extractor;

use config::AppConfig;
use declaration::Scopes;
use graph::Graph;

/// One named piece of Go source text, usually the contents of a file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    name: String,
    source: String,
}

impl SourceUnit {
    /// Creates a unit from its name (used in error reports) and its text.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Pipeline from Go sources to DOT text.
///
/// # Examples
///
/// ```rust
/// use govis::{SourceUnit, Visualizer, config::AppConfig};
///
/// let units = [SourceUnit::new(
///     "shapes.go",
///     "package shapes\ntype Point struct { X, Y int }\ntype Path []Point\n",
/// )];
///
/// let visualizer = Visualizer::new(AppConfig::default());
/// let dot = visualizer.run(&units).expect("Failed to visualize");
/// assert!(dot.contains("subgraph \"shapes\""));
/// ```
#[derive(Debug, Default)]
pub struct Visualizer {
    config: AppConfig,
}

impl Visualizer {
    /// Create a new visualizer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Extract the type declarations of every unit, grouped by package.
    ///
    /// Units of the same package are merged; a declaration in a later unit
    /// replaces an earlier one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`GovisError::Parse`] for the first unit that cannot be
    /// parsed. No scopes are returned in that case.
    pub fn extract(&self, units: &[SourceUnit]) -> Result<Scopes, GovisError> {
        info!(units = units.len(); "Extracting declarations");

        let mut extractor = Extractor::new();
        for unit in units {
            debug!(unit = unit.name(); "Parsing source unit");
            let file = govis_parser::parse(unit.source()).map_err(|err| {
                warn!(unit = unit.name(), errors = err.error_count(); "Rejecting source unit");
                GovisError::new_parse_error(unit.name(), err, unit.source())
            })?;
            for warning in file.warnings() {
                warn!(unit = unit.name(); "{warning}");
            }
            extractor.add(file);
        }

        let scopes = extractor.finish();
        debug!(scopes = scopes.len(); "Declarations extracted");
        trace!(scopes:?; "Extracted scopes");
        Ok(scopes)
    }

    /// Build the dependency graph of `scopes`, leaving out the scopes
    /// excluded by the configuration.
    pub fn build_graph(&self, scopes: &Scopes) -> Graph {
        let filter = self.config.graph().scope_filter();
        let graph = Graph::build(self.config.graph().name(), scopes, |id| {
            filter.is_excluded(id)
        });
        info!(subgraphs = graph.subgraphs().len(); "Graph built");
        graph
    }

    /// Serialize `graph` as DOT text.
    pub fn render_dot(&self, graph: &Graph) -> String {
        export::dot::to_dot(graph)
    }

    /// Run the whole pipeline on `units` and return the DOT text.
    ///
    /// # Errors
    ///
    /// Returns [`GovisError::Parse`] when a unit cannot be parsed.
    pub fn run(&self, units: &[SourceUnit]) -> Result<String, GovisError> {
        let scopes = self.extract(units)?;
        let graph = self.build_graph(&scopes);
        Ok(self.render_dot(&graph))
    }
}
