//! Configuration types for go-vis graph generation.
//!
//! All types implement [`serde::Deserialize`] so that the CLI can load them
//! from a TOML file. Every field has a default, and a missing section falls
//! back to [`Default`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`GraphConfig`] - Name of the emitted graph and the scopes left out of it.
//! - [`ScopeFilter`] - The exclusion predicate derived from [`GraphConfig`].
//!
//! # Example
//!
//! ```
//! # use govis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.graph().name(), "go-vis");
//! assert!(config.graph().scope_filter().is_excluded("server_test"));
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Graph configuration section.
    #[serde(default)]
    graph: GraphConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given graph section.
    pub fn new(graph: GraphConfig) -> Self {
        Self { graph }
    }

    /// Returns the graph configuration.
    pub fn graph(&self) -> &GraphConfig {
        &self.graph
    }
}

/// Settings of the emitted DOT graph.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Name of the top-level `digraph`.
    #[serde(default = "default_name")]
    name: String,

    /// Scope id suffixes whose scopes are left out of the output.
    #[serde(default = "default_excluded_suffixes")]
    excluded_suffixes: Vec<String>,
}

fn default_name() -> String {
    "go-vis".to_string()
}

fn default_excluded_suffixes() -> Vec<String> {
    vec!["_test".to_string()]
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            excluded_suffixes: default_excluded_suffixes(),
        }
    }
}

impl GraphConfig {
    /// Creates a new [`GraphConfig`].
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the top-level `digraph`.
    /// * `excluded_suffixes` - Scope id suffixes to leave out of the output.
    pub fn new(name: impl Into<String>, excluded_suffixes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            excluded_suffixes,
        }
    }

    /// Returns the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the excluded scope id suffixes.
    pub fn excluded_suffixes(&self) -> &[String] {
        &self.excluded_suffixes
    }

    /// Builds the scope exclusion predicate for this configuration.
    pub fn scope_filter(&self) -> ScopeFilter {
        ScopeFilter::new(self.excluded_suffixes.clone())
    }
}

/// Decides which scopes are left out of the rendered graph.
///
/// Excluded scopes are still extracted; they are only skipped when the graph
/// is built.
#[derive(Debug, Clone, Default)]
pub struct ScopeFilter {
    excluded_suffixes: Vec<String>,
}

impl ScopeFilter {
    pub fn new(excluded_suffixes: Vec<String>) -> Self {
        Self { excluded_suffixes }
    }

    /// Returns `true` when `scope_id` ends with an excluded suffix.
    pub fn is_excluded(&self, scope_id: &str) -> bool {
        self.excluded_suffixes
            .iter()
            .any(|suffix| scope_id.ends_with(suffix.as_str()))
    }
}
