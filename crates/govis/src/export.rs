//! Export of the dependency graph.
//!
//! This module is the final stage of the go-vis pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Go Sources
//!     ↓ parse + extract
//! Scopes
//!     ↓ build
//! Graph
//!     ↓ export (this module)
//! DOT Text
//! ```
//!
//! # Available Backends
//!
//! - [`dot`] — Graphviz DOT text via [`dot::to_dot`]

/// Graphviz DOT export backend.
pub mod dot;
