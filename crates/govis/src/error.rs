//! Error types for go-vis operations.
//!
//! This module provides the main error type [`GovisError`] which wraps the
//! error conditions that can occur while turning Go sources into a graph.

use std::io;

use thiserror::Error;

use govis_parser::error::ParseError;

/// The main error type for go-vis operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the diagnostics of the source unit that failed
/// together with its name and text, so that callers can render the errors
/// against the source.
#[derive(Debug, Error)]
pub enum GovisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{unit}: {err}")]
    Parse {
        unit: String,
        err: ParseError,
        src: String,
    },

    #[error("no input specified")]
    NoInputSpecified,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GovisError {
    /// Create a new `Parse` error for the source unit `unit`.
    pub fn new_parse_error(
        unit: impl Into<String>,
        err: ParseError,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            unit: unit.into(),
            err,
            src: src.into(),
        }
    }
}
