//! Accumulates the diagnostics of one pass over a file.

use crate::error::{Diagnostic, ParseError};

/// Diagnostics reported so far, so that one run of the lexer can report
/// every malformed token of a file.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns `value` unless an error was emitted. A failure carries every
    /// diagnostic, warnings included; warnings alone are dropped.
    pub fn finish<T>(self, value: T) -> Result<T, ParseError> {
        if self.diagnostics.iter().any(|diag| diag.severity().is_error()) {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(value)
        }
    }
}
