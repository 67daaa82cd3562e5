//! How serious a front end diagnostic is.

use std::fmt;

/// Diagnostic severity, ordered from least to most serious.
///
/// A single [`Severity::Error`] rejects the whole source file. Warnings are
/// reported alongside errors but never stop extraction on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// The lowercase word printed in front of a diagnostic message.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_outranks_warning() {
        assert!(Severity::Error > Severity::Warning);
        assert_eq!(
            [Severity::Warning, Severity::Error].into_iter().max(),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert!(!Severity::Warning.is_error());
    }
}
