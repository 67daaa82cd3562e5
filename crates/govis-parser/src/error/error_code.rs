//! Stable codes for the problems the Go front end reports.
//!
//! Codes below `E100` come from the lexer, the others from the parser.

use std::fmt;

/// Identifies the kind of a [`Diagnostic`](crate::error::Diagnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A `"` string reaches the end of its line.
    E001,
    /// A character that cannot start any Go token, such as `#` or `$`.
    E002,
    /// A `` ` `` string is never closed.
    E003,
    /// A `/*` comment is never closed.
    E004,
    /// A `'` rune reaches the end of its line.
    E005,
    /// A token the grammar does not allow at its position.
    E100,
    /// The file ends in the middle of a construct.
    E101,
    /// The file does not start with `package <name>`.
    E102,
    /// A parameter list names some parameters but not others.
    E103,
}

impl ErrorCode {
    /// The code as printed, e.g. `E102`.
    pub fn as_str(self) -> &'static str {
        self.entry().0
    }

    /// One-line summary used as the default message and label text.
    pub fn description(self) -> &'static str {
        self.entry().1
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            Self::E001 => ("E001", "unterminated string literal"),
            Self::E002 => ("E002", "unexpected character"),
            Self::E003 => ("E003", "unterminated raw string literal"),
            Self::E004 => ("E004", "unterminated block comment"),
            Self::E005 => ("E005", "unterminated rune literal"),
            Self::E100 => ("E100", "unexpected token"),
            Self::E101 => ("E101", "incomplete input"),
            Self::E102 => ("E102", "missing package clause"),
            Self::E103 => ("E103", "mixed named and unnamed parameters"),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
