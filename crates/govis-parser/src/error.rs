//! Diagnostics reported while reading Go source files.
//!
//! A [`Diagnostic`] carries a message, an optional [`ErrorCode`], labeled
//! byte spans into the file and an optional hint. [`crate::parse`] returns
//! every diagnostic of a rejected file inside one [`ParseError`]; the CLI
//! renders each of them against the file's text.
//!
//! ```
//! # use govis_parser::error::{Diagnostic, ErrorCode};
//! # use govis_parser::Span;
//! let diag = Diagnostic::error("source file has no package clause")
//!     .with_code(ErrorCode::E102)
//!     .with_label(Span::new(0..4), "expected `package`")
//!     .with_help("start the file with `package <name>`");
//! assert_eq!(diag.labels().len(), 1);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelKind};
pub use parse_error::ParseError;
pub use severity::Severity;
