//! Byte ranges of a Go file highlighted by a diagnostic.

use crate::span::Span;

/// Whether a label points at the problem or at code around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Primary,
    Secondary,
}

/// A message attached to a [`Span`] of the file being read.
#[derive(Debug, Clone)]
pub struct Label {
    kind: LabelKind,
    span: Span,
    message: String,
}

impl Label {
    pub fn new(kind: LabelKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// A label on the offending code itself.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(LabelKind::Primary, span, message)
    }

    /// A label on surrounding code, e.g. where an unclosed literal opened.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(LabelKind::Secondary, span, message)
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.kind == LabelKind::Primary
    }
}
