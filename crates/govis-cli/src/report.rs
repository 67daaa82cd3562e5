//! Rendering of [`GovisError`]s as miette reports.
//!
//! A parse failure becomes one report per diagnostic, each carrying the text
//! of the file it points into. Every other error becomes a single report
//! without source code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use govis::GovisError;
use govis_parser::error::{Diagnostic, Severity};

/// One problem, ready to be rendered by a miette report handler.
#[derive(Debug)]
pub struct Report {
    message: String,
    severity: miette::Severity,
    code: Option<String>,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    source: Option<NamedSource<String>>,
}

impl Report {
    fn from_diagnostic(diag: &Diagnostic, unit: &str, src: &str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = SourceSpan::new(label.span().start().into(), label.span().len());
                let text = Some(label.message().to_owned());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(text, span)
                } else {
                    LabeledSpan::new_with_span(text, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_owned(),
            severity: match diag.severity() {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
            },
            code: diag.code().map(|code| code.to_string()),
            help: diag.help().map(str::to_owned),
            labels,
            source: Some(NamedSource::new(unit, src.to_owned())),
        }
    }

    fn from_error(err: &GovisError) -> Self {
        let (code, help) = match err {
            GovisError::Io(_) => ("govis::io", None),
            GovisError::NoInputSpecified => (
                "govis::input",
                Some("pass one or more package directories with --path"),
            ),
            GovisError::Config(_) => ("govis::config", None),
            GovisError::Parse { .. } => ("govis::parse", None),
        };

        Self {
            message: err.to_string(),
            severity: miette::Severity::Error,
            code: Some(code.to_owned()),
            help: help.map(str::to_owned),
            labels: Vec::new(),
            source: None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report {}

impl MietteDiagnostic for Report {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_ref()
            .map(|source| source as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }
}

/// Splits `err` into the reports shown to the user.
pub fn reports(err: &GovisError) -> Vec<Report> {
    match err {
        GovisError::Parse { unit, err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, unit, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}

/// Renders every report of `err` with miette's graphical handler, falling
/// back to the bare message when rendering fails.
pub fn render(err: &GovisError) -> Vec<String> {
    let handler = miette::GraphicalReportHandler::new();
    reports(err)
        .iter()
        .map(|report| {
            let mut out = String::new();
            match handler.render_report(&mut out, report) {
                Ok(()) => out,
                Err(_) => report.to_string(),
            }
        })
        .collect()
}
