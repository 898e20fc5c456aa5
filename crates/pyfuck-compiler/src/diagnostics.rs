//! Builder-pattern printer for rendering compile errors.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::Error;

/// Builder for rendering a compile error with various options.
pub struct DiagnosticsPrinter<'e, 's> {
    error: &'e Error,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> DiagnosticsPrinter<'e, 's> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let (Some(source), Some(offset)) = (self.source, self.error.offset()) else {
            return write!(w, "error: {}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let title = self.error.to_string();
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(bracket_range(offset, source.len()))
                .label(label(self.error)),
        );
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&title).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

fn label(error: &Error) -> &'static str {
    match error {
        Error::UnbalancedLoop { .. } => "no `[` opens this loop",
        Error::UnclosedLoop { .. } => "this loop is never closed",
        Error::Encode(_) | Error::UnsupportedConstant(_) => "",
    }
}

/// One-character range, clamped to the source.
fn bracket_range(offset: usize, limit: usize) -> Range<usize> {
    let start = offset.min(limit);
    start..(start + 1).min(limit)
}

impl Error {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
