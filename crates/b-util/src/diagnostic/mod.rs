//! Diagnostic reporting.
//!
//! `spec.md` §7 splits problems into two categories: *Diagnostics*, which
//! are reported and parsing continues, and *Fatal* errors, which abort.
//! This module is the home for the first category; fatal conditions are
//! instead `thiserror` enums local to the phase crate that can fail (see
//! `b-lex::LexError`, `b-bif::WriteError`, etc).

mod builder;
mod codes;
mod level;

pub use builder::DiagnosticBuilder;
pub use codes::DiagnosticCode;
pub use level::Level;

use crate::span::Span;
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic { level: Level::Error, message: message.into(), span, code: None, notes: Vec::new() }
    }
}

/// Accumulates diagnostics for one compilation and tracks whether any
/// error-level diagnostic was seen — the "errf" flag from `spec.md` §5/§7.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self { diagnostics: RefCell::new(Vec::new()) }
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level == Level::Error).count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_tracks_error_level_only() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic { level: Level::Note, message: "fyi".into(), span: Span::DUMMY, code: None, notes: vec![] });
        assert!(!handler.has_errors());
        handler.build_error(Span::DUMMY, "duplicate definition").emit(&handler);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }
}
