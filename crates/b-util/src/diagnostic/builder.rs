//! Fluent construction of [`super::Diagnostic`]s.

use super::{Diagnostic, DiagnosticCode, Handler, Level};
use crate::span::Span;

pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), span: Span::DUMMY, code: None, notes: Vec::new() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic { level: self.level, message: self.message, span: self.span, code: self.code, notes: self.notes }
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_expected_fields() {
        let diag = DiagnosticBuilder::error("duplicate definition of `x`")
            .code(DiagnosticCode::DUPLICATE_DEFINITION)
            .span(Span::new(0, 1, 4, 1))
            .note("first defined on line 2")
            .build();
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.code, Some(DiagnosticCode::DUPLICATE_DEFINITION));
        assert_eq!(diag.notes.len(), 1);
    }
}
