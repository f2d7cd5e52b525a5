use super::Lexer;
use b_util::{Handler, Span};

impl<'a> Lexer<'a> {
    /// Skips whitespace and `/* ... */` comments. A comment that is never
    /// closed is reported at the line it began on (`spec.md` §4.1).
    pub(super) fn skip_trivia(&mut self, handler: &Handler) {
        loop {
            match self.cursor.first() {
                c if c.is_whitespace() => {
                    self.bump_newline_aware();
                }
                '/' if self.cursor.second() == '*' => {
                    let start = self.offset();
                    let start_line = self.line;
                    self.cursor.bump();
                    self.cursor.bump();
                    let mut closed = false;
                    while !self.cursor.is_eof() {
                        if self.cursor.first() == '*' && self.cursor.second() == '/' {
                            self.cursor.bump();
                            self.cursor.bump();
                            closed = true;
                            break;
                        }
                        self.bump_newline_aware();
                    }
                    if !closed {
                        handler
                            .build_error(
                                Span::with_file(start, self.offset(), self.file_id, start_line, self.column_at(start)),
                                "unterminated comment",
                            )
                            .code(b_util::DiagnosticCode::UNTERMINATED_COMMENT)
                            .emit(handler);
                    }
                }
                _ => break,
            }
        }
    }
}
