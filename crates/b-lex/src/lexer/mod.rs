mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

use crate::cursor::Cursor;
use b_util::{FileId, Span};

/// Maximum length of a name before truncation (`spec.md` §3).
pub const MAX_NAME_LEN: usize = 8;
/// Maximum encoded length of a string constant (`spec.md` §3).
pub const MAX_STRING_LEN: usize = 256;
/// Maximum number of source characters packed into a character constant.
pub const MAX_CHAR_LEN: usize = 4;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    file_id: FileId,
    line: u32,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file_id: FileId) -> Self {
        Self { cursor: Cursor::new(source), source, file_id, line: 1, line_start: 0 }
    }

    /// The full source text being lexed, for callers that want to render a
    /// snippet around a reported span.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn offset(&self) -> usize {
        self.cursor.offset()
    }

    fn column_at(&self, offset: usize) -> u32 {
        (offset - self.line_start + 1) as u32
    }

    fn span_from(&self, start: usize) -> Span {
        Span::with_file(start, self.offset(), self.file_id, self.line, self.column_at(start))
    }

    fn bump_newline_aware(&mut self) -> Option<char> {
        let c = self.cursor.bump()?;
        if c == '\n' {
            self.line += 1;
            self.line_start = self.offset();
        }
        Some(c)
    }
}

#[cfg(test)]
mod tests;
