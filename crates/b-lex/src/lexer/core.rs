use super::Lexer;
use crate::token::{Token, TokenKind};
use b_util::{FileId, Handler, Interner, Span};

impl<'a> Lexer<'a> {
    /// Produces the next token, skipping leading whitespace and comments.
    /// Returns an `Eof` token (repeatedly, if called again) once the source
    /// is exhausted.
    pub fn next_token(&mut self, interner: &mut Interner, handler: &Handler) -> Token {
        self.skip_trivia(handler);

        let start = self.offset();
        if self.cursor.is_eof() {
            return Token::new(TokenKind::Eof, self.span_from(start));
        }

        match self.cursor.first() {
            c if c == '_' || c.is_ascii_alphabetic() => self.lex_name(interner, handler),
            c if c.is_ascii_digit() => self.lex_number(handler),
            '\'' => self.lex_char(handler),
            '"' => self.lex_string(handler),
            _ => self.lex_operator(handler),
        }
    }

    /// Collects the entire token stream for `source`, stopping after the
    /// first `Eof`. Convenient for tests and for the driver's
    /// `--emit-tokens` flag.
    pub fn tokenize(source: &str, file_id: FileId, interner: &mut Interner, handler: &Handler) -> Vec<Token> {
        let mut lexer = Lexer::new(source, file_id);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token(interner, handler);
            let is_eof = tok.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    pub fn current_span(&self) -> Span {
        self.span_from(self.offset())
    }
}
