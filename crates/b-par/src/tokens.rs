use b_lex::{Lexer, Token};
use b_util::{FileId, Handler, Interner};
use std::collections::VecDeque;

/// Wraps the lexer with the two-slot pushback buffer `spec.md` §4.3/§9
/// describes as the parser's only lookahead mechanism, used solely to
/// disambiguate `name ':'` (a label) from `name` starting an
/// expression-statement.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    pushback: VecDeque<Token>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str, file_id: FileId) -> Self {
        Self { lexer: Lexer::new(source, file_id), pushback: VecDeque::new() }
    }

    pub fn next(&mut self, interner: &mut Interner, handler: &Handler) -> Token {
        if let Some(tok) = self.pushback.pop_front() {
            return tok;
        }
        self.lexer.next_token(interner, handler)
    }

    /// Pushes `tok` back so the next `next()` call returns it again. At
    /// most two tokens may be outstanding at once; a third is a
    /// programming error in the parser, not a condition a `b` program can
    /// trigger.
    pub fn unread(&mut self, tok: Token) {
        assert!(self.pushback.len() < 2, "pushback buffer can only hold two tokens");
        self.pushback.push_front(tok);
    }
}
