use super::{Lexer, MAX_NAME_LEN};
use crate::token::{Token, TokenKind};
use b_util::{DiagnosticCode, Handler, Interner};

const KEYWORDS: &[(&str, fn() -> TokenKind)] = &[
    ("auto", || TokenKind::KwAuto),
    ("extrn", || TokenKind::KwExtrn),
    ("case", || TokenKind::KwCase),
    ("if", || TokenKind::KwIf),
    ("else", || TokenKind::KwElse),
    ("while", || TokenKind::KwWhile),
    ("switch", || TokenKind::KwSwitch),
    ("goto", || TokenKind::KwGoto),
    ("return", || TokenKind::KwReturn),
];

impl<'a> Lexer<'a> {
    pub(super) fn lex_name(&mut self, interner: &mut Interner, handler: &Handler) -> Token {
        let start = self.offset();
        let mut text = String::new();
        let mut overflowed = false;

        while {
            let c = self.cursor.first();
            c == '_' || c.is_ascii_alphanumeric()
        } {
            let c = self.cursor.bump().unwrap();
            if text.len() < MAX_NAME_LEN {
                text.push(c);
            } else {
                overflowed = true;
            }
        }

        let span = self.span_from(start);
        if overflowed {
            handler
                .build_error(span, format!("name too long, truncated to `{text}`"))
                .code(DiagnosticCode::NAME_TOO_LONG)
                .emit(handler);
        }

        for (kw, make) in KEYWORDS {
            if *kw == text {
                return Token::new(make(), span);
            }
        }

        let symbol = interner.intern(&text);
        Token::new(TokenKind::Name(symbol), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use b_util::FileId;

    fn lex_one(src: &str) -> (TokenKind, Interner) {
        let mut interner = Interner::new();
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, FileId::DUMMY);
        let tok = lexer.lex_name(&mut interner, &handler);
        (tok.kind, interner)
    }

    #[test]
    fn recognizes_keywords() {
        assert_eq!(lex_one("while").0, TokenKind::KwWhile);
        assert_eq!(lex_one("return").0, TokenKind::KwReturn);
    }

    #[test]
    fn truncates_long_names_but_keeps_lexing_one_token() {
        let handler = Handler::new();
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("foobarbazqux", FileId::DUMMY);
        let tok = lexer.lex_name(&mut interner, &handler);
        match tok.kind {
            TokenKind::Name(sym) => assert_eq!(interner.resolve(sym), "foobarba"),
            other => panic!("expected Name, got {other:?}"),
        }
        assert!(handler.has_errors());
        assert!(lexer.cursor.is_eof());
    }
}
