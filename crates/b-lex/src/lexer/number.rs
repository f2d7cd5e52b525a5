use super::Lexer;
use crate::token::{Token, TokenKind};
use b_util::{DiagnosticCode, Handler};

impl<'a> Lexer<'a> {
    /// A leading `0` selects octal, otherwise decimal (`spec.md` §3/§4.1).
    /// An `8` or `9` digit inside an octal literal is a diagnostic; parsing
    /// continues treating the digit modulo 8 so the rest of the constant
    /// (and the rest of the file) keeps lexing.
    pub(super) fn lex_number(&mut self, handler: &Handler) -> Token {
        let start = self.offset();
        let octal = self.cursor.first() == '0';
        let mut value: i64 = 0;
        let mut reported_bad_octal = false;

        while self.cursor.first().is_ascii_digit() {
            let c = self.cursor.bump().unwrap();
            let digit = (c as u8 - b'0') as i64;
            if octal && digit > 7 {
                if !reported_bad_octal {
                    let span = self.span_from(start);
                    handler
                        .build_error(span, "invalid digit in octal constant")
                        .code(DiagnosticCode::INVALID_OCTAL_DIGIT)
                        .emit(handler);
                    reported_bad_octal = true;
                }
                value = value * 8 + (digit % 8);
            } else if octal {
                value = value * 8 + digit;
            } else {
                value = value * 10 + digit;
            }
        }

        Token::new(TokenKind::IntConst(value), self.span_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use b_util::FileId;

    fn lex(src: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, FileId::DUMMY);
        let tok = lexer.lex_number(&handler);
        (tok.kind, handler.has_errors())
    }

    #[test]
    fn decimal_literal() {
        assert_eq!(lex("1234").0, TokenKind::IntConst(1234));
    }

    #[test]
    fn octal_literal() {
        assert_eq!(lex("017").0, TokenKind::IntConst(15));
    }

    #[test]
    fn bad_octal_digit_is_diagnosed_but_recovers() {
        let (kind, has_errors) = lex("09");
        assert!(has_errors);
        assert_eq!(kind, TokenKind::IntConst(1));
    }
}
