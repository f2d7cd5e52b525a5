use super::{Lexer, MAX_CHAR_LEN, MAX_STRING_LEN};
use crate::token::{Token, TokenKind};
use b_util::{DiagnosticCode, Handler, Span, SENTINEL_BYTE};

impl<'a> Lexer<'a> {
    /// Decodes one escape sequence or literal character following `*` (the
    /// escape character, not `\`) and appends its bytes to `out`. Any
    /// character not in the table is a diagnostic; both the `*` and that
    /// character still pass through unchanged so lexing of the surrounding
    /// literal can continue (`spec.md` §4.1).
    fn decode_escape(&mut self, out: &mut Vec<u8>, handler: &Handler) {
        let escape_start = self.offset();
        let c = self.cursor.bump();
        match c {
            Some('0') => out.push(0x00),
            Some('e') => out.push(SENTINEL_BYTE),
            Some('(') => out.push(b'{'),
            Some(')') => out.push(b'}'),
            Some('t') => out.push(0x09),
            Some('n') => out.push(0x0A),
            Some('*') => out.push(b'*'),
            Some('\'') => out.push(b'\''),
            Some('"') => out.push(b'"'),
            Some(other) => {
                handler
                    .build_error(self.span_from(escape_start), format!("invalid escape sequence `*{other}`"))
                    .code(DiagnosticCode::INVALID_ESCAPE)
                    .emit(handler);
                out.push(b'*');
                let mut buf = [0u8; 4];
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => {
                out.push(b'*');
            }
        }
    }

    /// Character constants pack up to 4 bytes, big-endian, into an integer
    /// word (`spec.md` §3/§4.1). They are tagged as integer constants, not
    /// a separate token kind (`spec.md` §6).
    pub(super) fn lex_char(&mut self, handler: &Handler) -> Token {
        let start = self.offset();
        self.cursor.bump(); // opening '

        let mut bytes: Vec<u8> = Vec::new();
        loop {
            match self.cursor.first() {
                '\'' => {
                    self.cursor.bump();
                    break;
                }
                '\0' if self.cursor.is_eof() => {
                    handler
                        .build_error(self.span_from(start), "unterminated character constant")
                        .code(DiagnosticCode::UNTERMINATED_CHAR)
                        .emit(handler);
                    break;
                }
                '*' => {
                    self.cursor.bump();
                    self.decode_escape(&mut bytes, handler);
                }
                _ => {
                    let c = self.cursor.bump().unwrap();
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }

        let span = self.span_from(start);
        if bytes.is_empty() {
            handler
                .build_error(span, "empty character constant")
                .code(DiagnosticCode::EMPTY_CHAR_CONSTANT)
                .emit(handler);
        } else if bytes.len() > MAX_CHAR_LEN {
            handler
                .build_error(span, "character constant too long")
                .code(DiagnosticCode::CHAR_CONSTANT_TOO_LONG)
                .emit(handler);
        }

        let mut value: i64 = 0;
        for &b in bytes.iter().take(MAX_CHAR_LEN) {
            value = (value << 8) | b as i64;
        }
        Token::new(TokenKind::IntConst(value), span)
    }

    /// String constants: raw bytes up to 256 encoded bytes, `*x` escapes
    /// honored. An over-long string is reported at the line the string
    /// *started* on (`spec.md` §4.1).
    pub(super) fn lex_string(&mut self, handler: &Handler) -> Token {
        let start = self.offset();
        let start_line = self.line;
        self.cursor.bump(); // opening "

        let mut bytes: Vec<u8> = Vec::new();
        let mut reported_overlong = false;
        loop {
            match self.cursor.first() {
                '"' => {
                    self.cursor.bump();
                    break;
                }
                '\0' if self.cursor.is_eof() => {
                    handler
                        .build_error(self.span_from(start), "unterminated string constant")
                        .code(DiagnosticCode::UNTERMINATED_STRING)
                        .emit(handler);
                    break;
                }
                '*' => {
                    self.cursor.bump();
                    self.decode_escape(&mut bytes, handler);
                }
                _ => {
                    let c = self.bump_newline_aware().unwrap();
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
            if bytes.len() > MAX_STRING_LEN && !reported_overlong {
                handler
                    .build_error(
                        Span::with_file(start, start, self.file_id, start_line, self.column_at(start)),
                        "string constant too long",
                    )
                    .code(DiagnosticCode::STRING_TOO_LONG)
                    .emit(handler);
                reported_overlong = true;
            }
        }

        bytes.truncate(MAX_STRING_LEN);
        Token::new(TokenKind::StrConst(bytes), self.span_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use b_util::FileId;

    #[test]
    fn packs_char_constant_big_endian() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("'ab'", FileId::DUMMY);
        let tok = lexer.lex_char(&handler);
        assert_eq!(tok.kind, TokenKind::IntConst(((b'a' as i64) << 8) | b'b' as i64));
    }

    #[test]
    fn empty_char_constant_is_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("''", FileId::DUMMY);
        let tok = lexer.lex_char(&handler);
        assert!(handler.has_errors());
        assert_eq!(tok.kind, TokenKind::IntConst(0));
    }

    #[test]
    fn escape_sequences_decode() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("\"a*nb\"", FileId::DUMMY);
        let tok = lexer.lex_string(&handler);
        assert_eq!(tok.kind, TokenKind::StrConst(vec![b'a', 0x0A, b'b']));
        assert!(!handler.has_errors());
    }

    #[test]
    fn unknown_escape_passes_through_both_bytes() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("\"*z\"", FileId::DUMMY);
        let tok = lexer.lex_string(&handler);
        assert!(handler.has_errors());
        assert_eq!(tok.kind, TokenKind::StrConst(vec![b'*', b'z']));
    }
}
