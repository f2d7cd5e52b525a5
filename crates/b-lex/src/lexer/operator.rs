use super::Lexer;
use crate::token::{BinOp, Token, TokenKind};
use b_util::{DiagnosticCode, Handler};

impl<'a> Lexer<'a> {
    /// Reads the binary operator starting at the cursor's current position,
    /// applying maximal munch for the two-character forms (`<<`, `>>`,
    /// `<=`, `>=`). Assumes the caller has already ruled out `==` and `!=`.
    fn lex_binop_tail(&mut self) -> BinOp {
        match self.cursor.bump().unwrap() {
            '+' => BinOp::Add,
            '-' => BinOp::Sub,
            '*' => BinOp::Mul,
            '/' => BinOp::Div,
            '%' => BinOp::Mod,
            '&' => BinOp::And,
            '|' => BinOp::Or,
            '<' if self.cursor.first() == '<' => {
                self.cursor.bump();
                BinOp::Shl
            }
            '<' if self.cursor.first() == '=' => {
                self.cursor.bump();
                BinOp::Le
            }
            '<' => BinOp::Lt,
            '>' if self.cursor.first() == '>' => {
                self.cursor.bump();
                BinOp::Shr
            }
            '>' if self.cursor.first() == '=' => {
                self.cursor.bump();
                BinOp::Ge
            }
            '>' => BinOp::Gt,
            other => unreachable!("not a binop start: {other}"),
        }
    }

    /// True for the characters `=` may be immediately followed by to form a
    /// compound assignment (`spec.md` §4.3's `assneqs` table). `=` and `!`
    /// are excluded so `==` and a following `=` always lex as two separate
    /// tokens rather than as an equality compound-assign; B programs assign
    /// comparison results explicitly (`x = y == z`) rather than via `x===z`.
    fn starts_compound_op(c: char) -> bool {
        matches!(c, '+' | '-' | '*' | '/' | '%' | '&' | '|' | '<' | '>')
    }

    pub(super) fn lex_operator(&mut self, handler: &Handler) -> Token {
        let start = self.offset();
        let first = self.cursor.first();
        let second = self.cursor.second();

        let kind = match first {
            '(' => { self.cursor.bump(); TokenKind::LParen }
            ')' => { self.cursor.bump(); TokenKind::RParen }
            '{' => { self.cursor.bump(); TokenKind::LBrace }
            '}' => { self.cursor.bump(); TokenKind::RBrace }
            '[' => { self.cursor.bump(); TokenKind::LBracket }
            ']' => { self.cursor.bump(); TokenKind::RBracket }
            ';' => { self.cursor.bump(); TokenKind::Semi }
            ',' => { self.cursor.bump(); TokenKind::Comma }
            ':' => { self.cursor.bump(); TokenKind::Colon }
            '?' => { self.cursor.bump(); TokenKind::Question }
            '!' if second == '=' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::Binary(BinOp::Ne)
            }
            '!' => { self.cursor.bump(); TokenKind::Bang }
            '+' if second == '+' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::PlusPlus
            }
            '-' if second == '-' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::MinusMinus
            }
            '=' if second == '=' => {
                self.cursor.bump();
                self.cursor.bump();
                TokenKind::Binary(BinOp::Eq)
            }
            '=' => {
                self.cursor.bump();
                if Self::starts_compound_op(self.cursor.first()) {
                    TokenKind::CompoundAssign(self.lex_binop_tail())
                } else {
                    TokenKind::Assign
                }
            }
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '<' | '>' => TokenKind::Binary(self.lex_binop_tail()),
            other => {
                self.cursor.bump();
                handler
                    .build_error(self.span_from(start), format!("invalid token character `{other}`"))
                    .code(DiagnosticCode::INVALID_TOKEN_CHAR)
                    .emit(handler);
                TokenKind::Error
            }
        };

        Token::new(kind, self.span_from(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use b_util::FileId;

    fn lex(src: &str) -> TokenKind {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, FileId::DUMMY);
        lexer.lex_operator(&handler).kind
    }

    #[test]
    fn plain_equals_is_assign() {
        assert_eq!(lex("="), TokenKind::Assign);
    }

    #[test]
    fn double_equals_is_eq_not_compound() {
        assert_eq!(lex("=="), TokenKind::Binary(BinOp::Eq));
    }

    #[test]
    fn compound_assign_add() {
        assert_eq!(lex("=+"), TokenKind::CompoundAssign(BinOp::Add));
    }

    #[test]
    fn compound_assign_shift_left() {
        assert_eq!(lex("=<<"), TokenKind::CompoundAssign(BinOp::Shl));
    }

    #[test]
    fn maximal_munch_shift_vs_relational() {
        assert_eq!(lex("<<"), TokenKind::Binary(BinOp::Shl));
        assert_eq!(lex("<="), TokenKind::Binary(BinOp::Le));
        assert_eq!(lex("<"), TokenKind::Binary(BinOp::Lt));
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(lex("++"), TokenKind::PlusPlus);
        assert_eq!(lex("--"), TokenKind::MinusMinus);
    }

    #[test]
    fn invalid_character_is_diagnosed() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("@", FileId::DUMMY);
        let tok = lexer.lex_operator(&handler);
        assert_eq!(tok.kind, TokenKind::Error);
        assert!(handler.has_errors());
    }
}
