use super::Lexer;
use crate::token::{BinOp, TokenKind};
use b_util::{FileId, Handler, Interner};

fn kinds(src: &str) -> (Vec<TokenKind>, bool) {
    let mut interner = Interner::new();
    let handler = Handler::new();
    let tokens = Lexer::tokenize(src, FileId::DUMMY, &mut interner, &handler);
    (tokens.into_iter().map(|t| t.kind).collect(), handler.has_errors())
}

#[test]
fn function_header_tokenizes() {
    let (kinds, had_errors) = kinds("main() {\n    auto x;\n    x = 1;\n    return(x);\n}\n");
    assert!(!had_errors);
    assert!(matches!(kinds[0], TokenKind::Name(_)));
    assert_eq!(kinds[1], TokenKind::LParen);
    assert_eq!(kinds[2], TokenKind::RParen);
    assert_eq!(kinds[3], TokenKind::LBrace);
    assert_eq!(kinds[4], TokenKind::KwAuto);
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn skips_comments_between_tokens() {
    let (kinds, had_errors) = kinds("a /* comment */ = /* another\nmultiline */ 1;");
    assert!(!had_errors);
    assert!(matches!(kinds[0], TokenKind::Name(_)));
    assert_eq!(kinds[1], TokenKind::Assign);
    assert_eq!(kinds[2], TokenKind::IntConst(1));
    assert_eq!(kinds[3], TokenKind::Semi);
    assert_eq!(kinds[4], TokenKind::Eof);
}

#[test]
fn unterminated_comment_is_reported_once() {
    let (_, had_errors) = kinds("a = 1; /* never closed");
    assert!(had_errors);
}

#[test]
fn compound_assignment_in_context() {
    let (kinds, had_errors) = kinds("x =+ 1;");
    assert!(!had_errors);
    assert!(matches!(kinds[0], TokenKind::Name(_)));
    assert_eq!(kinds[1], TokenKind::CompoundAssign(BinOp::Add));
    assert_eq!(kinds[2], TokenKind::IntConst(1));
}

#[test]
fn keyword_and_identifier_are_distinguished() {
    let (kinds, _) = kinds("auto autovar;");
    assert_eq!(kinds[0], TokenKind::KwAuto);
    assert!(matches!(kinds[1], TokenKind::Name(_)));
}

#[test]
fn string_and_char_constants_in_context() {
    let (kinds, had_errors) = kinds("x = 'ab'; y = \"hi*n\";");
    assert!(!had_errors);
    assert_eq!(kinds[2], TokenKind::IntConst(((b'a' as i64) << 8) | b'b' as i64));
    assert_eq!(kinds[8], TokenKind::StrConst(vec![b'h', b'i', 0x0A]));
}

#[test]
fn eof_is_stable_at_end_of_source() {
    let (kinds, _) = kinds("");
    assert_eq!(kinds, vec![TokenKind::Eof]);
}
