//! Tokenizer for the `b` language: turns source text into a flat token
//! stream, interning names and packing character/string constants along
//! the way. Diagnostics for malformed tokens (unterminated comments,
//! over-long names, bad escapes, ...) are reported through the shared
//! [`b_util::Handler`] rather than failing the lex outright, so a single
//! pass can surface every lexical problem in a file at once.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{BinOp, Token, TokenKind};
