use b_util::{Span, Symbol};

/// The binary operator family, shared between plain binary-operator tokens
/// and `=op` compound-assignment tokens so the `assneqs` mapping in
/// `b-par` can dispatch on one enum instead of two parallel token sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Eof,
    /// Emitted in place of a malformed token once its diagnostic has been
    /// reported, so the parser can skip it and keep going.
    Error,

    Name(Symbol),
    IntConst(i64),
    StrConst(Vec<u8>),

    KwAuto,
    KwExtrn,
    KwCase,
    KwIf,
    KwElse,
    KwWhile,
    KwSwitch,
    KwGoto,
    KwReturn,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Colon,
    Question,

    Assign,
    CompoundAssign(BinOp),
    Binary(BinOp),

    Bang,
    PlusPlus,
    MinusMinus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
