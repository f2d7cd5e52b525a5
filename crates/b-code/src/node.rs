use b_sem::SymbolId;

/// One constant operand to `PSHCON` — an integer or raw string bytes. The
/// writer interns the string into the pool at serialization time
/// (`spec.md` §4.4), so the bytes are carried here rather than an offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Const {
    Int(i64),
    Str(Vec<u8>),
}

/// A stack-machine instruction (`spec.md` §4.3's opcode table). Each variant
/// carries exactly the payload its opcode needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeNode {
    /// This location carries a symbolic label.
    NamDef(SymbolId),
    Jmp(SymbolId),
    /// Pop; if zero, branch.
    Bz(SymbolId),
    /// If top-of-stack equals `disc`, pop and branch to `target`; otherwise
    /// leave the discriminant in place.
    Case { disc: i64, target: SymbolId },
    Pop,
    PopT,
    PushT,
    PopN(i32),
    Dup,
    /// Copy the value `n`-from-top to the top. `DupN(0)` is `Dup`.
    DupN(i32),
    /// Rotate the top three: `p2 p1 p0 -> p0 p2 p1`.
    Rot,
    PshCon(Const),
    /// Push a symbol's address: absolute for `Extern`, frame-relative for
    /// `Auto`.
    PshSym(SymbolId),
    Deref,
    Store,
    Call,
    Enter(i32),
    Leave(i32),
    Ret,
    /// Point the auto-vector at frame offset `n` at its own base.
    AvInit(i32),

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    Neg,
    Not,
    And,
    Or,

    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}
