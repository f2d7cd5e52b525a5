/// A symbol's storage class (`spec.md` §3). `New` is transient: every
/// symbol must have left it by the time its enclosing function (or the
/// whole program, for globals) finishes parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageClass {
    New,
    Extern,
    Auto,
    Internal,
}

/// What kind of object a symbol names, independent of its storage class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Simple,
    Vector,
    Func,
    Label,
}
