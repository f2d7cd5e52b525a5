use crate::scope::Scope;
use crate::storage::{ObjectType, StorageClass};
use b_util::{define_idx, Symbol};

define_idx!(SymbolId);
define_idx!(CodeFragmentId);

/// A data-definition initializer (`spec.md` §3's "ival"): either a
/// reference to another symbol, or a constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ival {
    Symbol(SymbolId),
    Int(i64),
    Str(Vec<u8>),
}

/// Bookkeeping kept only for `Func` symbols.
#[derive(Debug)]
pub struct FuncData {
    pub code: CodeFragmentId,
    pub locals: Scope,
    /// `@N` counter consumed by `mklabel` (`spec.md` §4.2).
    pub next_label: u32,
}

/// Bookkeeping kept only for `Label` symbols.
#[derive(Debug, Default)]
pub struct LabelData {
    /// Set while a `goto` references the label before it has been defined;
    /// cleared once the label's own definition is parsed. Any label still
    /// forward at the end of its function is a diagnostic.
    pub forward: bool,
    /// Index of the defining `NAMDEF` within the owning code fragment, once
    /// known.
    pub def_node: Option<u32>,
    /// The monotonic integer JMP/BZ/CASE targets resolve to, assigned at
    /// `mklabel` time or at first definition, whichever comes first.
    pub labpc: Option<u32>,
}

/// One entry in the symbol table (the spec's "stabent").
#[derive(Debug)]
pub struct SymEntry {
    pub name: Symbol,
    pub storage: StorageClass,
    pub object: ObjectType,

    pub func: Option<FuncData>,
    pub label: Option<LabelData>,

    /// Frame-relative stack slot for `Auto` storage: arguments at `0, 1, …`,
    /// locals at `-1, -2, …` (`spec.md` §6).
    pub auto_offset: Option<i32>,
    /// Declared size for `Vector` objects.
    pub vector_size: Option<u32>,
    /// Initializer list for `Extern` data definitions, in source order.
    pub inits: Vec<Ival>,

    /// Numbered into a function's extern table by the intermediate-file
    /// writer; unused until then.
    pub extern_index: Option<u32>,
}

impl SymEntry {
    pub fn new(name: Symbol) -> Self {
        Self {
            name,
            storage: StorageClass::New,
            object: ObjectType::Simple,
            func: None,
            label: None,
            auto_offset: None,
            vector_size: None,
            inits: Vec::new(),
            extern_index: None,
        }
    }
}
