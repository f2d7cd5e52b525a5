//! The symbol table and two-level scope model: one global ordered scope
//! plus, while a function body is being parsed, that function's local
//! scope. `b-par` owns spans and diagnostics; this crate only owns the
//! `get`/`find`/`mklabel` operations and the data each symbol carries.

mod entry;
mod scope;
mod storage;
mod table;

pub use entry::{CodeFragmentId, FuncData, Ival, LabelData, SymEntry, SymbolId};
pub use scope::Scope;
pub use storage::{ObjectType, StorageClass};
pub use table::SymbolTable;
