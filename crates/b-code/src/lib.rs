//! Code representation: the stack-machine opcode set, the ordered
//! sequence of code nodes making up one function body, and the
//! word-aligned string pool literals are interned into.

mod fragment;
mod node;
mod strpool;

pub use fragment::CodeFragment;
pub use node::{CodeNode, Const};
pub use strpool::StringPool;
