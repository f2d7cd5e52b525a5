//! Shared infrastructure used by every phase of the `b` compiler: an
//! arena/typed-index utility, source spans, diagnostic reporting, and
//! string interning.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use index_vec::{IndexVec, Idx};
pub use span::{FileId, Span};
pub use symbol::{Interner, Symbol};

/// The byte value B uses to terminate a string instead of NUL
/// (`spec.md` §6, written `*e` in source). Shared between the lexer (which
/// decodes the `*e` escape) and the string pool (which appends it at intern
/// time).
pub const SENTINEL_BYTE: u8 = 0xFF;

/// The machine word size the wire format and frame-offset arithmetic are
/// defined in terms of (`spec.md` §6's `INTSIZE`).
pub const INTSIZE: usize = 4;
