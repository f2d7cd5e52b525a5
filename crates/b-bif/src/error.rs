use thiserror::Error;

/// Fatal conditions from `spec.md` §7's "Fatal" category, as opposed to the
/// Diagnostics the parser collects and keeps going past. Both members here
/// abort the write: an I/O failure mid-file, or the writer finding an
/// opcode/symbol shape that parsing should have made impossible.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error writing intermediate file: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal inconsistency: {0}")]
    Internal(String),
}
