//! Errors internal to `b-util` itself (arena misuse, bad interner handles).
//! These are programmer-error conditions, never conditions a B source file
//! can trigger — those go through [`crate::diagnostic::Handler`] instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtilError {
    #[error("index {0} out of bounds for arena of length {1}")]
    IndexOutOfBounds(usize, usize),
}

pub type Result<T> = std::result::Result<T, UtilError>;
