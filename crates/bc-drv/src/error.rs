use std::path::PathBuf;
use thiserror::Error;

/// Errors the driver itself can fail with, distinct from the `Diagnostic`s
/// collected during parsing (`spec.md` §7's "Fatal" category plus the
/// driver-level "compilation failed" outcome).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read source file {0}: {1}")]
    ReadSource(PathBuf, #[source] std::io::Error),
    #[error("failed to write intermediate file {0}: {1}")]
    WriteOutput(PathBuf, #[source] std::io::Error),
    #[error(transparent)]
    Serialize(#[from] b_bif::WriteError),
    #[error("failed to load config file {0}: {1}")]
    Config(PathBuf, String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
