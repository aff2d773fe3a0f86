use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// Configuration could not be read or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// The configured line pattern does not compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The results log named by the configuration does not exist.
    #[error("cannot find log file: {}", .0.display())]
    LogFileMissing(PathBuf),

    /// The tool executable named by the configuration does not exist.
    #[error("cannot find tool file: {}", .0.display())]
    ToolMissing(PathBuf),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
