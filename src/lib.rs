//! Regression-audit driver for an external compression tool.
//!
//! Reads a log of previously recorded compression results, re-runs the
//! configured external tool for every record (compress, then decompress
//! the result back), and reports per record whether the round-tripped
//! output is byte-identical to the original fixture, along with how the
//! new compressed size compares to the recorded one.

pub mod audit;
pub mod compare;
pub mod config;
pub mod error;
pub mod record;
pub mod tool;

pub use audit::{file_name, run_audit, AuditStats};
pub use compare::files_equal;
pub use config::RunConfig;
pub use error::AuditError;
pub use record::{records, LogRecord};
pub use tool::{ProcessRunner, ToolOutcome, ToolRunner};
