use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::error::AuditError;

/// Number of capture groups the line pattern must carry: address,
/// compressed size, decompressed size.
const PATTERN_GROUPS: usize = 3;

fn default_timeout_secs() -> u64 {
    // Matches the recorded runs: five minutes per tool invocation.
    300
}

/// Runtime configuration for one audit run, loaded once at startup and
/// read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Path to the log of recorded compression results.
    pub log_path: PathBuf,
    /// Path to the external compressor/decompressor executable.
    pub tool_path: PathBuf,
    /// Line pattern with exactly three capture groups: hexadecimal
    /// address, decimal compressed size, decimal decompressed size.
    pub line_pattern: String,
    /// Filename template for the source fixture. `{addr}` expands to
    /// the record address as six-digit uppercase hex.
    pub bin_file: String,
    /// Filename template for the compressed artifact.
    pub cmp_file: String,
    /// Filename template for the decompressed artifact.
    pub dec_file: String,
    /// Argument template for the compress invocation. `{in}` and
    /// `{out}` expand to the source and destination paths; the expanded
    /// string is split on whitespace.
    pub compress_args: String,
    /// Argument template for the decompress invocation.
    pub decompress_args: String,
    /// How long to wait for each tool invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RunConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AuditError::Config(format!("reading '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            AuditError::Config(format!("parsing '{}': {e}", path.display()))
        })?;
        config.pattern()?;
        Ok(config)
    }

    /// Compile the line pattern, checking the capture group count.
    pub fn pattern(&self) -> Result<Regex, AuditError> {
        let re = Regex::new(&self.line_pattern)?;
        // captures_len counts the implicit whole-match group.
        let groups = re.captures_len() - 1;
        if groups != PATTERN_GROUPS {
            return Err(AuditError::Config(format!(
                "line pattern must have {PATTERN_GROUPS} capture groups, found {groups}"
            )));
        }
        Ok(re)
    }

    /// Path of the source fixture for `addr`.
    pub fn bin_path(&self, addr: u32) -> PathBuf {
        expand_addr(&self.bin_file, addr)
    }

    /// Path the compressed artifact is written to for `addr`.
    pub fn cmp_path(&self, addr: u32) -> PathBuf {
        expand_addr(&self.cmp_file, addr)
    }

    /// Path the decompressed artifact is written to for `addr`.
    pub fn dec_path(&self, addr: u32) -> PathBuf {
        expand_addr(&self.dec_file, addr)
    }

    /// Argument list for the compress invocation.
    pub fn compress_args(&self, input: &Path, output: &Path) -> Vec<String> {
        expand_args(&self.compress_args, input, output)
    }

    /// Argument list for the decompress invocation.
    pub fn decompress_args(&self, input: &Path, output: &Path) -> Vec<String> {
        expand_args(&self.decompress_args, input, output)
    }

    /// Per-invocation wait limit.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn expand_addr(template: &str, addr: u32) -> PathBuf {
    PathBuf::from(template.replace("{addr}", &format!("{addr:06X}")))
}

fn expand_args(template: &str, input: &Path, output: &Path) -> Vec<String> {
    template
        .replace("{in}", &input.to_string_lossy())
        .replace("{out}", &output.to_string_lossy())
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
