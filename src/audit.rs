use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};

use crate::compare::files_equal;
use crate::config::RunConfig;
use crate::error::AuditError;
use crate::record::{records, LogRecord};
use crate::tool::ToolRunner;

/// Counters accumulated over one run, reported through the log once the
/// loop finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuditStats {
    /// Records that matched the line pattern.
    pub records: u64,
    /// Round-trips that came back byte-identical.
    pub passed: u64,
    /// Round-trips whose output differed from the fixture.
    pub mismatched: u64,
    /// Records skipped because a fixture or artifact was missing.
    pub missing: u64,
}

impl AuditStats {
    pub fn report(&self) {
        info!(
            "{} records: {} passed, {} mismatched, {} missing files",
            self.records, self.passed, self.mismatched, self.missing
        );
    }
}

/// Final path component, used for all report diagnostics.
pub fn file_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}

/// Drive a full audit run, writing one diagnostic line per matched
/// record to `out`.
///
/// Records are processed strictly in log order, one tool round-trip at
/// a time. Missing fixtures, missing artifacts and byte mismatches are
/// reported inline and never abort the run; the two startup conditions
/// (log file and tool executable must exist) are fatal.
pub fn run_audit<R, W>(
    config: &RunConfig,
    runner: &mut R,
    out: &mut W,
) -> Result<AuditStats, AuditError>
where
    R: ToolRunner,
    W: Write,
{
    if !config.log_path.exists() {
        return Err(AuditError::LogFileMissing(config.log_path.clone()));
    }
    // Checked once up front; the tool path cannot change mid-run.
    if !config.tool_path.exists() {
        return Err(AuditError::ToolMissing(config.tool_path.clone()));
    }

    let re = config.pattern()?;
    let log_text = fs::read_to_string(&config.log_path)?;
    let timeout = config.timeout();
    let mut stats = AuditStats::default();

    for (index, record) in records(&re, log_text.lines()) {
        stats.records += 1;
        audit_record(config, runner, out, index, record, timeout, &mut stats)?;
    }

    stats.report();
    Ok(stats)
}

/// Run one record: compress, decompress back, compare, report.
fn audit_record<R, W>(
    config: &RunConfig,
    runner: &mut R,
    out: &mut W,
    index: usize,
    record: LogRecord,
    timeout: Duration,
    stats: &mut AuditStats,
) -> Result<(), AuditError>
where
    R: ToolRunner,
    W: Write,
{
    let bin = config.bin_path(record.address);
    let cmp = config.cmp_path(record.address);
    let dec = config.dec_path(record.address);

    runner.run(&config.tool_path, &config.compress_args(&bin, &cmp), timeout)?;

    // A tool that produced nothing here surfaces through the
    // decompressed-output check below, not as its own diagnostic.
    let actual_size = fs::metadata(&cmp).map(|m| m.len()).ok();

    runner.run(
        &config.tool_path,
        &config.decompress_args(&cmp, &dec),
        timeout,
    )?;

    write!(out, "[{index:03}, {:06X}]: ", record.address)?;

    if !bin.exists() {
        stats.missing += 1;
        writeln!(out, "cannot find file! ({})", file_name(&bin))?;
        return Ok(());
    }
    if !dec.exists() {
        stats.missing += 1;
        writeln!(out, "cannot find file! ({})", file_name(&dec))?;
        return Ok(());
    }

    if !files_equal(&bin, &dec)? {
        // Artifacts stay on disk for manual inspection.
        stats.mismatched += 1;
        writeln!(out, "files are not equal!")?;
        return Ok(());
    }

    let expected = record.compressed_size;
    let actual = actual_size.unwrap_or(0);
    let marker = if expected > actual {
        '-'
    } else if expected == actual {
        '='
    } else {
        '+'
    };
    writeln!(
        out,
        "ORIG: {expected:04X} | MY: {actual:04X} | DIFF: {marker}({})",
        expected.abs_diff(actual)
    )?;

    debug!("cleaning up {} and {}", cmp.display(), dec.display());
    fs::remove_file(&cmp)?;
    fs::remove_file(&dec)?;
    stats.passed += 1;
    Ok(())
}
