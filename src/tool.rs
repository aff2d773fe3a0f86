use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Interval between exit polls while the tool is running.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of one bounded tool invocation. The exit status is logged,
/// never consulted; results are read back from the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The process terminated on its own within the wait window.
    Exited,
    /// The wait window elapsed with the process still running.
    TimedOut,
}

/// Capability for launching the external tool.
///
/// The audit loop only ever observes completion or timeout. Tests
/// substitute an implementation that writes the expected artifacts
/// without spawning anything.
pub trait ToolRunner {
    fn run(&mut self, tool: &Path, args: &[String], timeout: Duration) -> io::Result<ToolOutcome>;
}

/// Runner backed by a real child process.
///
/// The child's stdout is suppressed so the report stream stays clean;
/// stderr is left attached. A child that outlives the timeout is left
/// running, the missing output file surfaces downstream.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, tool: &Path, args: &[String], timeout: Duration) -> io::Result<ToolOutcome> {
        debug!("running {} {}", tool.display(), args.join(" "));
        let mut child = Command::new(tool)
            .args(args)
            .stdout(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                debug!("tool exited: {status}");
                return Ok(ToolOutcome::Exited);
            }
            if Instant::now() >= deadline {
                warn!(
                    "tool still running after {}s, giving up the wait",
                    timeout.as_secs()
                );
                return Ok(ToolOutcome::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}
