use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};

use packaudit::{file_name, run_audit, AuditError, ProcessRunner, RunConfig};

/// Re-run an external compressor against recorded results and audit
/// every round-trip.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON run configuration
    config: PathBuf,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        match e {
            // Startup diagnostics belong on stdout, next to the report
            // they preempt, and the run still terminates normally.
            AuditError::LogFileMissing(path) => {
                println!("Error: Cannot find log-file: {}", file_name(&path));
            }
            AuditError::ToolMissing(path) => {
                println!("Error: Cannot find tool-file: {}", file_name(&path));
            }
            other => {
                eprintln!("{other}");
                std::process::exit(1);
            }
        }
    }
}

fn run(args: &Args) -> Result<(), AuditError> {
    let config = RunConfig::load(&args.config)?;
    let mut runner = ProcessRunner;
    let stdout = io::stdout();
    run_audit(&config, &mut runner, &mut stdout.lock())?;
    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Diagnostics go to stderr; stdout carries only the report.
    let _ = TermLogger::init(
        level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
