use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use taglog::logging::{init_logging, LoggingConfig};
use taglog::scenarios;

/// When set, the walkthrough ends with a failure that no handler catches.
const UNHANDLED_ENV: &str = "EXCEPTIONS_EX_UNHANDLED";

#[derive(Parser, Debug)]
#[command(name = "exceptions_ex")]
#[command(version)]
#[command(
    about = "Walk through error-handling idioms: custom error kinds, catch-all handlers and completion blocks"
)]
struct Cli {}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    init_logging(LoggingConfig::default());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = scenarios::run_all(&mut out)?;
    tracing::info!(count = reports.len(), "walkthrough finished");

    if std::env::var_os(UNHANDLED_ENV).is_some() {
        // The failure escapes main, so the process exits non-zero.
        scenarios::unhandled(&mut out)?;
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
