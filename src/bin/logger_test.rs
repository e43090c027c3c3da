use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use taglog::dumper::print_object;
use taglog::logger::{FileLogger, Logger, LoggerOptions, LOGGER_VERSION};
use taglog::logging::{init_logging, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "logger_test")]
#[command(version)]
#[command(about = "Construct a configured file logger and dump its state")]
struct Cli {}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    init_logging(LoggingConfig::default());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Version: ")?;
    writeln!(out, "{LOGGER_VERSION}")?;

    // TAGLOG__FILENAME / TAGLOG__MAX_SIZE override these.
    let defaults = LoggerOptions::new("foo.txt", 2_500_000);
    let logger = FileLogger::new(LoggerOptions::from_env(&defaults)?)?;
    print_object(&mut out, &logger.snapshot(), Some("Logger object contains"))?;

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
