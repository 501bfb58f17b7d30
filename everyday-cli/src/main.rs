//! `everyday` entry point.

use clap::Parser;
use everyday_cli::{init_tracing, run, Cli, CliConfig, CliError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.log_format.or(config.log_format).unwrap_or_default();
    init_tracing(format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli.command, &config, &mut out)
}
