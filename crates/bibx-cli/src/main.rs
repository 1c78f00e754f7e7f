mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    init_tracing();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;
    let command_output = runtime.block_on(commands::run(&cli))?;

    output::render(&command_output, cli.format, cli.pretty)?;

    if cli.strict {
        let failure_count = command_output.failure_count();
        if failure_count > 0 {
            return Err(CliError::StrictModeViolation { failure_count });
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bibx_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
