use bibx_core::FetchOutcome;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let value = output.to_json()?;
            let payload = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(output),
    }

    Ok(())
}

fn render_table(output: &CommandOutput) {
    match output {
        CommandOutput::Batch(result) => {
            for outcome in result {
                match outcome {
                    FetchOutcome::Success { record } => {
                        println!("found    {:<18} {record}", record.key.as_str());
                    }
                    FetchOutcome::NotFound { key } => {
                        println!("missing  {:<18} no record for key", key.as_str());
                    }
                    FetchOutcome::Failure { key, error } => {
                        println!(
                            "failed   {:<18} {}: {}",
                            key.as_str(),
                            error.code(),
                            error.message()
                        );
                    }
                }
            }
            println!(
                "{} found, {} missing, {} failed",
                result.success_count(),
                result.not_found_count(),
                result.failure_count()
            );
        }
        CommandOutput::Schemes(entries) => {
            for entry in entries {
                println!("{:<6} {}", entry.name, entry.bibkey_prefix);
            }
        }
    }
}
