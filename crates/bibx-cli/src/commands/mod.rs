mod lookup;
mod schemes;

use serde::Serialize;
use serde_json::Value;

use bibx_core::BatchResult;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// One supported key scheme, as listed by `bibx schemes`.
#[derive(Debug, Serialize)]
pub struct SchemeEntry {
    pub name: String,
    pub bibkey_prefix: String,
}

/// Payload produced by a command, rendered by the output module.
pub enum CommandOutput {
    Batch(BatchResult),
    Schemes(Vec<SchemeEntry>),
}

impl CommandOutput {
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Batch(result) => serde_json::to_value(result),
            Self::Schemes(entries) => serde_json::to_value(entries),
        }
    }

    /// Failed slots in the payload; zero for non-batch commands.
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Batch(result) => result.failure_count(),
            Self::Schemes(_) => 0,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::Lookup(args) => lookup::run(args, cli).await,
        Command::Schemes => Ok(schemes::run()),
    }
}
