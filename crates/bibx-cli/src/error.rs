use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] bibx_core::ValidationError),

    #[error("strict mode failed: {failure_count} key(s) could not be fetched")]
    StrictModeViolation { failure_count: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
