//! CLI-level errors (wraps application, infrastructure and domain errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot write output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

fn infra_exit_code(e: &InfraError) -> i32 {
    match e {
        InfraError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            exitcode::NOINPUT
        }
        InfraError::Io { .. } => exitcode::IOERR,
        InfraError::Json { .. } => exitcode::DATAERR,
        InfraError::Layout { .. } => exitcode::SOFTWARE,
        InfraError::Timeout { .. } => exitcode::TEMPFAIL,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Output(_) => exitcode::SOFTWARE,
            CliError::Infra(e) => infra_exit_code(e),
            CliError::Domain(e) => match e {
                DomainError::DanglingEdges { .. } => exitcode::INVALID,
                DomainError::UnknownProband(_) => exitcode::USAGE,
            },
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::DanglingEdges { .. }) => exitcode::INVALID,
                ApplicationError::Domain(DomainError::UnknownProband(_)) => exitcode::USAGE,
                ApplicationError::Infra(e) => infra_exit_code(e),
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Pipeline { .. } => exitcode::SOFTWARE,
            },
        }
    }
}
