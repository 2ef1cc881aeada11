//! Infrastructure-level errors (layout engine and data source boundaries)

use thiserror::Error;

/// Failures at the I/O and third-party engine boundaries.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("layout engine failed: {message}")]
    Layout { message: String },

    #[error("layout engine timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree data: {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
