//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Job file not found
    #[error("Job file not found: {path}")]
    ConfigNotFound { path: String },

    /// Transport-level failure that aborted the dispatch
    #[error("Dispatch through '{transport}' aborted: {message}")]
    DispatchAborted { transport: String, message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn dispatch_aborted(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DispatchAborted {
            transport: transport.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
