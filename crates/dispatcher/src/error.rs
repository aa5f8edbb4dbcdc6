//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Transport creation error
    #[error("failed to create transport '{name}': {message}")]
    TransportCreation { name: String, message: String },

    /// Transport or recipient source error (from contract)
    #[error("dispatch error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatcherError {
    /// Create a transport creation error
    pub fn transport_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the error aborted a dispatch mid-flight.
    ///
    /// After a hard failure the message passed to `batch_send` may still
    /// carry the recipient lists of the last attempted copy.
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Self::Contract(_) | Self::Io(_))
    }
}
