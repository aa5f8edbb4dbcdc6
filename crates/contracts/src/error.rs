//! Layered error definitions
//!
//! Categorized by source: config / transport / recipient source

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Transport Errors =====
    /// Transport could not be started
    #[error("transport '{transport}' failed to start: {message}")]
    TransportStart { transport: String, message: String },

    /// Unrecoverable failure while sending
    #[error("transport '{transport}' send error: {message}")]
    TransportSend { transport: String, message: String },

    // ===== Recipient Source Errors =====
    /// `next_recipient` called after the source reported no more recipients
    #[error("recipient source exhausted")]
    RecipientsExhausted,

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport start error
    pub fn transport_start(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportStart {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create transport send error
    pub fn transport_send(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportSend {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the transport itself
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::TransportStart { .. } | Self::TransportSend { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_transport_name() {
        let err = ContractError::transport_start("smtp", "connection refused");
        assert_eq!(
            err.to_string(),
            "transport 'smtp' failed to start: connection refused"
        );
        assert!(err.is_transport_error());
    }

    #[test]
    fn test_validation_display() {
        let err = ContractError::config_validation("transport.name", "cannot be empty");
        assert!(err.to_string().contains("transport.name"));
        assert!(!err.is_transport_error());
    }
}
