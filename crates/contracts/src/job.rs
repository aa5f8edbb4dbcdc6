//! DispatchJob - Config Loader output
//!
//! Describes one dispatch: which transport to use, the message, the delivery
//! mode and an optional streamed recipient list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{AddressMap, OutboundMessage};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete dispatch job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchJob {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Delivery mode
    #[serde(default)]
    pub mode: DispatchMode,

    /// Transport selection
    pub transport: TransportConfig,

    /// Message to deliver
    pub message: OutboundMessage,

    /// Streamed recipients for batch mode (replace `message.to` as the
    /// iteration source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<AddressMap>,
}

impl DispatchJob {
    /// Number of recipients a dispatch of this job would address
    pub fn recipient_count(&self) -> usize {
        match (&self.mode, &self.recipients) {
            (DispatchMode::Batch, Some(recipients)) => recipients.len(),
            (DispatchMode::Batch, None) => self.message.to.len(),
            (DispatchMode::Single, _) => {
                self.message.to.len() + self.message.cc.len() + self.message.bcc.len()
            }
        }
    }
}

/// Delivery mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// One shared transmission; recipients see each other
    #[default]
    Single,
    /// One copy per `to` recipient; Cc/Bcc suppressed
    Batch,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Batch => f.write_str("batch"),
        }
    }
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Name (used in logs and metrics)
    pub name: String,

    /// Transport type
    pub transport_type: TransportType,

    /// Addresses the transport rejects (soft failures)
    #[serde(default)]
    pub reject: Vec<String>,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Transport type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Logs each message via tracing
    Log,
    /// Writes each message into a spool directory
    File,
}
