//! # Dispatcher
//!
//! Message dispatch module.
//!
//! Responsible for:
//! - Starting the transport lazily on first use
//! - Single sends to every recipient at once
//! - Batch sends: one copy per recipient with Cc/Bcc suppressed
//! - Collecting per-recipient rejections without aborting

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod transports;

pub use contracts::{FailedRecipients, Message, RecipientSource, Transport};
pub use dispatcher::{Dispatcher, create_transport};
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use transports::{
    FileTransport, FileTransportConfig, LogTransport, MockConfig, MockTransport, SentMessage,
};
