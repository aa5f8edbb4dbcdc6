//! # Contracts
//!
//! Interface contracts shared by every crate in the workspace: the message,
//! transport and recipient-source capabilities plus the value types that
//! flow between them.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Recipient model
//! - `to`, `cc` and `bcc` are ordered `address -> display name` mappings
//! - Rejected recipients accumulate in a caller-owned `FailedRecipients`

mod address;
mod error;
mod failed;
mod job;
mod message;
mod recipient_source;
mod transport;

pub use address::{AddressMap, Mailbox};
pub use error::*;
pub use failed::FailedRecipients;
pub use job::*;
pub use message::{Message, OutboundMessage};
pub use recipient_source::{IterRecipientSource, ListRecipientSource, RecipientSource};
pub use transport::Transport;
