//! Transport implementations
//!
//! Contains LogTransport, FileTransport, and MockTransport.

mod file;
mod log;
mod mock;

pub use self::file::{FileTransport, FileTransportConfig};
pub use self::log::LogTransport;
pub use self::mock::{MockConfig, MockTransport, SentMessage};

use contracts::{FailedRecipients, Message};

/// `local@domain` with both parts non-empty and a single `@`
pub(crate) fn is_deliverable(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Split the message's recipients into accepted addresses, appending every
/// undeliverable or explicitly rejected one to `failed`.
pub(crate) fn accept_recipients<'m>(
    message: &'m dyn Message,
    reject: &[String],
    failed: &mut FailedRecipients,
) -> Vec<&'m str> {
    let mut accepted = Vec::new();
    for address in message.recipients() {
        if is_deliverable(address) && !reject.iter().any(|r| r.eq_ignore_ascii_case(address)) {
            accepted.push(address);
        } else {
            failed.push(address);
        }
    }
    accepted
}
