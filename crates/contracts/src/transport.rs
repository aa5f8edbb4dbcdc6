//! Transport trait - delivery channel consumed by the dispatcher
//!
//! Defines the abstract interface for transports.

use crate::{ContractError, FailedRecipients, Message};

/// Delivery transport.
///
/// A transport is either started or not. The dispatcher starts it lazily on
/// the first send and never stops it.
pub trait Transport {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Whether `start` has completed successfully
    fn is_started(&self) -> bool;

    /// Open the underlying channel
    ///
    /// # Errors
    /// Returns `ContractError::TransportStart` if the channel cannot be opened
    fn start(&mut self) -> Result<(), ContractError>;

    /// Deliver `message` to every address in `to`, `cc` and `bcc`
    ///
    /// Rejected recipients are appended to `failed` and excluded from the
    /// returned accepted count; that is not an error.
    ///
    /// # Errors
    /// Returns `ContractError::TransportSend` on unrecoverable failure
    fn send(
        &mut self,
        message: &dyn Message,
        failed: &mut FailedRecipients,
    ) -> Result<usize, ContractError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_started(&self) -> bool {
        (**self).is_started()
    }

    fn start(&mut self) -> Result<(), ContractError> {
        (**self).start()
    }

    fn send(
        &mut self,
        message: &dyn Message,
        failed: &mut FailedRecipients,
    ) -> Result<usize, ContractError> {
        (**self).send(message, failed)
    }
}
