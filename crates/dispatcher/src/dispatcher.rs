//! Dispatcher - single and batch delivery over a borrowed transport

use tracing::{debug, info, instrument, warn};

use contracts::{
    AddressMap, DispatchMode, FailedRecipients, Message, RecipientSource, Transport,
    TransportConfig, TransportType,
};

use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::transports::{FileTransport, LogTransport};

/// Create a transport from configuration
#[instrument(
    name = "dispatcher_create_transport",
    skip(config),
    fields(transport = %config.name, transport_type = ?config.transport_type)
)]
pub fn create_transport(config: &TransportConfig) -> Result<Box<dyn Transport>, DispatcherError> {
    if config.name.is_empty() {
        return Err(DispatcherError::transport_creation(
            &config.name,
            "transport name cannot be empty",
        ));
    }

    match config.transport_type {
        TransportType::Log => Ok(Box::new(
            LogTransport::new(&config.name).with_reject(config.reject.clone()),
        )),
        TransportType::File => Ok(Box::new(FileTransport::from_params(
            &config.name,
            &config.params,
            config.reject.clone(),
        ))),
    }
}

/// Delivers messages through a transport it borrows but does not own.
///
/// The transport is started lazily by the first send and never stopped.
pub struct Dispatcher<'t, T: Transport + ?Sized> {
    transport: &'t mut T,
    metrics: DispatchMetrics,
}

impl<'t, T: Transport + ?Sized> Dispatcher<'t, T> {
    /// Create a dispatcher over `transport`
    pub fn new(transport: &'t mut T) -> Self {
        Self {
            transport,
            metrics: DispatchMetrics::new(),
        }
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &*self.transport
    }

    /// Get dispatch metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Send `message` once to every recipient in `to`, `cc` and `bcc`.
    ///
    /// Recipients the transport rejects are appended to `failed`; the
    /// return value is the number accepted.
    ///
    /// # Errors
    /// Transport start or send failures are returned as-is.
    #[instrument(name = "dispatcher_send", skip_all, fields(transport = %self.transport.name()))]
    pub fn send(
        &mut self,
        message: &dyn Message,
        failed: &mut FailedRecipients,
    ) -> Result<usize, DispatcherError> {
        self.ensure_started()?;

        let before = failed.len();
        let accepted = self.transport.send(message, failed)?;
        let rejected = failed.len().saturating_sub(before);
        self.metrics.record_send(accepted, rejected);

        debug!(accepted, rejected, "Send complete");
        Ok(accepted)
    }

    /// Send one copy of `message` per recipient.
    ///
    /// Each copy has a single-entry `to` and empty `cc`/`bcc`. Recipients
    /// come from `source` when given, otherwise from the message's own `to`
    /// in insertion order. `failed` accumulates across every copy.
    ///
    /// On success `to`, `cc` and `bcc` are restored. A hard failure returns
    /// immediately and leaves the message as it was for the failing copy.
    #[instrument(
        name = "dispatcher_batch_send",
        skip_all,
        fields(transport = %self.transport.name(), streamed = source.is_some())
    )]
    pub fn batch_send(
        &mut self,
        message: &mut dyn Message,
        failed: &mut FailedRecipients,
        source: Option<&mut dyn RecipientSource>,
    ) -> Result<usize, DispatcherError> {
        let original_to = message.to().clone();
        let original_cc = message.cc().clone();
        let original_bcc = message.bcc().clone();

        if !original_cc.is_empty() {
            message.set_cc(AddressMap::new());
        }
        if !original_bcc.is_empty() {
            message.set_bcc(AddressMap::new());
        }

        let mut sent = 0;
        let mut copies = 0u64;
        match source {
            Some(source) => {
                while source.has_next() {
                    message.set_to(source.next_recipient()?);
                    sent += self.send(message, failed)?;
                    copies += 1;
                }
            }
            None => {
                for (address, name) in original_to.iter() {
                    message.set_to(AddressMap::singleton(address, name));
                    sent += self.send(message, failed)?;
                    copies += 1;
                }
            }
        }

        message.set_to(original_to);
        if !original_cc.is_empty() {
            message.set_cc(original_cc);
        }
        if !original_bcc.is_empty() {
            message.set_bcc(original_bcc);
        }

        self.metrics.inc_batches();
        info!(copies, accepted = sent, failed = failed.len(), "Batch send complete");
        Ok(sent)
    }

    /// Route to `send` or `batch_send` by mode.
    ///
    /// A recipient source only applies to batch mode and is ignored otherwise.
    pub fn dispatch(
        &mut self,
        mode: DispatchMode,
        message: &mut dyn Message,
        failed: &mut FailedRecipients,
        source: Option<&mut dyn RecipientSource>,
    ) -> Result<usize, DispatcherError> {
        match mode {
            DispatchMode::Single => {
                if source.is_some() {
                    warn!("Recipient source ignored in single mode");
                }
                self.send(message, failed)
            }
            DispatchMode::Batch => self.batch_send(message, failed, source),
        }
    }

    fn ensure_started(&mut self) -> Result<(), DispatcherError> {
        if !self.transport.is_started() {
            info!(transport = %self.transport.name(), "Starting transport");
            self.transport.start()?;
            self.metrics.inc_transport_starts();
        }
        Ok(())
    }
}
