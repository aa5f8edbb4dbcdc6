//! LogTransport - logs message summaries via tracing

use contracts::{ContractError, FailedRecipients, Message, Transport};
use tracing::{info, instrument, warn};

use super::accept_recipients;

/// Transport that logs each message instead of delivering it
pub struct LogTransport {
    name: String,
    reject: Vec<String>,
    started: bool,
}

impl LogTransport {
    /// Create a new LogTransport with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reject: Vec::new(),
            started: false,
        }
    }

    /// Addresses to report as rejected
    pub fn with_reject(mut self, reject: Vec<String>) -> Self {
        self.reject = reject;
        self
    }

    fn log_message_summary(&self, message: &dyn Message, accepted: &[&str]) {
        info!(
            transport = %self.name,
            to = %message.to(),
            cc = message.cc().len(),
            bcc = message.bcc().len(),
            accepted = accepted.len(),
            "Message delivered"
        );
    }
}

impl Transport for LogTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.started
    }

    #[instrument(name = "log_transport_start", skip(self), fields(transport = %self.name))]
    fn start(&mut self) -> Result<(), ContractError> {
        self.started = true;
        info!(transport = %self.name, "LogTransport started");
        Ok(())
    }

    #[instrument(name = "log_transport_send", skip_all, fields(transport = %self.name))]
    fn send(
        &mut self,
        message: &dyn Message,
        failed: &mut FailedRecipients,
    ) -> Result<usize, ContractError> {
        if !self.started {
            return Err(ContractError::transport_send(
                &self.name,
                "transport not started",
            ));
        }

        let before = failed.len();
        let accepted = accept_recipients(message, &self.reject, failed);
        for address in &failed.as_slice()[before..] {
            warn!(transport = %self.name, recipient = %address, "Recipient rejected");
        }

        self.log_message_summary(message, &accepted);
        Ok(accepted.len())
    }
}
