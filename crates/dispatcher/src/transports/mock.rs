//! Mock transport
//!
//! Records every send for assertions and supports injected failures.

use contracts::{AddressMap, ContractError, FailedRecipients, Message, Transport};
use tracing::debug;

/// Mock transport configuration
#[derive(Debug, Default, Clone)]
pub struct MockConfig {
    /// Addresses rejected as soft failures
    pub reject: Vec<String>,
    /// Make `start` fail
    pub fail_start: bool,
    /// Fail the N-th `send` call (1-based) with a hard error
    pub fail_on_send: Option<usize>,
    /// Report the transport as already started
    pub already_started: bool,
}

/// Recipient lists observed by one `send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: AddressMap,
    pub cc: AddressMap,
    pub bcc: AddressMap,
}

/// Mock transport
pub struct MockTransport {
    name: String,
    config: MockConfig,
    started: bool,
    start_calls: usize,
    send_calls: usize,
    sent: Vec<SentMessage>,
}

impl MockTransport {
    /// Create default mock transport
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create mock transport from config
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            name: "mock".to_string(),
            started: config.already_started,
            config,
            start_calls: 0,
            send_calls: 0,
            sent: Vec::new(),
        }
    }

    /// Number of `start` invocations
    pub fn start_calls(&self) -> usize {
        self.start_calls
    }

    /// Number of `send` invocations, including failed ones
    pub fn send_calls(&self) -> usize {
        self.send_calls
    }

    /// Successfully recorded sends, in call order
    pub fn sent(&self) -> &[SentMessage] {
        &self.sent
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn start(&mut self) -> Result<(), ContractError> {
        self.start_calls += 1;
        if self.config.fail_start {
            return Err(ContractError::transport_start(&self.name, "injected start failure"));
        }
        self.started = true;
        Ok(())
    }

    fn send(
        &mut self,
        message: &dyn Message,
        failed: &mut FailedRecipients,
    ) -> Result<usize, ContractError> {
        self.send_calls += 1;
        if !self.started {
            return Err(ContractError::transport_send(&self.name, "not started"));
        }
        if self.config.fail_on_send == Some(self.send_calls) {
            return Err(ContractError::transport_send(
                &self.name,
                format!("injected failure on send #{}", self.send_calls),
            ));
        }

        self.sent.push(SentMessage {
            to: message.to().clone(),
            cc: message.cc().clone(),
            bcc: message.bcc().clone(),
        });

        let mut accepted = 0;
        for address in message.recipients() {
            if self.config.reject.iter().any(|r| r == address) {
                failed.push(address);
            } else {
                accepted += 1;
            }
        }
        debug!(transport = %self.name, accepted, "Mock send recorded");
        Ok(accepted)
    }
}
