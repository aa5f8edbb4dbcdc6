//! FileTransport - writes message envelopes into a spool directory

use chrono::{SecondsFormat, Utc};
use contracts::{AddressMap, ContractError, FailedRecipients, Message, Transport};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

use super::accept_recipients;

/// Configuration for FileTransport
#[derive(Debug, Clone)]
pub struct FileTransportConfig {
    /// Spool directory
    pub base_path: PathBuf,
    /// Addresses to report as rejected
    pub reject: Vec<String>,
}

impl FileTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let base_path = params
            .get("base_path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./spool"));

        Self {
            base_path,
            reject: Vec::new(),
        }
    }
}

/// One spooled delivery
#[derive(Serialize)]
struct SpoolRecord<'a> {
    transport: &'a str,
    sequence: u64,
    queued_at: String,
    to: &'a AddressMap,
    cc: &'a AddressMap,
    bcc: &'a AddressMap,
    accepted: &'a [&'a str],
}

/// Create a spool file, failing if the name is already taken
fn open_spool_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Transport that persists each accepted message as a JSON file
pub struct FileTransport {
    name: String,
    config: FileTransportConfig,
    started: bool,
    sequence: u64,
}

impl FileTransport {
    /// Create a new FileTransport; the spool directory is created on `start`
    pub fn new(name: impl Into<String>, config: FileTransportConfig) -> Self {
        Self {
            name: name.into(),
            config,
            started: false,
            sequence: 0,
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
        reject: Vec<String>,
    ) -> Self {
        let mut config = FileTransportConfig::from_params(params);
        config.reject = reject;
        Self::new(name, config)
    }

    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    /// Number of spool files written so far
    pub fn written(&self) -> u64 {
        self.sequence
    }

    fn write_record(&mut self, message: &dyn Message, accepted: &[&str]) -> std::io::Result<PathBuf> {
        let sequence = self.sequence + 1;
        let now = Utc::now();
        let filename = format!("{}-{:06}.json", now.format("%Y%m%dT%H%M%S%.3fZ"), sequence);
        let path = self.config.base_path.join(filename);

        let record = SpoolRecord {
            transport: &self.name,
            sequence,
            queued_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            to: message.to(),
            cc: message.cc(),
            bcc: message.bcc(),
            accepted,
        };

        let writer = BufWriter::new(open_spool_file(&path)?);
        serde_json::to_writer_pretty(writer, &record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        self.sequence = sequence;
        Ok(path)
    }
}

impl Transport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.started
    }

    #[instrument(
        name = "file_transport_start",
        skip(self),
        fields(transport = %self.name, base_path = %self.config.base_path.display())
    )]
    fn start(&mut self) -> Result<(), ContractError> {
        fs::create_dir_all(&self.config.base_path).map_err(|e| {
            error!(transport = %self.name, error = %e, "Cannot create spool directory");
            ContractError::transport_start(&self.name, e.to_string())
        })?;
        self.started = true;
        debug!(transport = %self.name, "FileTransport started");
        Ok(())
    }

    #[instrument(name = "file_transport_send", skip_all, fields(transport = %self.name))]
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

        let accepted = accept_recipients(message, &self.config.reject, failed);
        if accepted.is_empty() {
            debug!(transport = %self.name, "No deliverable recipients, nothing spooled");
            return Ok(0);
        }

        let path = self.write_record(message, &accepted).map_err(|e| {
            error!(transport = %self.name, error = %e, "Spool write failed");
            ContractError::transport_send(&self.name, e.to_string())
        })?;
        debug!(transport = %self.name, path = %path.display(), "Message spooled");

        Ok(accepted.len())
    }
}
