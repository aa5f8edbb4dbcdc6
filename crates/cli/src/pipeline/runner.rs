//! Job runner - wires a loaded job to a transport and a dispatcher.

use anyhow::{Context, Result};
use contracts::{DispatchJob, FailedRecipients, ListRecipientSource, RecipientSource};
use dispatcher::{Dispatcher, create_transport};
use observability::{DispatchReport, record_hard_failure};
use tracing::{error, info};

use crate::error::CliError;

/// Runs one dispatch job to completion
pub struct JobRunner {
    job: DispatchJob,
}

impl JobRunner {
    /// Create a runner for `job`
    pub fn new(job: DispatchJob) -> Self {
        Self { job }
    }

    /// Build the transport, dispatch the message and summarize the outcome.
    ///
    /// Rejected recipients are part of a successful report; only
    /// transport-level failures are returned as errors.
    pub fn run(self) -> Result<DispatchReport> {
        let DispatchJob {
            mode,
            transport: transport_config,
            mut message,
            recipients,
            ..
        } = self.job;

        let mut transport = create_transport(&transport_config)
            .with_context(|| format!("Failed to create transport '{}'", transport_config.name))?;
        let mut source = recipients.map(ListRecipientSource::from);
        let mut failed = FailedRecipients::new();

        info!(
            transport = %transport_config.name,
            mode = %mode,
            streamed = source.is_some(),
            "Dispatching message"
        );

        let mut dispatcher = Dispatcher::new(&mut transport);
        let result = dispatcher.dispatch(
            mode,
            &mut message,
            &mut failed,
            source.as_mut().map(|s| s as &mut dyn RecipientSource),
        );
        let metrics = dispatcher.metrics();

        match result {
            Ok(accepted) => {
                let report = DispatchReport {
                    transport: transport_config.name,
                    mode: mode.to_string(),
                    send_calls: metrics.send_calls,
                    accepted: accepted as u64,
                    failed_recipients: failed.into_vec(),
                };
                report.record();
                Ok(report)
            }
            Err(e) => {
                record_hard_failure(&transport_config.name);
                error!(
                    transport = %transport_config.name,
                    sends_completed = metrics.send_calls,
                    failed_so_far = failed.len(),
                    error = %e,
                    "Dispatch aborted"
                );
                Err(CliError::dispatch_aborted(transport_config.name, e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        AddressMap, ConfigVersion, DispatchMode, OutboundMessage, TransportConfig, TransportType,
    };
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn job(mode: DispatchMode, transport: TransportConfig) -> DispatchJob {
        DispatchJob {
            version: ConfigVersion::V1,
            mode,
            transport,
            message: OutboundMessage::new("Hello", "Body")
                .with_to([("a@x.org", "A"), ("b@x.org", "B")].into_iter().collect())
                .with_cc(AddressMap::singleton("cc@x.org", "")),
            recipients: None,
        }
    }

    fn log_transport(reject: Vec<String>) -> TransportConfig {
        TransportConfig {
            name: "log".into(),
            transport_type: TransportType::Log,
            reject,
            params: HashMap::new(),
        }
    }

    #[test]
    fn test_single_mode_report() {
        let report = JobRunner::new(job(DispatchMode::Single, log_transport(Vec::new())))
            .run()
            .unwrap();
        assert_eq!(report.send_calls, 1);
        assert_eq!(report.accepted, 3);
        assert!(report.failed_recipients.is_empty());
        assert_eq!(report.mode, "single");
    }

    #[test]
    fn test_batch_mode_collects_failures() {
        let report = JobRunner::new(job(
            DispatchMode::Batch,
            log_transport(vec!["b@x.org".into()]),
        ))
        .run()
        .unwrap();
        assert_eq!(report.send_calls, 2);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.failed_recipients, vec!["b@x.org".to_string()]);
    }

    #[test]
    fn test_streamed_recipients() {
        let mut job = job(DispatchMode::Batch, log_transport(Vec::new()));
        job.recipients = Some(
            [("x@x.org", ""), ("y@x.org", ""), ("z@x.org", "")]
                .into_iter()
                .collect(),
        );
        let report = JobRunner::new(job).run().unwrap();
        assert_eq!(report.send_calls, 3);
        assert_eq!(report.accepted, 3);
    }

    #[test]
    fn test_hard_failure_is_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let transport = TransportConfig {
            name: "spool".into(),
            transport_type: TransportType::File,
            reject: Vec::new(),
            params: HashMap::from([(
                "base_path".to_string(),
                blocker.join("spool").display().to_string(),
            )]),
        };
        let err = JobRunner::new(job(DispatchMode::Batch, transport))
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("aborted"), "got: {err}");
    }
}
