//! # Integration Tests
//!
//! End-to-end tests across crates.
//!
//! Covers:
//! - Job file -> loader -> transport factory -> dispatcher
//! - Batch delivery through the spool transport
//! - Failure accounting and message restoration

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        let _ = contracts::DispatchMode::default();
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{
        AddressMap, DispatchJob, FailedRecipients, ListRecipientSource, Message, OutboundMessage,
        RecipientSource,
    };
    use dispatcher::{create_transport, Dispatcher, MockConfig, MockTransport};
    use observability::DispatchReport;
    use tempfile::tempdir;

    fn spool_job(base_path: &Path, mode: &str, extra: &str) -> String {
        format!(
            r#"
mode = "{mode}"
{extra}

[transport]
name = "spool"
transport_type = "file"
reject = ["bounce@example.com"]
[transport.params]
base_path = "{}"

[message]
from = [{{ address = "news@example.com", name = "News" }}]
subject = "Release notes"
body = "Version 2 is out"
to = [
    {{ address = "alice@example.com", name = "Alice" }},
    "bounce@example.com",
    {{ address = "carol@example.com", name = "Carol" }},
]
cc = ["manager@example.com"]
bcc = ["archive@example.com"]
"#,
            base_path.display()
        )
    }

    fn spooled(dir: &Path) -> Vec<serde_json::Value> {
        let mut paths: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        paths.sort();
        paths
            .iter()
            .map(|p| serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap())
            .collect()
    }

    fn run(job: &mut DispatchJob) -> (usize, FailedRecipients) {
        let mut transport = create_transport(&job.transport).unwrap();
        let mut failed = FailedRecipients::new();
        let mut source = job.recipients.clone().map(ListRecipientSource::from);
        let mut dispatcher = Dispatcher::new(&mut transport);
        let accepted = dispatcher
            .dispatch(
                job.mode,
                &mut job.message,
                &mut failed,
                source.as_mut().map(|s| s as &mut dyn RecipientSource),
            )
            .unwrap();
        (accepted, failed)
    }

    /// Batch job from TOML: one spool file per deliverable `to` entry,
    /// never carrying cc/bcc, with rejects collected in order.
    #[test]
    fn test_e2e_batch_spool() {
        let dir = tempdir().unwrap();
        let spool = dir.path().join("spool");
        let mut job =
            ConfigLoader::load_from_str(&spool_job(&spool, "batch", ""), ConfigFormat::Toml)
                .unwrap();
        let original = job.message.clone();

        let (accepted, failed) = run(&mut job);

        assert_eq!(accepted, 2);
        assert_eq!(failed.as_slice(), &["bounce@example.com"]);

        let records = spooled(&spool);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["to"][0]["address"], "alice@example.com");
        assert_eq!(records[1]["to"][0]["address"], "carol@example.com");
        for record in &records {
            assert_eq!(record["to"].as_array().unwrap().len(), 1);
            assert!(record["cc"].as_array().unwrap().is_empty());
            assert!(record["bcc"].as_array().unwrap().is_empty());
        }

        // All three lists come back exactly as configured
        assert_eq!(job.message, original);
    }

    /// Single job: one spool file that carries every list.
    #[test]
    fn test_e2e_single_spool() {
        let dir = tempdir().unwrap();
        let spool = dir.path().join("spool");
        let mut job =
            ConfigLoader::load_from_str(&spool_job(&spool, "single", ""), ConfigFormat::Toml)
                .unwrap();

        let (accepted, failed) = run(&mut job);

        assert_eq!(accepted, 4);
        assert_eq!(failed.as_slice(), &["bounce@example.com"]);

        let records = spooled(&spool);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["to"].as_array().unwrap().len(), 3);
        assert_eq!(records[0]["cc"][0]["address"], "manager@example.com");
        assert_eq!(records[0]["bcc"][0]["address"], "archive@example.com");
    }

    /// Streamed recipients drive the batch; `to` is restored afterwards.
    #[test]
    fn test_e2e_streamed_recipients() {
        let dir = tempdir().unwrap();
        let spool = dir.path().join("spool");
        let extra = r#"recipients = ["x@example.com", { address = "y@example.com", name = "Y" }]"#;
        let mut job =
            ConfigLoader::load_from_str(&spool_job(&spool, "batch", extra), ConfigFormat::Toml)
                .unwrap();
        let original_to = job.message.to.clone();

        let (accepted, failed) = run(&mut job);

        assert_eq!(accepted, 2);
        assert!(failed.is_empty());
        let records = spooled(&spool);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["to"][0]["name"], "Y");
        assert_eq!(job.message.to, original_to);
    }

    /// Every recipient rejected: zero accepted, nothing spooled, all listed.
    #[test]
    fn test_e2e_all_rejected() {
        let dir = tempdir().unwrap();
        let spool = dir.path().join("spool");
        let mut job = ConfigLoader::load_from_str(&spool_job(&spool, "batch", ""), ConfigFormat::Toml)
            .unwrap();
        job.transport.reject = job.message.to.addresses().map(String::from).collect();

        let (accepted, failed) = run(&mut job);

        assert_eq!(accepted, 0);
        assert_eq!(failed.len(), 3);
        assert!(spooled(&spool).is_empty());
    }

    /// Mock transport driven through the dispatcher: one start, N sends,
    /// failures accumulate on top of an existing list.
    #[test]
    fn test_e2e_mock_accounting() {
        let mut transport = MockTransport::with_config(MockConfig {
            reject: vec!["b@x.org".into()],
            ..Default::default()
        });
        let mut message = OutboundMessage::new("s", "b")
            .with_to(
                [("a@x.org", ""), ("b@x.org", ""), ("c@x.org", "")]
                    .into_iter()
                    .collect(),
            )
            .with_cc(AddressMap::singleton("cc@x.org", ""));
        let mut failed = FailedRecipients::from(vec!["earlier@x.org".to_string()]);

        let mut dispatcher = Dispatcher::new(&mut transport);
        let first = dispatcher.batch_send(&mut message, &mut failed, None).unwrap();
        let second = dispatcher.send(&message, &mut failed).unwrap();
        let snapshot = dispatcher.metrics();

        assert_eq!(first, 2);
        assert_eq!(second, 3);
        assert_eq!(snapshot.send_calls, 4);
        assert_eq!(snapshot.transport_starts, 1);
        assert_eq!(
            failed.as_slice(),
            &["earlier@x.org", "b@x.org", "b@x.org"]
        );

        assert_eq!(transport.start_calls(), 1);
        assert_eq!(transport.sent().len(), 4);
        assert_eq!(transport.sent()[3].cc, AddressMap::singleton("cc@x.org", ""));
        assert_eq!(message.recipients().len(), 4);
    }

    /// Dispatch outcome rendered into a run summary.
    #[test]
    fn test_e2e_report() {
        let mut transport = MockTransport::with_config(MockConfig {
            reject: vec!["b@x.org".into()],
            ..Default::default()
        });
        let mut message = OutboundMessage::new("s", "b")
            .with_to([("a@x.org", ""), ("b@x.org", "")].into_iter().collect());
        let mut failed = FailedRecipients::new();

        let mut dispatcher = Dispatcher::new(&mut transport);
        let accepted = dispatcher.batch_send(&mut message, &mut failed, None).unwrap();
        let report = DispatchReport {
            transport: "mock".into(),
            mode: "batch".into(),
            send_calls: dispatcher.metrics().send_calls,
            accepted: accepted as u64,
            failed_recipients: failed.into_vec(),
        };

        assert!((report.acceptance_rate() - 50.0).abs() < 1e-10);
        let text = report.to_string();
        assert!(text.contains("Transport sends: 2"));
        assert!(text.contains("b@x.org"));
    }
}
