//! Dispatch metrics
//!
//! `metrics` facade counters for dispatch outcomes plus an in-memory report
//! used for end-of-run summaries.

use metrics::{counter, gauge, histogram};
use serde::Serialize;

/// Record the outcome of one dispatch (single or batch)
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_dispatch;
///
/// let accepted = dispatcher.batch_send(&mut message, &mut failed, None)?;
/// record_dispatch("smtp", "batch", accepted, failed.len());
/// ```
pub fn record_dispatch(transport: &str, mode: &str, accepted: usize, rejected: usize) {
    counter!(
        "mail_dispatch_runs_total",
        "transport" => transport.to_string(),
        "mode" => mode.to_string()
    )
    .increment(1);

    counter!(
        "mail_dispatch_recipients_accepted_total",
        "transport" => transport.to_string()
    )
    .increment(accepted as u64);

    if rejected > 0 {
        counter!(
            "mail_dispatch_recipients_rejected_total",
            "transport" => transport.to_string()
        )
        .increment(rejected as u64);
    }

    gauge!("mail_dispatch_last_accepted", "transport" => transport.to_string())
        .set(accepted as f64);
    histogram!("mail_dispatch_recipients_per_run").record((accepted + rejected) as f64);
}

/// Record transport `send` invocations made during a dispatch
pub fn record_send_calls(transport: &str, calls: u64) {
    counter!(
        "mail_dispatch_send_calls_total",
        "transport" => transport.to_string()
    )
    .increment(calls);
}

/// Record a transport-level (hard) failure
pub fn record_hard_failure(transport: &str) {
    counter!(
        "mail_dispatch_hard_failures_total",
        "transport" => transport.to_string()
    )
    .increment(1);
}

/// Summary of one dispatch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub transport: String,
    pub mode: String,
    pub send_calls: u64,
    pub accepted: u64,
    pub failed_recipients: Vec<String>,
}

impl DispatchReport {
    /// Accepted share of all attempted recipients, in percent
    pub fn acceptance_rate(&self) -> f64 {
        let attempted = self.accepted + self.failed_recipients.len() as u64;
        if attempted == 0 {
            0.0
        } else {
            self.accepted as f64 / attempted as f64 * 100.0
        }
    }

    /// Push the report into the metrics facade
    pub fn record(&self) {
        record_dispatch(
            &self.transport,
            &self.mode,
            self.accepted as usize,
            self.failed_recipients.len(),
        );
        record_send_calls(&self.transport, self.send_calls);
    }
}

impl std::fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Transport: {} ({} mode)", self.transport, self.mode)?;
        writeln!(f, "Transport sends: {}", self.send_calls)?;
        writeln!(
            f,
            "Accepted recipients: {} ({:.2}%)",
            self.accepted,
            self.acceptance_rate()
        )?;

        if !self.failed_recipients.is_empty() {
            writeln!(f, "Failed recipients:")?;
            for address in &self.failed_recipients {
                writeln!(f, "  {}", address)?;
            }
        }

        Ok(())
    }
}
