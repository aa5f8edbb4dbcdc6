//! Dispatch metrics for observability

/// Counters for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Transport `send` invocations
    send_calls: u64,
    /// Recipients accepted across all sends
    accepted: u64,
    /// Recipients appended to the failure collector
    rejected: u64,
    /// Times the dispatcher had to start the transport
    transport_starts: u64,
    /// Completed batch sends
    batches: u64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send_calls(&self) -> u64 {
        self.send_calls
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn transport_starts(&self) -> u64 {
        self.transport_starts
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }

    /// Record one completed transport send
    pub fn record_send(&mut self, accepted: usize, rejected: usize) {
        self.send_calls += 1;
        self.accepted += accepted as u64;
        self.rejected += rejected as u64;
    }

    pub fn inc_transport_starts(&mut self) {
        self.transport_starts += 1;
    }

    pub fn inc_batches(&mut self) {
        self.batches += 1;
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            send_calls: self.send_calls,
            accepted: self.accepted,
            rejected: self.rejected,
            transport_starts: self.transport_starts,
            batches: self.batches,
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub send_calls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub transport_starts: u64,
    pub batches: u64,
}
