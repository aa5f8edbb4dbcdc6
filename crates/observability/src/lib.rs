//! # Observability
//!
//! Tracing setup plus Prometheus metrics for dispatch runs.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact) on stderr
//! - Verbosity levels that map onto an `EnvFilter`
//! - Optional Prometheus exporter
//! - Dispatch outcome counters and run summaries
//!
//! ## Example
//!
//! ```ignore
//! use observability::{LogFormat, ObservabilityConfig};
//!
//! observability::init_with_config(ObservabilityConfig::from_verbosity(1, false, LogFormat::Compact))?;
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::metrics::{record_dispatch, record_hard_failure, record_send_calls, DispatchReport};

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Prometheus port (None = disabled)
    pub metrics_port: Option<u16>,
    /// Log level used when `RUST_LOG` is unset or ignored
    pub log_level: String,
    /// Let `RUST_LOG` override `log_level`
    pub honor_rust_log: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            metrics_port: None,
            log_level: "info".to_string(),
            honor_rust_log: true,
        }
    }
}

impl ObservabilityConfig {
    /// Map `-v` counts and `--quiet` onto a filter.
    ///
    /// Quiet pins the level to `warn` regardless of `RUST_LOG`.
    pub fn from_verbosity(verbose: u8, quiet: bool, log_format: LogFormat) -> Self {
        let (log_level, honor_rust_log) = if quiet {
            ("warn", false)
        } else {
            match verbose {
                0 => ("info", true),
                1 => ("debug", true),
                _ => ("trace", true),
            }
        };

        Self {
            log_format,
            log_level: log_level.to_string(),
            honor_rust_log,
            ..Default::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        if self.honor_rust_log {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
        } else {
            EnvFilter::new(&self.log_level)
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    #[default]
    Json,
    /// Human-readable
    Pretty,
    /// Single line
    Compact,
}

/// Install the tracing subscriber and, if configured, the Prometheus exporter.
///
/// Logs go to stderr so machine-readable command output on stdout stays
/// parseable.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::debug!(
        log_format = ?config.log_format,
        log_level = %config.log_level,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// Install only the Prometheus exporter (tracing already set up elsewhere)
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
