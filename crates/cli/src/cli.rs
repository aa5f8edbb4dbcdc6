//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Mail Dispatch - send one message to many recipients, shared or individually
#[derive(Parser, Debug)]
#[command(
    name = "mail-dispatch",
    author,
    version,
    about = "Single and batch mail dispatch",
    long_about = "Dispatches a message described by a job file through a configured transport.\n\n\
                  Single mode sends one copy that every recipient sees; batch mode sends \n\
                  one copy per recipient with Cc/Bcc suppressed."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "MAIL_DISPATCH_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "MAIL_DISPATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch the message described by a job file
    Send(SendArgs),

    /// Validate a job file without sending
    Validate(ValidateArgs),

    /// Display job information
    Info(InfoArgs),
}

/// Arguments for the `send` command
#[derive(Parser, Debug, Clone)]
pub struct SendArgs {
    /// Path to job file (TOML or JSON)
    #[arg(short, long, default_value = "job.toml", env = "MAIL_DISPATCH_CONFIG")]
    pub config: PathBuf,

    /// Override the delivery mode from the job file
    #[arg(long, value_enum, env = "MAIL_DISPATCH_MODE")]
    pub mode: Option<ModeArg>,

    /// Validate the job and exit without sending
    #[arg(long)]
    pub dry_run: bool,

    /// Output the dispatch result as JSON
    #[arg(long)]
    pub json: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "MAIL_DISPATCH_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to job file to validate
    #[arg(short, long, default_value = "job.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to job file
    #[arg(short, long, default_value = "job.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List every recipient
    #[arg(long)]
    pub recipients: bool,
}

/// Delivery mode override
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Single,
    Batch,
}

impl From<ModeArg> for contracts::DispatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => Self::Single,
            ModeArg::Batch => Self::Batch,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_with_mode_override() {
        let cli = Cli::parse_from([
            "mail-dispatch",
            "-v",
            "send",
            "--config",
            "news.toml",
            "--mode",
            "batch",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.config, PathBuf::from("news.toml"));
                assert_eq!(args.mode, Some(ModeArg::Batch));
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_log_format_maps_to_observability() {
        let cli = Cli::parse_from(["mail-dispatch", "--log-format", "json", "validate"]);
        assert_eq!(
            observability::LogFormat::from(cli.log_format),
            observability::LogFormat::Json
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["mail-dispatch", "-q", "-v", "validate"]);
        assert!(result.is_err());
    }
}
