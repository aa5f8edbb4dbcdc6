//! `send` command implementation.

use anyhow::{Context, Result};
use contracts::DispatchJob;
use tracing::info;

use crate::cli::SendArgs;
use crate::pipeline::JobRunner;

use super::ensure_job_file;

/// Execute the `send` command
pub fn run_send(args: &SendArgs) -> Result<()> {
    let job = load_job(args)?;

    if args.dry_run {
        print_dry_run(&job);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)
            .context("Failed to start metrics exporter")?;
    }

    let report = JobRunner::new(job).run()?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize dispatch report")?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }

    Ok(())
}

/// Load the job and apply the command-line mode override.
///
/// The overridden job is validated again, so an override can never produce
/// a job the file itself would not be allowed to describe.
fn load_job(args: &SendArgs) -> Result<DispatchJob> {
    info!(config = %args.config.display(), "Loading dispatch job");

    ensure_job_file(&args.config)?;

    let mut job = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load job from {}", args.config.display()))?;

    if let Some(mode) = args.mode {
        job.mode = mode.into();
        config_loader::ConfigLoader::validate(&job)
            .with_context(|| format!("--mode {} is not valid for this job", job.mode))?;
        info!(mode = %job.mode, "Delivery mode overridden from command line");
    }

    Ok(job)
}

fn print_dry_run(job: &DispatchJob) {
    println!("✓ Dry run - nothing sent");
    println!("  Transport: {} ({:?})", job.transport.name, job.transport.transport_type);
    println!("  Mode: {}", job.mode);
    println!("  Subject: {}", job.message.subject);
    println!("  Recipients: {}", job.recipient_count());
}
