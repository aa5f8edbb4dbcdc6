//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{DispatchJob, DispatchMode};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<JobSummary>,
}

#[derive(Serialize)]
struct JobSummary {
    version: String,
    mode: String,
    transport: String,
    recipient_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating job file");

    let result = validate_job(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Job validation failed")
    }
}

fn validate_job(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(job) => {
            let warnings = collect_warnings(&job);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(JobSummary {
                    version: format!("{:?}", job.version),
                    mode: job.mode.to_string(),
                    transport: job.transport.name.clone(),
                    recipient_count: job.recipient_count(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect non-fatal issues
fn collect_warnings(job: &DispatchJob) -> Vec<String> {
    let mut warnings = Vec::new();

    if job.recipient_count() == 0 {
        warnings.push("Job has no recipients - nothing will be delivered".to_string());
    }

    if let Some(ref recipients) = job.recipients {
        if recipients.is_empty() {
            warnings.push(
                "`recipients` is present but empty - batch mode will send nothing".to_string(),
            );
        }
    }

    if job.mode == DispatchMode::Batch && job.recipients.is_none() {
        let hidden = job.message.cc.len() + job.message.bcc.len();
        if hidden > 0 {
            warnings.push(format!(
                "Batch mode suppresses {} cc/bcc recipient(s) in every copy",
                hidden
            ));
        }
    }

    if job.message.from.is_empty() {
        warnings.push("Message has no sender (`from` is empty)".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Job is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Mode: {}", summary.mode);
            println!("  Transport: {}", summary.transport);
            println!("  Recipients: {}", summary.recipient_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Job is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
