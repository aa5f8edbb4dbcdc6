//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{AddressMap, DispatchJob};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::cli::InfoArgs;

use super::ensure_job_file;

/// Job info for JSON output
#[derive(Serialize)]
struct JobInfo {
    version: String,
    mode: String,
    transport: TransportInfo,
    message: MessageInfo,
    recipient_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipients: Option<Vec<String>>,
}

#[derive(Serialize)]
struct TransportInfo {
    name: String,
    transport_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reject: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    params: HashMap<String, String>,
}

#[derive(Serialize)]
struct MessageInfo {
    from: String,
    subject: String,
    to: usize,
    cc: usize,
    bcc: usize,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading job info");

    ensure_job_file(&args.config)?;

    let job = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load job from {}", args.config.display()))?;

    if args.json {
        let info = build_job_info(&job, args.recipients);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize job info")?;
        println!("{}", json);
    } else {
        print_job_info(&job, args.recipients);
    }

    Ok(())
}

/// Addresses a dispatch of `job` iterates over, display-formatted
fn recipient_list(job: &DispatchJob) -> Vec<String> {
    let source: &AddressMap = job.recipients.as_ref().unwrap_or(&job.message.to);
    source.mailboxes().map(ToString::to_string).collect()
}

fn build_job_info(job: &DispatchJob, list_recipients: bool) -> JobInfo {
    JobInfo {
        version: format!("{:?}", job.version),
        mode: job.mode.to_string(),
        transport: TransportInfo {
            name: job.transport.name.clone(),
            transport_type: format!("{:?}", job.transport.transport_type),
            reject: job.transport.reject.clone(),
            params: job.transport.params.clone(),
        },
        message: MessageInfo {
            from: job.message.from.to_string(),
            subject: job.message.subject.clone(),
            to: job.message.to.len(),
            cc: job.message.cc.len(),
            bcc: job.message.bcc.len(),
        },
        recipient_count: job.recipient_count(),
        recipients: list_recipients.then(|| recipient_list(job)),
    }
}

fn print_job_info(job: &DispatchJob, list_recipients: bool) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Mail Dispatch Job                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📨 Message");
    println!("   ├─ Version: {:?}", job.version);
    println!("   ├─ From: {}", job.message.from);
    println!("   ├─ Subject: {}", job.message.subject);
    println!(
        "   └─ To/Cc/Bcc: {}/{}/{}",
        job.message.to.len(),
        job.message.cc.len(),
        job.message.bcc.len()
    );

    println!("\n🚚 Transport");
    println!(
        "   ├─ {} ({:?})",
        job.transport.name, job.transport.transport_type
    );
    let mut params: Vec<_> = job.transport.params.iter().collect();
    params.sort();
    for (key, value) in params {
        println!("   ├─ {} = {}", key, value);
    }
    println!("   └─ Rejects: {}", job.transport.reject.len());

    println!("\n⚙️  Delivery");
    println!("   ├─ Mode: {}", job.mode);
    let source = if job.recipients.is_some() {
        "streamed list"
    } else {
        "message.to"
    };
    println!("   └─ Recipients: {} (from {})", job.recipient_count(), source);

    if list_recipients {
        let recipients = recipient_list(job);
        println!("\n👥 Recipients ({})", recipients.len());
        for (i, recipient) in recipients.iter().enumerate() {
            let prefix = if i == recipients.len() - 1 { "└─" } else { "├─" };
            println!("   {} {}", prefix, recipient);
        }
    }

    println!();
}
