// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `airlift list` command implementation.

use colored::Colorize;

use airlift_config::AirliftConfig;
use airlift_core::AirliftError;
use airlift_pipeline::{self as pipeline, PipelineContext};
use airlift_registry::RevisionRecord;

/// Runs the `airlift list` command.
pub async fn run(config: &AirliftConfig, json: bool) -> Result<(), AirliftError> {
    let plan = pipeline::configure(config, &PipelineContext::default())?;
    let store = pipeline::setup(&plan, None).await?;
    let records = pipeline::registry_for(&plan, store).list_revisions().await?;

    if json {
        let rendered = serde_json::to_string_pretty(&records)
            .map_err(|e| AirliftError::Config(format!("failed to render revision records: {e}")))?;
        println!("{rendered}");
    } else {
        print_table(&records);
    }
    Ok(())
}

fn print_table(records: &[RevisionRecord]) {
    if records.is_empty() {
        println!("no revisions found");
        return;
    }

    for record in records {
        let marker = if record.active { ">".green() } else { " ".normal() };
        let timestamp = record
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{marker} {:<24} {:<24} {}",
            record.revision, timestamp, record.deployer
        );
    }
}
