// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `airlift deploy` command implementation.
//!
//! Runs the full hook sequence: configure, setup, prepare, upload, then
//! activate when requested, and prints the post-deploy notice when an
//! uploaded revision was left inactive.

use colored::Colorize;

use airlift_config::AirliftConfig;
use airlift_core::AirliftError;
use airlift_pipeline::{self as pipeline, PipelineContext, RunReport};

/// Runs the `airlift deploy` command.
pub async fn run(
    config: &AirliftConfig,
    revision: Option<String>,
    activate: bool,
) -> Result<(), AirliftError> {
    let context = PipelineContext {
        command_revision: revision,
        ..Default::default()
    };
    let mut plan = pipeline::configure(config, &context)?;
    pipeline::ensure_revision(&mut plan)?;

    let store = pipeline::setup(&plan, None).await?;

    let prepared = pipeline::prepare(&plan).await?;
    println!("{}  {}", "✔".green(), prepared.archive_name);

    let uploaded = pipeline::upload(&plan, &store, &prepared).await?;
    println!("{}  {}", "✔".green(), uploaded.key);

    let mut report = RunReport {
        uploaded_revision: plan.revision_key.clone(),
        activated_revision: None,
    };

    if activate {
        let activated = pipeline::activate(&plan, store).await?;
        println!("{}  activated revision {}", "✔".green(), activated.revision);
        report.activated_revision = Some(activated.revision);
    }

    if let Some(notice) = pipeline::did_deploy(&report) {
        println!("{}", notice.yellow());
    }

    Ok(())
}
