// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `airlift activate` command implementation.

use colored::Colorize;

use airlift_config::AirliftConfig;
use airlift_core::AirliftError;
use airlift_pipeline::{self as pipeline, PipelineContext};

/// Runs the `airlift activate` command.
///
/// The revision must already have an archive in the bucket; the registry
/// refuses to point the active pointer at a revision it cannot find.
pub async fn run(config: &AirliftConfig, revision: Option<String>) -> Result<(), AirliftError> {
    let context = PipelineContext {
        command_revision: revision,
        ..Default::default()
    };
    let plan = pipeline::configure(config, &context)?;
    // No derivation here: activating should never invent a key the bucket
    // has not seen.
    plan.require_revision()?;

    let store = pipeline::setup(&plan, None).await?;
    let activated = pipeline::activate(&plan, store).await?;
    println!("{}  activated revision {}", "✔".green(), activated.revision);
    Ok(())
}
