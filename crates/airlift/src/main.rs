// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Airlift - deploy web application builds to S3 with revision activation.
//!
//! This is the binary entry point for the `airlift` CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::error;

mod activate;
mod deploy;
mod list;

/// Airlift - deploy web application builds to S3 with revision activation.
#[derive(Parser, Debug)]
#[command(name = "airlift", version, about, long_about = None)]
struct Cli {
    /// Explicit config file; replaces the airlift.toml file hierarchy.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Package the build, upload the archive, and optionally activate it.
    Deploy {
        /// Revision key for this deploy; derived from the build when omitted.
        #[arg(long)]
        revision: Option<String>,

        /// Activate the revision after uploading.
        #[arg(long)]
        activate: bool,
    },
    /// Point the active pointer at an already-uploaded revision.
    Activate {
        /// Revision key to activate.
        #[arg(long)]
        revision: Option<String>,
    },
    /// List known revisions, newest first.
    List {
        /// Emit the revision records as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and validate configuration before anything else.
    let config = match &cli.config {
        Some(path) => airlift_config::load_and_validate_path(path),
        None => airlift_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            airlift_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.deploy.log_level);

    let result = match cli.command {
        Commands::Deploy { revision, activate } => {
            deploy::run(&config, revision, activate).await
        }
        Commands::Activate { revision } => activate::run(&config, revision).await,
        Commands::List { json } => list::run(&config, json).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("{} {err}", "✘".red());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airlift={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn deploy_parses_revision_and_activate_flags() {
        let cli = Cli::parse_from(["airlift", "deploy", "--revision", "abc123", "--activate"]);
        match cli.command {
            Commands::Deploy { revision, activate } => {
                assert_eq!(revision.as_deref(), Some("abc123"));
                assert!(activate);
            }
            other => panic!("expected deploy, got {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::parse_from(["airlift", "list", "--json", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
