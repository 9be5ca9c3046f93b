// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Airlift deployment tool.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Airlift configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional at deserialization time;
/// required settings (the bucket, and region/endpoint unless a store client
/// is injected) are enforced when the plan is resolved.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AirliftConfig {
    /// Object store target and credentials.
    #[serde(default)]
    pub store: StoreConfig,

    /// Archive creation settings.
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Deployment run settings.
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Object store target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Target bucket. Required for every command.
    #[serde(default)]
    pub bucket: Option<String>,

    /// AWS region. At least one of `region`/`endpoint` is required unless a
    /// pre-built store client is supplied.
    #[serde(default)]
    pub region: Option<String>,

    /// Endpoint URL override for S3-compatible stores (MinIO, LocalStack).
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Optional key namespace; prepended to every object key as `{prefix}/`.
    #[serde(default)]
    pub prefix: Option<String>,

    /// File name of the active-pointer object.
    #[serde(default = "default_deploy_info")]
    pub deploy_info: String,

    /// Static access key id. The SDK default provider chain is used when
    /// credentials are not configured here.
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: None,
            endpoint: None,
            prefix: None,
            deploy_info: default_deploy_info(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

fn default_deploy_info() -> String {
    "fastboot-deploy-info.json".to_string()
}

/// Archive creation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Source directory holding the built application. Defaults from the
    /// pipeline context when unset.
    #[serde(default)]
    pub dist_dir: Option<String>,

    /// Local staging directory for created archives.
    #[serde(default = "default_archive_path")]
    pub archive_path: String,

    /// Archive format: `tar` or `tar.gz`. Also the file extension used in
    /// the object naming convention.
    #[serde(default = "default_archive_type")]
    pub archive_type: String,

    /// Base name of the archive; unpacking yields a directory of this name.
    #[serde(default = "default_deploy_archive")]
    pub deploy_archive: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            dist_dir: None,
            archive_path: default_archive_path(),
            archive_type: default_archive_type(),
            deploy_archive: default_deploy_archive(),
        }
    }
}

fn default_archive_path() -> String {
    "tmp/dist".to_string()
}

fn default_archive_type() -> String {
    "tar.gz".to_string()
}

fn default_deploy_archive() -> String {
    "dist".to_string()
}

/// Deployment run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Pinned revision key. Normally unset; the key is then taken from the
    /// command line or derived from the build output.
    #[serde(default)]
    pub revision_key: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            revision_key: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
