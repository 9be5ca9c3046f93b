// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-phase configuration resolution.
//!
//! The declarative config model is resolved once against a
//! [`PipelineContext`] snapshot at the start of a run, producing a plain
//! immutable [`DeployPlan`] consumed by the rest of the pipeline. Defaults
//! that depend on the run (the dist directory, the revision key) are filled
//! from the context here rather than threaded as callbacks.

use std::path::PathBuf;
use std::str::FromStr;

use airlift_core::ArchiveFormat;

use crate::diagnostic::ConfigError;
use crate::model::AirliftConfig;
use crate::validation::validate_config;

/// Snapshot of the run environment a plan is resolved against.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    /// Build output directory, when the caller knows it (e.g. from a build
    /// step). `archive.dist_dir` in the config takes precedence.
    pub dist_dir: Option<PathBuf>,

    /// Revision key passed explicitly on the command line. Highest
    /// precedence.
    pub command_revision: Option<String>,

    /// Revision key supplied by build metadata (e.g. a VCS hash the caller
    /// already computed). Lowest precedence.
    pub build_revision: Option<String>,

    /// True when the caller will inject a pre-built store client. Waives the
    /// region/endpoint requirement.
    pub has_store_override: bool,
}

/// The immutable, fully-resolved configuration for one deployment run.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    /// Target bucket.
    pub bucket: String,
    /// AWS region, if configured.
    pub region: Option<String>,
    /// Endpoint URL override, if configured.
    pub endpoint: Option<String>,
    /// Optional key namespace.
    pub prefix: Option<String>,
    /// File name of the active-pointer object.
    pub deploy_info: String,
    /// Static access key id, if configured.
    pub access_key_id: Option<String>,
    /// Static secret access key, if configured.
    pub secret_access_key: Option<String>,

    /// Source directory holding the built application.
    pub dist_dir: PathBuf,
    /// Local staging directory for created archives.
    pub archive_path: PathBuf,
    /// Archive format; its string form is the naming-convention extension.
    pub archive_format: ArchiveFormat,
    /// Archive base name.
    pub deploy_archive: String,

    /// Resolved revision key, when one was supplied. `None` means the
    /// pipeline derives one from the build output before packing.
    pub revision_key: Option<String>,
    /// Logging level for the run.
    pub log_level: String,
}

impl DeployPlan {
    /// The revision key, or a `Config` error naming the ways to supply one.
    pub fn require_revision(&self) -> Result<&str, airlift_core::AirliftError> {
        self.revision_key.as_deref().ok_or_else(|| {
            airlift_core::AirliftError::Config(
                "no revision key resolved; pass --revision or set deploy.revision_key".to_string(),
            )
        })
    }
}

/// Resolve a validated configuration against a context snapshot.
///
/// Collects every error rather than failing fast, mirroring
/// [`validate_config`]. Requiredness rules enforced here:
/// `store.bucket` always; at least one of `store.region`/`store.endpoint`
/// unless the context announces an injected store client.
pub fn resolve_plan(
    config: &AirliftConfig,
    context: &PipelineContext,
) -> Result<DeployPlan, Vec<ConfigError>> {
    let mut errors = match validate_config(config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    let bucket = match &config.store.bucket {
        Some(bucket) if !bucket.trim().is_empty() => bucket.clone(),
        _ => {
            errors.push(ConfigError::MissingKey {
                key: "store.bucket".to_string(),
            });
            String::new()
        }
    };

    if !context.has_store_override
        && config.store.region.is_none()
        && config.store.endpoint.is_none()
    {
        errors.push(ConfigError::Validation {
            message:
                "you must configure either store.endpoint or store.region to use the S3 client"
                    .to_string(),
        });
    }

    // Invalid values already reported by validate_config; fall back to the
    // default so resolution can continue collecting errors.
    let archive_format =
        ArchiveFormat::from_str(&config.archive.archive_type).unwrap_or_default();

    let dist_dir = config
        .archive
        .dist_dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| context.dist_dir.clone())
        .unwrap_or_else(|| PathBuf::from("dist"));

    // Explicit command-line revision wins over the configured pin, which
    // wins over build metadata.
    let revision_key = context
        .command_revision
        .clone()
        .or_else(|| config.deploy.revision_key.clone())
        .or_else(|| context.build_revision.clone());

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(DeployPlan {
        bucket,
        region: config.store.region.clone(),
        endpoint: config.store.endpoint.clone(),
        prefix: config.store.prefix.clone(),
        deploy_info: config.store.deploy_info.clone(),
        access_key_id: config.store.access_key_id.clone(),
        secret_access_key: config.store.secret_access_key.clone(),
        dist_dir,
        archive_path: PathBuf::from(&config.archive.archive_path),
        archive_format,
        deploy_archive: config.archive.deploy_archive.clone(),
        revision_key,
        log_level: config.deploy.log_level.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> AirliftConfig {
        let mut config = AirliftConfig::default();
        config.store.bucket = Some("b".to_string());
        config.store.region = Some("us-east-1".to_string());
        config
    }

    #[test]
    fn minimal_config_resolves_with_defaults() {
        let plan = resolve_plan(&minimal_config(), &PipelineContext::default()).unwrap();
        assert_eq!(plan.bucket, "b");
        assert_eq!(plan.deploy_info, "fastboot-deploy-info.json");
        assert_eq!(plan.dist_dir, PathBuf::from("dist"));
        assert_eq!(plan.archive_path, PathBuf::from("tmp/dist"));
        assert_eq!(plan.archive_format, ArchiveFormat::TarGz);
        assert_eq!(plan.deploy_archive, "dist");
        assert!(plan.revision_key.is_none());
    }

    #[test]
    fn missing_bucket_is_reported() {
        let mut config = minimal_config();
        config.store.bucket = None;
        let errors = resolve_plan(&config, &PipelineContext::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "store.bucket")));
    }

    #[test]
    fn region_or_endpoint_is_required_without_override() {
        let mut config = minimal_config();
        config.store.region = None;
        let errors = resolve_plan(&config, &PipelineContext::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("store.endpoint"))));

        // An endpoint alone satisfies the requirement.
        config.store.endpoint = Some("http://localhost:9000".to_string());
        assert!(resolve_plan(&config, &PipelineContext::default()).is_ok());
    }

    #[test]
    fn injected_client_waives_region_requirement() {
        let mut config = minimal_config();
        config.store.region = None;
        let context = PipelineContext {
            has_store_override: true,
            ..Default::default()
        };
        assert!(resolve_plan(&config, &context).is_ok());
    }

    #[test]
    fn config_dist_dir_wins_over_context() {
        let mut config = minimal_config();
        config.archive.dist_dir = Some("build/out".to_string());
        let context = PipelineContext {
            dist_dir: Some(PathBuf::from("ctx/dist")),
            ..Default::default()
        };
        let plan = resolve_plan(&config, &context).unwrap();
        assert_eq!(plan.dist_dir, PathBuf::from("build/out"));
    }

    #[test]
    fn revision_precedence_is_command_then_config_then_build() {
        let mut config = minimal_config();
        config.deploy.revision_key = Some("pinned".to_string());
        let context = PipelineContext {
            command_revision: Some("cli".to_string()),
            build_revision: Some("built".to_string()),
            ..Default::default()
        };
        let plan = resolve_plan(&config, &context).unwrap();
        assert_eq!(plan.revision_key.as_deref(), Some("cli"));

        let context = PipelineContext {
            build_revision: Some("built".to_string()),
            ..Default::default()
        };
        let plan = resolve_plan(&config, &context).unwrap();
        assert_eq!(plan.revision_key.as_deref(), Some("pinned"));

        config.deploy.revision_key = None;
        let plan = resolve_plan(&config, &context).unwrap();
        assert_eq!(plan.revision_key.as_deref(), Some("built"));
    }

    #[test]
    fn require_revision_errors_when_unset() {
        let plan = resolve_plan(&minimal_config(), &PipelineContext::default()).unwrap();
        assert!(plan.require_revision().is_err());
    }
}
