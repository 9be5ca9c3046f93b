// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as a recognized archive format and object-key segments
//! free of path separators. Requiredness of `store.bucket` and
//! `store.region`/`store.endpoint` is enforced at plan resolution instead,
//! since an injected store client waives part of it.

use std::str::FromStr;

use airlift_core::ArchiveFormat;

use crate::diagnostic::ConfigError;
use crate::model::AirliftConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AirliftConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(bucket) = &config.store.bucket
        && bucket.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "store.bucket must not be empty".to_string(),
        });
    }

    if let Some(prefix) = &config.store.prefix
        && (prefix.is_empty() || prefix.starts_with('/') || prefix.ends_with('/'))
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "store.prefix `{prefix}` must be non-empty and must not start or end with `/`"
            ),
        });
    }

    if config.store.deploy_info.is_empty() || config.store.deploy_info.contains('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "store.deploy_info `{}` must be a plain file name without `/`",
                config.store.deploy_info
            ),
        });
    }

    // Exactly one credential half configured is always a mistake.
    if config.store.access_key_id.is_some() != config.store.secret_access_key.is_some() {
        errors.push(ConfigError::Validation {
            message: "store.access_key_id and store.secret_access_key must be set together"
                .to_string(),
        });
    }

    if ArchiveFormat::from_str(&config.archive.archive_type).is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "archive.archive_type `{}` is not supported; use `tar` or `tar.gz`",
                config.archive.archive_type
            ),
        });
    }

    if config.archive.archive_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "archive.archive_path must not be empty".to_string(),
        });
    }

    if config.archive.deploy_archive.is_empty() || config.archive.deploy_archive.contains('/') {
        errors.push(ConfigError::Validation {
            message: format!(
                "archive.deploy_archive `{}` must be a plain base name without `/`",
                config.archive.deploy_archive
            ),
        });
    }

    if let Some(revision) = &config.deploy.revision_key
        && (revision.is_empty() || revision.contains('/'))
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "deploy.revision_key `{revision}` must be non-empty and must not contain `/`"
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.deploy.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "deploy.log_level `{}` is not one of trace, debug, info, warn, error",
                config.deploy.log_level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AirliftConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_bucket_fails_validation() {
        let mut config = AirliftConfig::default();
        config.store.bucket = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("store.bucket"))));
    }

    #[test]
    fn slash_wrapped_prefix_fails_validation() {
        let mut config = AirliftConfig::default();
        config.store.prefix = Some("/apps/".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("store.prefix"))));
    }

    #[test]
    fn unsupported_archive_type_fails_validation() {
        let mut config = AirliftConfig::default();
        config.archive.archive_type = "zip".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("archive_type"))));
    }

    #[test]
    fn lone_access_key_id_fails_validation() {
        let mut config = AirliftConfig::default();
        config.store.access_key_id = Some("AKIA123".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("set together"))));
    }

    #[test]
    fn revision_key_with_slash_fails_validation() {
        let mut config = AirliftConfig::default();
        config.deploy.revision_key = Some("a/b".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("revision_key"))));
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = AirliftConfig::default();
        config.deploy.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = AirliftConfig::default();
        config.store.bucket = Some("my-bucket".to_string());
        config.store.region = Some("eu-central-1".to_string());
        config.store.prefix = Some("apps/frontend".to_string());
        config.archive.archive_type = "tar".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
