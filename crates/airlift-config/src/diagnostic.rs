// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Configuration mistakes render as Elm-style diagnostics. Unknown keys get
//! a source span pointing into the offending TOML file plus a "did you
//! mean?" suggestion via Jaro-Winkler similarity; type mismatches and
//! missing keys render as plain diagnostics with a help line.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `buckt` -> `bucket` or
/// `deploy_inof` -> `deploy_info` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// The config model's section names; spans are only hunted inside these.
const SECTIONS: &[&str] = &["store", "archive", "deploy"];

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(airlift::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        /// Source span for the offending key, when it was located.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The TOML file the key was found in.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type. Figment reports these
    /// without a usable file location, so no span is carried.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(airlift::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the key with the wrong type, e.g. `store.bucket`.
        key: String,
        /// What was actually found.
        detail: String,
        /// What type was expected.
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(airlift::config::missing_key),
        help("add `{key} = <value>` to your airlift.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(airlift::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(airlift::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(candidate) => format!("did you mean `{candidate}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may hold several underlying errors; each is converted
/// independently so every problem in the file is reported at once.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, valid) => {
                unknown_key_error(&error, field, valid, toml_sources)
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Build the unknown-key diagnostic, attaching a span when the key can be
/// located in one of the loaded TOML sources.
fn unknown_key_error(
    error: &figment::Error,
    field: &str,
    valid: &[&str],
    toml_sources: &[(String, String)],
) -> ConfigError {
    let section = error.path.first().map(String::as_str);

    let located = source_file(error, toml_sources).and_then(|(path, content)| {
        let offset = locate_key(content, section, field)?;
        Some((
            SourceSpan::new(offset.into(), field.len()),
            NamedSource::new(path, content.to_string()),
        ))
    });
    let (span, src) = match located {
        Some((span, src)) => (Some(span), Some(src)),
        None => (None, None),
    };

    ConfigError::UnknownKey {
        key: field.to_string(),
        suggestion: suggest_key(field, valid),
        valid_keys: valid.join(", "),
        span,
        src,
    }
}

/// The loaded TOML source the error originated from, if figment recorded one.
fn source_file<'a>(
    error: &figment::Error,
    toml_sources: &'a [(String, String)],
) -> Option<(&'a str, &'a str)> {
    let source = error.metadata.as_ref()?.source.as_ref()?;
    let figment::Source::File(path) = source else {
        return None;
    };
    let path = path.display().to_string();
    toml_sources
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(p, c)| (p.as_str(), c.as_str()))
}

/// Byte offset of `field` within its section's body.
///
/// The search is bounded: it starts after the `[section]` header and stops
/// at the next section header, so a key that only exists elsewhere in the
/// file is never mislabeled. `None` for sections outside the config model.
fn locate_key(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let (start, end) = match section {
        Some(name) if SECTIONS.contains(&name) => {
            let header = format!("[{name}]");
            let body = content.find(&header)? + header.len();
            let body_end = content[body..]
                .find("\n[")
                .map_or(content.len(), |i| body + i);
            (body, body_end)
        }
        Some(_) => return None,
        None => (0, content.len()),
    };

    let mut offset = start;
    for line in content[start..end].lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(field) {
            if matches!(rest.chars().next(), Some(' ' | '\t' | '=')) {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the closest valid key above the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(key, _)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
