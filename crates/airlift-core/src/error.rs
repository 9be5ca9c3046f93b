// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Airlift deployment tool.

use thiserror::Error;

/// The primary error type used across all Airlift crates.
///
/// Note that "object not found" is deliberately absent: a missing pointer or
/// archive object is a valid state and is represented as `Ok(None)` or an
/// empty listing at the [`crate::ObjectStore`] boundary, never as an error.
#[derive(Debug, Error)]
pub enum AirliftError {
    /// Configuration errors (missing required settings, invalid values).
    /// Raised before any I/O is attempted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Object store errors (transport, auth, server failure). Genuine store
    /// failures only; not-found responses are converted at the gateway.
    #[error("store error: {message}")]
    Store {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Activation was requested for a revision with no archive in the bucket.
    /// Activating a pointer at a non-existent archive would make the serving
    /// layer 404 on every request, so this must abort before any write.
    #[error("revision `{revision}` was not found in the bucket; upload it before activating")]
    RevisionNotFound { revision: String },

    /// Archive creation failed (missing source directory, write failure).
    #[error("packaging error: {message}")]
    Packaging {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AirliftError {
    /// Build a `Store` error wrapping an underlying cause.
    pub fn store(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AirliftError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a `Packaging` error wrapping an underlying cause.
    pub fn packaging(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AirliftError::Packaging {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
