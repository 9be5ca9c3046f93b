// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object store gateway trait.
//!
//! The registry and pipeline consume exactly three operations against a
//! bucket. Production deployments use the S3 implementation in `airlift-s3`;
//! tests use the in-memory recording store from `airlift-test-utils`.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::AirliftError;

/// Metadata for one object in a bucket, as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHead {
    /// Full object key, prefix included.
    pub key: String,
    /// Store-reported last-modified time, when available.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Request/response gateway to an object-storage bucket.
///
/// Implementations must distinguish "object does not exist" from genuine
/// transport/auth/server failures: the former resolves to `Ok(None)` or an
/// empty listing, the latter propagates as [`AirliftError::Store`]. Every
/// operation is atomic from the caller's perspective; no retry policy is
/// applied at this seam.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `body` at `key`, overwriting any existing object.
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), AirliftError>;

    /// Read the object at `key`. `Ok(None)` when it does not exist.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, AirliftError>;

    /// List metadata for every object whose key starts with `key_prefix`,
    /// in store-returned order. Empty when nothing matches.
    async fn list_objects(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectHead>, AirliftError>;
}
