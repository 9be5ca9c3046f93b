// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The revision registry: listing and activation over one bucket.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use airlift_core::{AirliftError, ObjectStore};

use crate::naming::ArchiveNaming;
use crate::pointer::ActivePointer;

/// Fixed deployer identifier stamped on every listed record.
pub const DEPLOYER: &str = "airlift-s3";

/// One known revision, as computed from store state.
///
/// Ephemeral: recomputed on every listing call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionRecord {
    /// The revision key parsed from the archive object key.
    pub revision: String,
    /// Store-reported last-modified time of the archive object.
    pub timestamp: Option<DateTime<Utc>>,
    /// True when the active pointer names this revision's archive.
    pub active: bool,
    /// Tool that produced the archive.
    pub deployer: String,
}

/// Revision listing and activation against one (bucket, prefix) pair.
///
/// Holds no cache: every call re-fetches from the store, so each result is a
/// snapshot that may already be stale. Concurrent activations against the
/// same bucket resolve by the store's last-write-wins semantics on the
/// pointer key; each write is independently well-formed.
pub struct RevisionRegistry {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    naming: ArchiveNaming,
}

impl RevisionRegistry {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>, naming: ArchiveNaming) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            naming,
        }
    }

    /// The naming convention this registry resolves keys against.
    pub fn naming(&self) -> &ArchiveNaming {
        &self.naming
    }

    /// List every known revision, most recent first.
    ///
    /// Reads the pointer object and the archive listing concurrently (they
    /// are independent), tolerating absence of either: a missing pointer
    /// means no revision is active, an empty listing means no revisions
    /// exist. Only genuine store failures propagate.
    pub async fn list_revisions(&self) -> Result<Vec<RevisionRecord>, AirliftError> {
        let pointer_key = self.naming.pointer_key();
        let archive_prefix = self.naming.archive_key_prefix();

        let (pointer_body, heads) = tokio::join!(
            self.store.get_object(&self.bucket, &pointer_key),
            self.store.list_objects(&self.bucket, &archive_prefix),
        );
        let pointer_body = pointer_body.inspect_err(|e| {
            error!(bucket = %self.bucket, key = %pointer_key, error = %e, "failed to read active pointer");
        })?;
        let heads = heads.inspect_err(|e| {
            error!(bucket = %self.bucket, prefix = %archive_prefix, error = %e, "failed to list archives");
        })?;

        let active_revision = pointer_body.and_then(|body| self.active_revision(&body));

        let mut records: Vec<RevisionRecord> = heads
            .iter()
            .filter_map(|head| {
                let revision = self.naming.parse_revision(&head.key)?;
                let active = active_revision.as_deref() == Some(revision.as_str());
                Some(RevisionRecord {
                    revision,
                    timestamp: head.last_modified,
                    active,
                    deployer: DEPLOYER.to_string(),
                })
            })
            .collect();

        // Most recent first; ties keep store-returned order (stable sort).
        // Records without a timestamp sort last.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(records)
    }

    /// Point the active pointer at `revision`.
    ///
    /// The existence check is a hard precondition: a pointer at an archive
    /// that was never uploaded would make the serving layer 404 on every
    /// request. No write is issued when the revision is absent. Activating
    /// the same revision twice writes the same pointer content and is safe
    /// to retry.
    pub async fn activate(&self, revision: &str) -> Result<(), AirliftError> {
        let revisions = self.list_revisions().await?;
        if !revisions.iter().any(|r| r.revision == revision) {
            error!(bucket = %self.bucket, revision, "cannot activate: revision not found");
            return Err(AirliftError::RevisionNotFound {
                revision: revision.to_string(),
            });
        }

        let pointer = ActivePointer {
            bucket: self.bucket.clone(),
            key: self.naming.archive_key(revision),
        };
        let pointer_key = self.naming.pointer_key();
        self.store
            .put_object(&self.bucket, &pointer_key, pointer.to_body())
            .await
            .inspect_err(|e| {
                error!(bucket = %self.bucket, key = %pointer_key, error = %e, "failed to write active pointer");
            })?;

        info!(bucket = %self.bucket, revision, key = %pointer.key, "revision activated");
        Ok(())
    }

    /// Decode the active revision from a pointer body, tolerating malformed
    /// content and keys outside the naming convention.
    fn active_revision(&self, body: &[u8]) -> Option<String> {
        let Some(pointer) = ActivePointer::parse(body) else {
            warn!(bucket = %self.bucket, "active pointer body is malformed; treating as no active revision");
            return None;
        };
        let revision = self.naming.parse_revision(&pointer.key);
        if revision.is_none() {
            warn!(
                bucket = %self.bucket,
                key = %pointer.key,
                "active pointer names a key outside the naming convention"
            );
        }
        revision
    }
}
