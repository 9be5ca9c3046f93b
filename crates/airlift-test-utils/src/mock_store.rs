// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory recording object store for deterministic testing.
//!
//! `MockStore` implements `ObjectStore` over an insertion-ordered object
//! list, records every call, and can be told to fail writes. The call log
//! supports the zero-write assertions the activation precondition demands.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};

use airlift_core::{AirliftError, ObjectHead, ObjectStore};

/// One recorded store invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Put {
        bucket: String,
        key: String,
        body: Bytes,
    },
    Get {
        bucket: String,
        key: String,
    },
    List {
        bucket: String,
        prefix: String,
    },
}

#[derive(Debug, Clone)]
struct StoredObject {
    bucket: String,
    key: String,
    body: Bytes,
    last_modified: Option<DateTime<Utc>>,
}

/// An in-memory `ObjectStore` with seeded objects, a call log, and
/// injectable put failures.
///
/// Listing returns objects in insertion order, matching how a real store
/// reports a stable order for equal-timestamp objects. Writes get an
/// increasing synthetic timestamp so uploaded objects order naturally.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    objects: Vec<StoredObject>,
    calls: Vec<StoreCall>,
    fail_puts: Option<String>,
    put_count: u32,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without recording a call, with an explicit timestamp.
    pub fn seed_object(
        &self,
        bucket: &str,
        key: &str,
        body: impl Into<Bytes>,
        last_modified: Option<DateTime<Utc>>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.objects.push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.into(),
            last_modified,
        });
    }

    /// Make every subsequent `put_object` fail with a store error.
    pub fn fail_puts(&self, message: &str) {
        self.state.lock().unwrap().fail_puts = Some(message.to_string());
    }

    /// The body of an object, if present.
    pub fn object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .rev()
            .find(|o| o.bucket == bucket && o.key == key)
            .map(|o| o.body.clone())
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded writes.
    pub fn put_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Put { .. }))
            .count()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), AirliftError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.clone(),
        });

        if let Some(message) = &state.fail_puts {
            return Err(AirliftError::Store {
                message: message.clone(),
                source: None,
            });
        }

        state.put_count += 1;
        let timestamp = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
            + Duration::seconds(i64::from(state.put_count));

        // Overwrite in place to preserve listing order, like a real bucket.
        if let Some(existing) = state
            .objects
            .iter_mut()
            .find(|o| o.bucket == bucket && o.key == key)
        {
            existing.body = body;
            existing.last_modified = Some(timestamp);
        } else {
            state.objects.push(StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                body,
                last_modified: Some(timestamp),
            });
        }
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>, AirliftError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        Ok(state
            .objects
            .iter()
            .rev()
            .find(|o| o.bucket == bucket && o.key == key)
            .map(|o| o.body.clone()))
    }

    async fn list_objects(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectHead>, AirliftError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(StoreCall::List {
            bucket: bucket.to_string(),
            prefix: key_prefix.to_string(),
        });
        Ok(state
            .objects
            .iter()
            .filter(|o| o.bucket == bucket && o.key.starts_with(key_prefix))
            .map(|o| ObjectHead {
                key: o.key.clone(),
                last_modified: o.last_modified,
            })
            .collect())
    }
}
