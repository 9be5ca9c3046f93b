// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The active-pointer object.
//!
//! A single JSON object at a well-known key records which archive is
//! currently live: `{"bucket":"<bucket>","key":"<archive object key>"}`.
//! It is overwritten on every activation, never appended, and its absence
//! means no revision has ever been activated.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Body of the pointer object. Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePointer {
    /// Bucket holding the active archive.
    pub bucket: String,
    /// Full object key of the active archive, prefix included.
    pub key: String,
}

impl ActivePointer {
    /// Serialize to the exact UTF-8 JSON wire form.
    pub fn to_body(&self) -> Bytes {
        // Serialization of two plain string fields cannot fail.
        Bytes::from(serde_json::to_vec(self).expect("pointer body serializes"))
    }

    /// Parse a pointer body, tolerating malformed content as `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
