// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AWS S3 implementation of the Airlift object store gateway.
//!
//! Wraps the official AWS SDK S3 client behind the
//! [`ObjectStore`](airlift_core::ObjectStore) trait. Honors a region or an
//! endpoint override (path-style addressing, for S3-compatible servers such
//! as MinIO), and optional static credentials. A pre-built client can be
//! injected via [`S3Store::from_client`] so library callers and tests bypass
//! client construction entirely.

pub mod store;

pub use store::{S3Options, S3Store};
