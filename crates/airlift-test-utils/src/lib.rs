// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Airlift integration tests.
//!
//! Provides `MockStore`, an in-memory recording `ObjectStore`, and
//! `DeployHarness`, a tempdir-backed deployment fixture.

pub mod harness;
pub mod mock_store;

pub use harness::DeployHarness;
pub use mock_store::{MockStore, StoreCall};
