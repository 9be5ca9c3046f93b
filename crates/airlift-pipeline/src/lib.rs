// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deployment pipeline for the Airlift deployment tool.
//!
//! Orchestrates the archive builder, the store gateway, and the revision
//! registry as a fixed sequence of lifecycle hooks. Pure glue: every hook
//! takes immutable inputs and returns an explicit output struct.

pub mod hooks;
pub mod revision;

pub use hooks::{
    activate, configure, did_deploy, ensure_revision, naming_for, prepare, registry_for, setup,
    upload, Activated, Prepared, RunReport, Uploaded,
};
pub use revision::derive_revision_key;

// Re-exported so pipeline callers need only this crate and the config model.
pub use airlift_config::{DeployPlan, PipelineContext};
