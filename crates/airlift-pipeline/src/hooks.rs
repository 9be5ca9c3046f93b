// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle hooks.
//!
//! Each hook is an explicit function taking immutable inputs and returning
//! an output struct the caller merges into its own run state; there is no
//! shared mutable context. Hooks perform no independent logic beyond
//! delegating to the archive builder, the store gateway, and the registry.
//! Call order: `configure`, `setup`, `prepare`, `upload`, `activate`,
//! `did_deploy`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use airlift_config::{resolve_plan, AirliftConfig, DeployPlan, PipelineContext};
use airlift_core::{AirliftError, ObjectStore};
use airlift_registry::{ArchiveNaming, RevisionRegistry};
use airlift_s3::{S3Options, S3Store};

use crate::revision::derive_revision_key;

/// Output of `prepare`: the staged local archive.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Bare archive file name, e.g. `dist-abc123.tar.gz`.
    pub archive_name: String,
    /// Path of the staged archive file.
    pub archive_file: PathBuf,
}

/// Output of `upload`: where the archive landed.
#[derive(Debug, Clone)]
pub struct Uploaded {
    /// Full object key of the uploaded archive, prefix included.
    pub key: String,
}

/// Output of `activate`.
#[derive(Debug, Clone)]
pub struct Activated {
    /// The revision that is now active.
    pub revision: String,
}

/// What the caller accumulated over one run; input to `did_deploy`.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Revision whose archive was uploaded this run, if any.
    pub uploaded_revision: Option<String>,
    /// Revision activated this run, if any.
    pub activated_revision: Option<String>,
}

/// The naming convention a plan implies.
pub fn naming_for(plan: &DeployPlan) -> ArchiveNaming {
    ArchiveNaming {
        prefix: plan.prefix.clone(),
        deploy_archive: plan.deploy_archive.clone(),
        archive_type: plan.archive_format.to_string(),
        deploy_info: plan.deploy_info.clone(),
    }
}

/// A registry over the plan's bucket and naming convention.
pub fn registry_for(plan: &DeployPlan, store: Arc<dyn ObjectStore>) -> RevisionRegistry {
    RevisionRegistry::new(store, plan.bucket.clone(), naming_for(plan))
}

/// Validate settings and resolve the immutable plan for this run.
///
/// Fails fast, before any I/O against the store, when mandatory settings are
/// absent. Commands that need a revision key call [`ensure_revision`] next;
/// listing does not.
pub fn configure(
    config: &AirliftConfig,
    context: &PipelineContext,
) -> Result<DeployPlan, AirliftError> {
    let plan = resolve_plan(config, context).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        AirliftError::Config(messages.join("; "))
    })?;

    info!(bucket = %plan.bucket, revision = plan.revision_key.as_deref().unwrap_or("<unset>"), "plan resolved");
    Ok(plan)
}

/// Fill the plan's revision key, deriving one from the dist directory
/// contents when none was supplied on the command line, in configuration,
/// or by build metadata.
pub fn ensure_revision(plan: &mut DeployPlan) -> Result<(), AirliftError> {
    if plan.revision_key.is_none() {
        let derived = derive_revision_key(&plan.dist_dir)?;
        info!(revision = %derived, dist_dir = %plan.dist_dir.display(), "derived revision key from build output");
        plan.revision_key = Some(derived);
    }
    Ok(())
}

/// Instantiate the store client, or adopt the supplied override.
pub async fn setup(
    plan: &DeployPlan,
    store_override: Option<Arc<dyn ObjectStore>>,
) -> Result<Arc<dyn ObjectStore>, AirliftError> {
    if let Some(store) = store_override {
        info!("using injected store client");
        return Ok(store);
    }

    let store = S3Store::connect(S3Options {
        region: plan.region.clone(),
        endpoint: plan.endpoint.clone(),
        access_key_id: plan.access_key_id.clone(),
        secret_access_key: plan.secret_access_key.clone(),
    })
    .await?;
    Ok(Arc::new(store))
}

/// Invoke the archive builder; produces the local archive file.
pub async fn prepare(plan: &DeployPlan) -> Result<Prepared, AirliftError> {
    let revision = plan.require_revision()?;
    let naming = naming_for(plan);
    let archive_name = naming.archive_name(revision);
    let archive_file = plan.archive_path.join(&archive_name);

    let format = plan.archive_format;
    let dist_dir = plan.dist_dir.clone();
    let base_name = plan.deploy_archive.clone();
    let destination = archive_file.clone();
    tokio::task::spawn_blocking(move || {
        airlift_archive::pack(format, &dist_dir, &base_name, &destination)
    })
    .await
    .map_err(|e| AirliftError::Packaging {
        message: format!("archive task failed: {e}"),
        source: None,
    })??;

    info!(archive = %archive_name, file = %archive_file.display(), "archive created");
    Ok(Prepared {
        archive_name,
        archive_file,
    })
}

/// Write the staged archive to the store at the archive key.
pub async fn upload(
    plan: &DeployPlan,
    store: &Arc<dyn ObjectStore>,
    prepared: &Prepared,
) -> Result<Uploaded, AirliftError> {
    let revision = plan.require_revision()?;
    let key = naming_for(plan).archive_key(revision);

    let body = tokio::fs::read(&prepared.archive_file).await.map_err(|e| {
        AirliftError::packaging(
            format!("cannot read staged archive `{}`", prepared.archive_file.display()),
            e,
        )
    })?;

    info!(bucket = %plan.bucket, key = %key, bytes = body.len(), "uploading archive");
    store.put_object(&plan.bucket, &key, body.into()).await?;

    info!(bucket = %plan.bucket, key = %key, "archive uploaded");
    Ok(Uploaded { key })
}

/// Activate the plan's revision via the registry.
///
/// The registry verifies the revision's archive actually exists in the
/// bucket before the pointer write; a missing archive is
/// [`AirliftError::RevisionNotFound`] and no write is issued.
pub async fn activate(
    plan: &DeployPlan,
    store: Arc<dyn ObjectStore>,
) -> Result<Activated, AirliftError> {
    let revision = plan.require_revision()?.to_string();
    registry_for(plan, store).activate(&revision).await?;
    Ok(Activated { revision })
}

/// Post-run notice: uploaded but never activated.
///
/// Returns a user-facing message when the run uploaded a revision without
/// activating it; informational only.
pub fn did_deploy(report: &RunReport) -> Option<String> {
    match (&report.uploaded_revision, &report.activated_revision) {
        (Some(revision), None) => Some(format!(
            "Deployed but did not activate revision {revision}. To activate, run: airlift activate --revision {revision}"
        )),
        _ => None,
    }
}
