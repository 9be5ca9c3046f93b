// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `DeployHarness`: tempdir dist fixture + resolved plan + mock store.

use std::path::PathBuf;
use std::sync::Arc;

use airlift_config::{resolve_plan, AirliftConfig, DeployPlan, PipelineContext};

use crate::mock_store::MockStore;

/// A ready-to-run deployment fixture.
///
/// Creates a temporary dist directory with a small built-app layout, a
/// temporary archive staging directory, a mock store, and a resolved plan
/// pointing at both. The plan carries `has_store_override`, so no region or
/// endpoint is required.
pub struct DeployHarness {
    dist: tempfile::TempDir,
    staging: tempfile::TempDir,
    store: Arc<MockStore>,
    config: AirliftConfig,
    revision: Option<String>,
}

impl DeployHarness {
    pub fn new() -> Self {
        let dist = tempfile::tempdir().expect("create dist tempdir");
        std::fs::write(dist.path().join("index.html"), "<html>app</html>")
            .expect("write dist fixture");
        std::fs::create_dir(dist.path().join("assets")).expect("create assets dir");
        std::fs::write(dist.path().join("assets/app.js"), "console.log('app')")
            .expect("write dist fixture");

        let staging = tempfile::tempdir().expect("create staging tempdir");

        let mut config = AirliftConfig::default();
        config.store.bucket = Some("b".to_string());
        config.archive.archive_path = staging.path().display().to_string();

        Self {
            dist,
            staging,
            store: Arc::new(MockStore::new()),
            config,
            revision: None,
        }
    }

    /// Pin the revision key the plan resolves to.
    pub fn with_revision(mut self, revision: &str) -> Self {
        self.revision = Some(revision.to_string());
        self
    }

    /// Mutate the underlying config before plan resolution.
    pub fn with_config(mut self, f: impl FnOnce(&mut AirliftConfig)) -> Self {
        f(&mut self.config);
        self
    }

    /// The underlying config, for hooks that resolve the plan themselves.
    pub fn config(&self) -> &AirliftConfig {
        &self.config
    }

    /// The mock store backing this harness.
    pub fn store(&self) -> Arc<MockStore> {
        self.store.clone()
    }

    /// Path of the dist fixture directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.dist.path().to_path_buf()
    }

    /// Path of the archive staging directory.
    pub fn staging_dir(&self) -> PathBuf {
        self.staging.path().to_path_buf()
    }

    /// The context this harness resolves plans against.
    pub fn context(&self) -> PipelineContext {
        PipelineContext {
            dist_dir: Some(self.dist.path().to_path_buf()),
            command_revision: self.revision.clone(),
            build_revision: None,
            has_store_override: true,
        }
    }

    /// Resolve the plan for this harness.
    pub fn plan(&self) -> DeployPlan {
        resolve_plan(&self.config, &self.context()).expect("harness plan resolves")
    }
}

impl Default for DeployHarness {
    fn default() -> Self {
        Self::new()
    }
}
