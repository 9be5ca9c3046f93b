// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The object naming convention.
//!
//! Archive object key: `{prefix/}{deploy_archive}-{revision_key}.{archive_type}`
//! (prefix segment and separating `/` present only when a prefix is
//! configured). Pointer object key: `{prefix/}{deploy_info}`. Parsing a key
//! back into a revision is the exact inverse of construction: strip the known
//! prefix from the front, strip the extension from the back.

/// Naming convention constants for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNaming {
    /// Optional key namespace, without leading or trailing `/`.
    pub prefix: Option<String>,
    /// Archive base name, e.g. `dist`.
    pub deploy_archive: String,
    /// Archive extension, e.g. `tar.gz`.
    pub archive_type: String,
    /// Pointer object file name, e.g. `fastboot-deploy-info.json`.
    pub deploy_info: String,
}

impl ArchiveNaming {
    /// The bare archive file name for a revision:
    /// `{deploy_archive}-{revision}.{archive_type}`.
    pub fn archive_name(&self, revision: &str) -> String {
        format!("{}-{}.{}", self.deploy_archive, revision, self.archive_type)
    }

    /// The full archive object key for a revision, prefix included.
    pub fn archive_key(&self, revision: &str) -> String {
        self.prefixed(&self.archive_name(revision))
    }

    /// The key prefix shared by all archive objects; the listing query.
    pub fn archive_key_prefix(&self) -> String {
        self.prefixed(&format!("{}-", self.deploy_archive))
    }

    /// The pointer object key.
    pub fn pointer_key(&self) -> String {
        self.prefixed(&self.deploy_info)
    }

    /// Extract the revision encoded in a full object key.
    ///
    /// Returns `None` when the key does not match the convention or would
    /// yield an empty revision; such keys are not valid revisions.
    pub fn parse_revision(&self, key: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(prefix) => key.strip_prefix(&format!("{prefix}/"))?,
            None => key,
        };
        let revision = name
            .strip_prefix(&format!("{}-", self.deploy_archive))?
            .strip_suffix(&format!(".{}", self.archive_type))?;
        if revision.is_empty() {
            return None;
        }
        Some(revision.to_string())
    }

    fn prefixed(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}/{name}"),
            None => name.to_string(),
        }
    }
}
