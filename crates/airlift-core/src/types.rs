// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Airlift workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported local archive formats.
///
/// The string form doubles as the file extension and as the `archive_type`
/// segment of the object naming convention, so `Display`/`FromStr` must
/// round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ArchiveFormat {
    /// Plain uncompressed tar.
    #[strum(serialize = "tar")]
    #[serde(rename = "tar")]
    Tar,

    /// Gzip-compressed tar (the default).
    #[strum(serialize = "tar.gz")]
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl ArchiveFormat {
    /// The file extension for this format, without a leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl Default for ArchiveFormat {
    fn default() -> Self {
        ArchiveFormat::TarGz
    }
}
