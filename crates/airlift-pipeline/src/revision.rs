// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived revision keys.
//!
//! When no revision key is supplied on the command line, in configuration,
//! or by build metadata, one is derived from the build itself: a SHA-256
//! over the dist directory's relative paths and contents, truncated to 8 hex
//! characters. Two identical builds derive the same key.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use airlift_core::AirliftError;

/// Number of hex characters kept from the digest.
const KEY_LENGTH: usize = 8;

/// Derive a revision key from a built application directory.
pub fn derive_revision_key(dist_dir: &Path) -> Result<String, AirliftError> {
    if !dist_dir.is_dir() {
        return Err(AirliftError::Packaging {
            message: format!(
                "cannot derive a revision key: directory `{}` not found",
                dist_dir.display()
            ),
            source: None,
        });
    }

    let mut files = Vec::new();
    collect_files(dist_dir, dist_dir, &mut files)?;
    // Deterministic order regardless of directory iteration order.
    files.sort();

    let mut hasher = Sha256::new();
    for relative in &files {
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        let contents = std::fs::read(dist_dir.join(relative)).map_err(|e| {
            AirliftError::packaging(
                format!("cannot derive a revision key: failed to read `{}`", relative.display()),
                e,
            )
        })?;
        hasher.update(&contents);
        hasher.update([0u8]);
    }

    let digest = hex::encode(hasher.finalize());
    Ok(digest[..KEY_LENGTH].to_string())
}

fn collect_files(
    root: &Path,
    dir: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), AirliftError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AirliftError::packaging(
            format!("cannot derive a revision key: failed to read `{}`", dir.display()),
            e,
        )
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            AirliftError::packaging(
                format!("cannot derive a revision key: failed to read `{}`", dir.display()),
                e,
            )
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    Ok(())
}
