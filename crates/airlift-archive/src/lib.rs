// SPDX-FileCopyrightText: 2026 Airlift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Archive builder for the Airlift deployment tool.
//!
//! Turns a built application directory into a named archive file on local
//! storage. The archive's entries are rooted under the configured base name
//! so that unpacking yields a directory named after the deploy archive.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use airlift_core::{AirliftError, ArchiveFormat};

/// Pack `source_dir` into an archive at `destination`.
///
/// The archive contains the source directory's entries rooted under
/// `base_name/`. Parent directories of `destination` are created as needed.
/// Fails with [`AirliftError::Packaging`] if the source directory is missing
/// or the destination cannot be written.
pub fn pack(
    format: ArchiveFormat,
    source_dir: &Path,
    base_name: &str,
    destination: &Path,
) -> Result<(), AirliftError> {
    if !source_dir.is_dir() {
        return Err(AirliftError::Packaging {
            message: format!("source directory `{}` not found", source_dir.display()),
            source: None,
        });
    }

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AirliftError::packaging(
                format!("cannot create archive directory `{}`", parent.display()),
                e,
            )
        })?;
    }

    let file = File::create(destination).map_err(|e| {
        AirliftError::packaging(format!("cannot write archive `{}`", destination.display()), e)
    })?;

    debug!(
        source = %source_dir.display(),
        destination = %destination.display(),
        %format,
        "packing archive"
    );

    let pack_error = |e: std::io::Error| {
        AirliftError::packaging(
            format!(
                "failed to pack `{}` into `{}`",
                source_dir.display(),
                destination.display()
            ),
            e,
        )
    };

    match format {
        ArchiveFormat::Tar => {
            let mut builder = tar::Builder::new(file);
            builder
                .append_dir_all(base_name, source_dir)
                .map_err(pack_error)?;
            let mut inner = builder.into_inner().map_err(pack_error)?;
            inner.flush().map_err(pack_error)?;
        }
        ArchiveFormat::TarGz => {
            let encoder = GzEncoder::new(file, Compression::best());
            let mut builder = tar::Builder::new(encoder);
            builder
                .append_dir_all(base_name, source_dir)
                .map_err(pack_error)?;
            // into_inner finishes the tar stream; finish writes the gzip trailer.
            let encoder = builder.into_inner().map_err(pack_error)?;
            encoder.finish().map_err(pack_error)?;
        }
    }

    Ok(())
}
