// SPDX-License-Identifier: Apache-2.0
//! Content-addressed asset writer for scn exports.
//!
//! Binary side-files (mesh geometry, materials, textures) are named by a
//! hash of their own bytes and written at most once per export output tree:
//! many entities referencing the same content share one file on disk and
//! identical path strings in the document.
//!
//! # Hash Domain Policy
//!
//! The hash is content-only: two payloads with identical bytes get the same
//! [`AssetHash`] regardless of asset kind — deduplication across kinds is
//! harmless because the extension still separates the filenames. 128 bits
//! of BLAKE3 output is the pinned digest width: content identity at
//! scene-asset corpus scale, not cryptographic security.
//!
//! # At-Most-Once Write Policy
//!
//! If the target file already exists it is assumed byte-identical — no
//! overwrite, no re-hash verification. This is an explicit policy choice,
//! not a full verified content-addressed store.

use std::fs;
use std::path::{Path, PathBuf};

/// A 128-bit content digest: the first 16 bytes of the BLAKE3 hash.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AssetHash(pub [u8; 16]);

impl AssetHash {
    /// View the digest as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Display for AssetHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Compute the content digest of `bytes`.
pub fn asset_hash(bytes: &[u8]) -> AssetHash {
    let hash = blake3::hash(bytes);
    let mut digest = [0u8; 16];
    digest.copy_from_slice(&hash.as_bytes()[..16]);
    AssetHash(digest)
}

/// Errors that can occur while storing an asset.
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// Creating the asset subfolder failed.
    #[error("could not create asset folder {path}: {source}")]
    CreateDir {
        /// The folder that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the asset file failed.
    #[error("could not write asset {path}: {source}")]
    Write {
        /// The file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Disk-backed content-addressed asset writer rooted at one export's
/// output directory.
///
/// Asset files land under `output_root/<subfolder>/<hash>.<ext>`; the
/// returned reference paths are rewritten under `path_prefix` because the
/// consuming runtime resolves asset paths against a conventional root
/// rather than relative to the document.
#[derive(Clone, Debug)]
pub struct AssetLibrary {
    output_root: PathBuf,
    path_prefix: String,
}

impl AssetLibrary {
    /// Library writing under `output_root`, rewriting reference paths
    /// under `path_prefix` (forward-slash, no trailing slash; empty for
    /// no rewrite).
    pub fn new(output_root: impl Into<PathBuf>, path_prefix: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            path_prefix: path_prefix.into(),
        }
    }

    /// The directory asset files are written beneath.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Store `payload` as `<subfolder>/<hash>.<extension>` and return the
    /// rewritten reference path for embedding in the document.
    ///
    /// The subfolder is created on demand; creation is idempotent because
    /// several producers may share one folder. If the target file already
    /// exists the write is skipped. Returned paths always use forward
    /// slashes, independent of platform.
    pub fn store(
        &self,
        subfolder: &str,
        extension: &str,
        payload: &[u8],
    ) -> Result<String, CasError> {
        let folder = self.output_root.join(subfolder);
        fs::create_dir_all(&folder).map_err(|source| CasError::CreateDir {
            path: folder.clone(),
            source,
        })?;

        let filename = format!("{}.{extension}", asset_hash(payload));
        let target = folder.join(&filename);
        if target.exists() {
            tracing::trace!(path = %target.display(), "asset already stored, skipping write");
        } else {
            tracing::debug!(path = %target.display(), bytes = payload.len(), "writing asset");
            fs::write(&target, payload).map_err(|source| CasError::Write {
                path: target.clone(),
                source,
            })?;
        }

        Ok(if self.path_prefix.is_empty() {
            format!("{subfolder}/{filename}")
        } else {
            format!("{}/{subfolder}/{filename}", self.path_prefix)
        })
    }
}
