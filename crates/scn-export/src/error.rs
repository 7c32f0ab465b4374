// SPDX-License-Identifier: Apache-2.0
//! Export error taxonomy.
//!
//! Every failure surfaces synchronously through [`ExportError`]; there are
//! no retries and no partially-written documents. Asset files already
//! stored before a failure are harmless leftovers (content-addressed, so a
//! rerun reuses them).

use std::path::PathBuf;

use scn_cas::CasError;
use scn_mesh_codec::MeshCodecError;
use scn_scene::SceneError;

/// Anything that can abort a scene export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A component descriptor could not be loaded or is malformed.
    #[error("component schema error: {detail}")]
    Schema {
        /// What was wrong with the schema.
        detail: String,
    },
    /// Two registered components share a name.
    #[error("duplicate component name {name:?}")]
    DuplicateComponent {
        /// The contested component name.
        name: String,
    },
    /// An object carries data no encoder can represent.
    #[error("object {object:?}: {detail}")]
    Unsupported {
        /// Name of the offending object.
        object: String,
        /// What could not be encoded.
        detail: String,
    },
    /// An object names a parent that is not in the scene.
    #[error("object {object:?} references missing parent {parent:?}")]
    MissingParent {
        /// Name of the child object.
        object: String,
        /// The unresolved parent name.
        parent: String,
    },
    /// Mesh geometry could not be encoded.
    #[error(transparent)]
    Mesh(#[from] MeshCodecError),
    /// An asset file could not be stored.
    #[error(transparent)]
    Cas(#[from] CasError),
    /// Scene preparation failed.
    #[error(transparent)]
    Scene(#[from] SceneError),
    /// Reading or writing a non-asset file failed.
    #[error("io error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
