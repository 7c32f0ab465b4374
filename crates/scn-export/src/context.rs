// SPDX-License-Identifier: Apache-2.0
//! The export-wide context handed to every component encoder.

use scn_cas::AssetLibrary;
use scn_scene::Scene;
use scn_value::TextEncoder;

use crate::config::ExportConfig;
use crate::error::ExportError;

/// Immutable view of one export run, constructed fresh per run.
///
/// Component encoders receive this instead of reaching for any shared
/// state: the scene (for cross-object references like parent ids), the
/// configuration, the asset writer and the document text encoder.
pub struct ExportContext<'a> {
    /// The run's configuration.
    pub config: &'a ExportConfig,
    /// The scene being exported, after instance realization.
    pub scene: &'a Scene,
    /// Content-addressed writer for binary side-files.
    pub assets: &'a AssetLibrary,
    /// Text encoder used for the document and for RON asset payloads.
    pub encoder: &'a TextEncoder,
}

impl ExportContext<'_> {
    /// Entity id of the object named `name`.
    ///
    /// Entity ids are positions in the object sequence; the assignment is
    /// fixed for the whole run.
    pub fn entity_id(&self, name: &str) -> Option<usize> {
        self.scene.object_index(name)
    }

    /// Entity id of `object`'s parent, or `MissingParent` if the referenced
    /// object is not in the scene.
    pub fn parent_id(&self, object_name: &str, parent_name: &str) -> Result<usize, ExportError> {
        self.entity_id(parent_name)
            .ok_or_else(|| ExportError::MissingParent {
                object: object_name.to_owned(),
                parent: parent_name.to_owned(),
            })
    }
}
