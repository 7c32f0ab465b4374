// SPDX-License-Identifier: Apache-2.0
//! Per-run export configuration.

use std::path::PathBuf;

/// Shape of each entity entry in the document.
///
/// Two schema revisions exist in the wild; which one a given runtime reads
/// is a deployment fact, so the choice is pinned per export run rather
/// than inferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntitySchema {
    /// `(entity: 0, components: [...])`
    #[default]
    Named,
    /// `(0, [...])`
    Flat,
}

/// Everything an export run is parameterized on.
///
/// Constructed once, treated as immutable for the duration of the run.
#[derive(Clone, Debug)]
pub struct ExportConfig {
    /// Where the scene document is written.
    pub output_path: PathBuf,
    /// Subfolder (under the document's directory) for mesh assets.
    pub mesh_folder: String,
    /// Subfolder for material assets.
    pub material_folder: String,
    /// Subfolder for texture assets.
    pub texture_folder: String,
    /// Prefix rewritten onto asset reference paths; the consuming runtime
    /// resolves them under this conventional root.
    pub asset_path_prefix: String,
    /// Expand instanced duplicates into real objects before export.
    pub make_duplicates_real: bool,
    /// Entity entry shape.
    pub entity_schema: EntitySchema,
    /// Document indent unit; empty collapses the document to one line.
    pub indent_unit: String,
}

impl ExportConfig {
    /// Configuration with the conventional folder layout, writing the
    /// document to `output_path`.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            mesh_folder: "meshes".to_owned(),
            material_folder: "materials".to_owned(),
            texture_folder: "textures".to_owned(),
            asset_path_prefix: "scenes".to_owned(),
            make_duplicates_real: true,
            entity_schema: EntitySchema::default(),
            indent_unit: "\t".to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_conventions() {
        let config = ExportConfig::new("out/scene.scn");
        assert_eq!(config.mesh_folder, "meshes");
        assert_eq!(config.asset_path_prefix, "scenes");
        assert_eq!(config.entity_schema, EntitySchema::Named);
        assert!(config.make_duplicates_real);
        assert_eq!(config.indent_unit, "\t");
    }
}
