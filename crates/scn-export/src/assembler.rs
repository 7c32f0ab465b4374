// SPDX-License-Identifier: Apache-2.0
//! Entity assembly and document writing.
//!
//! One synchronous pass over the object sequence: object `i` becomes
//! entity `i`, each entity collects its present components in registry
//! order, and the document is rendered and written only after every
//! entity assembled cleanly. A failing component aborts the whole export
//! with no partial document on disk (already-written asset files are
//! content-addressed and reusable, so they are left in place).

use std::fs;
use std::path::Path;

use scn_cas::AssetLibrary;
use scn_scene::Scene;
use scn_value::{TextEncoder, Value};

use crate::component::Registry;
use crate::config::{EntitySchema, ExportConfig};
use crate::context::ExportContext;
use crate::error::ExportError;

/// Counts reported after a successful export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportStats {
    /// Entities written to the document.
    pub entities: usize,
    /// Component values across all entities.
    pub components: usize,
}

fn entity_value(schema: EntitySchema, id: usize, components: Vec<Value>) -> Value {
    let id = Value::Int(id as i64);
    match schema {
        EntitySchema::Named => Value::structure([
            ("entity", id),
            ("components", Value::List(components)),
        ]),
        EntitySchema::Flat => Value::tuple([id, Value::List(components)]),
    }
}

/// Export `scene` as configured, returning entity/component counts.
pub fn export_scene(
    scene: &Scene,
    registry: &Registry,
    config: &ExportConfig,
) -> Result<ExportStats, ExportError> {
    let mut scene = scene.clone();
    if config.make_duplicates_real {
        scene.realize_instances()?;
    }

    let output_root = config
        .output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(output_root).map_err(|source| ExportError::Io {
        path: output_root.to_path_buf(),
        source,
    })?;

    let assets = AssetLibrary::new(output_root, config.asset_path_prefix.clone());
    let encoder = TextEncoder::with_indent_unit(config.indent_unit.clone());
    let ctx = ExportContext {
        config,
        scene: &scene,
        assets: &assets,
        encoder: &encoder,
    };

    tracing::info!(
        objects = scene.objects.len(),
        components = registry.len(),
        output = %config.output_path.display(),
        "export started"
    );

    let mut entities = Vec::with_capacity(scene.objects.len());
    let mut component_count = 0usize;
    for (entity_id, obj) in scene.objects.iter().enumerate() {
        let mut components = Vec::new();
        for component in registry.iter() {
            if component.is_present(obj) {
                components.push(component.encode(&ctx, obj)?);
            }
        }
        tracing::debug!(
            entity = entity_id,
            object = %obj.name,
            components = components.len(),
            "assembled entity"
        );
        component_count += components.len();
        entities.push(entity_value(config.entity_schema, entity_id, components));
    }

    let document = encoder.render(&Value::List(entities));
    fs::write(&config.output_path, document).map_err(|source| ExportError::Io {
        path: config.output_path.clone(),
        source,
    })?;

    let stats = ExportStats {
        entities: scene.objects.len(),
        components: component_count,
    };
    tracing::info!(
        entities = stats.entities,
        components = stats.components,
        "export finished"
    );
    Ok(stats)
}
