// SPDX-License-Identifier: Apache-2.0
//! Schema-driven components declared in JSON descriptor files.
//!
//! A descriptor gives a component a name, an engine type path and a flat
//! list of primitive fields. That is enough to encode it without writing
//! any code, which covers the long tail of small gameplay components
//! ("a couple of twiddleable numbers, bools and vecs").
//!
//! Discovery is a pure function over a directory; the result feeds the
//! registry manifest before the export pass starts.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use scn_scene::{FieldValue, SceneObject};
use scn_value::{reflect, Value};

use crate::component::{component_value, Component};
use crate::context::ExportContext;
use crate::error::ExportError;

/// Primitive field types a descriptor may declare.
///
/// Each kind has exactly one encoder; adding a kind here without extending
/// [`encode_field`] is caught at registration time by the exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain string, rendered quoted.
    String,
    /// Reflected bool.
    Bool,
    /// Reflected f32.
    F32,
    /// Reflected f64.
    F64,
    /// Bare integer.
    Int,
    /// Reflected two-component vector.
    Vec2,
    /// Reflected three-component vector.
    Vec3,
    /// Reflected three-component bool vector.
    BoolVec3,
    /// Enumeration index, rendered as a bare integer.
    U8enum,
}

/// One declared field of a schema-driven component.
#[derive(Clone, Debug, Deserialize)]
pub struct FieldDef {
    /// Field name, as it appears in the exported struct.
    pub field: String,
    /// Field type.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Authoring-side default value; carried for the authoring UI, not
    /// consulted during encoding.
    #[serde(default)]
    pub default: serde_json::Value,
    /// Human-readable description for the authoring UI.
    #[serde(default)]
    pub description: String,
}

/// A JSON-declared component schema.
#[derive(Clone, Debug, Deserialize)]
pub struct ComponentDescriptor {
    /// Component name, unique across the registry.
    pub name: String,
    /// Human-readable description for the authoring UI.
    #[serde(default)]
    pub description: String,
    /// Stable identifier; objects key their field values on this.
    pub id: String,
    /// Fully-qualified engine type path of the target struct.
    #[serde(rename = "struct")]
    pub type_path: String,
    /// Declared fields, in exported order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Load every `*.json` descriptor under `dir`, in filename order.
///
/// Filename order keeps the manifest deterministic across filesystems;
/// the registry re-sorts by component name anyway. A malformed file is a
/// `Schema` error naming the file.
pub fn descriptors_from_dir(dir: &Path) -> Result<Vec<ComponentDescriptor>, ExportError> {
    let entries = fs::read_dir(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut descriptors = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        let descriptor: ComponentDescriptor =
            serde_json::from_str(&text).map_err(|err| ExportError::Schema {
                detail: format!("{}: {err}", path.display()),
            })?;
        tracing::debug!(
            component = %descriptor.name,
            path = %path.display(),
            "loaded component descriptor"
        );
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

fn encode_field(kind: FieldKind, value: &FieldValue) -> Option<Value> {
    match (kind, value) {
        (FieldKind::String, FieldValue::String(s)) => Some(Value::from(s.as_str())),
        (FieldKind::Bool, FieldValue::Bool(b)) => Some(reflect::bool_value(*b)),
        (FieldKind::F32, FieldValue::F32(f)) => Some(reflect::f32_value(*f)),
        (FieldKind::F64, FieldValue::F64(f)) => Some(reflect::f64_value(*f)),
        (FieldKind::Int, FieldValue::Int(i)) => Some(Value::Int(*i)),
        (FieldKind::Vec2, FieldValue::Vec2(v)) => Some(reflect::vec2(*v)),
        (FieldKind::Vec3, FieldValue::Vec3(v)) => Some(reflect::vec3(*v)),
        (FieldKind::BoolVec3, FieldValue::BoolVec3(v)) => Some(reflect::bool_vec3(*v)),
        (FieldKind::U8enum, FieldValue::U8Enum(i)) => Some(Value::Int(i64::from(*i))),
        _ => None,
    }
}

/// A component whose behavior is entirely determined by its descriptor.
pub struct SchemaComponent {
    descriptor: ComponentDescriptor,
}

impl SchemaComponent {
    /// Wrap a descriptor as a registrable component.
    pub fn new(descriptor: ComponentDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Component for SchemaComponent {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.custom
            .get(&self.descriptor.id)
            .is_some_and(|c| c.present)
    }

    fn can_add(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let data = obj
            .custom
            .get(&self.descriptor.id)
            .ok_or_else(|| ExportError::Unsupported {
                object: obj.name.clone(),
                detail: format!("no data for component {:?}", self.descriptor.name),
            })?;

        let mut fields = Vec::with_capacity(self.descriptor.fields.len());
        for def in &self.descriptor.fields {
            let value = data
                .fields
                .get(&def.field)
                .ok_or_else(|| ExportError::Unsupported {
                    object: obj.name.clone(),
                    detail: format!(
                        "component {:?} is missing field {:?}",
                        self.descriptor.name, def.field
                    ),
                })?;
            let encoded = encode_field(def.kind, value).ok_or_else(|| ExportError::Unsupported {
                object: obj.name.clone(),
                detail: format!(
                    "component {:?} field {:?} does not hold a {:?} value",
                    self.descriptor.name, def.field, def.kind
                ),
            })?;
            fields.push((Value::from(def.field.as_str()), encoded));
        }

        Ok(component_value(
            &self.descriptor.type_path,
            "struct",
            Value::map(fields),
        ))
    }
}
