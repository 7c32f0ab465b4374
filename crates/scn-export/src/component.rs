// SPDX-License-Identifier: Apache-2.0
//! The component encoding contract and the per-run registry.

use scn_scene::SceneObject;
use scn_value::Value;

use crate::context::ExportContext;
use crate::error::ExportError;

/// One kind of typed data an entity can carry in the exported document.
///
/// Implementations are pure with respect to `(ctx, obj)`: encoding the
/// same object twice in the same run must yield byte-identical output.
/// Writing a content-addressed asset file is the one sanctioned side
/// effect, and it is idempotent by construction.
pub trait Component {
    /// Stable component name; registry order is the lexicographic order of
    /// these names.
    fn name(&self) -> &str;

    /// Whether `obj` carries this component.
    fn is_present(&self, obj: &SceneObject) -> bool;

    /// Whether an authoring UI may attach this component to `obj`.
    /// Builtins derive their presence from object data and are not
    /// user-attachable.
    fn can_add(&self, _obj: &SceneObject) -> bool {
        false
    }

    /// Encode `obj`'s instance of this component as a document value.
    fn encode(&self, ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError>;
}

/// Helper for the conventional component shape: a map tagging an engine
/// type path with one body entry (`"struct"`, `"tuple_struct"`, ...).
pub(crate) fn component_value(type_path: &str, body_key: &str, body: Value) -> Value {
    Value::map([
        (Value::from("type"), Value::from(type_path)),
        (Value::from(body_key), body),
    ])
}

/// Immutable, name-ordered snapshot of the components active for one run.
///
/// Built once before the export pass; there is no global registration
/// state, so two concurrent runs with different manifests cannot observe
/// each other.
pub struct Registry {
    components: Vec<Box<dyn Component>>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Registry {
    /// Build a registry from a manifest of components.
    ///
    /// Components are sorted by name to give every run the same encoding
    /// order regardless of manifest order; duplicate names are rejected.
    pub fn new(mut components: Vec<Box<dyn Component>>) -> Result<Self, ExportError> {
        components.sort_by(|a, b| a.name().cmp(b.name()));
        for pair in components.windows(2) {
            if pair[0].name() == pair[1].name() {
                return Err(ExportError::DuplicateComponent {
                    name: pair[0].name().to_owned(),
                });
            }
        }
        Ok(Self { components })
    }

    /// Components in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(AsRef::as_ref)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
