// SPDX-License-Identifier: Apache-2.0
//! Core scene types: objects, transforms, lights, cameras, custom fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::material::MaterialData;
use crate::mesh::MeshData;

/// Errors raised while preparing a scene for export.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// An instance references a template object that is not in the scene.
    #[error("instance {instance:?} references unknown template {template:?}")]
    UnknownTemplate {
        /// Name of the instance that failed to resolve.
        instance: String,
        /// The missing template object name.
        template: String,
    },
}

/// A whole authoring scene: the ordered object sequence plus any
/// not-yet-realized instances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Objects in entity-id order.
    pub objects: Vec<SceneObject>,
    /// Instanced duplicates, realized on demand (see
    /// [`Scene::realize_instances`]).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<Instance>,
}

impl Scene {
    /// Position of the object named `name` in the object sequence, which is
    /// also its entity id in the exported document.
    pub fn object_index(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    /// Expand instanced duplicates into real objects.
    ///
    /// Each instance clones its template object, takes the instance's name
    /// and world transform, and is appended to the object sequence in
    /// instance-declaration order (so entity ids stay stable for a given
    /// scene file). Realized objects are detached from any parent.
    pub fn realize_instances(&mut self) -> Result<(), SceneError> {
        let instances = std::mem::take(&mut self.instances);
        for instance in instances {
            let Some(index) = self.object_index(&instance.template) else {
                return Err(SceneError::UnknownTemplate {
                    instance: instance.name,
                    template: instance.template,
                });
            };
            let mut object = self.objects[index].clone();
            object.name = instance.name;
            object.transform = instance.transform;
            object.local_transform = None;
            object.parent = None;
            self.objects.push(object);
        }
        Ok(())
    }
}

/// A duplicate of a template object placed at its own transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Name the realized object will take.
    pub name: String,
    /// Name of the object to clone.
    pub template: String,
    /// World transform of the realized object.
    pub transform: Decomposed,
}

/// Broad classification of an authoring object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Carries mesh geometry (and usually a material).
    Mesh,
    /// A light source; see [`LightData`].
    Light,
    /// A camera; see [`CameraData`].
    Camera,
    /// A transform-only object (grouping, collider volumes).
    Empty,
}

/// A decomposed affine transform: translation, rotation quaternion (xyzw),
/// scale. Hosts decompose matrices before handing the scene to the core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decomposed {
    /// Translation vector.
    pub translation: [f32; 3],
    /// Rotation quaternion, `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Per-axis scale.
    pub scale: [f32; 3],
}

impl Default for Decomposed {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

/// One authoring object: identity, transforms, and the typed payloads the
/// component encoders inspect. All payloads are optional; `is_present`
/// predicates decide which components an object yields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name, unique within the scene. Parent references resolve by
    /// name against the object sequence.
    pub name: String,
    /// Broad object classification.
    pub kind: ObjectKind,
    /// World transform.
    #[serde(default)]
    pub transform: Decomposed,
    /// Parent-relative transform; consulted instead of the world transform
    /// when `parent` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_transform: Option<Decomposed>,
    /// Name of the parent object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Whether the object is hidden from rendering.
    #[serde(default)]
    pub hidden: bool,
    /// Mesh geometry, present on mesh objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshData>,
    /// Light parameters, present on light objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightData>,
    /// Camera parameters, present on camera objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraData>,
    /// Shading parameters for mesh objects. A mesh object without one gets
    /// the default magenta unlit material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialData>,
    /// Physics collider description, if the user attached one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<ColliderData>,
    /// Field values for schema-driven components, keyed by descriptor id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, CustomComponent>,
}

/// Light-source parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightData {
    /// Omnidirectional point light.
    Point {
        /// Linear RGB color.
        color: [f32; 3],
        /// Luminous intensity.
        intensity: f32,
        /// Cutoff distance.
        range: f32,
        /// Physical emitter radius.
        radius: f32,
        /// Whether this light casts shadows.
        shadows_enabled: bool,
        /// Shadow map depth bias.
        shadow_depth_bias: f32,
        /// Shadow map normal bias.
        shadow_normal_bias: f32,
    },
    /// Sun-style directional light with an orthographic shadow projection.
    Directional {
        /// Linear RGB color.
        color: [f32; 3],
        /// Illuminance in lux.
        illuminance: f32,
        /// Whether this light casts shadows.
        shadows_enabled: bool,
        /// Shadow map depth bias.
        shadow_depth_bias: f32,
        /// Shadow map normal bias.
        shadow_normal_bias: f32,
        /// Shadow-casting volume.
        #[serde(default)]
        projection: OrthoProjection,
    },
}

/// Orthographic projection volume for directional-light shadows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthoProjection {
    /// Left clipping plane.
    pub left: f32,
    /// Right clipping plane.
    pub right: f32,
    /// Bottom clipping plane.
    pub bottom: f32,
    /// Top clipping plane.
    pub top: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection scale.
    pub scale: f32,
}

impl Default for OrthoProjection {
    fn default() -> Self {
        Self {
            left: -10.0,
            right: 10.0,
            bottom: -10.0,
            top: 10.0,
            near: -50.0,
            far: 50.0,
            scale: 20.0,
        }
    }
}

/// Camera parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraData {
    /// Near clipping distance.
    pub near: f32,
    /// Far clipping distance.
    pub far: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Physics collider description attached to an object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColliderData {
    /// Collider shape and its dimensions.
    pub shape: ColliderShape,
    /// Surface friction coefficient.
    #[serde(default)]
    pub friction: f32,
    /// Bounciness coefficient.
    #[serde(default)]
    pub restitution: f32,
    /// Sensor colliders detect overlap without resolving contacts.
    #[serde(default)]
    pub is_sensor: bool,
    /// Offset from the object origin to the collider volume's center.
    #[serde(default)]
    pub centroid: [f32; 3],
    /// Mass density.
    #[serde(default = "default_density")]
    pub density: f32,
}

fn default_density() -> f32 {
    0.5
}

/// Collider shape variants.
///
/// The discriminant order is part of the on-disk format (the shape index is
/// exported as a bare integer); append new shapes, never reorder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderShape {
    /// Sphere collider.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Capsule collider aligned to the local Z axis.
    Capsule {
        /// Half the cylindrical segment height.
        half_height: f32,
        /// Capsule radius.
        radius: f32,
    },
    /// Axis-aligned box collider.
    Box {
        /// Half the box extent along each local axis.
        half_extents: [f32; 3],
    },
}

impl ColliderShape {
    /// Stable shape index exported alongside the packed shape parameters.
    pub fn index(&self) -> i64 {
        match self {
            ColliderShape::Sphere { .. } => 0,
            ColliderShape::Capsule { .. } => 1,
            ColliderShape::Box { .. } => 2,
        }
    }

    /// Little-endian packed shape parameters, as the runtime's collider
    /// builder consumes them.
    pub fn packed_data(&self) -> Vec<u8> {
        match self {
            ColliderShape::Sphere { radius } => radius.to_le_bytes().to_vec(),
            ColliderShape::Capsule {
                half_height,
                radius,
            } => {
                let mut data = Vec::with_capacity(8);
                data.extend_from_slice(&half_height.to_le_bytes());
                data.extend_from_slice(&radius.to_le_bytes());
                data
            }
            ColliderShape::Box { half_extents } => {
                let mut data = Vec::with_capacity(12);
                for extent in half_extents {
                    data.extend_from_slice(&extent.to_le_bytes());
                }
                data
            }
        }
    }
}

/// Per-object data for one schema-driven component.
///
/// Listing a component under `SceneObject::custom` means "attached" unless
/// `present` is explicitly false (the authoring UI's remove toggle).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomComponent {
    /// Whether the component is attached to the object. Mirrors the
    /// authoring UI's add/remove toggle.
    #[serde(default = "default_present")]
    pub present: bool,
    /// Declared field values, keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

fn default_present() -> bool {
    true
}

impl Default for CustomComponent {
    fn default() -> Self {
        Self {
            present: true,
            fields: BTreeMap::new(),
        }
    }
}

/// A primitive field value for schema-driven components.
///
/// The variant set mirrors the descriptor field-type table; an encoder
/// exists for exactly these kinds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// UTF-8 string.
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Integer.
    Int(i64),
    /// Two-component float vector.
    Vec2([f32; 2]),
    /// Three-component float vector.
    Vec3([f32; 3]),
    /// Three-component boolean vector.
    BoolVec3([bool; 3]),
    /// Index into a descriptor-declared enumeration.
    #[serde(rename = "u8enum")]
    U8Enum(u8),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn object(name: &str) -> SceneObject {
        SceneObject {
            name: name.to_owned(),
            kind: ObjectKind::Empty,
            transform: Decomposed::default(),
            local_transform: None,
            parent: None,
            hidden: false,
            mesh: None,
            light: None,
            camera: None,
            material: None,
            collider: None,
            custom: BTreeMap::new(),
        }
    }

    // ── 1. object_index follows sequence order ──────────────────────────

    #[test]
    fn object_index_is_sequence_position() {
        let scene = Scene {
            objects: vec![object("a"), object("b")],
            instances: vec![],
        };
        assert_eq!(scene.object_index("a"), Some(0));
        assert_eq!(scene.object_index("b"), Some(1));
        assert_eq!(scene.object_index("missing"), None);
    }

    // ── 2. realize_instances appends in declaration order ───────────────

    #[test]
    fn realize_instances_appends_clones() {
        let mut scene = Scene {
            objects: vec![object("template")],
            instances: vec![
                Instance {
                    name: "copy_1".into(),
                    template: "template".into(),
                    transform: Decomposed::default(),
                },
                Instance {
                    name: "copy_2".into(),
                    template: "template".into(),
                    transform: Decomposed::default(),
                },
            ],
        };
        scene.realize_instances().unwrap();
        assert!(scene.instances.is_empty());
        assert_eq!(scene.object_index("copy_1"), Some(1));
        assert_eq!(scene.object_index("copy_2"), Some(2));
    }

    #[test]
    fn realize_instances_rejects_unknown_template() {
        let mut scene = Scene {
            objects: vec![],
            instances: vec![Instance {
                name: "copy".into(),
                template: "ghost".into(),
                transform: Decomposed::default(),
            }],
        };
        let err = scene.realize_instances().unwrap_err();
        assert_eq!(
            err,
            SceneError::UnknownTemplate {
                instance: "copy".into(),
                template: "ghost".into(),
            }
        );
    }

    // ── 3. serde round-trip through JSON ────────────────────────────────

    #[test]
    fn scene_json_round_trip() {
        let mut obj = object("lamp");
        obj.kind = ObjectKind::Light;
        obj.light = Some(LightData::Point {
            color: [1.0, 0.9, 0.8],
            intensity: 800.0,
            range: 20.0,
            radius: 0.0,
            shadows_enabled: true,
            shadow_depth_bias: 0.02,
            shadow_normal_bias: 0.6,
        });
        let scene = Scene {
            objects: vec![obj],
            instances: vec![],
        };
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }

    // ── 4. collider shape packing ───────────────────────────────────────

    #[test]
    fn collider_shape_packing() {
        let sphere = ColliderShape::Sphere { radius: 2.0 };
        assert_eq!(sphere.index(), 0);
        assert_eq!(sphere.packed_data(), 2.0_f32.to_le_bytes().to_vec());

        let capsule = ColliderShape::Capsule {
            half_height: 1.5,
            radius: 0.5,
        };
        assert_eq!(capsule.index(), 1);
        let mut expected = 1.5_f32.to_le_bytes().to_vec();
        expected.extend_from_slice(&0.5_f32.to_le_bytes());
        assert_eq!(capsule.packed_data(), expected);

        let cuboid = ColliderShape::Box {
            half_extents: [1.0, 2.0, 3.0],
        };
        assert_eq!(cuboid.index(), 2);
        let mut expected = 1.0_f32.to_le_bytes().to_vec();
        expected.extend_from_slice(&2.0_f32.to_le_bytes());
        expected.extend_from_slice(&3.0_f32.to_le_bytes());
        assert_eq!(cuboid.packed_data(), expected);
    }

    // ── 5. collider defaults ────────────────────────────────────────────

    #[test]
    fn collider_density_defaults_to_half() {
        let collider: ColliderData =
            serde_json::from_str(r#"{"shape": {"kind": "sphere", "radius": 1.0}}"#).unwrap();
        assert_eq!(collider.density, 0.5);
        assert_eq!(collider.friction, 0.0);
        assert!(!collider.is_sensor);
    }
}
