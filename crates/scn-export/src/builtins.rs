// SPDX-License-Identifier: Apache-2.0
//! The builtin component set.
//!
//! These cover the data every authoring host produces (transforms, names,
//! visibility) plus the typed payloads of meshes, materials, lights,
//! cameras and colliders. Presence is derived from object data; none of
//! them are user-attachable, unlike schema-driven components.
//!
//! The engine type paths in here are opaque strings as far as the exporter
//! is concerned; the consuming runtime's reflection deserializer is the
//! one that resolves them.

use scn_scene::{Decomposed, LightData, ObjectKind, SceneObject};
use scn_value::{reflect, Value};

use crate::component::{component_value, Component};
use crate::context::ExportContext;
use crate::error::ExportError;
use crate::material::{default_material_payload, encode_material};

/// Every builtin component, in manifest (pre-sort) order.
pub fn builtins() -> Vec<Box<dyn Component>> {
    vec![
        Box::new(Transform),
        Box::new(GlobalTransform),
        Box::new(Parent),
        Box::new(Label),
        Box::new(Mesh),
        Box::new(Material),
        Box::new(PointLight),
        Box::new(DirectionalLight),
        Box::new(Camera),
        Box::new(Visibility),
        Box::new(ComputedVisibility),
        Box::new(ColliderDescription),
    ]
}

fn body<'a, I>(entries: I) -> Value
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    Value::map(entries.into_iter().map(|(k, v)| (Value::from(k), v)))
}

fn transform_body(t: &Decomposed) -> Value {
    body([
        ("translation", reflect::vec3(t.translation)),
        ("rotation", reflect::quat(t.rotation)),
        ("scale", reflect::vec3(t.scale)),
    ])
}

/// Parent-relative transform (world transform for unparented objects).
struct Transform;

impl Component for Transform {
    fn name(&self) -> &str {
        "Transform"
    }

    fn is_present(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        // The runtime composes child transforms with their parent; only
        // root objects carry their world transform here.
        let t = if obj.parent.is_some() {
            obj.local_transform.as_ref().unwrap_or(&obj.transform)
        } else {
            &obj.transform
        };
        Ok(component_value(
            "bevy_transform::components::transform::Transform",
            "struct",
            transform_body(t),
        ))
    }
}

/// World-space transform, always.
struct GlobalTransform;

impl Component for GlobalTransform {
    fn name(&self) -> &str {
        "GlobalTransform"
    }

    fn is_present(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        Ok(component_value(
            "bevy_transform::components::global_transform::GlobalTransform",
            "struct",
            transform_body(&obj.transform),
        ))
    }
}

/// Cross-reference to the parent object's entity id.
struct Parent;

impl Component for Parent {
    fn name(&self) -> &str {
        "Parent"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.parent.is_some()
    }

    fn encode(&self, ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(parent_name) = obj.parent.as_deref() else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "Parent encoded for an unparented object".to_owned(),
            });
        };
        let parent_id = ctx.parent_id(&obj.name, parent_name)?;
        Ok(component_value(
            "bevy_transform::components::parent::Parent",
            "tuple_struct",
            Value::list([reflect::entity_ref(parent_id)]),
        ))
    }
}

/// The object's name, for picking entities out of a loaded scene.
struct Label;

impl Component for Label {
    fn name(&self) -> &str {
        "Label"
    }

    fn is_present(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        Ok(component_value(
            "blender_bevy_toolkit::blend_label::BlendLabel",
            "struct",
            body([("name", Value::from(obj.name.as_str()))]),
        ))
    }
}

/// Mesh geometry: encoded, content-addressed, referenced by path.
struct Mesh;

impl Component for Mesh {
    fn name(&self) -> &str {
        "Mesh"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.mesh.is_some()
    }

    fn encode(&self, ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(mesh) = obj.mesh.as_ref() else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "Mesh encoded for an object without geometry".to_owned(),
            });
        };
        let payload = scn_mesh_codec::encode(mesh)?;
        let path = ctx
            .assets
            .store(&ctx.config.mesh_folder, "mesh", &payload)?;
        Ok(component_value(
            "blender_bevy_toolkit::blend_mesh::BlendMeshLoader",
            "struct",
            body([("path", Value::from(path))]),
        ))
    }
}

/// Shading parameters: encoded, content-addressed, referenced by path.
///
/// Every mesh object gets one; objects without explicit material data get
/// the magenta unlit default so a missing material is visible, not black.
struct Material;

impl Component for Material {
    fn name(&self) -> &str {
        "Material"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.kind == ObjectKind::Mesh
    }

    fn encode(&self, ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let payload = match obj.material.as_ref() {
            Some(material) => encode_material(
                ctx.assets,
                &ctx.config.texture_folder,
                &obj.name,
                material,
            )?,
            None => default_material_payload(),
        };
        let path = ctx
            .assets
            .store(&ctx.config.material_folder, "material", &payload)?;
        Ok(component_value(
            "blender_bevy_toolkit::blend_material::BlendMaterialLoader",
            "struct",
            body([("path", Value::from(path))]),
        ))
    }
}

/// Omnidirectional light parameters.
struct PointLight;

impl Component for PointLight {
    fn name(&self) -> &str {
        "PointLight"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        matches!(obj.light, Some(LightData::Point { .. }))
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(&LightData::Point {
            color,
            intensity,
            range,
            radius,
            shadows_enabled,
            shadow_depth_bias,
            shadow_normal_bias,
        }) = obj.light.as_ref()
        else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "PointLight encoded for a non-point-light object".to_owned(),
            });
        };
        Ok(component_value(
            "bevy_pbr::light::PointLight",
            "struct",
            body([
                ("color", reflect::rgba_linear(color)),
                ("intensity", reflect::f32_value(intensity)),
                ("range", reflect::f32_value(range)),
                ("radius", reflect::f32_value(radius)),
                ("shadows_enabled", reflect::bool_value(shadows_enabled)),
                ("shadow_depth_bias", reflect::f32_value(shadow_depth_bias)),
                ("shadow_normal_bias", reflect::f32_value(shadow_normal_bias)),
            ]),
        ))
    }
}

/// Sun-style light parameters with an orthographic shadow projection.
struct DirectionalLight;

impl Component for DirectionalLight {
    fn name(&self) -> &str {
        "DirectionalLight"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        matches!(obj.light, Some(LightData::Directional { .. }))
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(&LightData::Directional {
            color,
            illuminance,
            shadows_enabled,
            shadow_depth_bias,
            shadow_normal_bias,
            projection,
        }) = obj.light.as_ref()
        else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "DirectionalLight encoded for a non-directional-light object".to_owned(),
            });
        };
        let shadow_projection = component_value(
            "bevy_render::camera::projection::OrthographicProjection",
            "struct",
            body([
                ("left", reflect::f32_value(projection.left)),
                ("right", reflect::f32_value(projection.right)),
                ("bottom", reflect::f32_value(projection.bottom)),
                ("top", reflect::f32_value(projection.top)),
                ("near", reflect::f32_value(projection.near)),
                ("far", reflect::f32_value(projection.far)),
                (
                    "window_origin",
                    Value::reflected(
                        "bevy_render::camera::projection::WindowOrigin",
                        Value::variant("Center"),
                    ),
                ),
                (
                    "scaling_mode",
                    Value::reflected(
                        "bevy_render::camera::projection::ScalingMode",
                        Value::variant("FixedVertical"),
                    ),
                ),
                ("scale", reflect::f32_value(projection.scale)),
                (
                    "depth_calculation",
                    Value::reflected(
                        "bevy_render::camera::camera::DepthCalculation",
                        Value::variant("Distance"),
                    ),
                ),
            ]),
        );
        Ok(component_value(
            "bevy_pbr::light::DirectionalLight",
            "struct",
            body([
                ("color", reflect::rgba_linear(color)),
                ("illuminance", reflect::f32_value(illuminance)),
                ("shadows_enabled", reflect::bool_value(shadows_enabled)),
                ("shadow_projection", shadow_projection),
                ("shadow_depth_bias", reflect::f32_value(shadow_depth_bias)),
                ("shadow_normal_bias", reflect::f32_value(shadow_normal_bias)),
            ]),
        ))
    }
}

/// Camera clip planes plus the conventional render-target name.
struct Camera;

impl Component for Camera {
    fn name(&self) -> &str {
        "Camera"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.camera.is_some()
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(camera) = obj.camera else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "Camera encoded for a non-camera object".to_owned(),
            });
        };
        Ok(component_value(
            "bevy_render::camera::camera::Camera",
            "struct",
            body([
                ("near", reflect::f32_value(camera.near)),
                ("far", reflect::f32_value(camera.far)),
                (
                    "name",
                    reflect::option(
                        "alloc::string::String",
                        Some(Value::from("camera_3d")),
                    ),
                ),
            ]),
        ))
    }
}

fn visibility_body(obj: &SceneObject) -> Value {
    body([("is_visible", reflect::bool_value(!obj.hidden))])
}

/// Author-controlled render visibility.
struct Visibility;

impl Component for Visibility {
    fn name(&self) -> &str {
        "Visibility"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.kind == ObjectKind::Mesh
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        Ok(component_value(
            "bevy_render::view::visibility::Visibility",
            "struct",
            visibility_body(obj),
        ))
    }
}

/// Seed value for the runtime's computed visibility.
struct ComputedVisibility;

impl Component for ComputedVisibility {
    fn name(&self) -> &str {
        "ComputedVisibility"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.kind == ObjectKind::Mesh
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        Ok(component_value(
            "bevy_render::view::visibility::ComputedVisibility",
            "struct",
            visibility_body(obj),
        ))
    }
}

/// Physics collider parameters plus packed shape data.
struct ColliderDescription;

impl Component for ColliderDescription {
    fn name(&self) -> &str {
        "ColliderDescription"
    }

    fn is_present(&self, obj: &SceneObject) -> bool {
        obj.collider.is_some()
    }

    fn can_add(&self, _obj: &SceneObject) -> bool {
        true
    }

    fn encode(&self, _ctx: &ExportContext<'_>, obj: &SceneObject) -> Result<Value, ExportError> {
        let Some(collider) = obj.collider else {
            return Err(ExportError::Unsupported {
                object: obj.name.clone(),
                detail: "ColliderDescription encoded for an object without one".to_owned(),
            });
        };
        let packed = collider.shape.packed_data();
        let shape_data = Value::map([
            (
                Value::from("type"),
                Value::from(format!("smallvec::SmallVec<[u8; {}]>", packed.len())),
            ),
            (
                Value::from("list"),
                Value::list(packed.into_iter().map(|b| Value::Int(i64::from(b)))),
            ),
        ]);
        Ok(component_value(
            "blender_bevy_toolkit::rapier_physics::ColliderDescription",
            "struct",
            body([
                ("friction", reflect::f32_value(collider.friction)),
                ("restitution", reflect::f32_value(collider.restitution)),
                ("is_sensor", reflect::bool_value(collider.is_sensor)),
                ("centroid_translation", reflect::vec3(collider.centroid)),
                ("density", reflect::f32_value(collider.density)),
                ("collider_shape", Value::Int(collider.shape.index())),
                ("collider_shape_data", shape_data),
            ]),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scn_cas::AssetLibrary;
    use scn_scene::{CameraData, ColliderData, ColliderShape, Scene};
    use scn_value::TextEncoder;
    use std::collections::BTreeMap;

    use crate::config::ExportConfig;

    fn object(name: &str, kind: ObjectKind) -> SceneObject {
        SceneObject {
            name: name.to_owned(),
            kind,
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

    fn render_component(
        component: &dyn Component,
        scene: &Scene,
        obj: &SceneObject,
    ) -> Result<String, ExportError> {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new(dir.path().join("scene.scn"));
        let assets = AssetLibrary::new(dir.path(), "scenes");
        let encoder = TextEncoder::compact();
        let ctx = ExportContext {
            config: &config,
            scene,
            assets: &assets,
            encoder: &encoder,
        };
        component.encode(&ctx, obj).map(|v| encoder.render(&v))
    }

    // ── 1. transforms ───────────────────────────────────────────────────

    #[test]
    fn transform_golden() {
        let obj = object("cube", ObjectKind::Mesh);
        let rendered = render_component(&Transform, &Scene::default(), &obj).unwrap();
        assert_eq!(
            rendered,
            "{\"type\":\"bevy_transform::components::transform::Transform\",\"struct\":{\
             \"translation\":{\"type\":\"glam::vec3::Vec3\",\"value\":(0.0,0.0,0.0)},\
             \"rotation\":{\"type\":\"glam::quat::Quat\",\"value\":(0.0,0.0,0.0,1.0)},\
             \"scale\":{\"type\":\"glam::vec3::Vec3\",\"value\":(1.0,1.0,1.0)}}}"
        );
    }

    #[test]
    fn transform_prefers_local_when_parented() {
        let mut obj = object("wheel", ObjectKind::Mesh);
        obj.parent = Some("car".to_owned());
        obj.transform.translation = [100.0, 0.0, 0.0];
        obj.local_transform = Some(Decomposed {
            translation: [1.0, 0.0, 0.0],
            ..Decomposed::default()
        });
        let scene = Scene {
            objects: vec![object("car", ObjectKind::Empty)],
            instances: vec![],
        };

        let local = render_component(&Transform, &scene, &obj).unwrap();
        assert!(local.contains("\"value\":(1.0,0.0,0.0)"));

        let world = render_component(&GlobalTransform, &scene, &obj).unwrap();
        assert!(world.contains("\"value\":(100.0,0.0,0.0)"));
    }

    // ── 2. parent references ────────────────────────────────────────────

    #[test]
    fn parent_references_entity_id() {
        let scene = Scene {
            objects: vec![
                object("car", ObjectKind::Empty),
                object("wheel", ObjectKind::Mesh),
            ],
            instances: vec![],
        };
        let mut obj = object("wheel", ObjectKind::Mesh);
        obj.parent = Some("car".to_owned());
        let rendered = render_component(&Parent, &scene, &obj).unwrap();
        assert_eq!(
            rendered,
            "{\"type\":\"bevy_transform::components::parent::Parent\",\"tuple_struct\":[\
             {\"type\":\"bevy_ecs::entity::Entity\",\"value\":0}]}"
        );
    }

    #[test]
    fn missing_parent_is_fatal() {
        let mut obj = object("orphan", ObjectKind::Mesh);
        obj.parent = Some("ghost".to_owned());
        let err = render_component(&Parent, &Scene::default(), &obj).unwrap_err();
        assert!(matches!(err, ExportError::MissingParent { .. }));
    }

    // ── 3. simple data components ───────────────────────────────────────

    #[test]
    fn label_golden() {
        let obj = object("lamp", ObjectKind::Light);
        let rendered = render_component(&Label, &Scene::default(), &obj).unwrap();
        assert_eq!(
            rendered,
            "{\"type\":\"blender_bevy_toolkit::blend_label::BlendLabel\",\
             \"struct\":{\"name\":\"lamp\"}}"
        );
    }

    #[test]
    fn camera_golden() {
        let mut obj = object("cam", ObjectKind::Camera);
        obj.camera = Some(CameraData::default());
        let rendered = render_component(&Camera, &Scene::default(), &obj).unwrap();
        assert!(rendered.contains("\"near\":{\"type\":\"f32\",\"value\":0.1}"));
        assert!(rendered.contains("\"far\":{\"type\":\"f32\",\"value\":1000.0}"));
        assert!(rendered.contains(
            "\"name\":{\"type\":\"core::option::Option<alloc::string::String>\",\
             \"value\":Some(\"camera_3d\")}"
        ));
    }

    #[test]
    fn visibility_tracks_hidden_flag() {
        let mut obj = object("cube", ObjectKind::Mesh);
        obj.hidden = true;
        let rendered = render_component(&Visibility, &Scene::default(), &obj).unwrap();
        assert!(rendered.contains("\"is_visible\":{\"type\":\"bool\",\"value\":false}"));
    }

    // ── 4. collider packing ─────────────────────────────────────────────

    #[test]
    fn collider_packs_shape_bytes() {
        let mut obj = object("ball", ObjectKind::Mesh);
        obj.collider = Some(ColliderData {
            shape: ColliderShape::Sphere { radius: 1.0 },
            friction: 0.5,
            restitution: 0.0,
            is_sensor: false,
            centroid: [0.0, 0.0, 0.0],
            density: 1.0,
        });
        let rendered = render_component(&ColliderDescription, &Scene::default(), &obj).unwrap();
        assert!(rendered.contains("\"collider_shape\":0"));
        // 1.0f32 little-endian is [0, 0, 128, 63].
        assert!(rendered.contains(
            "\"collider_shape_data\":{\"type\":\"smallvec::SmallVec<[u8; 4]>\",\
             \"list\":[0,0,128,63]}"
        ));
    }

    #[test]
    fn box_collider_packs_half_extents() {
        let mut obj = object("crate", ObjectKind::Mesh);
        obj.collider = Some(ColliderData {
            shape: ColliderShape::Box {
                half_extents: [0.5, 1.0, 2.0],
            },
            friction: 0.5,
            restitution: 0.0,
            is_sensor: false,
            centroid: [0.0, 0.0, 0.0],
            density: 0.5,
        });
        let rendered = render_component(&ColliderDescription, &Scene::default(), &obj).unwrap();
        assert!(rendered.contains("\"collider_shape\":2"));
        // 0.5, 1.0 and 2.0 as little-endian f32s.
        assert!(rendered.contains(
            "\"collider_shape_data\":{\"type\":\"smallvec::SmallVec<[u8; 12]>\",\
             \"list\":[0,0,0,63,0,0,128,63,0,0,0,64]}"
        ));
    }

    // ── 5. presence predicates ──────────────────────────────────────────

    #[test]
    fn presence_follows_object_data() {
        let mesh_obj = object("cube", ObjectKind::Mesh);
        assert!(Material.is_present(&mesh_obj));
        assert!(Visibility.is_present(&mesh_obj));
        assert!(!Mesh.is_present(&mesh_obj));
        assert!(!Parent.is_present(&mesh_obj));
        assert!(!PointLight.is_present(&mesh_obj));

        let empty = object("anchor", ObjectKind::Empty);
        assert!(Transform.is_present(&empty));
        assert!(Label.is_present(&empty));
        assert!(!Material.is_present(&empty));
    }
}
