// SPDX-License-Identifier: Apache-2.0
//! Authoring-host scene data model consumed by the scn exporter.
//!
//! The exporter core never talks to an authoring tool directly. Instead the
//! host (a Blender add-on, a test, the CLI's JSON loader) materializes its
//! scene graph into these plain data types: objects in a stable order, each
//! carrying decomposed transforms, an optional parent reference, and the
//! type-specific payloads (mesh geometry, light/camera parameters, material
//! parameters, schema-driven custom component fields) the component encoders
//! query.
//!
//! # Ordering Invariant
//!
//! `Scene::objects` order IS the entity-id assignment: object `i` becomes
//! entity `i` in the exported document, and relational components (parents)
//! resolve against that same order. Hosts must emit objects in a stable
//! order for reproducible exports.
//!
//! All types are serde-serializable; JSON is the interchange form used by
//! `scn-cli` and the test suites.

mod material;
mod mesh;
mod types;

pub use material::{AlphaMode, MaterialData, PrincipledMaterial, TextureRef};
pub use mesh::{Corner, Face, MeshData};
pub use types::{
    CameraData, ColliderData, ColliderShape, CustomComponent, Decomposed, FieldValue, Instance,
    LightData, ObjectKind, OrthoProjection, Scene, SceneError, SceneObject,
};
