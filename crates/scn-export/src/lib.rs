// SPDX-License-Identifier: Apache-2.0
//! Scene export pipeline: component encoding, registry, assembly.
//!
//! This crate turns a [`scn_scene::Scene`] into two artifacts: a RON-like
//! text document listing entities and their typed component values, and a
//! set of content-addressed binary side-files (meshes, materials,
//! textures) the document references by path.
//!
//! The moving parts:
//!
//! - [`Component`] — the encoding contract heterogeneous data producers
//!   implement; [`builtins()`] covers transforms, meshes, materials,
//!   lights, cameras, visibility, labels and colliders.
//! - [`SchemaComponent`] / [`descriptors_from_dir`] — components declared
//!   in JSON schema files, no code required.
//! - [`Registry`] — the immutable, name-ordered component snapshot one
//!   export run encodes with.
//! - [`export_scene`] — the single-pass assembler.
//!
//! # Determinism Invariant
//!
//! For a fixed scene, registry and configuration, an export run is fully
//! reproducible: identical document bytes, identical asset file set.
//! Everything order-dependent (entity ids, component order, struct field
//! order) is derived from explicitly ordered inputs.

mod assembler;
mod builtins;
mod component;
mod config;
mod context;
mod descriptor;
mod error;
mod material;

pub use assembler::{export_scene, ExportStats};
pub use builtins::builtins;
pub use component::{Component, Registry};
pub use config::{EntitySchema, ExportConfig};
pub use context::ExportContext;
pub use descriptor::{
    descriptors_from_dir, ComponentDescriptor, FieldDef, FieldKind, SchemaComponent,
};
pub use error::ExportError;
pub use material::{default_material_payload, encode_material};
