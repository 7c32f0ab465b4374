// SPDX-License-Identifier: Apache-2.0
//! Evaluated mesh geometry as the authoring host hands it over.
//!
//! Faces are polygons (triangles, quads, or n-gons) with per-corner
//! attributes — the host evaluates modifiers and splits normals/tangents
//! before export, so every corner already carries its final values.
//! Triangulation and vertex deduplication happen in `scn-mesh-codec`.

use serde::{Deserialize, Serialize};

/// Polygon soup for one mesh object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Faces in host iteration order. Order is part of the contract:
    /// vertex dedup streams over faces in this order, so a stable face
    /// order is required for reproducible content hashes.
    pub faces: Vec<Face>,
}

/// One polygon face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Corners in winding order. Three or more.
    pub corners: Vec<Corner>,
}

/// Per-corner (loop) vertex attributes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Vertex position.
    pub position: [f32; 3],
    /// Split normal.
    pub normal: [f32; 3],
    /// Tangent vector. The codec widens this to a vec4 with `w = 0.0`.
    #[serde(default)]
    pub tangent: [f32; 3],
    /// First UV channel, if the mesh has one. Missing UVs encode as `(0,0)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<[f32; 2]>,
}
