// SPDX-License-Identifier: Apache-2.0
//! Vertex deduplication and the little-endian wire format.

use std::collections::HashMap;

use scn_scene::MeshData;

use crate::triangulate::triangulate;

/// Errors from mesh encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum MeshCodecError {
    /// A face has fewer than three corners.
    #[error("face {face} has {corners} corners, need at least 3")]
    DegenerateFace {
        /// Index of the offending face in the input.
        face: usize,
        /// Its corner count.
        corners: usize,
    },
    /// A vertex attribute contains a non-finite float.
    ///
    /// NaN never compares equal to itself, so letting one through would
    /// silently defeat deduplication and destabilize content hashes.
    #[error("face {face} carries a non-finite {attribute} component")]
    NonFiniteAttribute {
        /// Index of the offending face in the input.
        face: usize,
        /// Which attribute held the bad value.
        attribute: &'static str,
    },
    /// Vertex or triangle count exceeds the u16 header fields.
    #[error("mesh has {count} {what}, format limit is 65535")]
    MeshTooLarge {
        /// `"vertices"` or `"triangles"`.
        what: &'static str,
        /// The actual count.
        count: usize,
    },
    /// The byte stream is shorter than its headers claim.
    #[error("mesh data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Byte length the headers imply.
        expected: usize,
        /// Byte length received.
        actual: usize,
    },
}

/// Deduplicated vertex buffers, the in-memory form of the wire format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex tangents; the w handedness component is fixed at 0.0.
    pub tangents: Vec<[f32; 4]>,
    /// Per-vertex UVs; `(0, 0)` when the source had no UV channel.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle corner indices into the vertex buffers.
    pub indices: Vec<[u32; 3]>,
}

impl MeshBuffers {
    /// Number of deduplicated vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// Bit-exact vertex identity for deduplication.
///
/// Keyed on raw float bits rather than float equality: -0.0 and 0.0 are
/// distinct vertices, and the key is hashable without epsilon trouble.
#[derive(PartialEq, Eq, Hash)]
struct VertexKey {
    position: [u32; 3],
    normal: [u32; 3],
    uv: [u32; 2],
    tangent: [u32; 3],
}

fn bits3(v: [f32; 3]) -> [u32; 3] {
    [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()]
}

fn check_finite(
    face: usize,
    attribute: &'static str,
    components: &[f32],
) -> Result<(), MeshCodecError> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(MeshCodecError::NonFiniteAttribute { face, attribute })
    }
}

/// Triangulate and deduplicate `mesh` into vertex buffers.
///
/// Walks faces in declaration order and the triangles of each face in
/// split order; vertices are assigned indices the first time their
/// attribute tuple is seen.
pub fn build_buffers(mesh: &MeshData) -> Result<MeshBuffers, MeshCodecError> {
    let mut buffers = MeshBuffers::default();
    let mut lookup: HashMap<VertexKey, u32> = HashMap::new();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        for tri in triangulate(face_index, face.corners.len())? {
            let mut indices = [0u32; 3];
            for (slot, &corner_index) in tri.iter().enumerate() {
                let corner = &face.corners[corner_index];
                let uv = corner.uv.unwrap_or([0.0, 0.0]);

                check_finite(face_index, "position", &corner.position)?;
                check_finite(face_index, "normal", &corner.normal)?;
                check_finite(face_index, "tangent", &corner.tangent)?;
                check_finite(face_index, "uv", &uv)?;

                let key = VertexKey {
                    position: bits3(corner.position),
                    normal: bits3(corner.normal),
                    uv: [uv[0].to_bits(), uv[1].to_bits()],
                    tangent: bits3(corner.tangent),
                };
                let next = u32::try_from(buffers.positions.len()).unwrap_or(u32::MAX);
                let index = *lookup.entry(key).or_insert_with(|| {
                    buffers.positions.push(corner.position);
                    buffers.normals.push(corner.normal);
                    buffers.tangents.push([
                        corner.tangent[0],
                        corner.tangent[1],
                        corner.tangent[2],
                        0.0,
                    ]);
                    buffers.uvs.push(uv);
                    next
                });
                indices[slot] = index;
            }
            buffers.indices.push(indices);
        }
    }

    Ok(buffers)
}

const MAX_COUNT: usize = u16::MAX as usize;

/// Encode `mesh` into the little-endian wire format.
///
/// Layout, in order: u16 vertex count, u16 triangle count, positions
/// (3 f32 each), normals (3 f32), tangents (4 f32), uvs (2 f32), then
/// triangle indices (3 u32 each). Counts that overflow the u16 headers
/// are an error, never a truncation.
pub fn encode(mesh: &MeshData) -> Result<Vec<u8>, MeshCodecError> {
    let buffers = build_buffers(mesh)?;

    if buffers.vertex_count() > MAX_COUNT {
        return Err(MeshCodecError::MeshTooLarge {
            what: "vertices",
            count: buffers.vertex_count(),
        });
    }
    if buffers.triangle_count() > MAX_COUNT {
        return Err(MeshCodecError::MeshTooLarge {
            what: "triangles",
            count: buffers.triangle_count(),
        });
    }

    let vertex_count = buffers.vertex_count();
    let triangle_count = buffers.triangle_count();
    let mut out =
        Vec::with_capacity(4 + vertex_count * (3 + 3 + 4 + 2) * 4 + triangle_count * 12);

    out.extend_from_slice(&(vertex_count as u16).to_le_bytes());
    out.extend_from_slice(&(triangle_count as u16).to_le_bytes());
    for p in &buffers.positions {
        for c in p {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for n in &buffers.normals {
        for c in n {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for t in &buffers.tangents {
        for c in t {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for uv in &buffers.uvs {
        for c in uv {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for tri in &buffers.indices {
        for i in tri {
            out.extend_from_slice(&i.to_le_bytes());
        }
    }

    Ok(out)
}

/// Decode the wire format back into [`MeshBuffers`].
///
/// Mirror of the runtime-side reader, used by tests and mesh inspection.
pub fn decode(bytes: &[u8]) -> Result<MeshBuffers, MeshCodecError> {
    let header = |range: std::ops::Range<usize>| -> Result<u16, MeshCodecError> {
        let slice = bytes.get(range).ok_or(MeshCodecError::Truncated {
            expected: 4,
            actual: bytes.len(),
        })?;
        let mut buf = [0u8; 2];
        buf.copy_from_slice(slice);
        Ok(u16::from_le_bytes(buf))
    };
    let vertex_count = header(0..2)? as usize;
    let triangle_count = header(2..4)? as usize;

    let expected = 4 + vertex_count * (3 + 3 + 4 + 2) * 4 + triangle_count * 12;
    if bytes.len() < expected {
        return Err(MeshCodecError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let mut cursor = 4usize;
    let mut read_f32 = |bytes: &[u8]| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&bytes[cursor..cursor + 4]);
        cursor += 4;
        f32::from_le_bytes(buf)
    };

    let mut buffers = MeshBuffers::default();
    for _ in 0..vertex_count {
        buffers
            .positions
            .push([read_f32(bytes), read_f32(bytes), read_f32(bytes)]);
    }
    for _ in 0..vertex_count {
        buffers
            .normals
            .push([read_f32(bytes), read_f32(bytes), read_f32(bytes)]);
    }
    for _ in 0..vertex_count {
        buffers.tangents.push([
            read_f32(bytes),
            read_f32(bytes),
            read_f32(bytes),
            read_f32(bytes),
        ]);
    }
    for _ in 0..vertex_count {
        buffers.uvs.push([read_f32(bytes), read_f32(bytes)]);
    }
    drop(read_f32);

    for _ in 0..triangle_count {
        let mut tri = [0u32; 3];
        for slot in &mut tri {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes[cursor..cursor + 4]);
            cursor += 4;
            *slot = u32::from_le_bytes(buf);
        }
        buffers.indices.push(tri);
    }

    Ok(buffers)
}
