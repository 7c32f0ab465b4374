// SPDX-License-Identifier: Apache-2.0
//! Fixed-rule polygon triangulation.
//!
//! Every consumer of the binary format must agree on how an n-gon becomes
//! triangles, so the split rules are pinned here rather than left to the
//! authoring host:
//!
//! - triangles pass through unchanged,
//! - quads fan from corner 0: `(0,1,2)` and `(0,2,3)`,
//! - larger rings are split alternately from the low and high ends of the
//!   corner ring, which keeps the strips short on long thin polygons.

use crate::codec::MeshCodecError;

/// Split a face with `corner_count` corners into local corner-index
/// triangles.
///
/// Indices refer to positions within the face's own corner list. Faces
/// with fewer than three corners carry no surface and are rejected;
/// `face_index` is only used to report them.
pub fn triangulate(face_index: usize, corner_count: usize) -> Result<Vec<[usize; 3]>, MeshCodecError> {
    match corner_count {
        0..=2 => Err(MeshCodecError::DegenerateFace {
            face: face_index,
            corners: corner_count,
        }),
        3 => Ok(vec![[0, 1, 2]]),
        4 => Ok(vec![[0, 1, 2], [0, 2, 3]]),
        n => {
            let mut triangles = Vec::with_capacity(n - 2);
            let mut low = 0usize;
            let mut high = n - 1;
            let mut take_low = true;
            while high - low >= 2 {
                if take_low {
                    triangles.push([low, low + 1, high]);
                    low += 1;
                } else {
                    triangles.push([low, high - 1, high]);
                    high -= 1;
                }
                take_low = !take_low;
            }
            Ok(triangles)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn triangle_passes_through() {
        assert_eq!(triangulate(0, 3).unwrap(), vec![[0, 1, 2]]);
    }

    #[test]
    fn quad_fans_from_corner_zero() {
        assert_eq!(triangulate(0, 4).unwrap(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn ngon_alternates_between_ring_ends() {
        let tris = triangulate(0, 5).unwrap();
        assert_eq!(tris, vec![[0, 1, 4], [1, 3, 4], [1, 2, 3]]);
    }

    #[test]
    fn ngon_covers_ring_exactly_once() {
        for n in 3..12 {
            let tris = triangulate(0, n).unwrap();
            assert_eq!(tris.len(), n - 2);
            // Every triangle edge stays within the ring and every corner
            // appears in at least one triangle.
            let mut seen = vec![false; n];
            for tri in &tris {
                for &corner in tri {
                    assert!(corner < n);
                    seen[corner] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn degenerate_faces_are_rejected() {
        for corners in 0..3 {
            let err = triangulate(7, corners).unwrap_err();
            assert!(matches!(
                err,
                MeshCodecError::DegenerateFace { face: 7, .. }
            ));
        }
    }
}
