// SPDX-License-Identifier: Apache-2.0
//! Deterministic binary mesh encoding.
//!
//! Takes the polygon soup the authoring host hands over
//! ([`scn_scene::MeshData`]) and produces the compact little-endian vertex
//! buffer the runtime's mesh loader reads back. Pure functions of their
//! input, no I/O; the content-addressed layer above hashes the output, so
//! byte stability is the contract here.
//!
//! # Determinism Invariant
//!
//! Encoding the same `MeshData` must always produce the same bytes:
//! faces are walked in declaration order, triangles within a face follow
//! the fixed split rules in [`triangulate`], and vertex deduplication
//! assigns indices in first-seen order with bit-exact attribute keys.
//! Anything order- or hash-seed-dependent would silently break the
//! write-once asset store.
//!
//! The wire format carries no magic number or version tag; the runtime
//! loader and this encoder are versioned together.

mod codec;
mod triangulate;

pub use codec::{decode, encode, MeshBuffers, MeshCodecError};
pub use triangulate::triangulate;
