// SPDX-License-Identifier: Apache-2.0
//! Dynamically-typed value tree and RON text encoder for scene documents.
//!
//! `scn-value` is the intermediate representation every exporter stage emits:
//! a closed set of tagged [`Value`] variants forming a finite, acyclic tree,
//! plus a [`TextEncoder`] that renders a tree into the RON-like grammar the
//! consuming runtime's reflection deserializer reads.
//!
//! # Grammar
//!
//! - `(` `)` delimit tuples and structs (structs carry unquoted field names),
//! - `[` `]` delimit lists,
//! - `{` `}` delimit maps (keys are encoded, so string keys are quoted),
//! - enum variants render as `Variant` or `Variant(payload…)`,
//! - strings are double-quoted with lossless escaping, booleans are lowercase,
//!   numbers are bare decimal literals.
//!
//! # Determinism Invariant
//!
//! Struct field order and map entry order are insertion order, preserved
//! exactly. Rendering the same tree with the same encoder configuration is
//! byte-identical across runs; nothing in this crate iterates a hash map.

mod encode;
pub mod reflect;
mod value;

pub use encode::TextEncoder;
pub use value::Value;
