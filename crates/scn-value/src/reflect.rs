// SPDX-License-Identifier: Apache-2.0
//! Reflected wrappers for the engine leaf types scene documents embed.
//!
//! Each helper tags a raw value with the fully-qualified type path the
//! runtime's reflection deserializer expects, via [`Value::reflected`].
//! Type paths are opaque strings here; the core never validates them.

use crate::Value;

/// A reflected `glam::vec2::Vec2`.
pub fn vec2(v: [f32; 2]) -> Value {
    Value::reflected(
        "glam::vec2::Vec2",
        Value::tuple([Value::float32(v[0]), Value::float32(v[1])]),
    )
}

/// A reflected `glam::vec3::Vec3`.
pub fn vec3(v: [f32; 3]) -> Value {
    Value::reflected(
        "glam::vec3::Vec3",
        Value::tuple([
            Value::float32(v[0]),
            Value::float32(v[1]),
            Value::float32(v[2]),
        ]),
    )
}

/// A reflected `glam::vec4::Vec4`.
pub fn vec4(v: [f32; 4]) -> Value {
    Value::reflected(
        "glam::vec4::Vec4",
        Value::tuple([
            Value::float32(v[0]),
            Value::float32(v[1]),
            Value::float32(v[2]),
            Value::float32(v[3]),
        ]),
    )
}

/// A reflected `glam::quat::Quat` from an `[x, y, z, w]` quaternion.
pub fn quat(q: [f32; 4]) -> Value {
    Value::reflected(
        "glam::quat::Quat",
        Value::tuple([
            Value::float32(q[0]),
            Value::float32(q[1]),
            Value::float32(q[2]),
            Value::float32(q[3]),
        ]),
    )
}

/// A reflected `f32`.
pub fn f32_value(v: f32) -> Value {
    Value::reflected("f32", Value::float32(v))
}

/// A reflected `f64`.
pub fn f64_value(v: f64) -> Value {
    Value::reflected("f64", Value::Float(v))
}

/// A reflected `bool`.
pub fn bool_value(v: bool) -> Value {
    Value::reflected("bool", Value::Bool(v))
}

/// A reflected `glam::bool::BVec3`.
pub fn bool_vec3(v: [bool; 3]) -> Value {
    Value::reflected(
        "glam::bool::BVec3",
        Value::tuple([Value::Bool(v[0]), Value::Bool(v[1]), Value::Bool(v[2])]),
    )
}

/// A reflected linear-RGBA engine color from a linear RGB triple.
///
/// Alpha is fixed at 1.0; the authoring host has no alpha on light colors.
pub fn rgba_linear(rgb: [f32; 3]) -> Value {
    Value::reflected(
        "bevy_render::color::Color",
        Value::variant_with(
            "RgbaLinear",
            Value::structure([
                ("red", Value::float32(rgb[0])),
                ("green", Value::float32(rgb[1])),
                ("blue", Value::float32(rgb[2])),
                ("alpha", Value::Float(1.0)),
            ]),
        ),
    )
}

/// A reflected entity-id cross-reference.
///
/// `id` is the referenced object's position in the exported object
/// sequence; the same object-to-id assignment must be used for the whole
/// export pass or references corrupt.
pub fn entity_ref(id: usize) -> Value {
    Value::reflected("bevy_ecs::entity::Entity", Value::Int(id as i64))
}

/// A reflected `core::option::Option<T>`: `Some(value)` or `None`.
pub fn option(contained_type: &str, value: Option<Value>) -> Value {
    let payload = match value {
        None => Value::variant("None"),
        Some(v) => Value::variant_with("Some", Value::tuple([v])),
    };
    Value::reflected(format!("core::option::Option<{contained_type}>"), payload)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::TextEncoder;

    #[test]
    fn vec3_golden() {
        let enc = TextEncoder::compact();
        assert_eq!(
            enc.render(&vec3([0.0, 1.0, 2.5])),
            "{\"type\":\"glam::vec3::Vec3\",\"value\":(0.0,1.0,2.5)}"
        );
    }

    #[test]
    fn option_golden() {
        let enc = TextEncoder::compact();
        assert_eq!(
            enc.render(&option("alloc::string::String", Some(Value::from("camera_3d")))),
            "{\"type\":\"core::option::Option<alloc::string::String>\",\"value\":Some(\"camera_3d\")}"
        );
        assert_eq!(
            enc.render(&option("alloc::string::String", None)),
            "{\"type\":\"core::option::Option<alloc::string::String>\",\"value\":None}"
        );
    }

    #[test]
    fn rgba_linear_golden() {
        let enc = TextEncoder::compact();
        assert_eq!(
            enc.render(&rgba_linear([1.0, 0.5, 0.0])),
            "{\"type\":\"bevy_render::color::Color\",\"value\":RgbaLinear(red:1.0,green:0.5,blue:0.0,alpha:1.0)}"
        );
    }

    #[test]
    fn entity_ref_golden() {
        let enc = TextEncoder::compact();
        assert_eq!(
            enc.render(&entity_ref(7)),
            "{\"type\":\"bevy_ecs::entity::Entity\",\"value\":7}"
        );
    }
}
