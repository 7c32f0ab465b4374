// SPDX-License-Identifier: Apache-2.0
//! RON encoding of shading parameters into material asset files.
//!
//! Material payloads are always rendered compact, independent of the
//! document's indent configuration: the payload bytes feed the content
//! hash, and reformatting the document must not rename every material
//! file on disk.

use scn_cas::AssetLibrary;
use scn_scene::{MaterialData, PrincipledMaterial, TextureRef};
use scn_value::{TextEncoder, Value};

use crate::error::ExportError;

fn color_tuple(rgba: [f32; 4]) -> Value {
    Value::tuple(rgba.into_iter().map(Value::float32))
}

/// Encode an optional texture slot, storing the pixel payload through the
/// asset writer when present.
fn texture_slot(
    assets: &AssetLibrary,
    texture_folder: &str,
    slot: Option<&TextureRef>,
) -> Result<Value, ExportError> {
    Ok(match slot {
        None => Value::variant("None"),
        Some(texture) => {
            let path = assets.store(texture_folder, &texture.extension, &texture.bytes)?;
            Value::variant_with("Some", Value::tuple([Value::from(path)]))
        }
    })
}

/// The payload mesh objects without any material get: magenta and unlit,
/// impossible to mistake for an intentional look.
pub fn default_material_payload() -> Vec<u8> {
    let value = Value::structure([
        ("base_color", color_tuple([1.0, 0.0, 1.0, 1.0])),
        ("unlit", Value::Bool(true)),
    ]);
    TextEncoder::compact().render(&value).into_bytes()
}

/// Encode `material` as a RON material payload, storing any texture slots
/// through `assets` first.
///
/// `object` names the owner for error reporting. An `Unsupported` material
/// aborts the export rather than silently exporting a wrong look.
pub fn encode_material(
    assets: &AssetLibrary,
    texture_folder: &str,
    object: &str,
    material: &MaterialData,
) -> Result<Vec<u8>, ExportError> {
    let params: &PrincipledMaterial = match material {
        MaterialData::Principled(params) => params,
        MaterialData::Unsupported { node_kind } => {
            return Err(ExportError::Unsupported {
                object: object.to_owned(),
                detail: format!("cannot encode material node type {node_kind:?}"),
            });
        }
    };

    let value = Value::structure([
        ("base_color", color_tuple(params.base_color)),
        (
            "base_color_texture",
            texture_slot(assets, texture_folder, params.base_color_texture.as_ref())?,
        ),
        ("emissive", color_tuple(params.emissive)),
        (
            "emissive_texture",
            texture_slot(assets, texture_folder, params.emissive_texture.as_ref())?,
        ),
        (
            "perceptual_roughness",
            Value::float32(params.perceptual_roughness),
        ),
        ("metallic", Value::float32(params.metallic)),
        (
            "metallic_roughness_texture",
            texture_slot(
                assets,
                texture_folder,
                params.metallic_roughness_texture.as_ref(),
            )?,
        ),
        ("reflectance", Value::float32(params.reflectance)),
        (
            "normal_map_texture",
            texture_slot(assets, texture_folder, params.normal_map_texture.as_ref())?,
        ),
        (
            "occlusion_texture",
            texture_slot(assets, texture_folder, params.occlusion_texture.as_ref())?,
        ),
        ("double_sided", Value::Bool(params.double_sided)),
        ("unlit", Value::Bool(params.unlit)),
        ("alpha_mode", Value::variant(params.alpha_mode.variant_name())),
    ]);

    Ok(TextEncoder::compact().render(&value).into_bytes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scn_scene::AlphaMode;

    // ── 1. goldens ──────────────────────────────────────────────────────

    #[test]
    fn default_material_golden() {
        assert_eq!(
            default_material_payload(),
            b"(base_color:(1.0,0.0,1.0,1.0),unlit:true)".to_vec()
        );
    }

    #[test]
    fn principled_material_golden() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetLibrary::new(dir.path(), "scenes");
        let material = MaterialData::Principled(PrincipledMaterial {
            base_color: [0.8, 0.2, 0.2, 1.0],
            alpha_mode: AlphaMode::Blend,
            ..PrincipledMaterial::default()
        });
        let payload = encode_material(&assets, "textures", "cube", &material).unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert!(text.starts_with("(base_color:(0.8,0.2,0.2,1.0),base_color_texture:None,"));
        assert!(text.ends_with("double_sided:false,unlit:false,alpha_mode:Blend)"));
    }

    // ── 2. texture slots route through the asset writer ─────────────────

    #[test]
    fn texture_slot_stores_and_references() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetLibrary::new(dir.path(), "scenes");
        let material = MaterialData::Principled(PrincipledMaterial {
            base_color_texture: Some(TextureRef {
                bytes: vec![1, 2, 3, 4],
                extension: "png".to_owned(),
            }),
            ..PrincipledMaterial::default()
        });
        let payload = encode_material(&assets, "textures", "cube", &material).unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert!(text.contains("base_color_texture:Some(\"scenes/textures/"));
        assert!(text.contains(".png\")"));
        assert!(dir.path().join("textures").read_dir().unwrap().count() == 1);
    }

    // ── 3. unsupported materials abort ──────────────────────────────────

    #[test]
    fn unsupported_material_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetLibrary::new(dir.path(), "scenes");
        let material = MaterialData::Unsupported {
            node_kind: "EMISSION".to_owned(),
        };
        let err = encode_material(&assets, "textures", "cube", &material).unwrap_err();
        assert!(matches!(err, ExportError::Unsupported { .. }));
    }
}
