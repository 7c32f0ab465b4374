// SPDX-License-Identifier: Apache-2.0
//! Shading parameters as extracted from the host's material graph.
//!
//! The hard part — walking a node graph down to a principled shader and its
//! texture inputs — is the host's job. The core only receives the result:
//! either a fully-resolved parameter set, or an `Unsupported` marker naming
//! the node arrangement the host could not map (which aborts the export).

use serde::{Deserialize, Serialize};

/// Outcome of the host's material-graph walk for one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shader", rename_all = "snake_case")]
pub enum MaterialData {
    /// A principled-BSDF-style parameter set the codec can encode.
    Principled(PrincipledMaterial),
    /// The material graph uses a node arrangement the host cannot map.
    /// Encoding this is a fatal export error.
    Unsupported {
        /// Host-side name of the unmappable node type.
        node_kind: String,
    },
}

/// PBR shading parameters, shaped after the runtime's standard material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrincipledMaterial {
    /// Base color RGBA; doubles as diffuse albedo.
    pub base_color: [f32; 4],
    /// Base color texture, factored into the final base color.
    pub base_color_texture: Option<TextureRef>,
    /// Emissive color RGBA.
    pub emissive: [f32; 4],
    /// Emissive texture.
    pub emissive_texture: Option<TextureRef>,
    /// Linear perceptual roughness.
    pub perceptual_roughness: f32,
    /// Dielectric-to-metallic mix in `[0, 1]`.
    pub metallic: f32,
    /// Combined metallic/roughness texture.
    pub metallic_roughness_texture: Option<TextureRef>,
    /// Specular intensity for non-metals.
    pub reflectance: f32,
    /// Tangent-space normal map.
    pub normal_map_texture: Option<TextureRef>,
    /// Ambient occlusion texture.
    pub occlusion_texture: Option<TextureRef>,
    /// Disable backface culling.
    pub double_sided: bool,
    /// Skip lighting entirely.
    pub unlit: bool,
    /// Alpha compositing mode.
    pub alpha_mode: AlphaMode,
}

impl Default for PrincipledMaterial {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            base_color_texture: None,
            emissive: [0.0, 0.0, 0.0, 1.0],
            emissive_texture: None,
            perceptual_roughness: 0.5,
            metallic: 0.0,
            metallic_roughness_texture: None,
            reflectance: 0.5,
            normal_map_texture: None,
            occlusion_texture: None,
            double_sided: false,
            unlit: false,
            alpha_mode: AlphaMode::Opaque,
        }
    }
}

/// Alpha compositing mode for the material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaMode {
    /// Alpha channel ignored.
    #[default]
    Opaque,
    /// Binary cutout.
    Mask,
    /// Alpha blending.
    Blend,
}

impl AlphaMode {
    /// The runtime-side enum variant name.
    pub fn variant_name(self) -> &'static str {
        match self {
            AlphaMode::Opaque => "Opaque",
            AlphaMode::Mask => "Mask",
            AlphaMode::Blend => "Blend",
        }
    }
}

/// A texture payload extracted from the material graph: raw encoded image
/// bytes plus the file extension the runtime's image loader keys on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRef {
    /// Encoded image file contents (PNG, JPEG, …), verbatim.
    pub bytes: Vec<u8>,
    /// File extension without the dot, e.g. `png`.
    pub extension: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_opaque_lit() {
        let mat = PrincipledMaterial::default();
        assert_eq!(mat.alpha_mode, AlphaMode::Opaque);
        assert!(!mat.unlit);
        assert!(mat.base_color_texture.is_none());
    }

    #[test]
    fn material_data_json_tagging() {
        let unsupported = MaterialData::Unsupported {
            node_kind: "EMISSION".into(),
        };
        let json = serde_json::to_string(&unsupported).unwrap();
        assert!(json.contains("\"shader\":\"unsupported\""));
        let back: MaterialData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unsupported);
    }
}
