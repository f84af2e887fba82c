//! Static registry of bakeable shading channels.
//!
//! Every other component treats this as a constant lookup table: adding a
//! channel kind means adding one enum variant and one row in [`ChannelKind::info`].

use serde::{Deserialize, Serialize};

/// One bakeable texture channel: a PBR map or a custom shader output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Base color / albedo.
    BaseColor,
    /// Surface roughness.
    Roughness,
    /// Metallic mask.
    Metallic,
    /// Tangent-space normal map.
    Normal,
    /// Subsurface scattering weight.
    Subsurface,
    /// Transmission weight.
    Transmission,
    /// Emission color.
    Emission,
    /// Opacity.
    Alpha,
    /// Specular level.
    Specular,
    /// Clearcoat weight.
    Clearcoat,
    /// Clearcoat roughness.
    ClearcoatRoughness,
    /// Sheen weight.
    Sheen,
    /// Height / displacement.
    Displacement,
    /// Ambient occlusion.
    AmbientOcclusion,
    /// Whatever the material's custom shader network outputs.
    CustomShader,
}

/// Registry row for a channel kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Color space applied when the policy does not override it.
    pub default_color_space: &'static str,
    /// True only for channels meaningfully affected by scene lighting.
    pub requires_lighting: bool,
    /// False for the basic PBR set (base color, roughness, metallic, normal).
    pub advanced: bool,
}

impl ChannelKind {
    /// Returns the registry row for this channel.
    pub const fn info(&self) -> ChannelInfo {
        // Default color spaces follow the usual convention: color-like data
        // is sRGB, every scalar/vector map is Non-Color.
        match self {
            ChannelKind::BaseColor => ChannelInfo {
                default_color_space: "sRGB",
                requires_lighting: true,
                advanced: false,
            },
            ChannelKind::Roughness => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: false,
            },
            ChannelKind::Metallic => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: false,
            },
            ChannelKind::Normal => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: false,
            },
            ChannelKind::Subsurface => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Transmission => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Emission => ChannelInfo {
                default_color_space: "sRGB",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Alpha => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Specular => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Clearcoat => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::ClearcoatRoughness => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Sheen => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::Displacement => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::AmbientOcclusion => ChannelInfo {
                default_color_space: "Non-Color",
                requires_lighting: false,
                advanced: true,
            },
            ChannelKind::CustomShader => ChannelInfo {
                default_color_space: "sRGB",
                requires_lighting: true,
                advanced: true,
            },
        }
    }

    /// Returns the channel kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::BaseColor => "base_color",
            ChannelKind::Roughness => "roughness",
            ChannelKind::Metallic => "metallic",
            ChannelKind::Normal => "normal",
            ChannelKind::Subsurface => "subsurface",
            ChannelKind::Transmission => "transmission",
            ChannelKind::Emission => "emission",
            ChannelKind::Alpha => "alpha",
            ChannelKind::Specular => "specular",
            ChannelKind::Clearcoat => "clearcoat",
            ChannelKind::ClearcoatRoughness => "clearcoat_roughness",
            ChannelKind::Sheen => "sheen",
            ChannelKind::Displacement => "displacement",
            ChannelKind::AmbientOcclusion => "ambient_occlusion",
            ChannelKind::CustomShader => "custom_shader",
        }
    }

    /// Returns the lowercase token used in output filenames.
    ///
    /// Matches the widespread texture-suffix convention (`basecolor`, `ao`),
    /// which is what downstream DCC tools expect to find in the name.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ChannelKind::BaseColor => "basecolor",
            ChannelKind::Roughness => "roughness",
            ChannelKind::Metallic => "metallic",
            ChannelKind::Normal => "normal",
            ChannelKind::Subsurface => "subsurface",
            ChannelKind::Transmission => "transmission",
            ChannelKind::Emission => "emission",
            ChannelKind::Alpha => "alpha",
            ChannelKind::Specular => "specular",
            ChannelKind::Clearcoat => "clearcoat",
            ChannelKind::ClearcoatRoughness => "clearcoatroughness",
            ChannelKind::Sheen => "sheen",
            ChannelKind::Displacement => "displacement",
            ChannelKind::AmbientOcclusion => "ao",
            ChannelKind::CustomShader => "customshader",
        }
    }

    /// Returns the Principled BSDF input socket sampled for this channel,
    /// or `None` for channels that are not sourced from a Principled input
    /// (geometry bakes and the custom shader output).
    pub fn principled_input(&self) -> Option<&'static str> {
        match self {
            ChannelKind::BaseColor => Some("Base Color"),
            ChannelKind::Roughness => Some("Roughness"),
            ChannelKind::Metallic => Some("Metallic"),
            ChannelKind::Normal => Some("Normal"),
            ChannelKind::Subsurface => Some("Subsurface"),
            ChannelKind::Transmission => Some("Transmission"),
            ChannelKind::Emission => Some("Emission"),
            ChannelKind::Alpha => Some("Alpha"),
            ChannelKind::Specular => Some("Specular"),
            ChannelKind::Clearcoat => Some("Clearcoat"),
            ChannelKind::ClearcoatRoughness => Some("Clearcoat Roughness"),
            ChannelKind::Sheen => Some("Sheen"),
            ChannelKind::Displacement => None,
            ChannelKind::AmbientOcclusion => None,
            ChannelKind::CustomShader => None,
        }
    }

    /// Convenience accessor for the registry's default color space.
    pub const fn default_color_space(&self) -> &'static str {
        self.info().default_color_space
    }

    /// Convenience accessor for the requires-lighting flag.
    pub const fn requires_lighting(&self) -> bool {
        self.info().requires_lighting
    }

    /// Returns all channel kinds in canonical order.
    ///
    /// This order is the planner's channel sort key, so it must stay stable.
    pub fn all() -> &'static [ChannelKind] {
        &[
            ChannelKind::BaseColor,
            ChannelKind::Roughness,
            ChannelKind::Metallic,
            ChannelKind::Normal,
            ChannelKind::Subsurface,
            ChannelKind::Transmission,
            ChannelKind::Emission,
            ChannelKind::Alpha,
            ChannelKind::Specular,
            ChannelKind::Clearcoat,
            ChannelKind::ClearcoatRoughness,
            ChannelKind::Sheen,
            ChannelKind::Displacement,
            ChannelKind::AmbientOcclusion,
            ChannelKind::CustomShader,
        ]
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelKind::all()
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown channel kind: {}", s))
    }
}
