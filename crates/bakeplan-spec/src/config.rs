//! The bake configuration snapshot.
//!
//! A [`BakeConfig`] is the single immutable input to one planning run. It is
//! also the payload of a stored preset, so every field is serde-capable and
//! additions must keep `#[serde(default)]` for older records.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::colorspace::ColorSpacePolicy;
use crate::error::ConfigError;

/// Smallest supported texture side.
pub const MIN_RESOLUTION: u32 = 16;

/// Largest supported texture side.
pub const MAX_RESOLUTION: u32 = 16384;

/// The fixed square sizes behind the standard resolution flags.
pub const STANDARD_SIZES: [u32; 5] = [512, 1024, 2048, 4096, 8192];

/// Lowest valid UDIM tile number.
pub const UDIM_BASE: u32 = 1001;

/// One output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square resolution.
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Texel count, used as the planner's resolution sort key.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Path-friendly label, e.g. `2048x2048`.
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One of the three independently toggled custom resolution slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSlot {
    #[serde(default)]
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for CustomSlot {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1024,
            height: 1024,
        }
    }
}

/// Requested output resolutions: standard square flags plus custom slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionSet {
    pub res_512: bool,
    pub res_1024: bool,
    pub res_2048: bool,
    pub res_4096: bool,
    pub res_8192: bool,
    pub custom: [CustomSlot; 3],
}

impl Default for ResolutionSet {
    fn default() -> Self {
        Self {
            res_512: false,
            res_1024: false,
            res_2048: true,
            res_4096: false,
            res_8192: false,
            custom: [CustomSlot::default(); 3],
        }
    }
}

impl ResolutionSet {
    /// Expands the flags into a concrete, deduplicated list, sorted by area
    /// (then width, for equal-area rectangles).
    pub fn resolve(&self) -> Result<Vec<Resolution>, ConfigError> {
        let mut resolutions: Vec<Resolution> = Vec::new();

        let flags = [
            (self.res_512, STANDARD_SIZES[0]),
            (self.res_1024, STANDARD_SIZES[1]),
            (self.res_2048, STANDARD_SIZES[2]),
            (self.res_4096, STANDARD_SIZES[3]),
            (self.res_8192, STANDARD_SIZES[4]),
        ];
        for (enabled, side) in flags {
            if enabled {
                resolutions.push(Resolution::square(side));
            }
        }

        for (index, slot) in self.custom.iter().enumerate() {
            if !slot.enabled {
                continue;
            }
            let in_range = |side: u32| (MIN_RESOLUTION..=MAX_RESOLUTION).contains(&side);
            if !in_range(slot.width) || !in_range(slot.height) {
                return Err(ConfigError::InvalidCustomResolution {
                    slot: index + 1,
                    width: slot.width,
                    height: slot.height,
                    min: MIN_RESOLUTION,
                    max: MAX_RESOLUTION,
                });
            }
            let res = Resolution::new(slot.width, slot.height);
            if !resolutions.contains(&res) {
                resolutions.push(res);
            }
        }

        if resolutions.is_empty() {
            return Err(ConfigError::NoResolutions);
        }
        resolutions.sort_by_key(|r| (r.area(), r.width));
        Ok(resolutions)
    }
}

/// Atlas grid selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasLayoutMode {
    /// Near-square grid sized from the material count.
    #[default]
    Auto,
    /// User-provided rows and columns.
    Manual,
}

/// Multi-material atlas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasSettings {
    pub enabled: bool,
    pub layout_mode: AtlasLayoutMode,
    /// Grid rows, used only in [`AtlasLayoutMode::Manual`].
    pub rows: u32,
    /// Grid columns, used only in [`AtlasLayoutMode::Manual`].
    pub cols: u32,
    /// Spacing between islands, as a UV-space fraction.
    pub padding: f64,
    /// Emit UV-remap instructions for the host to apply before baking.
    pub update_uv: bool,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            layout_mode: AtlasLayoutMode::Auto,
            rows: 2,
            cols: 2,
            padding: 0.02,
            update_uv: true,
        }
    }
}

/// How the UDIM tile set is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UdimMode {
    /// Exactly the tiles the object's UVs occupy.
    #[default]
    AutoDetect,
    /// Every tile in the configured inclusive range.
    Range,
}

/// Multi-tile (UDIM) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UdimSettings {
    pub enabled: bool,
    pub mode: UdimMode,
    pub range_start: u32,
    pub range_end: u32,
}

impl Default for UdimSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: UdimMode::AutoDetect,
            range_start: UDIM_BASE,
            range_end: UDIM_BASE,
        }
    }
}

impl UdimSettings {
    /// Validates the explicit range when it is in use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled
            && self.mode == UdimMode::Range
            && (self.range_start > self.range_end || self.range_start < UDIM_BASE)
        {
            return Err(ConfigError::InvalidUdimRange {
                start: self.range_start,
                end: self.range_end,
            });
        }
        Ok(())
    }
}

/// UDIM filename convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// `{material}.{tile}.{channel}.png`
    #[default]
    Standard,
    /// `{material}_{tile}_{channel}.png`
    Mari,
    /// `{material}.{channel}.{tile}.png`
    Mudbox,
}

/// Output naming: filename convention plus folder organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingScheme {
    pub mode: NamingMode,
    /// Nest outputs under a per-object folder (outermost).
    pub by_object: bool,
    /// Nest outputs under a per-material folder.
    pub by_material: bool,
    /// Nest outputs under a per-resolution folder (innermost).
    pub by_resolution: bool,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            mode: NamingMode::Standard,
            by_object: true,
            by_material: true,
            by_resolution: true,
        }
    }
}

/// Which part of a material's shader network each bake samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedShaderStrategy {
    /// Sample the full surface output, whatever feeds it.
    #[default]
    FullSurface,
    /// Sample only the Principled sub-network.
    PrincipledOnly,
    /// Sample only the custom shader sub-network.
    CustomOnly,
}

impl MixedShaderStrategy {
    /// Returns the strategy as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MixedShaderStrategy::FullSurface => "full_surface",
            MixedShaderStrategy::PrincipledOnly => "principled_only",
            MixedShaderStrategy::CustomOnly => "custom_only",
        }
    }
}

/// Shadow sampling when lighting is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMode {
    #[default]
    WithShadows,
    NoShadows,
}

/// The complete configuration for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeConfig {
    /// Root directory baked files are written under.
    pub output_dir: PathBuf,

    /// Channels to bake, expanded in registry order.
    pub channels: BTreeSet<ChannelKind>,

    /// Requested resolutions.
    pub resolutions: ResolutionSet,

    /// Multi-material atlas settings.
    pub atlas: AtlasSettings,

    /// Multi-tile settings.
    pub udim: UdimSettings,

    /// Color-space policy.
    pub color_space: ColorSpacePolicy,

    /// Output naming.
    pub naming: NamingScheme,

    /// Mixed-shader sampling strategy.
    pub strategy: MixedShaderStrategy,

    /// Include scene lighting in lighting-capable channels.
    pub include_lighting: bool,

    /// Shadow handling; inert while `include_lighting` is false.
    pub shadow_mode: ShadowMode,

    /// Bake margin in pixels, passed through to the render engine.
    pub margin: u32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("textures"),
            channels: [
                ChannelKind::BaseColor,
                ChannelKind::Roughness,
                ChannelKind::Metallic,
                ChannelKind::Normal,
            ]
            .into_iter()
            .collect(),
            resolutions: ResolutionSet::default(),
            atlas: AtlasSettings::default(),
            udim: UdimSettings::default(),
            color_space: ColorSpacePolicy::default(),
            naming: NamingScheme::default(),
            strategy: MixedShaderStrategy::default(),
            include_lighting: false,
            shadow_mode: ShadowMode::default(),
            margin: 16,
        }
    }
}

impl BakeConfig {
    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Rejects invalid or contradictory configurations before any target is
    /// built. Planning never starts on a config that fails here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        self.resolutions.resolve()?;
        self.udim.validate()?;
        if !(0.0..0.5).contains(&self.atlas.padding) {
            return Err(ConfigError::InvalidPadding {
                padding: self.atlas.padding,
            });
        }
        self.color_space.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BakeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_resolution_expansion_sorted_by_area() {
        let set = ResolutionSet {
            res_512: true,
            res_2048: true,
            res_1024: false,
            res_4096: false,
            res_8192: false,
            custom: [
                CustomSlot {
                    enabled: true,
                    width: 1920,
                    height: 1080,
                },
                CustomSlot::default(),
                CustomSlot::default(),
            ],
        };
        let resolved = set.resolve().unwrap();
        assert_eq!(
            resolved,
            vec![
                Resolution::square(512),
                Resolution::new(1920, 1080),
                Resolution::square(2048),
            ]
        );
    }

    #[test]
    fn test_resolution_expansion_dedups_custom() {
        let set = ResolutionSet {
            res_2048: true,
            custom: [
                CustomSlot {
                    enabled: true,
                    width: 2048,
                    height: 2048,
                },
                CustomSlot {
                    enabled: true,
                    width: 2048,
                    height: 2048,
                },
                CustomSlot::default(),
            ],
            ..Default::default()
        };
        assert_eq!(set.resolve().unwrap(), vec![Resolution::square(2048)]);
    }

    #[test]
    fn test_no_resolutions_rejected() {
        let set = ResolutionSet {
            res_2048: false,
            ..Default::default()
        };
        assert_eq!(set.resolve(), Err(ConfigError::NoResolutions));
    }

    #[test]
    fn test_custom_resolution_bounds() {
        let mut set = ResolutionSet::default();
        set.custom[1] = CustomSlot {
            enabled: true,
            width: 8,
            height: 1024,
        };
        assert!(matches!(
            set.resolve(),
            Err(ConfigError::InvalidCustomResolution { slot: 2, .. })
        ));
    }

    #[test]
    fn test_udim_range_validation() {
        let settings = UdimSettings {
            enabled: true,
            mode: UdimMode::Range,
            range_start: 1005,
            range_end: 1002,
        };
        assert!(settings.validate().is_err());

        let settings = UdimSettings {
            enabled: true,
            mode: UdimMode::Range,
            range_start: 999,
            range_end: 1002,
        };
        assert!(settings.validate().is_err());

        // Range is ignored while auto-detect is selected.
        let settings = UdimSettings {
            enabled: true,
            mode: UdimMode::AutoDetect,
            range_start: 999,
            range_end: 1002,
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_padding_validation() {
        let config = BakeConfig {
            atlas: AtlasSettings {
                padding: 0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPadding { padding: 0.5 })
        );
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = BakeConfig::default();
        let json = config.to_json_pretty().unwrap();
        let parsed = BakeConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        // Minimal record: everything defaulted.
        let config = BakeConfig::from_json("{}").unwrap();
        assert_eq!(config, BakeConfig::default());
    }
}
