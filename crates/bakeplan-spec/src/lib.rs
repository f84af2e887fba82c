//! bakeplan configuration library
//!
//! This crate holds everything the bake planner consumes as declarative
//! input: the channel registry, the color-space policy, the configuration
//! snapshot with its validation, the planning error taxonomy, and the
//! versioned preset codec with its storage interface.
//!
//! # Example
//!
//! ```
//! use bakeplan_spec::{BakeConfig, ChannelKind, ColorSpacePolicy};
//!
//! let mut config = BakeConfig::default();
//! config.channels.insert(ChannelKind::Emission);
//! config.color_space = ColorSpacePolicy::manual("Raw");
//! assert!(config.validate().is_ok());
//!
//! // Every channel resolves to the manual override.
//! let cs = config.color_space.resolve(ChannelKind::Normal).unwrap();
//! assert_eq!(cs, "Raw");
//! ```
//!
//! # Modules
//!
//! - [`channel`]: static registry of bakeable channel kinds
//! - [`colorspace`]: policy-driven color-space resolution
//! - [`config`]: the per-run configuration snapshot
//! - [`error`]: planning errors and warnings
//! - [`preset`]: versioned preset codec and the storage trait

pub mod channel;
pub mod colorspace;
pub mod config;
pub mod error;
pub mod preset;

// Re-export commonly used types at the crate root
pub use channel::{ChannelInfo, ChannelKind};
pub use colorspace::{ColorSpaceMode, ColorSpacePolicy};
pub use config::{
    AtlasLayoutMode, AtlasSettings, BakeConfig, CustomSlot, MixedShaderStrategy, NamingMode,
    NamingScheme, Resolution, ResolutionSet, ShadowMode, UdimMode, UdimSettings, MAX_RESOLUTION,
    MIN_RESOLUTION, STANDARD_SIZES, UDIM_BASE,
};
pub use error::{ConfigError, LayoutError, PlanError, PlanWarning, PresetError};
pub use preset::{
    sanitize_preset_name, FsPresetStore, MemoryPresetStore, Preset, PresetStore, PRESET_VERSION,
};
