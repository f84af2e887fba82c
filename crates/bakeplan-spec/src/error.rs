//! Error and warning types for bake planning.
//!
//! Planning-phase errors ([`ConfigError`], [`LayoutError`], and the
//! [`PlanError`] umbrella) are fatal to the whole run and surface before any
//! file is written. [`PlanWarning`]s are non-fatal and carried on the plan.

use std::path::PathBuf;
use thiserror::Error;

use crate::channel::ChannelKind;

/// Invalid or contradictory configuration, detected before any target is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No resolution is enabled.
    #[error("no resolution enabled; enable at least one standard or custom resolution")]
    NoResolutions,

    /// No channel is selected.
    #[error("no channel selected; enable at least one channel to bake")]
    NoChannels,

    /// A custom resolution slot is out of the supported envelope.
    #[error("custom resolution slot {slot} is {width}x{height}; each side must be within {min}..={max}")]
    InvalidCustomResolution {
        slot: usize,
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    /// Explicit UDIM range is empty or out of the UDIM numbering space.
    #[error("invalid UDIM range {start}..={end}; start must be <= end and both >= 1001")]
    InvalidUdimRange { start: u32, end: u32 },

    /// Manual color-space override selected but no value given.
    #[error("color-space mode is manual but the override value is empty")]
    EmptyManualOverride,

    /// A custom color-space override has an empty value.
    #[error("empty color-space override for channel '{channel}'")]
    EmptyChannelOverride { channel: ChannelKind },

    /// Atlas padding outside the representable range.
    #[error("atlas padding {padding} is outside [0, 0.5)")]
    InvalidPadding { padding: f64 },
}

/// Atlas layout constraints unsatisfiable for the given inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Manual grid cannot hold all materials.
    #[error("atlas grid {rows}x{cols} cannot hold {count} materials")]
    GridTooSmall { rows: u32, cols: u32, count: usize },

    /// Padding leaves zero or negative island area.
    #[error("padding exceeds cell size: {padding} >= {limit}")]
    PaddingExceedsCell { padding: f64, limit: f64 },

    /// Padding outside the representable range.
    #[error("atlas padding {padding} is outside [0, 0.5)")]
    InvalidPadding { padding: f64 },
}

/// Fatal planning failure: the whole run aborts and zero targets are produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Configuration rejected up front.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Atlas layout could not be computed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Two targets resolved to the same output path. The colliding plan is
    /// unsound (information-losing), so nothing is baked.
    #[error("two bake targets resolve to the same output path: {path}")]
    DuplicateOutput { path: PathBuf },

    /// The scene snapshot contains nothing to bake.
    #[error("no bakeable material slots in the selected objects")]
    EmptyScene,
}

/// Non-fatal planning diagnostics, reported alongside the plan.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlanWarning {
    /// A (material, channel) pair has no valid route under the chosen
    /// mixed-shader strategy; the combination is skipped, the batch continues.
    SkippedTarget {
        object: String,
        material: String,
        channel: ChannelKind,
        reason: String,
    },

    /// UDIM auto-detection found no tiles; the object bakes to tile 1001.
    NoUdimTilesDetected { object: String },

    /// Atlas requested but the object has fewer than two usable material
    /// slots; the object falls back to per-slot targets.
    AtlasFallback { object: String, slots: usize },
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanWarning::SkippedTarget {
                object,
                material,
                channel,
                reason,
            } => write!(
                f,
                "skipped {}/{} channel '{}': {}",
                object, material, channel, reason
            ),
            PlanWarning::NoUdimTilesDetected { object } => {
                write!(f, "no UDIM tiles detected on '{}'; baking tile 1001", object)
            }
            PlanWarning::AtlasFallback { object, slots } => write!(
                f,
                "'{}' has {} usable material slot(s); atlas needs at least 2, baking per slot",
                object, slots
            ),
        }
    }
}

/// Corrupt or unrecognized preset record, or preset storage failure.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Record is not well-formed JSON.
    #[error("preset is not well-formed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Record has no usable `preset_version` field.
    #[error("preset record is missing an integer 'preset_version' field")]
    MissingVersion,

    /// Record was written by a newer schema than this build understands.
    #[error("preset version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    /// Preset name empty or reduced to nothing after sanitization.
    #[error("invalid preset name: '{name}'")]
    InvalidName { name: String },

    /// No stored preset under that name.
    #[error("preset '{name}' not found")]
    NotFound { name: String },

    /// Underlying storage failure.
    #[error("preset storage error: {0}")]
    Io(#[from] std::io::Error),
}
