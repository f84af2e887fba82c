//! Per-channel color-space resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::error::ConfigError;

/// How final color spaces are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpaceMode {
    /// Registry defaults for every channel.
    #[default]
    Auto,
    /// Registry defaults, overridden per channel where an entry exists.
    Custom,
    /// One override value applied to every channel unconditionally.
    Manual,
}

/// Color-space policy for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpacePolicy {
    /// Resolution mode.
    #[serde(default)]
    pub mode: ColorSpaceMode,

    /// Per-channel overrides, consulted only in [`ColorSpaceMode::Custom`].
    // BTreeMap keeps preset encoding order-stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<ChannelKind, String>,

    /// The single value applied in [`ColorSpaceMode::Manual`].
    #[serde(default)]
    pub manual_override: String,
}

impl Default for ColorSpacePolicy {
    fn default() -> Self {
        Self {
            mode: ColorSpaceMode::Auto,
            overrides: BTreeMap::new(),
            manual_override: String::new(),
        }
    }
}

impl ColorSpacePolicy {
    /// Creates a manual-override policy.
    pub fn manual(value: impl Into<String>) -> Self {
        Self {
            mode: ColorSpaceMode::Manual,
            overrides: BTreeMap::new(),
            manual_override: value.into(),
        }
    }

    /// Creates a custom policy from per-channel overrides.
    pub fn custom(overrides: BTreeMap<ChannelKind, String>) -> Self {
        Self {
            mode: ColorSpaceMode::Custom,
            overrides,
            manual_override: String::new(),
        }
    }

    /// Resolves the concrete color space for one channel.
    ///
    /// Precedence: manual override (every channel, unconditionally), then a
    /// custom per-channel override when one exists, then the registry default.
    pub fn resolve(&self, kind: ChannelKind) -> Result<String, ConfigError> {
        match self.mode {
            ColorSpaceMode::Manual => {
                if self.manual_override.is_empty() {
                    return Err(ConfigError::EmptyManualOverride);
                }
                Ok(self.manual_override.clone())
            }
            ColorSpaceMode::Custom => match self.overrides.get(&kind) {
                Some(value) if value.is_empty() => {
                    Err(ConfigError::EmptyChannelOverride { channel: kind })
                }
                Some(value) => Ok(value.clone()),
                None => Ok(kind.default_color_space().to_string()),
            },
            ColorSpaceMode::Auto => Ok(kind.default_color_space().to_string()),
        }
    }

    /// Validates the policy without resolving a specific channel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            ColorSpaceMode::Manual if self.manual_override.is_empty() => {
                Err(ConfigError::EmptyManualOverride)
            }
            ColorSpaceMode::Custom => {
                for (channel, value) in &self.overrides {
                    if value.is_empty() {
                        return Err(ConfigError::EmptyChannelOverride { channel: *channel });
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
