//! Preset codec and storage.
//!
//! A preset is a named, versioned snapshot of the whole [`BakeConfig`],
//! stored as one JSON record per name. Migration is additive only: decoding
//! an older record fills absent fields with defaults, and a record written by
//! a newer schema is rejected rather than reinterpreted.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::BakeConfig;
use crate::error::PresetError;

/// Current preset schema version.
pub const PRESET_VERSION: u32 = 2;

/// A named, versioned configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Schema version the record was written with.
    pub preset_version: u32,
    /// User-chosen preset name (sanitized).
    pub name: String,
    /// The configuration payload.
    #[serde(default)]
    pub config: BakeConfig,
}

impl Preset {
    /// Creates a preset at the current schema version.
    ///
    /// Fails if the name sanitizes to nothing.
    pub fn new(name: &str, config: BakeConfig) -> Result<Self, PresetError> {
        Ok(Self {
            preset_version: PRESET_VERSION,
            name: sanitize_preset_name(name)?,
            config,
        })
    }

    /// Decodes a preset record, applying defaults for fields absent in older
    /// versions.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let version = value
            .get("preset_version")
            .and_then(|v| v.as_u64())
            .ok_or(PresetError::MissingVersion)?;
        if version > u64::from(PRESET_VERSION) {
            return Err(PresetError::UnsupportedVersion {
                found: version,
                supported: PRESET_VERSION,
            });
        }
        let preset: Preset = serde_json::from_value(value)?;
        // Decoding migrates the record to the current schema.
        Ok(Preset {
            preset_version: PRESET_VERSION,
            ..preset
        })
    }

    /// Encodes the preset as a pretty-printed JSON record.
    pub fn to_json_pretty(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sanitizes a preset name the way stored filenames allow: alphanumerics,
/// space, `-`, and `_` survive, everything else is dropped, then trimmed.
pub fn sanitize_preset_name(name: &str) -> Result<String, PresetError> {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        return Err(PresetError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(cleaned)
}

/// Narrow storage interface so the planner stays free of I/O.
pub trait PresetStore {
    /// Creates or replaces the record under the preset's name.
    fn save(&mut self, preset: &Preset) -> Result<(), PresetError>;
    /// Loads and decodes the record under `name`.
    fn load(&self, name: &str) -> Result<Preset, PresetError>;
    /// Deletes the record under `name`.
    fn delete(&mut self, name: &str) -> Result<(), PresetError>;
    /// Lists stored preset names, sorted.
    fn list(&self) -> Result<Vec<String>, PresetError>;

    /// Returns true if a record exists under `name`.
    fn exists(&self, name: &str) -> bool {
        self.load(name).is_ok()
    }
}

/// Durable preset storage: one `{name}.json` file per preset.
#[derive(Debug, Clone)]
pub struct FsPresetStore {
    dir: PathBuf,
}

impl FsPresetStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, name: &str) -> Result<PathBuf, PresetError> {
        Ok(self.dir.join(format!("{}.json", sanitize_preset_name(name)?)))
    }
}

impl PresetStore for FsPresetStore {
    fn save(&mut self, preset: &Preset) -> Result<(), PresetError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(&preset.name)?;
        fs::write(path, preset.to_json_pretty()?)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Preset, PresetError> {
        let path = self.record_path(name)?;
        let json = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PresetError::NotFound {
                    name: name.to_string(),
                }
            } else {
                PresetError::Io(e)
            }
        })?;
        Preset::from_json(&json)
    }

    fn delete(&mut self, name: &str) -> Result<(), PresetError> {
        let path = self.record_path(name)?;
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PresetError::NotFound {
                    name: name.to_string(),
                }
            } else {
                PresetError::Io(e)
            }
        })
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(PresetError::Io(e)),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory store, for tests and embedding hosts that manage durability
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStore {
    records: BTreeMap<String, String>,
}

impl MemoryPresetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for MemoryPresetStore {
    fn save(&mut self, preset: &Preset) -> Result<(), PresetError> {
        self.records
            .insert(preset.name.clone(), preset.to_json_pretty()?);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Preset, PresetError> {
        let json = self.records.get(name).ok_or_else(|| PresetError::NotFound {
            name: name.to_string(),
        })?;
        Preset::from_json(json)
    }

    fn delete(&mut self, name: &str) -> Result<(), PresetError> {
        self.records
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| PresetError::NotFound {
                name: name.to_string(),
            })
    }

    fn list(&self) -> Result<Vec<String>, PresetError> {
        Ok(self.records.keys().cloned().collect())
    }
}
