//! Input file loading for the CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use bakeplan_core::host::SceneSnapshot;
use bakeplan_spec::BakeConfig;

/// Loads a bake configuration from a JSON file. Missing fields fall back to
/// their defaults, unknown fields are rejected.
pub fn load_config(path: &Path) -> Result<BakeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = BakeConfig::from_json(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Loads a scene snapshot from a JSON file.
pub fn load_scene(path: &Path) -> Result<SceneSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
    let scene = SceneSnapshot::from_json(&raw)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    Ok(scene)
}
