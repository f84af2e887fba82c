//! Preset command implementation
//!
//! Save, show, list, and delete named configuration presets stored as JSON
//! files in a preset directory.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use bakeplan_spec::{FsPresetStore, Preset, PresetStore};

use crate::input::load_config;

/// Run `preset save`: snapshot a config file under a preset name.
pub fn save(dir: &Path, name: &str, config_path: &Path) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let preset = Preset::new(name, config)
        .with_context(|| format!("Invalid preset name: {:?}", name))?;

    let mut store = FsPresetStore::new(dir);
    store
        .save(&preset)
        .with_context(|| format!("Failed to save preset '{}'", preset.name))?;

    println!(
        "{} Saved preset '{}' to {}",
        "SUCCESS".green().bold(),
        preset.name,
        dir.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Run `preset show`: print a stored preset as pretty JSON.
pub fn show(dir: &Path, name: &str) -> Result<ExitCode> {
    let store = FsPresetStore::new(dir);
    let preset = match store.load(name) {
        Ok(preset) => preset,
        Err(err) => {
            println!("{} {}", "FAILED".red().bold(), err);
            return Ok(ExitCode::from(1));
        }
    };
    println!("{}", preset.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

/// Run `preset list`: print stored preset names, one per line.
pub fn list(dir: &Path) -> Result<ExitCode> {
    let store = FsPresetStore::new(dir);
    let names = store
        .list()
        .with_context(|| format!("Failed to list presets in {}", dir.display()))?;

    if names.is_empty() {
        println!("{} (no presets in {})", "Presets:".cyan().bold(), dir.display());
    } else {
        println!("{}", "Presets:".cyan().bold());
        for name in &names {
            println!("  {}", name);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Run `preset delete`: remove a stored preset.
pub fn delete(dir: &Path, name: &str) -> Result<ExitCode> {
    let mut store = FsPresetStore::new(dir);
    if let Err(err) = store.delete(name) {
        println!("{} {}", "FAILED".red().bold(), err);
        return Ok(ExitCode::from(1));
    }
    println!("{} Deleted preset '{}'", "SUCCESS".green().bold(), name);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::process::ExitCode;

    fn exit_ok(code: ExitCode) -> bool {
        // ExitCode has no accessor; compare against the known constants.
        format!("{:?}", code) == format!("{:?}", ExitCode::SUCCESS)
    }

    #[test]
    fn save_then_show_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{}").unwrap();
        let preset_dir = dir.path().join("presets");

        let code = save(&preset_dir, "studio default", &config_path).unwrap();
        assert!(exit_ok(code));
        assert!(preset_dir.join("studio default.json").exists());

        let code = show(&preset_dir, "studio default").unwrap();
        assert!(exit_ok(code));
    }

    #[test]
    fn show_missing_preset_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let code = show(dir.path(), "nope").unwrap();
        assert!(!exit_ok(code));
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{}").unwrap();
        let preset_dir = dir.path().join("presets");

        save(&preset_dir, "temp", &config_path).unwrap();
        let code = delete(&preset_dir, "temp").unwrap();
        assert!(exit_ok(code));
        assert!(!preset_dir.join("temp.json").exists());
    }
}
