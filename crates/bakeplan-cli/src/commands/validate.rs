//! Validate command implementation
//!
//! Checks a bake configuration file for errors without planning anything.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use bakeplan_spec::ConfigError;

use crate::input::load_config;

/// Machine-readable validate output.
#[derive(Debug, Serialize)]
struct ValidateOutput {
    ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolutions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channels: Option<Vec<String>>,
}

/// Run the validate command.
///
/// # Returns
/// Exit code: 0 if the config is valid, 1 if invalid.
pub fn run(config_path: &Path, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

fn run_human(config_path: &Path) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path.display());

    let config = load_config(config_path)?;

    match validate(&config) {
        Ok(summary) => {
            println!(
                "{} {} channel(s), {} resolution(s)",
                "Plan scope:".dimmed(),
                summary.channels.len(),
                summary.resolutions.len()
            );
            for label in &summary.resolutions {
                println!("  {} {}", "-".dimmed(), label);
            }
            println!("\n{} Config is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            println!(
                "\n{} Config has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(config_path: &Path) -> Result<ExitCode> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            let output = ValidateOutput {
                ok: false,
                errors: vec![format!("{:#}", err)],
                resolutions: None,
                channels: None,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };

    let (ok, errors, summary) = match validate(&config) {
        Ok(summary) => (true, Vec::new(), Some(summary)),
        Err(errors) => (false, errors, None),
    };
    let output = ValidateOutput {
        ok,
        errors,
        resolutions: summary.as_ref().map(|s| s.resolutions.clone()),
        channels: summary.as_ref().map(|s| s.channels.clone()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

#[derive(Debug)]
struct ValidSummary {
    resolutions: Vec<String>,
    channels: Vec<String>,
}

/// Collects every validation error rather than stopping at the first.
fn validate(config: &bakeplan_spec::BakeConfig) -> Result<ValidSummary, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(err) = config.validate() {
        errors.push(err.to_string());
    }
    let resolutions = match config.resolutions.resolve() {
        Ok(resolutions) => resolutions,
        Err(err) => {
            push_unique(&mut errors, err);
            Vec::new()
        }
    };
    for channel in &config.channels {
        if let Err(err) = config.color_space.resolve(*channel) {
            push_unique(&mut errors, err);
        }
    }

    if errors.is_empty() {
        Ok(ValidSummary {
            resolutions: resolutions.iter().map(|r| r.label()).collect(),
            channels: config.channels.iter().map(|c| c.to_string()).collect(),
        })
    } else {
        Err(errors)
    }
}

fn push_unique(errors: &mut Vec<String>, err: ConfigError) {
    let message = err.to_string();
    if !errors.contains(&message) {
        errors.push(message);
    }
}
