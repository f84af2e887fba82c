//! Plan command implementation
//!
//! Builds the full bake plan for a config/scene pair and prints it.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use bakeplan_core::planner::{self, BakePlan};
use bakeplan_spec::PlanWarning;

use crate::input::{load_config, load_scene};

/// Machine-readable plan output.
#[derive(Debug, Serialize)]
struct PlanOutput<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a BakePlan>,
}

/// Run the plan command.
///
/// # Arguments
/// * `config_path` - Path to the bake config JSON
/// * `scene_path` - Path to the scene snapshot JSON
/// * `json_output` - Emit the whole plan as JSON instead of a listing
/// * `pretty` - Pretty-print the JSON output
///
/// # Returns
/// Exit code: 0 on a successful plan, 1 on a planning failure.
pub fn run(
    config_path: &Path,
    scene_path: &Path,
    json_output: bool,
    pretty: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, scene_path, pretty)
    } else {
        run_human(config_path, scene_path)
    }
}

fn run_human(config_path: &Path, scene_path: &Path) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Config:".cyan().bold(), config_path.display());
    println!("{} {}", "Scene:".cyan().bold(), scene_path.display());

    let config = load_config(config_path)?;
    let scene = load_scene(scene_path)?;

    let plan = match planner::plan(&config, &scene) {
        Ok(plan) => plan,
        Err(err) => {
            println!("\n{} {}", "FAILED".red().bold(), err);
            return Ok(ExitCode::from(1));
        }
    };

    let duration_ms = start.elapsed().as_millis();

    for warning in &plan.warnings {
        println!("  {} {}", "!".yellow(), warning_line(warning));
    }
    if !plan.warnings.is_empty() {
        println!();
    }

    let mut current_object: Option<&str> = None;
    for target in &plan.targets {
        if current_object != Some(target.object.as_str()) {
            println!("{}", target.object.bold());
            current_object = Some(target.object.as_str());
        }
        println!("  {}", target.output_path.display());
    }

    for atlas in &plan.atlases {
        println!(
            "{} {}_Atlas ({} material(s), {}x{} grid)",
            "Atlas:".dimmed(),
            atlas.object,
            atlas.layout.placements.len(),
            atlas.layout.rows,
            atlas.layout.cols
        );
    }

    println!(
        "\n{} {} target(s), {} warning(s) ({}ms)",
        "SUCCESS".green().bold(),
        plan.len(),
        plan.warnings.len(),
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(config_path: &Path, scene_path: &Path, pretty: bool) -> Result<ExitCode> {
    let result = build_plan(config_path, scene_path);

    let (output, code) = match &result {
        Ok(plan) => (
            PlanOutput {
                ok: true,
                errors: Vec::new(),
                plan: Some(plan),
            },
            ExitCode::SUCCESS,
        ),
        Err(err) => (
            PlanOutput {
                ok: false,
                errors: vec![format!("{:#}", err)],
                plan: None,
            },
            ExitCode::from(1),
        ),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(code)
}

fn build_plan(config_path: &Path, scene_path: &Path) -> Result<BakePlan> {
    let config = load_config(config_path)?;
    let scene = load_scene(scene_path)?;
    Ok(planner::plan(&config, &scene)?)
}

fn warning_line(warning: &PlanWarning) -> String {
    warning.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakeplan_spec::ChannelKind;

    #[test]
    fn warning_line_names_the_target() {
        let warning = PlanWarning::SkippedTarget {
            object: "Chair".to_string(),
            material: "Glass".to_string(),
            channel: ChannelKind::BaseColor,
            reason: "material has no principled shader".to_string(),
        };
        let line = warning_line(&warning);
        assert!(line.contains("Chair"));
        assert!(line.contains("Glass"));
    }
}
