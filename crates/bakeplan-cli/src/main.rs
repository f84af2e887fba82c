//! Bakeplan CLI - Command-line interface for texture bake planning
//!
//! This binary provides commands for validating bake configurations,
//! expanding them into full bake plans, and managing named presets.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bakeplan_cli::commands;

/// Bakeplan - Texture Bake Planning
#[derive(Parser)]
#[command(name = "bakeplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a bake configuration file
    Validate {
        /// Path to the config JSON file
        #[arg(short, long)]
        config: PathBuf,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Expand a config and scene snapshot into a full bake plan
    Plan {
        /// Path to the config JSON file
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the scene snapshot JSON file
        #[arg(short, long)]
        scene: PathBuf,

        /// Output the whole plan as JSON instead of a listing
        #[arg(long)]
        json: bool,

        /// Pretty-print the JSON output (implies --json)
        #[arg(long)]
        pretty: bool,
    },

    /// Manage named configuration presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Save a config file as a named preset
    Save {
        /// Preset name
        name: String,

        /// Path to the config JSON file to snapshot
        #[arg(short, long)]
        config: PathBuf,

        /// Preset directory
        #[arg(long, default_value = "presets")]
        dir: PathBuf,
    },

    /// Print a stored preset as JSON
    Show {
        /// Preset name
        name: String,

        /// Preset directory
        #[arg(long, default_value = "presets")]
        dir: PathBuf,
    },

    /// List stored presets
    List {
        /// Preset directory
        #[arg(long, default_value = "presets")]
        dir: PathBuf,
    },

    /// Delete a stored preset
    Delete {
        /// Preset name
        name: String,

        /// Preset directory
        #[arg(long, default_value = "presets")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Plan {
            config,
            scene,
            json,
            pretty,
        } => commands::plan::run(&config, &scene, json || pretty, pretty),
        Commands::Preset { action } => match action {
            PresetAction::Save { name, config, dir } => commands::preset::save(&dir, &name, &config),
            PresetAction::Show { name, dir } => commands::preset::show(&dir, &name),
            PresetAction::List { dir } => commands::preset::list(&dir),
            PresetAction::Delete { name, dir } => commands::preset::delete(&dir, &name),
        },
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
