// SPDX-License-Identifier: GPL-3.0-only

use camera_format::ConfigSpec;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-format")]
#[command(about = "Pick the best camera capture format for a set of preferences")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the best format
    Select {
        /// JSON file with an array of formats
        #[arg(short, long)]
        formats: PathBuf,

        /// Preference, highest priority first (e.g. resolution=1920x1080,
        /// aspect=16:9, fps=60, stabilization=cinematic)
        #[arg(short, long = "prefer")]
        prefer: Vec<ConfigSpec>,

        /// Print the selection as JSON
        #[arg(long)]
        json: bool,
    },

    /// List formats, highest resolution first
    List {
        /// JSON file with an array of formats
        #[arg(short, long)]
        formats: PathBuf,

        /// Show every format
        #[arg(short, long)]
        all: bool,
    },

    /// Show or change the default preferences
    Config {
        /// Replace the stored preferences
        #[arg(short, long = "set")]
        set: Vec<ConfigSpec>,

        /// Remove all stored preferences
        #[arg(long, conflicts_with = "set")]
        clear: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camera_format=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Select {
            formats,
            prefer,
            json,
        } => cli::select(config_path, &formats, prefer, json)?,
        Commands::List { formats, all } => cli::list_formats(config_path, &formats, all)?,
        Commands::Config { set, clear } => cli::config(config_path, set, clear)?,
    }

    Ok(())
}
