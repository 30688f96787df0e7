// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Selecting a format from a JSON format list
//! - Listing formats
//! - Managing stored default preferences

use camera_format::constants::LIST_DISPLAY_COUNT;
use camera_format::errors::AppError;
use camera_format::selection::sort_formats_by_resolution;
use camera_format::{AppResult, Config, ConfigSpec, FormatCandidate, select_best_format};
use std::path::{Path, PathBuf};
use tracing::info;

fn resolve_config_path(config_path: Option<PathBuf>) -> AppResult<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => Ok(Config::default_path()?),
    }
}

fn load_config(config_path: Option<PathBuf>) -> AppResult<Config> {
    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Read a JSON array of formats
pub fn read_formats(path: &Path) -> AppResult<Vec<FormatCandidate>> {
    let formats_error = |reason: String| AppError::Formats {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| formats_error(e.to_string()))?;
    let formats: Vec<FormatCandidate> =
        serde_json::from_str(&contents).map_err(|e| formats_error(e.to_string()))?;

    info!(count = formats.len(), path = %path.display(), "Loaded formats");
    Ok(formats)
}

/// Select the best format and print it
pub fn select(
    config_path: Option<PathBuf>,
    formats_path: &Path,
    prefer: Vec<ConfigSpec>,
    json: bool,
) -> AppResult<()> {
    let formats = read_formats(formats_path)?;

    let preferences = if prefer.is_empty() {
        load_config(config_path)?.preferences
    } else {
        prefer
    };

    let Some(selection) = select_best_format(&preferences, &formats) else {
        println!("No formats available.");
        return Ok(());
    };

    if json {
        let output =
            serde_json::to_string_pretty(&selection).map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    if !preferences.is_empty() {
        let names: Vec<String> = preferences.iter().map(ToString::to_string).collect();
        println!("Preferences:    {}", names.join(", "));
    }
    println!("Format:         {}", selection.format);
    println!("Frame rate:     {} fps", selection.fps);
    println!("Stabilization:  {}", selection.stabilization_mode);
    Ok(())
}

/// List formats, highest resolution first
pub fn list_formats(config_path: Option<PathBuf>, formats_path: &Path, all: bool) -> AppResult<()> {
    let mut formats = read_formats(formats_path)?;
    if formats.is_empty() {
        println!("No formats found.");
        return Ok(());
    }

    let show_all = all || load_config(config_path)?.show_all_formats;
    sort_formats_by_resolution(&mut formats);

    let display_count = if show_all {
        formats.len()
    } else {
        formats.len().min(LIST_DISPLAY_COUNT)
    };

    println!("Available formats:");
    println!();
    for (index, format) in formats.iter().take(display_count).enumerate() {
        println!("  [{}] {}", index, format);
    }
    if display_count < formats.len() {
        println!();
        println!("  ... {} more (use --all)", formats.len() - display_count);
    }
    Ok(())
}

/// Show or update stored preferences
pub fn config(config_path: Option<PathBuf>, set: Vec<ConfigSpec>, clear: bool) -> AppResult<()> {
    let path = resolve_config_path(config_path)?;
    let mut config = Config::load_from(&path)?;

    if clear || !set.is_empty() {
        config.preferences = set;
        config.save_to(&path)?;
    }

    println!("Config file: {}", path.display());
    if config.preferences.is_empty() {
        println!("Preferences: none (highest resolution wins)");
    } else {
        println!("Preferences (highest priority first):");
        for (index, preference) in config.preferences.iter().enumerate() {
            println!("  {}. {}", index + 1, preference);
        }
    }
    Ok(())
}
