// SPDX-License-Identifier: GPL-3.0-only

//! Error types for format selection

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Format list could not be read
    #[error("Failed to read formats from {path}: {reason}")]
    Formats { path: String, reason: String },
    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory
    #[error("No configuration directory available")]
    NoConfigDir,
    /// Reading or writing the file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// File contents are not valid
    #[error("Invalid configuration in {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors parsing preferences from strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid preference '{0}', expected KEY=VALUE")]
    InvalidPreference(String),
    #[error("Invalid resolution '{0}', expected WIDTHxHEIGHT")]
    InvalidResolution(String),
    #[error("Invalid aspect ratio '{0}'")]
    InvalidAspectRatio(String),
    #[error("Invalid frame rate '{0}'")]
    InvalidFrameRate(String),
    #[error("Unknown stabilization mode '{0}'")]
    UnknownStabilizationMode(String),
}
