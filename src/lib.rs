// SPDX-License-Identifier: GPL-3.0-only

//! Camera capture format selection
//!
//! Given an ordered list of capture preferences and the formats a camera
//! reports, this crate picks the single best format and derives the frame
//! rate and stabilization mode to apply with it.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`selection`]: Preference and format types, ranking and dispatch
//! - [`config`]: Persisted default preferences
//! - [`errors`]: Error types
//! - [`utils`]: String parsing helpers
//!
//! # Example
//!
//! ```
//! use camera_format::{ConfigSpec, FormatCandidate, select_best_format};
//!
//! let formats = vec![
//!     FormatCandidate::new(1920, 1080, 24, 30),
//!     FormatCandidate::new(1280, 720, 24, 60),
//! ];
//! let selection = select_best_format(&[ConfigSpec::frame_rate(60)], &formats).unwrap();
//! assert_eq!(selection.format.width, 1280);
//! assert_eq!(selection.fps, 60);
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use selection::{
    ConfigSpec, FormatCandidate, FormatSink, SelectionResult, StabilizationMode,
    get_best_format_by_order, select_best_format, select_best_format_by_order, select_into,
};
