// SPDX-License-Identifier: GPL-3.0-only

//! Capture format selection
//!
//! Picks one hardware-reported format from an ordered list of preferences.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Camera binding layer         │  ← enumerates formats, applies results
//! └──────────────┬───────────────┘
//!                │ Vec<ConfigSpec>, Vec<FormatCandidate>
//!                ▼
//! ┌──────────────────────────────┐
//! │ orchestrator                 │  ← fps / stabilization, guarded callbacks
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │ scoring                      │  ← lexicographic ranking
//! └──────────────────────────────┘
//! ```

pub mod orchestrator;
pub mod scoring;
pub mod types;

pub use orchestrator::{
    CallbackError, CallbackResult, FormatSink, select_best_format, select_best_format_by_order,
    select_into,
};
pub use scoring::{get_best_format_by_order, sort_formats_by_resolution};
pub use types::*;
