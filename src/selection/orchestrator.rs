// SPDX-License-Identifier: GPL-3.0-only

//! Selection orchestration
//!
//! Runs the ranking, derives the frame rate and stabilization mode for the
//! winner, and hands each result to its own sink. Every sink call is guarded
//! separately, so a failing frame-rate sink never suppresses the format or
//! stabilization updates.

use super::scoring::get_best_format_by_order;
use super::types::{ConfigSpec, FormatCandidate, SelectionResult, StabilizationMode};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{info, warn};

/// Error a sink may report. It is logged and discarded.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by every sink
pub type CallbackResult = Result<(), CallbackError>;

/// Receiver for a selection, typically the layer that applies it to a
/// native camera session
pub trait FormatSink {
    fn on_format_changed(&mut self, format: &FormatCandidate) -> CallbackResult;

    fn on_frame_rate_changed(&mut self, fps: u32) -> CallbackResult;

    fn on_stabilization_mode_changed(&mut self, mode: StabilizationMode) -> CallbackResult;
}

/// Frame rate to apply to `format`
///
/// The first frame-rate preference is clamped into the supported range;
/// without one the highest supported rate is used.
pub fn derive_frame_rate(configs: &[ConfigSpec], format: &FormatCandidate) -> u32 {
    configs
        .iter()
        .find_map(|config| match config {
            ConfigSpec::FrameRate { fps } => Some(format.clamp_fps(*fps)),
            _ => None,
        })
        .unwrap_or(format.max_fps)
}

/// Stabilization mode to apply to `format`
///
/// The first stabilization preference is used only when the format reports
/// support for it; everything else falls back to [`StabilizationMode::Off`].
pub fn derive_stabilization_mode(
    configs: &[ConfigSpec],
    format: &FormatCandidate,
) -> StabilizationMode {
    configs
        .iter()
        .find_map(|config| match config {
            ConfigSpec::VideoStabilization { mode } => Some(*mode),
            _ => None,
        })
        .filter(|mode| format.supports_stabilization(*mode))
        .unwrap_or_default()
}

/// Rank `formats` and derive the concrete settings for the winner
pub fn select_best_format(
    configs: &[ConfigSpec],
    formats: &[FormatCandidate],
) -> Option<SelectionResult> {
    let format = get_best_format_by_order(configs, formats)?;
    let selection = SelectionResult {
        format: format.clone(),
        fps: derive_frame_rate(configs, format),
        stabilization_mode: derive_stabilization_mode(configs, format),
    };

    info!(
        format = %selection.format,
        fps = selection.fps,
        stabilization = %selection.stabilization_mode,
        "Selected capture format"
    );
    Some(selection)
}

/// Run one sink call, swallowing both returned errors and panics
fn guarded<F>(callback: &'static str, f: F)
where
    F: FnOnce() -> CallbackResult,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(callback, error = %e, "Selection callback failed"),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(callback, panic = %message, "Selection callback panicked");
        }
    }
}

/// Select the best format and report it through three independent callbacks.
///
/// Nothing is called when `formats` is empty. Otherwise the callbacks run in
/// the order format, frame rate, stabilization mode; each one's failure is
/// logged and does not stop the others or reach the caller.
///
/// Returns the selection that was dispatched.
pub fn select_best_format_by_order<F, R, S>(
    configs: &[ConfigSpec],
    formats: &[FormatCandidate],
    on_format_changed: F,
    on_frame_rate_changed: R,
    on_stabilization_mode_changed: S,
) -> Option<SelectionResult>
where
    F: FnOnce(&FormatCandidate) -> CallbackResult,
    R: FnOnce(u32) -> CallbackResult,
    S: FnOnce(StabilizationMode) -> CallbackResult,
{
    let selection = select_best_format(configs, formats)?;

    guarded("on_format_changed", || on_format_changed(&selection.format));
    guarded("on_frame_rate_changed", || {
        on_frame_rate_changed(selection.fps)
    });
    guarded("on_stabilization_mode_changed", || {
        on_stabilization_mode_changed(selection.stabilization_mode)
    });

    Some(selection)
}

/// [`select_best_format_by_order`] for a [`FormatSink`] implementation
pub fn select_into<T: FormatSink + ?Sized>(
    configs: &[ConfigSpec],
    formats: &[FormatCandidate],
    sink: &mut T,
) -> Option<SelectionResult> {
    let selection = select_best_format(configs, formats)?;

    guarded("on_format_changed", || {
        sink.on_format_changed(&selection.format)
    });
    guarded("on_frame_rate_changed", || {
        sink.on_frame_rate_changed(selection.fps)
    });
    guarded("on_stabilization_mode_changed", || {
        sink.on_stabilization_mode_changed(selection.stabilization_mode)
    });

    Some(selection)
}
