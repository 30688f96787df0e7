// SPDX-License-Identifier: GPL-3.0-only

//! String parsing helpers

/// Parse resolution string in format "WIDTHxHEIGHT"
pub fn parse_resolution(resolution_str: &str) -> Option<(u32, u32)> {
    let (width, height) = resolution_str.trim().split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

/// Parse an aspect ratio given as "W:H", "W/H" or a plain decimal
///
/// Only finite, positive ratios are accepted.
pub fn parse_aspect_ratio(ratio_str: &str) -> Option<f64> {
    let ratio_str = ratio_str.trim();
    let ratio = match ratio_str.split_once([':', '/']) {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().ok()?;
            let h: f64 = h.trim().parse().ok()?;
            w / h
        }
        None => ratio_str.parse().ok()?,
    };

    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}
