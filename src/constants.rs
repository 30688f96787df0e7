// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// 4:3, the native ratio of most sensors
pub const ASPECT_RATIO_4_3: f64 = 4.0 / 3.0;

/// 16:9 widescreen
pub const ASPECT_RATIO_16_9: f64 = 16.0 / 9.0;

/// Square
pub const ASPECT_RATIO_1_1: f64 = 1.0;

/// Application directory name under the platform config dir
pub const APP_CONFIG_DIR: &str = "camera-format";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Number of formats `list` shows unless asked for all of them
pub const LIST_DISPLAY_COUNT: usize = 5;
