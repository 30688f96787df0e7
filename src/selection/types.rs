// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for format selection

use crate::errors::ParseError;
use crate::utils::{parse_aspect_ratio, parse_resolution};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Video stabilization mode reported by the camera hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilizationMode {
    /// Stabilization disabled
    #[default]
    Off,
    /// Standard digital stabilization
    Standard,
    /// Let the platform decide
    Auto,
    /// Stabilization tuned for the preview stream only
    PreviewOptimized,
    /// Cinematic stabilization (stronger smoothing, higher latency)
    Cinematic,
    /// Extended cinematic stabilization
    CinematicExtended,
    /// Extended cinematic stabilization with enhanced smoothing
    CinematicExtendedEnhanced,
}

impl StabilizationMode {
    /// Get all modes for iteration
    pub const ALL: [StabilizationMode; 7] = [
        StabilizationMode::Off,
        StabilizationMode::Standard,
        StabilizationMode::Auto,
        StabilizationMode::PreviewOptimized,
        StabilizationMode::Cinematic,
        StabilizationMode::CinematicExtended,
        StabilizationMode::CinematicExtendedEnhanced,
    ];

    /// Machine-readable name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            StabilizationMode::Off => "off",
            StabilizationMode::Standard => "standard",
            StabilizationMode::Auto => "auto",
            StabilizationMode::PreviewOptimized => "preview_optimized",
            StabilizationMode::Cinematic => "cinematic",
            StabilizationMode::CinematicExtended => "cinematic_extended",
            StabilizationMode::CinematicExtendedEnhanced => "cinematic_extended_enhanced",
        }
    }
}

impl std::fmt::Display for StabilizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StabilizationMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        StabilizationMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| ParseError::UnknownStabilizationMode(s.to_string()))
    }
}

/// One capture preference
///
/// A caller passes these as an ordered slice: index 0 dominates and every
/// later entry only breaks ties left by the entries before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigSpec {
    /// Desired width/height ratio
    AspectRatio { ratio: f64 },
    /// Desired pixel dimensions. `0x0` asks for the smallest format.
    Resolution { width: u32, height: u32 },
    /// Desired frames per second
    FrameRate { fps: u32 },
    /// Desired stabilization mode
    VideoStabilization { mode: StabilizationMode },
}

/// Discriminant of [`ConfigSpec`], used to detect repeated preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    AspectRatio,
    Resolution,
    FrameRate,
    VideoStabilization,
}

impl ConfigSpec {
    pub fn aspect_ratio(ratio: f64) -> Self {
        ConfigSpec::AspectRatio { ratio }
    }

    pub fn resolution(width: u32, height: u32) -> Self {
        ConfigSpec::Resolution { width, height }
    }

    pub fn frame_rate(fps: u32) -> Self {
        ConfigSpec::FrameRate { fps }
    }

    pub fn video_stabilization(mode: StabilizationMode) -> Self {
        ConfigSpec::VideoStabilization { mode }
    }

    pub fn kind(&self) -> ConfigKind {
        match self {
            ConfigSpec::AspectRatio { .. } => ConfigKind::AspectRatio,
            ConfigSpec::Resolution { .. } => ConfigKind::Resolution,
            ConfigSpec::FrameRate { .. } => ConfigKind::FrameRate,
            ConfigSpec::VideoStabilization { .. } => ConfigKind::VideoStabilization,
        }
    }
}

impl std::fmt::Display for ConfigSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSpec::AspectRatio { ratio } => write!(f, "aspect={:.4}", ratio),
            ConfigSpec::Resolution { width, height } => {
                write!(f, "resolution={}x{}", width, height)
            }
            ConfigSpec::FrameRate { fps } => write!(f, "fps={}", fps),
            ConfigSpec::VideoStabilization { mode } => write!(f, "stabilization={}", mode),
        }
    }
}

/// Parse `key=value` preferences such as `resolution=1920x1080`,
/// `aspect=16:9`, `fps=60` or `stabilization=cinematic`
impl FromStr for ConfigSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ParseError::InvalidPreference(s.to_string()))?;
        let value = value.trim();

        match key.trim().to_ascii_lowercase().as_str() {
            "resolution" | "res" => {
                let (width, height) = parse_resolution(value)
                    .ok_or_else(|| ParseError::InvalidResolution(value.to_string()))?;
                Ok(ConfigSpec::resolution(width, height))
            }
            "aspect" | "aspect_ratio" | "ratio" => parse_aspect_ratio(value)
                .map(ConfigSpec::aspect_ratio)
                .ok_or_else(|| ParseError::InvalidAspectRatio(value.to_string())),
            "fps" | "framerate" | "frame_rate" => value
                .parse::<u32>()
                .map(ConfigSpec::frame_rate)
                .map_err(|_| ParseError::InvalidFrameRate(value.to_string())),
            "stabilization" | "stab" => value.parse().map(ConfigSpec::video_stabilization),
            _ => Err(ParseError::InvalidPreference(s.to_string())),
        }
    }
}

/// One hardware-reported capture capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCandidate {
    pub width: u32,
    pub height: u32,
    /// Lowest supported frame rate (inclusive)
    pub min_fps: u32,
    /// Highest supported frame rate (inclusive)
    pub max_fps: u32,
    /// Supported stabilization modes. `None` means the capability is unknown,
    /// which is not the same as an empty list.
    #[serde(default)]
    pub video_stabilization_modes: Option<Vec<StabilizationMode>>,
}

impl FormatCandidate {
    /// Create a candidate with unknown stabilization support
    pub fn new(width: u32, height: u32, min_fps: u32, max_fps: u32) -> Self {
        Self {
            width,
            height,
            min_fps,
            max_fps,
            video_stabilization_modes: None,
        }
    }

    pub fn with_stabilization_modes(mut self, modes: Vec<StabilizationMode>) -> Self {
        self.video_stabilization_modes = Some(modes);
        self
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn supports_fps(&self, fps: u32) -> bool {
        self.min_fps <= fps && fps <= self.max_fps
    }

    /// Clamp `fps` into the supported range
    ///
    /// Does not panic on a malformed range (`min_fps > max_fps`); the upper
    /// bound wins in that case.
    pub fn clamp_fps(&self, fps: u32) -> u32 {
        fps.max(self.min_fps).min(self.max_fps)
    }

    pub fn supports_stabilization(&self, mode: StabilizationMode) -> bool {
        self.video_stabilization_modes
            .as_ref()
            .is_some_and(|modes| modes.contains(&mode))
    }
}

impl std::fmt::Display for FormatCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} @ {}-{}fps",
            self.width, self.height, self.min_fps, self.max_fps
        )?;
        match &self.video_stabilization_modes {
            Some(modes) if !modes.is_empty() => {
                let names: Vec<&str> = modes.iter().map(|m| m.name()).collect();
                write!(f, " [{}]", names.join(", "))
            }
            Some(_) => write!(f, " [no stabilization]"),
            None => Ok(()),
        }
    }
}

/// Winning format plus the concrete settings derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub format: FormatCandidate,
    pub fps: u32,
    pub stabilization_mode: StabilizationMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_spec() {
        assert_eq!(
            "resolution=1920x1080".parse::<ConfigSpec>().unwrap(),
            ConfigSpec::resolution(1920, 1080)
        );
        assert_eq!(
            "fps=60".parse::<ConfigSpec>().unwrap(),
            ConfigSpec::frame_rate(60)
        );
        assert_eq!(
            "stabilization=cinematic".parse::<ConfigSpec>().unwrap(),
            ConfigSpec::video_stabilization(StabilizationMode::Cinematic)
        );
        match "aspect=4:3".parse::<ConfigSpec>().unwrap() {
            ConfigSpec::AspectRatio { ratio } => assert!((ratio - 4.0 / 3.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_spec_rejects_garbage() {
        assert!("resolution".parse::<ConfigSpec>().is_err());
        assert!("resolution=-1x10".parse::<ConfigSpec>().is_err());
        assert!("fps=fast".parse::<ConfigSpec>().is_err());
        assert!("aspect=0:3".parse::<ConfigSpec>().is_err());
        assert!("zoom=2".parse::<ConfigSpec>().is_err());
        assert!("stabilization=wobbly".parse::<ConfigSpec>().is_err());
    }

    #[test]
    fn test_stabilization_mode_names_round_trip() {
        for mode in StabilizationMode::ALL {
            assert_eq!(mode.name().parse::<StabilizationMode>().unwrap(), mode);
        }
        assert_eq!(
            "Cinematic-Extended".parse::<StabilizationMode>().unwrap(),
            StabilizationMode::CinematicExtended
        );
    }

    #[test]
    fn test_clamp_fps() {
        let format = FormatCandidate::new(1280, 720, 24, 60);
        assert_eq!(format.clamp_fps(10), 24);
        assert_eq!(format.clamp_fps(120), 60);
        assert_eq!(format.clamp_fps(30), 30);
        assert!(format.supports_fps(60));
        assert!(!format.supports_fps(61));
    }

    #[test]
    fn test_clamp_fps_malformed_range_does_not_panic() {
        let format = FormatCandidate::new(1280, 720, 60, 30);
        assert_eq!(format.clamp_fps(45), 30);
    }

    #[test]
    fn test_supports_stabilization_distinguishes_unknown() {
        let unknown = FormatCandidate::new(640, 480, 15, 30);
        let empty = FormatCandidate::new(640, 480, 15, 30).with_stabilization_modes(vec![]);
        let standard = FormatCandidate::new(640, 480, 15, 30)
            .with_stabilization_modes(vec![StabilizationMode::Standard]);

        assert!(!unknown.supports_stabilization(StabilizationMode::Standard));
        assert!(!empty.supports_stabilization(StabilizationMode::Standard));
        assert!(standard.supports_stabilization(StabilizationMode::Standard));
    }

    #[test]
    fn test_format_candidate_json() {
        let json = r#"{"width":1920,"height":1080,"min_fps":24,"max_fps":30}"#;
        let format: FormatCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(format, FormatCandidate::new(1920, 1080, 24, 30));
        assert_eq!(format.pixel_count(), 1920 * 1080);
    }
}
