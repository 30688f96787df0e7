// SPDX-License-Identifier: GPL-3.0-only

//! Format ranking
//!
//! Candidates are ranked with a single lexicographic comparator built from
//! the ordered preferences: the first preference decides, later ones only
//! break ties, and anything still tied keeps input order.

use super::types::{ConfigKind, ConfigSpec, FormatCandidate, StabilizationMode};
use std::cmp::Ordering;
use tracing::debug;

/// How well one candidate satisfies one preference. Higher is better.
///
/// Compared field by field, so `secondary` only matters when `primary` ties.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fitness {
    pub primary: f64,
    pub secondary: f64,
}

impl Fitness {
    const NEUTRAL: Fitness = Fitness::new(0.0, 0.0);

    const fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    fn rank(&self, other: &Fitness) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Stabilization support tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum StabilizationTier {
    /// Capability unknown
    Unknown,
    /// Known to support nothing
    NoModes,
    /// Supports other modes but not the requested one
    OtherModes,
    Exact,
}

fn stabilization_tier(format: &FormatCandidate, mode: StabilizationMode) -> StabilizationTier {
    match &format.video_stabilization_modes {
        None => StabilizationTier::Unknown,
        Some(modes) if modes.contains(&mode) => StabilizationTier::Exact,
        Some(modes) if modes.is_empty() => StabilizationTier::NoModes,
        Some(_) => StabilizationTier::OtherModes,
    }
}

/// Score a candidate against one preference
pub fn fitness(config: &ConfigSpec, format: &FormatCandidate) -> Fitness {
    match *config {
        ConfigSpec::Resolution { width, height } => {
            let target_area = u64::from(width) * u64::from(height);
            let area_distance = format.pixel_count().abs_diff(target_area);
            let dimension_distance = u64::from(format.width.abs_diff(width))
                + u64::from(format.height.abs_diff(height));
            Fitness::new(-(area_distance as f64), -(dimension_distance as f64))
        }
        ConfigSpec::AspectRatio { ratio } => {
            // Non-positive or non-finite ratios carry no preference
            if !ratio.is_finite() || ratio <= 0.0 {
                return Fitness::NEUTRAL;
            }
            Fitness::new(-(format.aspect_ratio() - ratio).abs(), 0.0)
        }
        ConfigSpec::FrameRate { fps } => {
            let distance = if fps < format.min_fps {
                format.min_fps - fps
            } else {
                fps.saturating_sub(format.max_fps)
            };
            Fitness::new(-f64::from(distance), 0.0)
        }
        ConfigSpec::VideoStabilization { mode } => {
            Fitness::new(stabilization_tier(format, mode) as u8 as f64, 0.0)
        }
    }
}

/// Drop repeated preferences of the same kind, keeping the first occurrence
pub fn effective_configs(configs: &[ConfigSpec]) -> Vec<ConfigSpec> {
    let mut seen: Vec<ConfigKind> = Vec::with_capacity(configs.len());
    let mut effective = Vec::with_capacity(configs.len());
    for config in configs {
        let kind = config.kind();
        if seen.contains(&kind) {
            debug!(%config, "Ignoring repeated preference");
            continue;
        }
        seen.push(kind);
        effective.push(*config);
    }
    effective
}

/// Compare two candidates under the ordered preferences.
///
/// `Ordering::Greater` means `a` ranks above `b`. With no preferences the
/// larger pixel count wins.
pub fn compare_formats(
    configs: &[ConfigSpec],
    a: &FormatCandidate,
    b: &FormatCandidate,
) -> Ordering {
    if configs.is_empty() {
        return a.pixel_count().cmp(&b.pixel_count());
    }

    configs
        .iter()
        .map(|config| fitness(config, a).rank(&fitness(config, b)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Pick the candidate that best satisfies `configs`, in priority order.
///
/// Returns `None` only when `formats` is empty. A single candidate is
/// returned as-is. Remaining ties go to the earliest candidate.
pub fn get_best_format_by_order<'a>(
    configs: &[ConfigSpec],
    formats: &'a [FormatCandidate],
) -> Option<&'a FormatCandidate> {
    if let [only] = formats {
        return Some(only);
    }

    let configs = effective_configs(configs);
    let best = formats.iter().reduce(|best, candidate| {
        if compare_formats(&configs, candidate, best) == Ordering::Greater {
            candidate
        } else {
            best
        }
    })?;

    debug!(
        format = %best,
        candidates = formats.len(),
        preferences = configs.len(),
        "Ranked formats"
    );
    Some(best)
}

/// Sort formats by resolution, highest first. Equal resolutions keep input order.
pub fn sort_formats_by_resolution(formats: &mut [FormatCandidate]) {
    formats.sort_by(|a, b| b.pixel_count().cmp(&a.pixel_count()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_format(width: u32, height: u32, min_fps: u32, max_fps: u32) -> FormatCandidate {
        FormatCandidate::new(width, height, min_fps, max_fps)
    }

    fn create_test_format_with_modes(
        width: u32,
        height: u32,
        modes: Vec<StabilizationMode>,
    ) -> FormatCandidate {
        FormatCandidate::new(width, height, 15, 30).with_stabilization_modes(modes)
    }

    #[test]
    fn test_empty_formats_returns_none() {
        let formats: Vec<FormatCandidate> = vec![];
        assert!(get_best_format_by_order(&[ConfigSpec::frame_rate(30)], &formats).is_none());
        assert!(get_best_format_by_order(&[], &formats).is_none());
    }

    #[test]
    fn test_single_format_always_wins() {
        let formats = vec![create_test_format(640, 480, 5, 10)];
        let configs = [
            ConfigSpec::resolution(3840, 2160),
            ConfigSpec::frame_rate(120),
            ConfigSpec::video_stabilization(StabilizationMode::Cinematic),
        ];
        assert_eq!(
            get_best_format_by_order(&configs, &formats),
            Some(&formats[0])
        );
    }

    #[test]
    fn test_no_configs_picks_max_resolution() {
        let formats = vec![
            create_test_format(1280, 720, 15, 30),
            create_test_format(3840, 2160, 15, 30),
            create_test_format(1920, 1080, 15, 60),
        ];
        let best = get_best_format_by_order(&[], &formats).unwrap();
        assert_eq!((best.width, best.height), (3840, 2160));
    }

    #[test]
    fn test_no_configs_tie_keeps_first() {
        let formats = vec![
            create_test_format(1920, 1080, 15, 30),
            create_test_format(1080, 1920, 15, 60),
            create_test_format(640, 480, 15, 30),
        ];
        let best = get_best_format_by_order(&[], &formats).unwrap();
        assert!(std::ptr::eq(best, &formats[0]));
    }

    #[test]
    fn test_zero_resolution_picks_smallest() {
        let formats = vec![
            create_test_format(1920, 1080, 15, 30),
            create_test_format(320, 240, 15, 30),
            create_test_format(640, 480, 15, 30),
        ];
        let best = get_best_format_by_order(&[ConfigSpec::resolution(0, 0)], &formats).unwrap();
        assert_eq!((best.width, best.height), (320, 240));
    }

    #[test]
    fn test_resolution_prefers_matching_orientation() {
        let formats = vec![
            create_test_format(1080, 1920, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        let best =
            get_best_format_by_order(&[ConfigSpec::resolution(1920, 1080)], &formats).unwrap();
        assert_eq!((best.width, best.height), (1920, 1080));
    }

    #[test]
    fn test_config_order_changes_winner() {
        let formats = vec![
            create_test_format(3840, 2160, 15, 30),
            create_test_format(640, 480, 15, 30),
        ];

        let aspect_first = [
            ConfigSpec::aspect_ratio(4.0 / 3.0),
            ConfigSpec::resolution(3840, 2160),
        ];
        let best = get_best_format_by_order(&aspect_first, &formats).unwrap();
        assert_eq!((best.width, best.height), (640, 480));

        let resolution_first = [
            ConfigSpec::resolution(3840, 2160),
            ConfigSpec::aspect_ratio(4.0 / 3.0),
        ];
        let best = get_best_format_by_order(&resolution_first, &formats).unwrap();
        assert_eq!((best.width, best.height), (3840, 2160));
    }

    #[test]
    fn test_later_config_breaks_ties() {
        let formats = vec![
            create_test_format(640, 480, 15, 30),
            create_test_format(1440, 1080, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        let configs = [
            ConfigSpec::aspect_ratio(4.0 / 3.0),
            ConfigSpec::resolution(1920, 1080),
        ];
        let best = get_best_format_by_order(&configs, &formats).unwrap();
        assert_eq!((best.width, best.height), (1440, 1080));
    }

    #[test]
    fn test_frame_rate_prefers_containing_range() {
        let formats = vec![
            create_test_format(1920, 1080, 24, 30),
            create_test_format(1280, 720, 24, 60),
            create_test_format(720, 480, 15, 24),
        ];
        let best = get_best_format_by_order(&[ConfigSpec::frame_rate(60)], &formats).unwrap();
        assert_eq!((best.width, best.height), (1280, 720));
    }

    #[test]
    fn test_frame_rate_prefers_nearest_range() {
        let formats = vec![
            create_test_format(1920, 1080, 5, 15),
            create_test_format(1280, 720, 10, 25),
        ];
        let best = get_best_format_by_order(&[ConfigSpec::frame_rate(30)], &formats).unwrap();
        assert_eq!((best.width, best.height), (1280, 720));

        let best = get_best_format_by_order(&[ConfigSpec::frame_rate(1)], &formats).unwrap();
        assert_eq!((best.width, best.height), (1920, 1080));
    }

    #[test]
    fn test_stabilization_tiers() {
        let empty = create_test_format_with_modes(640, 480, vec![]);
        let standard = create_test_format_with_modes(640, 480, vec![StabilizationMode::Standard]);
        let cinematic = create_test_format_with_modes(640, 480, vec![StabilizationMode::Cinematic]);
        let unknown = create_test_format(640, 480, 15, 30);
        let configs = [ConfigSpec::video_stabilization(StabilizationMode::Cinematic)];

        assert_eq!(
            compare_formats(&configs, &cinematic, &standard),
            Ordering::Greater
        );
        assert_eq!(
            compare_formats(&configs, &standard, &empty),
            Ordering::Greater
        );
        assert_eq!(compare_formats(&configs, &empty, &unknown), Ordering::Greater);
    }

    #[test]
    fn test_unknown_stabilization_can_still_win() {
        let formats = vec![
            create_test_format_with_modes(640, 480, vec![StabilizationMode::Cinematic]),
            create_test_format(1920, 1080, 15, 30),
        ];
        let configs = [
            ConfigSpec::resolution(1920, 1080),
            ConfigSpec::video_stabilization(StabilizationMode::Cinematic),
        ];
        let best = get_best_format_by_order(&configs, &formats).unwrap();
        assert_eq!((best.width, best.height), (1920, 1080));
    }

    #[test]
    fn test_repeated_config_uses_first() {
        let formats = vec![
            create_test_format(640, 480, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        let configs = [
            ConfigSpec::resolution(640, 480),
            ConfigSpec::resolution(1920, 1080),
        ];
        let best = get_best_format_by_order(&configs, &formats).unwrap();
        assert_eq!((best.width, best.height), (640, 480));
        assert_eq!(effective_configs(&configs).len(), 1);
    }

    #[test]
    fn test_huge_resolution_target_prefers_largest() {
        let formats = vec![
            create_test_format(1280, 720, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        let target: ConfigSpec = "resolution=4000000000x4000000000".parse().unwrap();
        let best = get_best_format_by_order(&[target], &formats).unwrap();
        assert_eq!((best.width, best.height), (1920, 1080));

        let at_limit = ConfigSpec::resolution(u32::MAX, u32::MAX);
        let score = fitness(&at_limit, &formats[0]);
        assert!(score.secondary < 0.0);
        assert!(score.secondary.is_finite());
    }

    #[test]
    fn test_invalid_aspect_ratio_is_ignored() {
        let formats = vec![
            create_test_format(640, 480, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        let configs = [
            ConfigSpec::aspect_ratio(f64::NAN),
            ConfigSpec::resolution(1920, 1080),
        ];
        let best = get_best_format_by_order(&configs, &formats).unwrap();
        assert_eq!((best.width, best.height), (1920, 1080));
    }

    #[test]
    fn test_sort_formats_by_resolution() {
        let mut formats = vec![
            create_test_format(640, 480, 15, 30),
            create_test_format(3840, 2160, 15, 30),
            create_test_format(1920, 1080, 15, 30),
        ];
        sort_formats_by_resolution(&mut formats);
        let widths: Vec<u32> = formats.iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![3840, 1920, 640]);
    }
}
