//! Time and duration helpers.
//!
//! Conversions saturate instead of truncating, and clock formatting follows
//! the `m:ss` style shown next to the seek bar.

use std::time::Duration;

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    fn as_millis_u64(&self) -> u64;

    /// Convert duration to seconds as u32, saturating at `u32::MAX`.
    ///
    /// `u32::MAX` seconds is approximately 136 years, far beyond any track.
    fn as_secs_u32(&self) -> u32;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }

    fn as_secs_u32(&self) -> u32 {
        u32::try_from(self.as_secs()).unwrap_or(u32::MAX)
    }
}

/// Format a duration as `m:ss`, truncating sub-second precision.
///
/// Minutes are not wrapped into hours, so a 75 minute mix shows `75:00`.
#[must_use]
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs_u32();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format an optional duration, rendering unknown durations as `0:00`.
#[must_use]
pub fn format_optional_clock(duration: Option<Duration>) -> String {
    duration.map_or_else(|| format_clock(Duration::ZERO), format_clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_millis_u64() {
        let duration = Duration::from_millis(1234);
        assert_eq!(duration.as_millis_u64(), 1234);
    }

    #[test]
    fn test_as_secs_u32_large() {
        let duration = Duration::from_secs(u64::from(u32::MAX) + 1);
        assert_eq!(duration.as_secs_u32(), u32::MAX);
    }

    #[test]
    fn test_format_clock_zero() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
    }

    #[test]
    fn test_format_clock_pads_seconds() {
        assert_eq!(format_clock(Duration::from_secs(65)), "1:05");
        assert_eq!(format_clock(Duration::from_secs(186)), "3:06");
    }

    #[test]
    fn test_format_clock_truncates_fraction() {
        assert_eq!(format_clock(Duration::from_millis(59_999)), "0:59");
    }

    #[test]
    fn test_format_clock_does_not_wrap_hours() {
        assert_eq!(format_clock(Duration::from_secs(75 * 60)), "75:00");
    }

    #[test]
    fn test_format_optional_clock_unknown() {
        assert_eq!(format_optional_clock(None), "0:00");
        assert_eq!(format_optional_clock(Some(Duration::from_secs(212))), "3:32");
    }
}
