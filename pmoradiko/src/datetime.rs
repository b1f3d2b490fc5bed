//! radiko timestamp format
//!
//! radiko addresses programs with `YYYYMMDDhhmmss` strings expressed in
//! Japan Standard Time.

use chrono::{DateTime, TimeDelta, Utc};

/// Offset of Japan Standard Time from UTC (JST has no daylight saving)
const JST_OFFSET_HOURS: i64 = 9;

/// Formats an instant into the service's timestamp representation
pub trait TimestampFormatter: Send + Sync {
    fn format(&self, instant: &DateTime<Utc>) -> String;
}

/// `YYYYMMDDhhmmss` in JST
#[derive(Debug, Clone, Copy, Default)]
pub struct RadikoDatetime;

impl TimestampFormatter for RadikoDatetime {
    fn format(&self, instant: &DateTime<Utc>) -> String {
        format_datetime(instant)
    }
}

/// Format an instant with the default radiko formatter
pub fn format_datetime(instant: &DateTime<Utc>) -> String {
    (instant.naive_utc() + TimeDelta::hours(JST_OFFSET_HOURS))
        .format("%Y%m%d%H%M%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_shifts_to_jst() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        assert_eq!(format_datetime(&t), "20240302050000");
    }

    #[test]
    fn test_formatter_trait() {
        let t = Utc.with_ymd_and_hms(2023, 12, 31, 0, 30, 15).unwrap();
        assert_eq!(RadikoDatetime.format(&t), "20231231093015");
    }
}
