// crates/core/src/timestamp.rs
//! Best-effort timestamp normalization for sensor and ticket logs.
//!
//! The logs on the vehicle host are written by several independent tools, so
//! one column may hold RFC 3339 with an offset, a naive local-looking datetime,
//! a bare date, or the Torque-style `Tue Jul 01 13:16:08 GMT+05:30 2025`.
//! Naive values carry no zone information and are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Formats that carry an explicit offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%a %b %d %H:%M:%S GMT%:z %Y",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%b-%Y %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Parse a timestamp in any of the shapes the vehicle logs produce.
///
/// Returns `None` for empty or unrecognised input; callers decide whether to
/// fall back to "now" or keep the raw text.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Render a timestamp the way the ticket file stores it (`2025-07-01T11:49:14.800Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_with_offset() {
        let ts = parse_timestamp("2025-07-01T13:16:08.723716+05:30").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-07-01T07:46:08.723716+00:00");
    }

    #[test]
    fn test_zulu() {
        let ts = parse_timestamp("2025-07-01T11:49:14.800Z").unwrap();
        let whole = Utc.with_ymd_and_hms(2025, 7, 1, 11, 49, 14).unwrap();
        assert_eq!(ts.timestamp_millis(), whole.timestamp_millis() + 800);
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        let ts = parse_timestamp("2025-06-24T15:15:49").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 24, 15, 15, 49).unwrap());

        let ts = parse_timestamp("2025-06-24 15:15:49.5").unwrap();
        assert_eq!(ts.timestamp(), Utc.with_ymd_and_hms(2025, 6, 24, 15, 15, 49).unwrap().timestamp());
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let ts = parse_timestamp("2025-06-24").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_torque_gps_time() {
        let ts = parse_timestamp("Tue Jul 01 13:16:08 GMT+05:30 2025").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 7, 1, 7, 46, 8).unwrap());
    }

    #[test]
    fn test_garbage_and_empty() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("Sensor Value: 323").is_none());
    }

    #[test]
    fn test_format_timestamp_millis_zulu() {
        let ts = Utc.with_ymd_and_hms(2025, 7, 1, 11, 49, 14).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-07-01T11:49:14.000Z");
    }
}
