//! Timestamp parsing and the relative/long renderings used on record cards.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Timestamp layout used by the backend (`2024-01-02 03:04:05.678Z`).
pub const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

/// Parse a backend or RFC 3339 timestamp. Blank or malformed input yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

/// "3 minutes ago" style distance between `then` and `now`.
pub fn relative_to(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;

    match minutes {
        0 => "just now".to_string(),
        1 => "1 minute ago".to_string(),
        2..=44 => format!("{minutes} minutes ago"),
        45..=89 => "about 1 hour ago".to_string(),
        90..=1439 => format!("about {} hours ago", (minutes + 30) / 60),
        1440..=2519 => "1 day ago".to_string(),
        2520..=43199 => format!("{} days ago", (minutes + 720) / 1440),
        43200..=86399 => "about 1 month ago".to_string(),
        86400..=525599 => format!("{} months ago", (minutes + 21600) / 43200),
        _ => {
            let years = minutes / 525600;
            if years <= 1 {
                "about 1 year ago".to_string()
            } else {
                format!("over {years} years ago")
            }
        }
    }
}

/// Relative rendering of a raw record timestamp against the current clock.
pub fn relative(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(then) => relative_to(then, Utc::now()),
        None => String::new(),
    }
}

/// "March 4, 2025".
pub fn long_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_backend_and_rfc3339() {
        let a = parse_timestamp("2025-03-04 12:00:00.000Z").unwrap();
        let b = parse_timestamp("2025-03-04T12:00:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, base());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn relative_buckets() {
        let now = base();
        let ago = |d: Duration| relative_to(now - d, now);
        assert_eq!(ago(Duration::seconds(5)), "just now");
        assert_eq!(ago(Duration::seconds(70)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(10)), "10 minutes ago");
        assert_eq!(ago(Duration::minutes(50)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(5)), "about 5 hours ago");
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(4)), "4 days ago");
        assert_eq!(ago(Duration::days(35)), "about 1 month ago");
        assert_eq!(ago(Duration::days(100)), "3 months ago");
        assert_eq!(ago(Duration::days(400)), "about 1 year ago");
        assert_eq!(ago(Duration::days(365 * 3 + 10)), "over 3 years ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = base();
        assert_eq!(relative_to(now + Duration::minutes(3), now), "just now");
    }

    #[test]
    fn long_date_format() {
        assert_eq!(long_date("2025-03-04 09:30:00.000Z"), "March 4, 2025");
        assert_eq!(long_date("garbage"), "");
    }
}
