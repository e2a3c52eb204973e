use crate::models::{CreatedAt, Entry, Point};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const MINUTE_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// Builds the joy series for a set of entries, ordered by time.
///
/// Every entry yields exactly one point. Entries whose timestamp cannot be
/// parsed keep their point with `x: None` and are placed after all dated
/// points. Percentages round half away from zero and are not clamped.
pub fn build_series(entries: &[Entry]) -> Vec<Point> {
    let mut points: Vec<Point> = entries
        .iter()
        .map(|entry| Point {
            x: parse_created_at(&entry.created_at),
            y: joy_percent(joy_value(entry)),
        })
        .collect();

    points.sort_unstable_by_key(|point| (point.x.is_none(), point.x));
    points
}

pub fn parse_created_at(created_at: &CreatedAt) -> Option<DateTime<Utc>> {
    match created_at {
        CreatedAt::At(instant) => Some(*instant),
        CreatedAt::Text(text) => parse_timestamp(text.trim()),
        CreatedAt::EpochMillis(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        CreatedAt::EpochMillis(_) | CreatedAt::Missing => None,
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    // `%#z` wants a numeric offset, so a trailing `Z` is spelled out first.
    let with_offset = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    for format in MINUTE_OFFSET_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(&with_offset, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }

    // Offset-less timestamps are taken as UTC.
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_partial_date(text))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM` and `YYYY`, pinned to the first day of the month or year.
fn parse_partial_date(text: &str) -> Option<NaiveDate> {
    if !text.bytes().all(|byte| byte.is_ascii_digit() || byte == b'-') {
        return None;
    }

    let padded = match text.len() {
        4 => format!("{text}-01-01"),
        7 if text.as_bytes()[4] == b'-' => format!("{text}-01"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").ok()
}

fn joy_value(entry: &Entry) -> f64 {
    if let Some(score) = entry.joy_score {
        return score;
    }

    if entry.emotion_label.as_deref() == Some("joy") {
        1.0
    } else {
        0.0
    }
}

fn joy_percent(joy: f64) -> i64 {
    (joy * 100.0).round() as i64
}
