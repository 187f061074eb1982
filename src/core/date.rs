//! Date handling for invoice records
//!
//! Incoming dates arrive as the strings a browser `Date` produces or accepts.
//! They are normalized to UTC instants on the way in, rendered as calendar
//! days (`YYYY-MM-DD`) in the server's local timezone on the way out, and
//! classified as "expiring soon" for list ordering.

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone,
    Utc,
};
use serde_json::Value;

/// Display value for a stored date that cannot be rendered
pub const INVALID_DATE: &str = "Invalid Date";

/// Calendar-day output format
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Window ahead of "now" in which an invoice counts as expiring soon
pub fn expiry_window() -> Duration {
    Duration::hours(24)
}

/// ISO-8601 shapes with an offset that RFC 3339 rejects (no seconds,
/// `+0200` without colon). `%#z` also takes `Z` and hour-only offsets.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an input date string using the server's local timezone for
/// date-times that carry no offset.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    parse_date_in(input, &Local)
}

/// Parse an input date string, resolving offset-less date-times in `tz`.
///
/// Accepted forms:
/// - RFC 3339 (`2024-01-01T10:00:00Z`, `2024-01-01T10:00:00.5+02:00`)
/// - date only (`2024-01-01`), taken as UTC midnight
/// - ISO-8601 with offset outside RFC 3339 (`2024-01-01T10:00Z`,
///   `2024-01-01T10:00:00+0200`)
/// - local date-time (`2024-01-01T10:00`, `2024-01-01 10:00:00`)
/// - RFC 2822 (`Mon, 01 Jan 2024 10:00:00 GMT`)
pub fn parse_date_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(day) = NaiveDate::parse_from_str(input, DAY_FORMAT) {
        return day.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return resolve_local(&naive, tz);
        }
    }

    DateTime::parse_from_rfc2822(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pin a wall-clock time to an instant in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// spring-forward gap are moved forward by the hour the clocks skipped.
fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => tz
            .from_local_datetime(&(*naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Render an instant as the calendar day it falls on in `tz`.
pub fn format_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format(DAY_FORMAT).to_string()
}

/// Render a stored date, falling back to [`INVALID_DATE`] when the record
/// holds no readable value.
pub fn format_stored<Tz: TimeZone>(timestamp: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match timestamp {
        Some(ts) => format_day(ts, tz),
        None => INVALID_DATE.to_string(),
    }
}

/// Whether a *formatted* expiry date falls within the next 24 hours.
///
/// The formatted string is parsed again, so a `YYYY-MM-DD` value is compared
/// as UTC midnight of that day rather than as the stored instant.
pub fn is_expiring_soon(formatted_expiry: &str, now: DateTime<Utc>) -> bool {
    let Some(expiry) = parse_date(formatted_expiry) else {
        return false;
    };

    let remaining = expiry - now;
    remaining >= Duration::zero() && remaining <= expiry_window()
}

/// ISO-8601 UTC with millisecond precision (`2024-01-01T00:00:00.000Z`)
pub fn to_iso_millis(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Best-effort decoding of a stored timestamp.
///
/// Handles ISO strings, epoch milliseconds, and the MongoDB extended JSON
/// shapes `{"$date": "<iso>"}` and `{"$date": {"$numberLong": "<ms>"}}`.
pub fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => match map.get("$date")? {
            Value::Object(inner) => inner
                .get("$numberLong")?
                .as_str()?
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis),
            other => timestamp_from_value(other),
        },
        _ => None,
    }
}

/// Serde adapter for optional stored timestamps.
///
/// Serializes as [`to_iso_millis`] or `null`; deserializes leniently via
/// [`timestamp_from_value`], turning unreadable values into `None`.
pub mod timestamp {
    use super::{timestamp_from_value, to_iso_millis};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&to_iso_millis(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(timestamp_from_value))
    }
}
