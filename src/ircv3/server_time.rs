//! Server-time tag values.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::tags::TagMap;

use super::SERVER_TIME;

/// Reads the `time` tag as a UTC timestamp.
///
/// Returns `None` when the tag is absent or not valid RFC 3339.
pub fn server_time<T: TagMap + ?Sized>(tags: &T) -> Option<DateTime<Utc>> {
    let value = tags.value(SERVER_TIME)?;
    DateTime::parse_from_rfc3339(&value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a time as an IRCv3 server-time string.
///
/// Returns an ISO 8601 timestamp like `2023-01-01T12:00:00.000Z`.
pub fn format_server_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a Unix timestamp as an IRCv3 server-time string.
///
/// Out-of-range timestamps format as the epoch.
pub fn format_timestamp(unix_secs: i64) -> String {
    format_server_time(DateTime::from_timestamp(unix_secs, 0).unwrap_or_default())
}
