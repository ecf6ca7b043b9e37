use chrono::NaiveDateTime;

/// Timestamp layout of payment documents (`yyyy-MM-dd HH:mm:ss`, local time, no offset)
///
/// Existing documents were written with this layout and are ordered by
/// plain string comparison, so it must not change.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current wall-clock time in the local timezone
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Format a local time as a document timestamp (second precision)
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a document timestamp
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}
