use chrono::{DateTime, SecondsFormat, Utc};

/// Converts a block timestamp (unix seconds) to UTC.
pub fn block_time_utc(ts: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(ts).ok()?, 0)
}

/// RFC3339 rendering of an optional block timestamp for logs and reports.
pub fn format_block_time(ts: Option<u64>) -> String {
    ts.and_then(block_time_utc)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

/// Signed difference `a - b` between two unix timestamps.
pub fn seconds_between(a: u64, b: u64) -> i128 {
    i128::from(a) - i128::from(b)
}
