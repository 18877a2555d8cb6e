use chrono::{DateTime, SecondsFormat, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// ISO-8601 / RFC 3339 timestamp in UTC with millisecond precision,
/// e.g. `2024-11-02T14:30:00.123Z`.
pub fn iso_millis(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
