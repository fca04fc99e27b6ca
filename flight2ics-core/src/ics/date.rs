use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// strftime pattern for RFC 5545 UTC date-times
const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Format an instant as `YYYYMMDDTHHMMSSZ` in UTC. Sub-second precision is dropped.
pub fn format_ics_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .format(ICS_UTC_FORMAT)
        .to_string()
}

/// Parse a `YYYYMMDDTHHMMSSZ` value back into an instant.
pub fn parse_ics_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, ICS_UTC_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}
