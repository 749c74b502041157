// src/ingest/dates.rs
//! Date parsing for the formats seen across sources:
//! RFC 2822 (RSS `pubDate`), RFC 3339 (Atom, JSON APIs), bare `YYYY-MM-DD`,
//! four-digit years and Unix seconds.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime,
};

fn from_offset(dt: OffsetDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.unix_timestamp(), dt.nanosecond())
}

/// Parse a textual timestamp. Returns `None` for anything unrecognized.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = OffsetDateTime::parse(s, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(s, &Rfc3339))
        .ok()
        .and_then(from_offset)
    {
        return Some(dt);
    }

    // chrono is more lenient with obsolete zone names ("GMT", "EST").
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(from_year);
    }

    None
}

/// January 1st 00:00 UTC of a plausible calendar year.
pub fn from_year(year: i64) -> Option<DateTime<Utc>> {
    if !(1000..=9999).contains(&year) {
        return None;
    }
    Utc.with_ymd_and_hms(year as i32, 1, 1, 0, 0, 0).single()
}

/// Numeric date fields: four-digit values are years, larger ones Unix seconds.
pub fn from_number(n: i64) -> Option<DateTime<Utc>> {
    if (1000..=9999).contains(&n) {
        from_year(n)
    } else if n > 9999 {
        DateTime::from_timestamp(n, 0)
    } else {
        None
    }
}

/// Interpret a JSON value as a timestamp (string or number).
pub fn from_json(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => parse_timestamp(s),
        serde_json::Value::Number(n) => n.as_i64().and_then(from_number),
        _ => None,
    }
}
