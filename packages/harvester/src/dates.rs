//! Lenient date and timestamp parsing for scraped metadata.
//!
//! Bill-status documents mix plain dates (`2015-01-06`), RFC 3339 timestamps
//! (`2015-01-06T05:00:00Z`) and, in older congresses, naive timestamps
//! without an offset. Naive values are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp, accepting RFC 3339, naive date-times and bare dates.
///
/// # Examples
/// ```
/// use congress_harvester::dates::parse_datetime;
///
/// let ts = parse_datetime("2015-01-06T05:00:00Z").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2015-01-06T05:00:00+00:00");
///
/// let midnight = parse_datetime("2015-01-06").unwrap();
/// assert_eq!(midnight.to_rfc3339(), "2015-01-06T00:00:00+00:00");
///
/// assert!(parse_datetime("yesterday").is_none());
/// ```
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date.
///
/// Full timestamps are accepted too; only their date part is kept.
///
/// # Examples
/// ```
/// use congress_harvester::dates::parse_date;
///
/// assert_eq!(parse_date("2015-01-06").unwrap().to_string(), "2015-01-06");
/// assert_eq!(parse_date("2015-01-06T20:33:42Z").unwrap().to_string(), "2015-01-06");
/// assert!(parse_date("01/06/2015").is_none());
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(text).map(|ts| ts.date_naive()))
}
