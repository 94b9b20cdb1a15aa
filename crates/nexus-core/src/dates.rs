//! Lenient date parsing and calendar-bucket helpers.
//!
//! Persisted dates come from several writers: full RFC 3339 timestamps,
//! second-precision local datetimes, and the minute-precision form emitted
//! by `datetime-local` form inputs. Parsing accepts all three.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Parse an ISO-8601 datetime string, accepting RFC 3339 (offset dropped),
/// `YYYY-MM-DDTHH:MM:SS` with optional fraction, and `YYYY-MM-DDTHH:MM`.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
  if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
    return Some(dt.naive_utc());
  }
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
    .ok()
}

/// Parse a date from `YYYY-MM-DD`, or from any accepted datetime form.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .or_else(|| parse_datetime(s).map(|dt| dt.date()))
}

/// The Sunday that starts the week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
  d - Days::new(u64::from(d.weekday().num_days_from_sunday()))
}

pub fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
  week_start(a) == week_start(b)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
  a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_all_three_datetime_forms() {
    let minute = parse_datetime("2024-05-01T10:00").unwrap();
    let second = parse_datetime("2024-05-01T10:00:00").unwrap();
    let rfc = parse_datetime("2024-05-01T10:00:00.000Z").unwrap();
    assert_eq!(minute, second);
    assert_eq!(second, rfc);
  }

  #[test]
  fn parse_date_accepts_date_only_and_datetime() {
    let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert_eq!(parse_date("2024-05-01"), Some(d));
    assert_eq!(parse_date("2024-05-01T10:00"), Some(d));
    assert_eq!(parse_date("not a date"), None);
  }

  #[test]
  fn weeks_are_sunday_anchored() {
    // 2024-05-01 is a Wednesday; its week starts Sunday 2024-04-28.
    let wed = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let sun = NaiveDate::from_ymd_opt(2024, 4, 28).unwrap();
    assert_eq!(week_start(wed), sun);
    assert!(same_week(wed, sun));
    assert!(!same_week(wed, sun - Days::new(1)));
  }

  #[test]
  fn same_month_requires_same_year() {
    let a = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let b = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    assert!(!same_month(a, b));
  }
}
