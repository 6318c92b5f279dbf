//! Calendar-day normalisation.
//!
//! A check-in is an instant; streaks are measured in calendar days of the
//! user's time zone. The zone is always passed in explicitly so that the same
//! set of instants can be evaluated for any locale.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// One moment a user marked a vegan day.
pub type CheckInDate = DateTime<Utc>;

/// A check-in normalised to its local date; the unit of streak continuity.
pub type CalendarDay = NaiveDate;

/// The local calendar day on which `instant` falls in `tz`.
pub fn calendar_day<Tz: TimeZone>(instant: &CheckInDate, tz: &Tz) -> CalendarDay {
  instant.with_timezone(tz).date_naive()
}

/// Normalise and deduplicate a collection of check-ins.
///
/// The result is ordered ascending; iterate with `.rev()` for most recent
/// first.
pub fn unique_days<'a, Tz, I>(check_ins: I, tz: &Tz) -> BTreeSet<CalendarDay>
where
  Tz: TimeZone,
  I: IntoIterator<Item = &'a CheckInDate>,
{
  check_ins
    .into_iter()
    .map(|instant| calendar_day(instant, tz))
    .collect()
}

/// The day before `day`, or `None` at the lower bound of the calendar.
pub fn previous_day(day: CalendarDay) -> Option<CalendarDay> { day.pred_opt() }

#[cfg(test)]
mod tests {
  use chrono::FixedOffset;

  use super::*;

  fn utc(s: &str) -> CheckInDate {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
  }

  fn date(y: i32, m: u32, d: u32) -> CalendarDay {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn late_evening_and_early_morning_are_distinct_days() {
    let tz = FixedOffset::west_opt(8 * 3600).unwrap();
    let late = utc("2026-03-10T23:59:00-08:00");
    let early = utc("2026-03-11T00:01:00-08:00");

    assert_eq!(calendar_day(&late, &tz), date(2026, 3, 10));
    assert_eq!(calendar_day(&early, &tz), date(2026, 3, 11));
    assert_eq!(unique_days([&late, &early], &tz).len(), 2);
  }

  #[test]
  fn same_utc_day_can_span_two_local_days() {
    // 02:00Z and 20:00Z on the same UTC date straddle local midnight at +05:30.
    let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let a = utc("2026-03-10T02:00:00Z");
    let b = utc("2026-03-10T20:00:00Z");

    assert_eq!(calendar_day(&a, &Utc), calendar_day(&b, &Utc));
    assert_ne!(calendar_day(&a, &tz), calendar_day(&b, &tz));
  }

  #[test]
  fn different_utc_days_can_share_a_local_day() {
    let tz = FixedOffset::west_opt(6 * 3600).unwrap();
    let a = utc("2026-03-10T20:00:00Z");
    let b = utc("2026-03-11T03:00:00Z");

    assert_ne!(calendar_day(&a, &Utc), calendar_day(&b, &Utc));
    assert_eq!(calendar_day(&a, &tz), calendar_day(&b, &tz));
    assert_eq!(unique_days([&a, &b], &tz).len(), 1);
  }

  #[test]
  fn unique_days_are_sorted_ascending() {
    let days: Vec<_> = unique_days(
      [
        &utc("2026-03-12T10:00:00Z"),
        &utc("2026-03-10T10:00:00Z"),
        &utc("2026-03-12T18:00:00Z"),
        &utc("2026-03-11T10:00:00Z"),
      ],
      &Utc,
    )
    .into_iter()
    .collect();

    assert_eq!(days, vec![date(2026, 3, 10), date(2026, 3, 11), date(2026, 3, 12)]);
  }

  #[test]
  fn previous_day_crosses_month_and_year() {
    assert_eq!(previous_day(date(2026, 3, 1)), Some(date(2026, 2, 28)));
    assert_eq!(previous_day(date(2026, 1, 1)), Some(date(2025, 12, 31)));
    assert_eq!(previous_day(NaiveDate::MIN), None);
  }
}
