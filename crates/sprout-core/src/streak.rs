//! The streak engine.
//!
//! A [`StreakState`] is recomputed from scratch whenever the set of check-ins
//! changes. The only value carried between recomputations is the previously
//! persisted longest streak, which the caller threads back in.

use std::collections::BTreeSet;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::day::{CalendarDay, CheckInDate, previous_day, unique_days};

// ─── State ───────────────────────────────────────────────────────────────────

/// The result of a streak computation. Plain data; persistence belongs to a
/// [`StreakStore`](crate::store::StreakStore).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct StreakState {
  /// Consecutive days ending at `last_check_in_day`, or 0 once that day is
  /// older than yesterday.
  pub current_streak:    u32,
  /// Never less than `current_streak`; never decreases across
  /// recomputations.
  pub longest_streak:    u32,
  /// Most recent day with a check-in. Kept even when the streak has lapsed.
  pub last_check_in_day: Option<CalendarDay>,
}

// ─── Computation ─────────────────────────────────────────────────────────────

/// Compute the streak for `check_ins` as seen on `today` in `tz`.
///
/// Input order and duplicates do not matter. The longest streak is the
/// maximum of `previous_longest`, the current streak and the longest run of
/// consecutive days anywhere in the history, so it survives loss of the
/// persisted state.
pub fn compute_streak<'a, Tz, I>(
  check_ins: I,
  tz: &Tz,
  today: CalendarDay,
  previous_longest: u32,
) -> StreakState
where
  Tz: TimeZone,
  I: IntoIterator<Item = &'a CheckInDate>,
{
  compute_from_days(&unique_days(check_ins, tz), today, previous_longest)
}

pub(crate) fn compute_from_days(
  days: &BTreeSet<CalendarDay>,
  today: CalendarDay,
  previous_longest: u32,
) -> StreakState {
  let Some(&most_recent) = days.last() else {
    return StreakState {
      current_streak:    0,
      longest_streak:    previous_longest,
      last_check_in_day: None,
    };
  };

  let longest_run = longest_run(days);
  let yesterday = previous_day(today);

  if most_recent != today && Some(most_recent) != yesterday {
    return StreakState {
      current_streak:    0,
      longest_streak:    previous_longest.max(longest_run),
      last_check_in_day: Some(most_recent),
    };
  }

  let mut current = 0u32;
  let mut expected = Some(most_recent);
  for &day in days.iter().rev() {
    if Some(day) != expected {
      break;
    }
    current += 1;
    expected = previous_day(day);
  }

  StreakState {
    current_streak:    current,
    longest_streak:    previous_longest.max(current).max(longest_run),
    last_check_in_day: Some(most_recent),
  }
}

/// Length of the longest run of consecutive calendar days in `check_ins`,
/// regardless of when it happened.
pub fn longest_run_in<'a, Tz, I>(check_ins: I, tz: &Tz) -> u32
where
  Tz: TimeZone,
  I: IntoIterator<Item = &'a CheckInDate>,
{
  longest_run(&unique_days(check_ins, tz))
}

fn longest_run(days: &BTreeSet<CalendarDay>) -> u32 {
  let mut best = 0u32;
  let mut run = 0u32;
  let mut prev: Option<CalendarDay> = None;

  for &day in days {
    run = match prev {
      Some(p) if p.succ_opt() == Some(day) => run + 1,
      _ => 1,
    };
    best = best.max(run);
    prev = Some(day);
  }

  best
}

/// Number of distinct calendar days with at least one check-in.
pub fn unique_day_count<'a, Tz, I>(check_ins: I, tz: &Tz) -> usize
where
  Tz: TimeZone,
  I: IntoIterator<Item = &'a CheckInDate>,
{
  unique_days(check_ins, tz).len()
}

// ─── Derived flags ───────────────────────────────────────────────────────────

/// A streak is at risk when the last check-in was yesterday: it is still
/// alive, but breaks if `today` passes without a check-in.
pub fn is_at_risk(state: &StreakState, today: CalendarDay) -> bool {
  state
    .last_check_in_day
    .is_some_and(|day| Some(day) == previous_day(today))
}
