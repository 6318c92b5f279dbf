//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar days are `YYYY-MM-DD`, and UUIDs
//! are hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use sprout_core::{
  achievement::{ActivityKind, ActivityTotals, UnlockLedger},
  challenge::{ChallengeLog, DailyChallenge},
  store::CheckIn,
  streak::StreakState,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn encode_day(day: NaiveDate) -> String { day.format(DAY_FORMAT).to_string() }

pub fn decode_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DAY_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `check_ins` row as read from SQLite.
pub struct RawCheckIn {
  pub check_in_id: String,
  pub at:          String,
}

impl RawCheckIn {
  pub fn into_check_in(self) -> Result<CheckIn> {
    Ok(CheckIn {
      check_in_id: decode_uuid(&self.check_in_id)?,
      at:          decode_dt(&self.at)?,
    })
  }
}

/// The `streak_state` row.
pub struct RawStreakState {
  pub current_streak:    u32,
  pub longest_streak:    u32,
  pub last_check_in_day: Option<String>,
}

impl RawStreakState {
  pub fn into_state(self) -> Result<StreakState> {
    Ok(StreakState {
      current_streak:    self.current_streak,
      longest_streak:    self.longest_streak,
      last_check_in_day: self.last_check_in_day.as_deref().map(decode_day).transpose()?,
    })
  }
}

/// The `challenge_log` row.
pub struct RawChallengeLog {
  pub completed_count: u32,
  pub day:             Option<String>,
  pub challenge_id:    Option<String>,
  pub completed:       bool,
}

impl RawChallengeLog {
  pub fn into_log(self) -> Result<ChallengeLog> {
    let today = match (self.day, self.challenge_id) {
      (Some(day), Some(challenge_id)) => Some(DailyChallenge {
        day: decode_day(&day)?,
        challenge_id,
        completed: self.completed,
      }),
      _ => None,
    };
    Ok(ChallengeLog { completed_count: self.completed_count, today })
  }
}

/// Rebuild a ledger from `(achievement_id, unlocked_at)` rows.
pub fn decode_ledger(rows: Vec<(String, String)>) -> Result<UnlockLedger> {
  let entries = rows
    .into_iter()
    .map(|(id, at)| -> Result<_> { Ok((id, decode_dt(&at)?)) })
    .collect::<Result<Vec<_>>>()?;
  Ok(UnlockLedger::from_entries(entries))
}

/// Fold `(kind, count)` rows into totals.
pub fn decode_totals(rows: Vec<(String, u32)>) -> Result<ActivityTotals> {
  let mut totals = ActivityTotals::default();
  for (kind, count) in rows {
    totals.set(ActivityKind::from_discriminant(&kind)?, count);
  }
  Ok(totals)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn day_roundtrip() {
    let day = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
    assert_eq!(encode_day(day), "2026-02-08");
    assert_eq!(decode_day("2026-02-08").unwrap(), day);
  }

  #[test]
  fn malformed_day_is_a_parse_error() {
    assert!(matches!(decode_day("08/02/2026"), Err(Error::DateParse(_))));
  }

  #[test]
  fn unknown_activity_kind_is_rejected() {
    let err = decode_totals(vec![("gym".into(), 3)]).unwrap_err();
    assert!(matches!(
      err,
      Error::Core(sprout_core::Error::UnknownActivity(_))
    ));
  }

  #[test]
  fn half_written_challenge_row_has_no_today() {
    let log = RawChallengeLog {
      completed_count: 2,
      day:             Some("2026-02-08".into()),
      challenge_id:    None,
      completed:       false,
    }
    .into_log()
    .unwrap();
    assert_eq!(log.completed_count, 2);
    assert!(log.today.is_none());
  }
}
