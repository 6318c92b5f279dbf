//! [`SqliteStore`], the SQLite implementation of [`StreakStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use sprout_core::{
  achievement::{ActivityKind, ActivityTotals, UnlockLedger},
  challenge::ChallengeLog,
  store::{CheckIn, StreakStore},
  streak::StreakState,
};

use crate::{
  encode::{
    RawChallengeLog, RawCheckIn, RawStreakState, decode_ledger, decode_totals,
    encode_day, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sprout store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema ready");
    Ok(())
  }

  async fn read_totals(&self) -> Result<ActivityTotals> {
    let rows: Vec<(String, u32)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT kind, count FROM activity")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_totals(rows)
  }
}

// ─── StreakStore impl ────────────────────────────────────────────────────────

impl StreakStore for SqliteStore {
  type Error = crate::Error;

  // ── Check-ins ─────────────────────────────────────────────────────────────

  async fn record_check_in(&self, at: DateTime<Utc>) -> Result<CheckIn> {
    let check_in = CheckIn { check_in_id: Uuid::new_v4(), at };

    let id_str = encode_uuid(check_in.check_in_id);
    let at_str = encode_dt(check_in.at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO check_ins (check_in_id, at) VALUES (?1, ?2)",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(check_in)
  }

  async fn check_ins(&self) -> Result<Vec<CheckIn>> {
    let raws: Vec<RawCheckIn> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT check_in_id, at FROM check_ins")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCheckIn {
              check_in_id: row.get(0)?,
              at:          row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCheckIn::into_check_in).collect()
  }

  // ── Streak state ──────────────────────────────────────────────────────────

  async fn load_state(&self) -> Result<StreakState> {
    let raw: Option<RawStreakState> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT current_streak, longest_streak, last_check_in_day
             FROM streak_state WHERE id = 1",
            [],
            |row| {
              Ok(RawStreakState {
                current_streak:    row.get(0)?,
                longest_streak:    row.get(1)?,
                last_check_in_day: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw
      .map(RawStreakState::into_state)
      .transpose()
      .map(Option::unwrap_or_default)
  }

  async fn save_state(&self, state: StreakState) -> Result<()> {
    let last_day = state.last_check_in_day.map(encode_day);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO streak_state (id, current_streak, longest_streak, last_check_in_day)
           VALUES (1, ?1, ?2, ?3)
           ON CONFLICT (id) DO UPDATE SET
             current_streak    = excluded.current_streak,
             longest_streak    = excluded.longest_streak,
             last_check_in_day = excluded.last_check_in_day",
          rusqlite::params![state.current_streak, state.longest_streak, last_day],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Achievements ──────────────────────────────────────────────────────────

  async fn load_ledger(&self) -> Result<UnlockLedger> {
    let rows: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT achievement_id, unlocked_at FROM achievements")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_ledger(rows)
  }

  async fn save_ledger(&self, ledger: &UnlockLedger) -> Result<()> {
    let rows: Vec<(String, String)> = ledger
      .entries()
      .map(|(id, at)| (id.to_owned(), encode_dt(at)))
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM achievements", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO achievements (achievement_id, unlocked_at) VALUES (?1, ?2)",
          )?;
          for (id, at) in &rows {
            stmt.execute(rusqlite::params![id, at])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Challenges ────────────────────────────────────────────────────────────

  async fn load_challenges(&self) -> Result<ChallengeLog> {
    let raw: Option<RawChallengeLog> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT completed_count, day, challenge_id, completed
             FROM challenge_log WHERE id = 1",
            [],
            |row| {
              Ok(RawChallengeLog {
                completed_count: row.get(0)?,
                day:             row.get(1)?,
                challenge_id:    row.get(2)?,
                completed:       row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw
      .map(RawChallengeLog::into_log)
      .transpose()
      .map(Option::unwrap_or_default)
  }

  async fn save_challenges(&self, log: &ChallengeLog) -> Result<()> {
    let completed_count = log.completed_count;
    let day = log.today.as_ref().map(|c| encode_day(c.day));
    let challenge_id = log.today.as_ref().map(|c| c.challenge_id.clone());
    let completed = log.today.as_ref().is_some_and(|c| c.completed);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO challenge_log (id, completed_count, day, challenge_id, completed)
           VALUES (1, ?1, ?2, ?3, ?4)
           ON CONFLICT (id) DO UPDATE SET
             completed_count = excluded.completed_count,
             day             = excluded.day,
             challenge_id    = excluded.challenge_id,
             completed       = excluded.completed",
          rusqlite::params![completed_count, day, challenge_id, completed],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Activity counters ─────────────────────────────────────────────────────

  async fn activity_totals(&self) -> Result<ActivityTotals> { self.read_totals().await }

  async fn record_activity(&self, kind: ActivityKind) -> Result<ActivityTotals> {
    let kind_str = kind.as_ref().to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activity (kind, count) VALUES (?1, 1)
           ON CONFLICT (kind) DO UPDATE SET count = count + 1",
          rusqlite::params![kind_str],
        )?;
        Ok(())
      })
      .await?;

    self.read_totals().await
  }
}
