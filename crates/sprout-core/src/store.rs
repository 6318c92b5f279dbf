//! The `StreakStore` trait: persistence for check-ins and derived progress.
//!
//! The trait is implemented by storage backends (e.g. `sprout-store-sqlite`).
//! The [`Tracker`](crate::tracker::Tracker) depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  achievement::{ActivityKind, ActivityTotals, UnlockLedger},
  challenge::ChallengeLog,
  day::CheckInDate,
  streak::StreakState,
};

/// A persisted check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
  pub check_in_id: Uuid,
  pub at:          CheckInDate,
}

/// Abstraction over a Sprout storage backend.
///
/// Check-ins are append-only. Every other record is a snapshot that is
/// overwritten whole on save; loading a record that was never saved returns
/// its `Default`.
pub trait StreakStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Check-ins ─────────────────────────────────────────────────────────

  /// Record a check-in at `at`.
  fn record_check_in(
    &self,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<CheckIn, Self::Error>> + Send + '_;

  /// All check-ins, in no particular order.
  fn check_ins(
    &self,
  ) -> impl Future<Output = Result<Vec<CheckIn>, Self::Error>> + Send + '_;

  // ── Streak state ──────────────────────────────────────────────────────

  fn load_state(
    &self,
  ) -> impl Future<Output = Result<StreakState, Self::Error>> + Send + '_;

  fn save_state(
    &self,
    state: StreakState,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Achievements ──────────────────────────────────────────────────────

  fn load_ledger(
    &self,
  ) -> impl Future<Output = Result<UnlockLedger, Self::Error>> + Send + '_;

  fn save_ledger<'a>(
    &'a self,
    ledger: &'a UnlockLedger,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Challenges ────────────────────────────────────────────────────────

  fn load_challenges(
    &self,
  ) -> impl Future<Output = Result<ChallengeLog, Self::Error>> + Send + '_;

  fn save_challenges<'a>(
    &'a self,
    log: &'a ChallengeLog,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Activity counters ─────────────────────────────────────────────────

  fn activity_totals(
    &self,
  ) -> impl Future<Output = Result<ActivityTotals, Self::Error>> + Send + '_;

  /// Increment the counter for `kind` and return the new totals.
  fn record_activity(
    &self,
    kind: ActivityKind,
  ) -> impl Future<Output = Result<ActivityTotals, Self::Error>> + Send + '_;
}
