//! [`Tracker`] ties a [`StreakStore`] to the pure engines.
//!
//! Every mutation is followed by a full recomputation: the streak is derived
//! from the complete check-in history, then saved, then fed into achievement
//! evaluation.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
  achievement::{ActivityCounts, ActivityKind, Unlocked, evaluate_achievements},
  challenge::DailyChallenge,
  day::{CalendarDay, calendar_day, unique_days},
  milestone::{Milestone, match_milestone, next_milestone},
  store::StreakStore,
  streak::{StreakState, compute_from_days, is_at_risk},
};

/// Outcome of a recomputation, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct Refresh {
  pub today:          CalendarDay,
  pub state:          StreakState,
  /// Distinct days with a check-in, ever.
  pub total_days:     u32,
  pub at_risk:        bool,
  /// Set only when the current streak changed length or end day in this
  /// recomputation and now sits exactly on a milestone threshold.
  pub milestone:      Option<&'static Milestone>,
  pub next_milestone: Option<&'static Milestone>,
  pub newly_unlocked: Vec<Unlocked>,
}

/// Streak tracking for one user, over a store and a local time zone.
pub struct Tracker<S, Tz> {
  store: S,
  tz:    Tz,
}

impl<S, Tz> Tracker<S, Tz>
where
  S: StreakStore,
  Tz: TimeZone,
{
  pub fn new(store: S, tz: Tz) -> Self { Self { store, tz } }

  pub fn store(&self) -> &S { &self.store }

  pub fn zone(&self) -> &Tz { &self.tz }

  /// The local calendar day containing `now`.
  pub fn today(&self, now: DateTime<Utc>) -> CalendarDay { calendar_day(&now, &self.tz) }

  /// Recompute and persist all derived state as of `now`.
  pub async fn refresh(&self, now: DateTime<Utc>) -> Result<Refresh, S::Error> {
    let today = self.today(now);
    let check_ins = self.store.check_ins().await?;
    let previous = self.store.load_state().await?;

    let days = unique_days(check_ins.iter().map(|c| &c.at), &self.tz);
    let state = compute_from_days(&days, today, previous.longest_streak);
    self.store.save_state(state).await?;

    debug!(
      current = state.current_streak,
      longest = state.longest_streak,
      last = ?state.last_check_in_day,
      "recomputed streak"
    );

    // A stored state can be stale after a lapse, so a restarted streak may
    // match the old length while ending on a later day.
    let moved = (state.current_streak, state.last_check_in_day)
      != (previous.current_streak, previous.last_check_in_day);
    let milestone = moved
      .then(|| match_milestone(state.current_streak))
      .flatten();
    if let Some(m) = milestone {
      info!(threshold = m.threshold_days, "milestone reached: {}", m.title);
    }

    let total_days = u32::try_from(days.len()).unwrap_or(u32::MAX);
    let challenges = self.store.load_challenges().await?;
    let totals = self.store.activity_totals().await?;
    let counts = ActivityCounts {
      days: total_days,
      current_streak: state.current_streak,
      challenges_completed: challenges.completed_count,
      ..Default::default()
    }
    .with_totals(totals);

    let mut ledger = self.store.load_ledger().await?;
    let newly_unlocked = evaluate_achievements(&mut ledger, &counts, now);
    if !newly_unlocked.is_empty() {
      self.store.save_ledger(&ledger).await?;
      for u in &newly_unlocked {
        info!(id = u.achievement.id, "achievement unlocked: {}", u.achievement.name);
      }
    }

    Ok(Refresh {
      today,
      state,
      total_days,
      at_risk: is_at_risk(&state, today),
      milestone,
      next_milestone: next_milestone(state.current_streak),
      newly_unlocked,
    })
  }

  /// Record a check-in at `now` and recompute.
  pub async fn check_in(&self, now: DateTime<Utc>) -> Result<Refresh, S::Error> {
    self.check_in_at(now, now).await
  }

  /// Record a check-in at `at` (possibly backdated) and recompute as of
  /// `now`.
  pub async fn check_in_at(
    &self,
    at: DateTime<Utc>,
    now: DateTime<Utc>,
  ) -> Result<Refresh, S::Error> {
    let check_in = self.store.record_check_in(at).await?;
    debug!(id = %check_in.check_in_id, at = %check_in.at, "recorded check-in");
    self.refresh(now).await
  }

  /// Count one more activity of `kind` and recompute.
  pub async fn record_activity(
    &self,
    kind: ActivityKind,
    now: DateTime<Utc>,
  ) -> Result<Refresh, S::Error> {
    let totals = self.store.record_activity(kind).await?;
    debug!(%kind, count = totals.get(kind), "recorded activity");
    self.refresh(now).await
  }

  /// Today's challenge, drawing and persisting a new one if needed.
  pub async fn todays_challenge(
    &self,
    now: DateTime<Utc>,
  ) -> Result<DailyChallenge, S::Error> {
    let today = self.today(now);
    let mut log = self.store.load_challenges().await?;
    let before = log.today.clone();
    let daily = log.todays_challenge(today).clone();
    if before.as_ref() != Some(&daily) {
      self.store.save_challenges(&log).await?;
    }
    Ok(daily)
  }

  /// Complete today's challenge. The flag is `false` when it was already
  /// completed, in which case nothing is saved.
  pub async fn complete_challenge(
    &self,
    now: DateTime<Utc>,
  ) -> Result<(bool, Refresh), S::Error> {
    let today = self.today(now);
    let mut log = self.store.load_challenges().await?;
    let changed = log.complete(today);
    if changed {
      self.store.save_challenges(&log).await?;
    }
    Ok((changed, self.refresh(now).await?))
  }
}
