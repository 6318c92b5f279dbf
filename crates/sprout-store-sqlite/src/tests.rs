//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, NaiveDate, TimeZone as _, Utc};
use sprout_core::{
  achievement::{ActivityKind, ActivityTotals, UnlockLedger},
  challenge::{ChallengeLog, DailyChallenge},
  store::StreakStore,
  streak::StreakState,
  tracker::Tracker,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(h: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2026, 2, 8, h, 0, 0).unwrap() }

// ─── Check-ins ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_has_no_check_ins() {
  let s = store().await;
  assert!(s.check_ins().await.unwrap().is_empty());
}

#[tokio::test]
async fn record_and_list_check_ins() {
  let s = store().await;
  let first = s.record_check_in(at(8)).await.unwrap();
  let second = s.record_check_in(at(20)).await.unwrap();
  assert_ne!(first.check_in_id, second.check_in_id);

  let mut all = s.check_ins().await.unwrap();
  all.sort_by_key(|c| c.at);
  assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn check_in_instant_survives_roundtrip() {
  let s = store().await;
  let instant = at(23) + Duration::minutes(59) + Duration::seconds(30);
  s.record_check_in(instant).await.unwrap();

  let all = s.check_ins().await.unwrap();
  assert_eq!(all[0].at, instant);
}

// ─── Streak state ────────────────────────────────────────────────────────────

#[tokio::test]
async fn unsaved_state_loads_as_default() {
  let s = store().await;
  assert_eq!(s.load_state().await.unwrap(), StreakState::default());
}

#[tokio::test]
async fn save_state_overwrites_previous() {
  let s = store().await;
  let day = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();

  s.save_state(StreakState {
    current_streak:    4,
    longest_streak:    9,
    last_check_in_day: Some(day),
  })
  .await
  .unwrap();

  let lapsed = StreakState {
    current_streak:    0,
    longest_streak:    9,
    last_check_in_day: None,
  };
  s.save_state(lapsed).await.unwrap();

  assert_eq!(s.load_state().await.unwrap(), lapsed);
}

// ─── Achievements ────────────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_roundtrip_replaces_contents() {
  let s = store().await;
  let ledger = UnlockLedger::from_entries([
    ("seedling".to_owned(), at(8)),
    ("chef".to_owned(), at(9)),
  ]);
  s.save_ledger(&ledger).await.unwrap();
  assert_eq!(s.load_ledger().await.unwrap(), ledger);

  let smaller = UnlockLedger::from_entries([("seedling".to_owned(), at(8))]);
  s.save_ledger(&smaller).await.unwrap();
  assert_eq!(s.load_ledger().await.unwrap(), smaller);
}

// ─── Challenges ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn challenge_log_roundtrip() {
  let s = store().await;
  assert_eq!(s.load_challenges().await.unwrap(), ChallengeLog::default());

  let log = ChallengeLog {
    completed_count: 3,
    today:           Some(DailyChallenge {
      day:          NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
      challenge_id: "smoothie".into(),
      completed:    true,
    }),
  };
  s.save_challenges(&log).await.unwrap();
  assert_eq!(s.load_challenges().await.unwrap(), log);
}

// ─── Activity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn activity_counters_increment_independently() {
  let s = store().await;
  assert_eq!(s.activity_totals().await.unwrap(), ActivityTotals::default());

  s.record_activity(ActivityKind::Recipe).await.unwrap();
  s.record_activity(ActivityKind::Recipe).await.unwrap();
  let totals = s.record_activity(ActivityKind::Friend).await.unwrap();

  assert_eq!(totals.recipes_cooked, 2);
  assert_eq!(totals.friends_invited, 1);
  assert_eq!(totals.restaurants_visited, 0);
  assert_eq!(s.activity_totals().await.unwrap(), totals);
}

// ─── Tracker over SQLite ─────────────────────────────────────────────────────

#[tokio::test]
async fn tracker_persists_state_between_sessions() {
  let s = store().await;
  let first_day = at(9);

  {
    let tracker = Tracker::new(s.clone(), Utc);
    for n in 0..3 {
      tracker.check_in(first_day + Duration::days(n)).await.unwrap();
    }
  }

  let state = s.load_state().await.unwrap();
  assert_eq!(state.current_streak, 3);
  assert_eq!(state.longest_streak, 3);
  assert!(s.load_ledger().await.unwrap().is_unlocked("seedling"));

  // A later session after a lapse still reports the longest streak.
  let tracker = Tracker::new(s.clone(), Utc);
  let refresh = tracker.refresh(first_day + Duration::days(10)).await.unwrap();
  assert_eq!(refresh.state.current_streak, 0);
  assert_eq!(refresh.state.longest_streak, 3);
  assert_eq!(refresh.total_days, 3);
}

#[tokio::test]
async fn longest_streak_is_rebuilt_after_state_loss() {
  let s = store().await;
  for n in 0..5 {
    s.record_check_in(at(9) + Duration::days(n)).await.unwrap();
  }
  // No state was ever saved; the history alone must give the longest run.
  let tracker = Tracker::new(s.clone(), Utc);
  let refresh = tracker.refresh(at(9) + Duration::days(30)).await.unwrap();
  assert_eq!(refresh.state.longest_streak, 5);
}
