//! Plain-text rendering of tracker output.

use sprout_core::{
  achievement::{ACHIEVEMENTS, UnlockLedger, total_count},
  challenge::DailyChallenge,
  tracker::Refresh,
};

fn days(n: u32) -> String {
  if n == 1 { "1 day".to_owned() } else { format!("{n} days") }
}

fn block(lines: Vec<String>) -> String {
  lines.into_iter().map(|l| l + "\n").collect()
}

/// Summary printed after every command that recomputes the streak.
pub fn refresh_summary(r: &Refresh, local_hour: u32, reminder_hour: u32) -> String {
  let mut lines = Vec::new();

  if let Some(m) = r.milestone {
    lines.push(format!("🎉 {} {}", m.title, m.message));
  }
  for u in &r.newly_unlocked {
    lines.push(format!(
      "🏆 Achievement unlocked: {}: {}",
      u.achievement.name, u.achievement.description
    ));
  }

  lines.push(format!("Current streak: {}", days(r.state.current_streak)));
  lines.push(format!("Longest streak: {}", days(r.state.longest_streak)));
  lines.push(format!("Vegan days:     {}", r.total_days));
  lines.push(match r.state.last_check_in_day {
    Some(day) => format!("Last check-in:  {}", day.format("%Y-%m-%d")),
    None => "Last check-in:  never".to_owned(),
  });

  if let Some(next) = r.next_milestone {
    lines.push(format!(
      "Next milestone: {} in {}",
      next.title,
      days(next.threshold_days - r.state.current_streak)
    ));
  }

  if r.at_risk {
    lines.push(if local_hour >= reminder_hour {
      "🔥 Don't break your streak! Check in today to keep your vegan streak alive."
        .to_owned()
    } else {
      "No check-in yet today.".to_owned()
    });
  }

  block(lines)
}

/// Every achievement with its unlock status.
pub fn achievements_table(ledger: &UnlockLedger) -> String {
  let header = format!("Achievements: {}/{}", ledger.unlocked_count(), total_count());

  let rows = ACHIEVEMENTS.iter().map(|a| match ledger.unlocked_at(a.id) {
    Some(at) => format!(
      "  [x] {:<13} {} (unlocked {})",
      a.name,
      a.description,
      at.format("%Y-%m-%d")
    ),
    None => format!(
      "  [ ] {:<13} {} ({})",
      a.name,
      a.description,
      a.requirement.display_text()
    ),
  });

  block(std::iter::once(header).chain(rows).collect())
}

/// Today's challenge as one line.
pub fn challenge_line(daily: &DailyChallenge) -> sprout_core::Result<String> {
  let challenge = daily.challenge()?;
  let mark = if daily.completed { "x" } else { " " };
  Ok(format!("[{mark}] {} ({})", challenge.title, challenge.category))
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone as _, Utc};
  use sprout_core::{
    achievement::{ActivityCounts, evaluate_achievements},
    milestone::{match_milestone, next_milestone},
    streak::StreakState,
  };

  use super::*;

  fn refresh(current: u32, at_risk: bool) -> Refresh {
    Refresh {
      today: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
      state: StreakState {
        current_streak:    current,
        longest_streak:    current,
        last_check_in_day: NaiveDate::from_ymd_opt(2026, 2, 7),
      },
      total_days: current,
      at_risk,
      milestone: match_milestone(current),
      next_milestone: next_milestone(current),
      newly_unlocked: Vec::new(),
    }
  }

  #[test]
  fn summary_celebrates_milestone() {
    let text = refresh_summary(&refresh(7, false), 9, 20);
    assert!(text.contains("One Week Strong!"));
    assert!(text.contains("Current streak: 7 days"));
    assert!(text.contains("Next milestone: Two Weeks! in 7 days"));
  }

  #[test]
  fn reminder_is_urgent_only_after_reminder_hour() {
    let morning = refresh_summary(&refresh(3, true), 9, 20);
    let evening = refresh_summary(&refresh(3, true), 21, 20);
    assert!(morning.contains("No check-in yet today."));
    assert!(evening.contains("Don't break your streak!"));
  }

  #[test]
  fn singular_day() {
    assert!(refresh_summary(&refresh(1, false), 9, 20).contains("Current streak: 1 day\n"));
  }

  #[test]
  fn summary_lists_every_line_once() {
    let text = refresh_summary(&refresh(3, false), 9, 20);
    assert_eq!(text.lines().count(), 5);
    assert!(text.ends_with('\n'));
    assert!(text.contains("Last check-in:  2026-02-07\n"));
  }

  #[test]
  fn table_marks_unlocked_rows() {
    let mut ledger = UnlockLedger::default();
    let now = Utc.with_ymd_and_hms(2026, 2, 8, 12, 0, 0).unwrap();
    evaluate_achievements(&mut ledger, &ActivityCounts { days: 1, ..Default::default() }, now);

    let text = achievements_table(&ledger);
    assert!(text.starts_with("Achievements: 1/13"));
    assert!(text.contains("[x] Seedling"));
    assert!(text.contains("[ ] Hero"));
  }

  #[test]
  fn challenge_line_shows_category() {
    let daily = DailyChallenge {
      day:          NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
      challenge_id: "smoothie".into(),
      completed:    true,
    };
    assert_eq!(
      challenge_line(&daily).unwrap(),
      "[x] Make a nutritious green smoothie (Cooking)"
    );
  }
}
