//! Daily challenges.
//!
//! Each calendar day maps deterministically to one challenge from a fixed
//! catalog, so every device shows the same challenge for the same day
//! without coordination.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{Error, Result, day::CalendarDay, milestone::Color};

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Cooking,
  Exploration,
  Social,
  Education,
  Planning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Challenge {
  pub id:       &'static str,
  pub title:    &'static str,
  pub icon:     &'static str,
  pub color:    Color,
  pub category: Category,
}

pub static CHALLENGES: [Challenge; 12] = [
  Challenge {
    id:       "try-recipe",
    title:    "Try a new vegan recipe",
    icon:     "frying.pan.fill",
    color:    Color::Orange,
    category: Category::Cooking,
  },
  Challenge {
    id:       "find-restaurant",
    title:    "Find a vegan restaurant near you",
    icon:     "map.fill",
    color:    Color::Blue,
    category: Category::Exploration,
  },
  Challenge {
    id:       "share-meal",
    title:    "Share a photo of your vegan meal",
    icon:     "camera.fill",
    color:    Color::Purple,
    category: Category::Social,
  },
  Challenge {
    id:       "learn-fact",
    title:    "Learn about animal agriculture impact",
    icon:     "book.fill",
    color:    Color::Green,
    category: Category::Education,
  },
  Challenge {
    id:       "meal-prep",
    title:    "Prepare meals for tomorrow",
    icon:     "takeoutbag.and.cup.and.straw.fill",
    color:    Color::Cyan,
    category: Category::Planning,
  },
  Challenge {
    id:       "try-protein",
    title:    "Try a new plant protein source",
    icon:     "leaf.fill",
    color:    Color::Green,
    category: Category::Cooking,
  },
  Challenge {
    id:       "share-recipe",
    title:    "Share your favorite recipe with a friend",
    icon:     "heart.text.square.fill",
    color:    Color::Pink,
    category: Category::Social,
  },
  Challenge {
    id:       "watch-documentary",
    title:    "Watch a vegan documentary",
    icon:     "play.rectangle.fill",
    color:    Color::Red,
    category: Category::Education,
  },
  Challenge {
    id:       "farmers-market",
    title:    "Visit a farmers market",
    icon:     "basket.fill",
    color:    Color::Orange,
    category: Category::Exploration,
  },
  Challenge {
    id:       "smoothie",
    title:    "Make a nutritious green smoothie",
    icon:     "cup.and.saucer.fill",
    color:    Color::Green,
    category: Category::Cooking,
  },
  Challenge {
    id:       "read-labels",
    title:    "Learn to read ingredient labels",
    icon:     "text.magnifyingglass",
    color:    Color::Indigo,
    category: Category::Education,
  },
  Challenge {
    id:       "batch-cook",
    title:    "Batch cook for the week",
    icon:     "refrigerator.fill",
    color:    Color::Cyan,
    category: Category::Planning,
  },
];

/// Look up a catalog entry by id.
pub fn challenge(id: &str) -> Result<&'static Challenge> {
  CHALLENGES
    .iter()
    .find(|c| c.id == id)
    .ok_or_else(|| Error::UnknownChallenge(id.to_owned()))
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// 64-bit linear congruential generator (Knuth's MMIX constants).
struct Lcg(u64);

impl Lcg {
  fn next_u64(&mut self) -> u64 {
    self.0 = self
      .0
      .wrapping_mul(6364136223846793005)
      .wrapping_add(1442695040888963407);
    self.0
  }

  /// Uniform value in `0..bound` by multiply-high with rejection.
  fn next_below(&mut self, bound: u64) -> u64 {
    let mut m = u128::from(self.next_u64()) * u128::from(bound);
    if (m as u64) < bound {
      let threshold = bound.wrapping_neg() % bound;
      while (m as u64) < threshold {
        m = u128::from(self.next_u64()) * u128::from(bound);
      }
    }
    (m >> 64) as u64
  }
}

/// The challenge drawn for `day`. Seeded with the Unix timestamp of the
/// day's midnight, so the pick does not depend on the time zone.
pub fn challenge_for_day(day: CalendarDay) -> &'static Challenge {
  // Pre-1970 days have negative timestamps; reinterpreting the bits as u64
  // still gives a distinct seed per day.
  let seed = day.and_time(NaiveTime::MIN).and_utc().timestamp() as u64;
  let index = Lcg(seed).next_below(CHALLENGES.len() as u64) as usize;
  &CHALLENGES[index]
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// The challenge assigned for one day and whether it was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
  pub day:          CalendarDay,
  pub challenge_id: String,
  pub completed:    bool,
}

impl DailyChallenge {
  fn draw(day: CalendarDay) -> Self {
    Self {
      day,
      challenge_id: challenge_for_day(day).id.to_owned(),
      completed: false,
    }
  }

  pub fn challenge(&self) -> Result<&'static Challenge> { challenge(&self.challenge_id) }
}

/// Persisted challenge progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeLog {
  pub completed_count: u32,
  /// The most recently drawn challenge; stale once its day is past.
  pub today:           Option<DailyChallenge>,
}

impl ChallengeLog {
  /// The challenge for `today`, drawing a fresh one if the stored challenge
  /// belongs to another day or is no longer in the catalog.
  pub fn todays_challenge(&mut self, today: CalendarDay) -> &DailyChallenge {
    current_mut(&mut self.today, today)
  }

  /// Mark today's challenge as completed. Returns `false` if it already was.
  pub fn complete(&mut self, today: CalendarDay) -> bool {
    let daily = current_mut(&mut self.today, today);
    if daily.completed {
      return false;
    }
    daily.completed = true;
    self.completed_count += 1;
    true
  }
}

fn current_mut(
  slot: &mut Option<DailyChallenge>,
  today: CalendarDay,
) -> &mut DailyChallenge {
  let reusable = slot
    .as_ref()
    .is_some_and(|c| c.day == today && c.challenge().is_ok());
  if !reusable {
    *slot = None;
  }
  slot.get_or_insert_with(|| DailyChallenge::draw(today))
}
