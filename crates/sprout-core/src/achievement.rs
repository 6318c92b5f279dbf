//! Achievements and their unlock evaluation.
//!
//! Unlike milestones, achievements use `>=` thresholds and are unlocked at
//! most once: the [`UnlockLedger`] remembers when each one fired.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result, milestone::Color};

// ─── Activity ────────────────────────────────────────────────────────────────

/// A countable user activity other than checking in.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityKind {
  Recipe,
  Restaurant,
  Friend,
}

impl ActivityKind {
  pub const ALL: [Self; 3] = [Self::Recipe, Self::Restaurant, Self::Friend];

  /// Parse the discriminant stored by a backend.
  pub fn from_discriminant(s: &str) -> Result<Self> {
    s.parse()
      .map_err(|_| Error::UnknownActivity(s.to_owned()))
  }
}

/// Running totals for each [`ActivityKind`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct ActivityTotals {
  pub recipes_cooked:      u32,
  pub restaurants_visited: u32,
  pub friends_invited:     u32,
}

impl ActivityTotals {
  pub fn get(&self, kind: ActivityKind) -> u32 {
    match kind {
      ActivityKind::Recipe => self.recipes_cooked,
      ActivityKind::Restaurant => self.restaurants_visited,
      ActivityKind::Friend => self.friends_invited,
    }
  }

  pub fn set(&mut self, kind: ActivityKind, count: u32) {
    match kind {
      ActivityKind::Recipe => self.recipes_cooked = count,
      ActivityKind::Restaurant => self.restaurants_visited = count,
      ActivityKind::Friend => self.friends_invited = count,
    }
  }
}

/// Everything an achievement requirement can be checked against.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct ActivityCounts {
  /// Distinct days with a check-in, ever.
  pub days:                 u32,
  pub current_streak:       u32,
  pub recipes_cooked:       u32,
  pub restaurants_visited:  u32,
  pub friends_invited:      u32,
  pub challenges_completed: u32,
}

impl ActivityCounts {
  pub fn with_totals(mut self, totals: ActivityTotals) -> Self {
    self.recipes_cooked = totals.recipes_cooked;
    self.restaurants_visited = totals.restaurants_visited;
    self.friends_invited = totals.friends_invited;
    self
  }
}

// ─── Requirements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum Requirement {
  Days(u32),
  Streak(u32),
  Recipes(u32),
  Restaurants(u32),
  Friends(u32),
  Challenges(u32),
}

impl Requirement {
  pub fn display_text(&self) -> String {
    match *self {
      Self::Days(n) => format!("{n} vegan days"),
      Self::Streak(n) => format!("{n}-day streak"),
      Self::Recipes(n) => format!("{n} recipes"),
      Self::Restaurants(n) => format!("{n} restaurants"),
      Self::Friends(n) => format!("{n} friends"),
      Self::Challenges(n) => format!("{n} challenges"),
    }
  }

  pub fn is_met(&self, counts: &ActivityCounts) -> bool {
    match *self {
      Self::Days(n) => counts.days >= n,
      Self::Streak(n) => counts.current_streak >= n,
      Self::Recipes(n) => counts.recipes_cooked >= n,
      Self::Restaurants(n) => counts.restaurants_visited >= n,
      Self::Friends(n) => counts.friends_invited >= n,
      Self::Challenges(n) => counts.challenges_completed >= n,
    }
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
  /// Stable identifier used as the ledger key.
  pub id:          &'static str,
  pub name:        &'static str,
  pub description: &'static str,
  pub icon:        &'static str,
  pub color:       Color,
  pub requirement: Requirement,
}

pub static ACHIEVEMENTS: [Achievement; 13] = [
  // ── Streak ──────────────────────────────────────────────────────────────
  Achievement {
    id:          "seedling",
    name:        "Seedling",
    description: "Complete your first vegan day",
    icon:        "leaf.fill",
    color:       Color::Green,
    requirement: Requirement::Days(1),
  },
  Achievement {
    id:          "fire_starter",
    name:        "Fire Starter",
    description: "Maintain a 7-day streak",
    icon:        "flame.fill",
    color:       Color::Orange,
    requirement: Requirement::Streak(7),
  },
  Achievement {
    id:          "committed",
    name:        "Committed",
    description: "Complete 30 vegan days",
    icon:        "heart.fill",
    color:       Color::Red,
    requirement: Requirement::Days(30),
  },
  Achievement {
    id:          "century_club",
    name:        "Century Club",
    description: "Reach 100 vegan days",
    icon:        "trophy.fill",
    color:       Color::Blue,
    requirement: Requirement::Days(100),
  },
  Achievement {
    id:          "hero",
    name:        "Hero",
    description: "Complete 365 vegan days",
    icon:        "star.fill",
    color:       Color::Yellow,
    requirement: Requirement::Days(365),
  },
  // ── Recipes ─────────────────────────────────────────────────────────────
  Achievement {
    id:          "chef",
    name:        "Chef",
    description: "Cook 10 vegan recipes",
    icon:        "frying.pan.fill",
    color:       Color::Orange,
    requirement: Requirement::Recipes(10),
  },
  Achievement {
    id:          "master_chef",
    name:        "Master Chef",
    description: "Cook 50 vegan recipes",
    icon:        "chef.hat.fill",
    color:       Color::Purple,
    requirement: Requirement::Recipes(50),
  },
  // ── Restaurants ─────────────────────────────────────────────────────────
  Achievement {
    id:          "explorer",
    name:        "Explorer",
    description: "Visit 5 vegan restaurants",
    icon:        "map.fill",
    color:       Color::Cyan,
    requirement: Requirement::Restaurants(5),
  },
  Achievement {
    id:          "foodie",
    name:        "Foodie",
    description: "Visit 25 vegan restaurants",
    icon:        "fork.knife",
    color:       Color::Indigo,
    requirement: Requirement::Restaurants(25),
  },
  // ── Social ──────────────────────────────────────────────────────────────
  Achievement {
    id:          "influencer",
    name:        "Influencer",
    description: "Invite 3 friends to join",
    icon:        "person.3.fill",
    color:       Color::Pink,
    requirement: Requirement::Friends(3),
  },
  Achievement {
    id:          "ambassador",
    name:        "Ambassador",
    description: "Invite 10 friends to join",
    icon:        "megaphone.fill",
    color:       Color::Green,
    requirement: Requirement::Friends(10),
  },
  // ── Challenges ──────────────────────────────────────────────────────────
  Achievement {
    id:          "challenger",
    name:        "Challenger",
    description: "Complete 10 daily challenges",
    icon:        "checkmark.seal.fill",
    color:       Color::Blue,
    requirement: Requirement::Challenges(10),
  },
  Achievement {
    id:          "dedicated",
    name:        "Dedicated",
    description: "Complete 50 daily challenges",
    icon:        "trophy.fill",
    color:       Color::Orange,
    requirement: Requirement::Challenges(50),
  },
];

/// Look up a catalog entry by id.
pub fn achievement(id: &str) -> Result<&'static Achievement> {
  ACHIEVEMENTS
    .iter()
    .find(|a| a.id == id)
    .ok_or_else(|| Error::UnknownAchievement(id.to_owned()))
}

pub fn total_count() -> usize { ACHIEVEMENTS.len() }

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Which achievements have been unlocked, and when.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockLedger {
  unlocked: BTreeMap<String, DateTime<Utc>>,
}

impl UnlockLedger {
  /// Rebuild a ledger from persisted entries. Ids that are no longer in the
  /// catalog are dropped.
  pub fn from_entries<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = (String, DateTime<Utc>)>,
  {
    let unlocked = entries
      .into_iter()
      .filter(|(id, _)| {
        let known = achievement(id).is_ok();
        if !known {
          tracing::debug!(id = %id, "dropping unknown achievement from ledger");
        }
        known
      })
      .collect();
    Self { unlocked }
  }

  pub fn unlocked_at(&self, id: &str) -> Option<DateTime<Utc>> {
    self.unlocked.get(id).copied()
  }

  pub fn is_unlocked(&self, id: &str) -> bool { self.unlocked.contains_key(id) }

  pub fn unlocked_count(&self) -> usize { self.unlocked.len() }

  pub fn entries(&self) -> impl Iterator<Item = (&str, DateTime<Utc>)> + '_ {
    self.unlocked.iter().map(|(id, at)| (id.as_str(), *at))
  }
}

/// An achievement that fired during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unlocked {
  pub achievement: &'static Achievement,
  pub unlocked_at: DateTime<Utc>,
}

/// Unlock every achievement whose requirement `counts` now meets.
///
/// Returns only the newly unlocked entries, in catalog order. Achievements
/// already in `ledger` are never returned again, even if their requirement
/// is still met.
pub fn evaluate_achievements(
  ledger: &mut UnlockLedger,
  counts: &ActivityCounts,
  now: DateTime<Utc>,
) -> Vec<Unlocked> {
  let mut newly_unlocked = Vec::new();

  for achievement in &ACHIEVEMENTS {
    if ledger.is_unlocked(achievement.id) || !achievement.requirement.is_met(counts) {
      continue;
    }
    ledger.unlocked.insert(achievement.id.to_owned(), now);
    newly_unlocked.push(Unlocked { achievement, unlocked_at: now });
  }

  newly_unlocked
}
