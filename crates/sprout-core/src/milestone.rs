//! The fixed milestone catalog.
//!
//! A milestone fires when the current streak *exactly* equals its threshold,
//! so each one is celebrated once per streak.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ─── Colours ─────────────────────────────────────────────────────────────────

/// Accent colour for a catalog entry. Rendering is up to the front end.
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
pub enum Color {
  Green,
  Blue,
  Red,
  Orange,
  Yellow,
  Purple,
  Pink,
  Cyan,
  Indigo,
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
  pub threshold_days: u32,
  pub title:          &'static str,
  pub message:        &'static str,
  /// Symbolic icon name, e.g. `"flame.fill"`.
  pub icon:           &'static str,
  pub color:          Color,
}

/// Thresholds are distinct and ascending.
pub static MILESTONES: [Milestone; 8] = [
  Milestone {
    threshold_days: 1,
    title:          "First Day!",
    message:        "You've taken the first step on your vegan journey!",
    icon:           "star.fill",
    color:          Color::Yellow,
  },
  Milestone {
    threshold_days: 7,
    title:          "One Week Strong!",
    message:        "You've maintained your commitment for a whole week!",
    icon:           "flame.fill",
    color:          Color::Orange,
  },
  Milestone {
    threshold_days: 14,
    title:          "Two Weeks!",
    message:        "Two weeks of making a difference!",
    icon:           "bolt.fill",
    color:          Color::Pink,
  },
  Milestone {
    threshold_days: 30,
    title:          "30 Days! Amazing!",
    message:        "You've saved 30 animals and made a real impact!",
    icon:           "heart.fill",
    color:          Color::Red,
  },
  Milestone {
    threshold_days: 50,
    title:          "50 Days!",
    message:        "You're halfway to 100 days!",
    icon:           "sparkles",
    color:          Color::Purple,
  },
  Milestone {
    threshold_days: 100,
    title:          "100 Days! Incredible!",
    message:        "100 days of compassion and sustainability!",
    icon:           "trophy.fill",
    color:          Color::Blue,
  },
  Milestone {
    threshold_days: 182,
    title:          "6 Months! Wow!",
    message:        "Half a year of living your values!",
    icon:           "crown.fill",
    color:          Color::Indigo,
  },
  Milestone {
    threshold_days: 365,
    title:          "365 Days! Life-Changing!",
    message:        "You've changed the world for an entire year!",
    icon:           "medal.fill",
    color:          Color::Green,
  },
];

/// The milestone whose threshold equals `current_streak`, if any.
pub fn match_milestone(current_streak: u32) -> Option<&'static Milestone> {
  MILESTONES
    .iter()
    .find(|m| m.threshold_days == current_streak)
}

/// The first milestone still ahead of `current_streak`.
pub fn next_milestone(current_streak: u32) -> Option<&'static Milestone> {
  MILESTONES
    .iter()
    .find(|m| m.threshold_days > current_streak)
}
