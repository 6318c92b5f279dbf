//! Error types for `sprout-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown achievement: {0:?}")]
  UnknownAchievement(String),

  #[error("unknown challenge: {0:?}")]
  UnknownChallenge(String),

  #[error("unknown activity kind: {0:?}")]
  UnknownActivity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
