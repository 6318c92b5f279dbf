//! Runtime settings, layered from an optional TOML file and `SPROUT_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite database file; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Fixed offset from UTC. When unset the system local zone is used.
  #[serde(default)]
  pub utc_offset_minutes: Option<i32>,
  /// Local hour after which an at-risk streak is reported as urgent.
  #[serde(default = "default_reminder_hour")]
  pub reminder_hour:      u32,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/sprout/sprout.db") }

fn default_reminder_hour() -> u32 { 20 }

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:         default_store_path(),
      utc_offset_minutes: None,
      reminder_hour:      default_reminder_hour(),
    }
  }
}

impl Settings {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SPROUT").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// The configured fixed zone, if any.
  pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
    self
      .utc_offset_minutes
      .map(|minutes| {
        FixedOffset::east_opt(minutes * 60)
          .with_context(|| format!("utc offset out of range: {minutes} minutes"))
      })
      .transpose()
  }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/sprout.toml")).unwrap();
    assert_eq!(settings.reminder_hour, 20);
    assert!(settings.utc_offset_minutes.is_none());
  }

  #[test]
  fn offset_in_minutes() {
    let settings = Settings { utc_offset_minutes: Some(-330), ..Default::default() };
    let offset = settings.fixed_offset().unwrap().unwrap();
    assert_eq!(offset.local_minus_utc(), -330 * 60);
  }

  #[test]
  fn absurd_offset_is_rejected() {
    let settings = Settings { utc_offset_minutes: Some(48 * 60), ..Default::default() };
    assert!(settings.fixed_offset().is_err());
  }

  #[test]
  fn absolute_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("/var/sprout.db")), PathBuf::from("/var/sprout.db"));
  }
}
