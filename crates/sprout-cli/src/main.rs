//! `sprout`: a command-line vegan streak tracker.
//!
//! # Usage
//!
//! ```
//! sprout check-in
//! sprout check-in --at 2026-02-07T19:30:00-08:00
//! sprout status
//! sprout challenge --complete
//! sprout log recipe
//! ```

mod report;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use clap::{Parser, Subcommand};
use settings::Settings;
use sprout_core::{achievement::ActivityKind, store::StreakStore, tracker::Tracker};
use sprout_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sprout", version, about = "Track your vegan streak")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "sprout.toml")]
  config: PathBuf,

  /// SQLite database file (overrides `store_path`).
  #[arg(long, env = "SPROUT_STORE")]
  store: Option<PathBuf>,

  /// Offset from UTC in minutes (overrides `utc_offset_minutes`).
  #[arg(long, allow_hyphen_values = true)]
  utc_offset: Option<i32>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Mark today (or `--at`) as a vegan day.
  CheckIn {
    /// RFC 3339 instant to record instead of now.
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
  },
  /// Show the current streak.
  Status,
  /// List achievements and their progress.
  Achievements,
  /// Show today's challenge.
  Challenge {
    /// Mark today's challenge as done.
    #[arg(long)]
    complete: bool,
  },
  /// Count a recipe cooked, restaurant visited or friend invited.
  Log {
    #[arg(value_parser = parse_activity)]
    kind: ActivityKind,
  },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn parse_activity(s: &str) -> Result<ActivityKind, String> {
  ActivityKind::from_discriminant(s).map_err(|e| e.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let mut settings = Settings::load(&args.config)?;
  // CLI flags override config file, which overrides defaults.
  if let Some(store) = args.store {
    settings.store_path = store;
  }
  if let Some(offset) = args.utc_offset {
    settings.utc_offset_minutes = Some(offset);
  }

  let store_path = settings.store_path();
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = %store_path.display(), "opened store");

  match settings.fixed_offset()? {
    Some(offset) => run(Tracker::new(store, offset), args.command, &settings).await,
    None => run(Tracker::new(store, Local), args.command, &settings).await,
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run<Tz>(
  tracker: Tracker<SqliteStore, Tz>,
  command: Command,
  settings: &Settings,
) -> Result<()>
where
  Tz: TimeZone,
{
  let now = Utc::now();
  let local_hour = now.with_timezone(tracker.zone()).hour();

  match command {
    Command::CheckIn { at } => {
      let refresh = tracker
        .check_in_at(at.unwrap_or(now), now)
        .await
        .context("failed to record check-in")?;
      print!("{}", report::refresh_summary(&refresh, local_hour, settings.reminder_hour));
    }
    Command::Status => {
      let refresh = tracker.refresh(now).await.context("failed to compute streak")?;
      print!("{}", report::refresh_summary(&refresh, local_hour, settings.reminder_hour));
    }
    Command::Achievements => {
      tracker.refresh(now).await.context("failed to compute streak")?;
      let ledger = tracker
        .store()
        .load_ledger()
        .await
        .context("failed to load achievements")?;
      print!("{}", report::achievements_table(&ledger));
    }
    Command::Challenge { complete: false } => {
      let daily = tracker
        .todays_challenge(now)
        .await
        .context("failed to load today's challenge")?;
      println!("{}", report::challenge_line(&daily)?);
    }
    Command::Challenge { complete: true } => {
      let (changed, refresh) = tracker
        .complete_challenge(now)
        .await
        .context("failed to complete challenge")?;
      if !changed {
        println!("Today's challenge is already complete.");
      }
      let daily = tracker
        .todays_challenge(now)
        .await
        .context("failed to load today's challenge")?;
      println!("{}", report::challenge_line(&daily)?);
      for u in &refresh.newly_unlocked {
        println!("🏆 Achievement unlocked: {}", u.achievement.name);
      }
    }
    Command::Log { kind } => {
      let refresh = tracker
        .record_activity(kind, now)
        .await
        .with_context(|| format!("failed to record {kind}"))?;
      for u in &refresh.newly_unlocked {
        println!("🏆 Achievement unlocked: {}", u.achievement.name);
      }
      println!("Logged one {kind}.");
    }
  }

  Ok(())
}
