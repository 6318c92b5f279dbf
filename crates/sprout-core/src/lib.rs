//! Core types and pure computations for the Sprout habit tracker.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! Everything that reads the clock or touches storage takes it as a
//! parameter, so every computation here is deterministic.

pub mod achievement;
pub mod challenge;
pub mod day;
pub mod error;
pub mod milestone;
pub mod store;
pub mod streak;
pub mod tracker;

pub use error::{Error, Result};
