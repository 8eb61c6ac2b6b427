//! # lectio-core
//!
//! Core library for lectio - a reading progress tracker for a 66-book anthology.
//!
//! This library provides:
//! - The section table and position model (ordinals, validation)
//! - Pure analytics over entry snapshots (chapters read, coverage, streaks)
//! - Paginated listing in canonical newest-first order
//! - Database storage layer with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use lectio_core::{Config, Database, Journal};
//!
//! let config = Config::load().expect("failed to load config");
//!
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let journal = Journal::new(db)
//!     .with_day_offset(config.analytics.day_offset().expect("invalid day offset"));
//! let stats = journal.statistics().expect("failed to compute statistics");
//! println!("{} chapters read", stats.total_chapters_read);
//! ```

// Re-export commonly used items at the crate root
pub use canon::{Canon, Division, Section};
pub use config::Config;
pub use db::{Database, EntryStore};
pub use error::{Error, Result};
pub use journal::Journal;
pub use types::*;

// Public modules
pub mod analytics;
pub mod canon;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod interchange;
pub mod journal;
pub mod logging;
pub mod position;
pub mod seed;
pub mod types;
pub mod validate;
