//! SQLite persistence adapter.
//!
//! Stores snapshots, items and opportunities using Diesel ORM with
//! embedded migrations.

pub mod database;
pub mod store;

pub use store::SqliteStore;
