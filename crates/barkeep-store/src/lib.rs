//! # barkeep-store
//!
//! Local persistence for the Barkeep application, backed by SQLite.
//!
//! The catalog is written here once on first launch and read many times
//! after; the only mutable user state is the per-cocktail favorite flag,
//! the in-app notification center, the app settings row, and the
//! persisted auth session. The crate exposes a synchronous [`Database`]
//! handle that wraps a `rusqlite::Connection` and provides typed CRUD
//! helpers for every domain model.

pub mod cocktails;
pub mod database;
pub mod migrations;
pub mod notifications;
pub mod settings;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use settings::AppSettings;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
