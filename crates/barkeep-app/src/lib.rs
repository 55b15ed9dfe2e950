//! # barkeep-app
//!
//! The embeddable application core of Barkeep: the dependency-injection
//! root, the cocktail repository with its reactive reads, the thin
//! use-case layer, the per-screen view-models, and the capability traits
//! the host shells implement for platform services.
//!
//! A host shell (Android or iOS) constructs one [`context::AppContext`] at
//! process start with its platform adapters, builds view-models from it,
//! and renders whatever their state watches publish.

pub mod context;
pub mod events;
pub mod notify;
pub mod platform;
pub mod repository;
pub mod usecases;
pub mod viewmodels;

mod error;

pub use context::{AppContext, PlatformAdapters};
pub use error::AppError;

use tracing_subscriber::{fmt, EnvFilter};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

/// Install the global tracing subscriber.
///
/// Host shells call this once at startup; `RUST_LOG` overrides the
/// defaults.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("barkeep_app=debug,barkeep_store=info,barkeep_catalog=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
