//! # barkeep-catalog
//!
//! Loading and parsing of the bundled cocktail catalog.
//!
//! The catalog ships with the app as a single JSON asset
//! (`iba_cocktails_complete.json`). This crate reads it through a
//! host-provided [`ResourceReader`], parses it tolerantly (missing or
//! malformed record fields become documented defaults; only a structurally
//! invalid document fails the load), and caches the parsed result for the
//! process lifetime.

pub mod loader;
pub mod parse;

mod error;
mod raw;

pub use error::CatalogError;
pub use loader::{CatalogLoader, DirResourceReader, ResourceReader};
pub use parse::{parse_catalog, CatalogDatabase};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
