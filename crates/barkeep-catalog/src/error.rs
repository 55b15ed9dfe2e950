use thiserror::Error;

/// Errors produced while loading or parsing the bundled catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The named asset does not exist in the bundle.
    #[error("Catalog resource not found: {0}")]
    ResourceNotFound(String),

    /// Reading the asset failed for a reason other than absence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The top-level JSON document is structurally invalid.
    ///
    /// Field-level problems inside individual records never produce this;
    /// they are recovered with defaults during parsing.
    #[error("Invalid catalog document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Two catalog titles derived the same slug id. Ids key the local
    /// store, so this is a data error that must be fixed in the catalog.
    #[error("Duplicate cocktail id {slug:?} derived from {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}
