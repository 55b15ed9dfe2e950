use barkeep_catalog::CatalogError;
use barkeep_shared::AuthError;
use barkeep_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the UI layer by the application core.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}
