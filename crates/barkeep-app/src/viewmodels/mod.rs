//! Per-screen state holders.
//!
//! Each view-model owns one immutable UI-state value published through a
//! `tokio::sync::watch` channel; the hosting screen subscribes and renders
//! every emission. Intent methods mutate the state and re-publish.
//!
//! Work spawned by a view-model is tracked and aborted by `close()`, which
//! the shell calls when the owning screen is torn down.

pub mod auth;
pub mod details;
pub mod discover;
pub mod favorites;
pub mod profile;
pub mod search;

pub use auth::{AuthUiState, AuthViewModel};
pub use details::{DetailsUiState, DetailsViewModel};
pub use discover::{DiscoverUiState, DiscoverViewModel};
pub use favorites::{FavoritesUiState, FavoritesViewModel};
pub use profile::{ProfileUiState, ProfileViewModel};
pub use search::{SearchUiState, SearchViewModel};

use serde::Serialize;

/// Load lifecycle shared by the content screens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    /// Rendered as an error panel with a Retry button.
    Error(String),
}
