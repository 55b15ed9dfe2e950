//! # barkeep-shared
//!
//! Domain model shared by every Barkeep crate: cocktail records and their
//! derived attributes, the authenticated user session, the in-app
//! notification model, and the common error taxonomy.
//!
//! Nothing in this crate touches the filesystem, the database, or the
//! network; it is pure data plus a handful of deterministic derivations
//! (slug ids, preparation-time estimates).

pub mod constants;
pub mod model;
pub mod preptime;
pub mod slug;

mod error;

pub use error::AuthError;
pub use model::{
    AlcoholStrength, CocktailRecord, Complexity, Notification, NotificationKind, UserSession,
};
