//! Domain model structs shared across the catalog, store, and app layers.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a host shell over its bridge of choice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Cocktail
// ---------------------------------------------------------------------------

/// A single cocktail recipe as served to the UI layer.
///
/// The `id` is derived from the title by [`crate::slug::slugify`] and is the
/// primary key of the local store. It is deterministic but not a stable
/// external identifier; two catalogs may slug the same title identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailRecord {
    /// Slugged title, e.g. `"clover_club"`.
    pub id: String,
    /// Display title, e.g. `"Clover Club"`.
    pub title: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Optional source page URL.
    pub cocktail_url: Option<String>,
    /// Optional preparation video URL.
    pub video_url: Option<String>,
    /// Category display string, e.g. `"The Unforgettables"`.
    pub category: String,
    /// Machine key for the category, e.g. `"the_unforgettables"`.
    pub category_key: String,
    /// View counter carried over from the source catalog.
    pub views: u64,
    /// Ingredient display strings, in recipe order.
    pub ingredients: Vec<String>,
    /// Machine keys for the ingredients.
    pub ingredient_keys: Vec<String>,
    /// Free-text preparation method.
    pub method: String,
    /// Optional garnish description.
    pub garnish: Option<String>,
    /// Optional serving glass.
    pub glass: Option<String>,
    /// Derived preparation-time estimate, minutes.
    pub prep_time_minutes: u32,
    /// Derived complexity tier.
    pub complexity: Complexity,
    /// Alcohol strength tier.
    pub alcohol_strength: AlcoholStrength,
    /// Lowercased blob of searchable text (title, ingredients, category).
    pub search_text: String,
    /// Whether the local user has favorited this cocktail.
    pub is_favorite: bool,
}

/// Complexity tier of a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Parse a catalog key. Unknown or absent values fall back to `Medium`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "simple" => Self::Simple,
            "complex" => Self::Complex,
            _ => Self::Medium,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self::Medium
    }
}

/// Alcohol strength tier of a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholStrength {
    NonAlcoholic,
    Light,
    Medium,
    Strong,
}

impl AlcoholStrength {
    /// Parse a catalog key. Unknown or absent values fall back to `Medium`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "non_alcoholic" => Self::NonAlcoholic,
            "light" => Self::Light,
            "strong" => Self::Strong,
            _ => Self::Medium,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::NonAlcoholic => "non_alcoholic",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl Default for AlcoholStrength {
    fn default() -> Self {
        Self::Medium
    }
}

// ---------------------------------------------------------------------------
// User session
// ---------------------------------------------------------------------------

/// The locally persisted identity of the signed-in user.
///
/// Sourced from the auth provider on sign-in and restored from the local
/// store on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Provider-assigned user id.
    pub uid: String,
    /// Account email address.
    pub email: String,
    /// Optional human-readable display name.
    pub display_name: Option<String>,
    /// Optional avatar URL.
    pub photo_url: Option<String>,
}

// ---------------------------------------------------------------------------
// In-app notification
// ---------------------------------------------------------------------------

/// Kind of an in-app notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewCocktail,
    Reminder,
    System,
}

impl NotificationKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "new_cocktail" => Self::NewCocktail,
            "reminder" => Self::Reminder,
            _ => Self::System,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::NewCocktail => "new_cocktail",
            Self::Reminder => "reminder",
            Self::System => "system",
        }
    }
}

/// A notification shown in the in-app notification center.
///
/// This is local state only; OS push delivery is a separate, best-effort
/// mirror handled by the platform adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Slug of the cocktail this notification refers to, if any.
    pub cocktail_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl Notification {
    /// Build a fresh, unread notification stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        cocktail_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            cocktail_id,
            created_at: Utc::now(),
            is_read: false,
        }
    }
}
