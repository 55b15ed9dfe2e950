//! Serde mirror of the bundled JSON document.
//!
//! Kept separate from the domain model so that catalog quirks (string
//! enums, absent fields, the odd malformed value) are absorbed here and
//! never leak past [`crate::parse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Deserialize a field leniently: a missing or malformed value becomes
/// `T::default()` instead of failing the surrounding record.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + for<'a> Deserialize<'a>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCatalog {
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub enums: RawEnums,
    #[serde(default)]
    pub cocktails: Vec<RawCocktail>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawEnums {
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub ingredients: RawIngredients,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawIngredients {
    #[serde(default, deserialize_with = "lenient")]
    pub all_ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub by_category: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCocktail {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cocktail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category_enum: String,
    #[serde(default, deserialize_with = "lenient")]
    pub views: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ingredients_enums: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub method: String,
    #[serde(default, deserialize_with = "lenient")]
    pub garnish: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub glass: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub complexity: String,
    #[serde(default, deserialize_with = "lenient")]
    pub alcohol_strength: String,
    #[serde(default, deserialize_with = "lenient")]
    pub search_text: String,
}
