//! Raw JSON → domain conversion.

use std::collections::{BTreeMap, HashMap};

use barkeep_shared::model::{AlcoholStrength, CocktailRecord, Complexity};
use barkeep_shared::{preptime, slug};

use crate::error::CatalogError;
use crate::raw::{RawCatalog, RawCocktail};
use crate::Result;

/// The fully parsed catalog: cocktail records plus the enum side tables.
#[derive(Debug, Clone, Default)]
pub struct CatalogDatabase {
    /// Category display strings, in catalog order.
    pub categories: Vec<String>,
    /// Every known ingredient display string.
    pub all_ingredients: Vec<String>,
    /// Ingredients grouped by ingredient category.
    pub ingredients_by_group: BTreeMap<String, Vec<String>>,
    /// Parsed cocktail records, in catalog order.
    pub cocktails: Vec<CocktailRecord>,
}

/// Parse a catalog document.
///
/// Field-level problems are absorbed with defaults; records without a
/// title are skipped with a warning. The whole parse fails only for a
/// structurally invalid document or a duplicate derived id.
pub fn parse_catalog(json: &str) -> Result<CatalogDatabase> {
    let raw: RawCatalog = serde_json::from_str(json)?;

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut cocktails = Vec::with_capacity(raw.cocktails.len());

    for record in raw.cocktails {
        if record.title.trim().is_empty() {
            tracing::warn!("skipping catalog record with empty title");
            continue;
        }

        let cocktail = convert(record);

        if let Some(first) = seen.get(&cocktail.id) {
            return Err(CatalogError::DuplicateSlug {
                slug: cocktail.id,
                first: first.clone(),
                second: cocktail.title,
            });
        }
        seen.insert(cocktail.id.clone(), cocktail.title.clone());

        cocktails.push(cocktail);
    }

    tracing::debug!(count = cocktails.len(), "catalog parsed");

    Ok(CatalogDatabase {
        categories: raw.enums.categories,
        all_ingredients: raw.enums.ingredients.all_ingredients,
        ingredients_by_group: raw.enums.ingredients.by_category,
        cocktails,
    })
}

/// Convert one raw record, substituting defaults for everything the
/// catalog left out.
fn convert(raw: RawCocktail) -> CocktailRecord {
    let title = raw.title.trim().to_string();
    let id = slug::slugify(&title);

    let category_key = if raw.category_enum.is_empty() {
        slug::slugify(&raw.category)
    } else {
        raw.category_enum
    };

    let search_text = if raw.search_text.is_empty() {
        build_search_text(&title, &raw.category, &raw.ingredients)
    } else {
        raw.search_text.to_lowercase()
    };

    let prep_time_minutes = preptime::estimate_minutes(&raw.method, raw.ingredients.len());

    CocktailRecord {
        id,
        title,
        image_url: none_if_blank(raw.image_url),
        cocktail_url: none_if_blank(raw.cocktail_url),
        video_url: none_if_blank(raw.video_url),
        category: raw.category,
        category_key,
        views: raw.views,
        ingredient_keys: raw.ingredients_enums,
        ingredients: raw.ingredients,
        method: raw.method,
        garnish: none_if_blank(raw.garnish),
        glass: none_if_blank(raw.glass),
        prep_time_minutes,
        complexity: Complexity::from_key(&raw.complexity),
        alcohol_strength: AlcoholStrength::from_key(&raw.alcohol_strength),
        search_text,
        is_favorite: false,
    }
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn build_search_text(title: &str, category: &str, ingredients: &[String]) -> String {
    let mut blob = String::new();
    blob.push_str(title);
    blob.push(' ');
    blob.push_str(category);
    for ingredient in ingredients {
        blob.push(' ');
        blob.push_str(ingredient);
    }
    blob.to_lowercase()
}
