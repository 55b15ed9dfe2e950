//! Derived cocktail ids.
//!
//! The local store keys cocktails by a slug derived from the display title.
//! The derivation must stay byte-for-byte stable across releases: changing
//! it would orphan every persisted favorite flag.

/// Derive the store id for a cocktail title.
///
/// Lowercases the title and collapses every run of non-alphanumeric
/// characters into a single `_`, trimming any at the ends:
/// `"Clover Club"` → `"clover_club"`, `"Piña Colada"` → `"pi_a_colada"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
