//! CRUD operations for [`CocktailRecord`] rows.
//!
//! The `cocktails` table is the cached catalog. Rows are written once on
//! first launch (and again if the catalog asset changes); the only column
//! that mutates afterwards is `is_favorite`, which is why
//! [`Database::upsert_cocktails`] never touches it.

use barkeep_shared::model::{AlcoholStrength, CocktailRecord, Complexity};
use rusqlite::params;

use crate::database::Database;
use crate::error::StoreError;
use crate::Result;

/// Column list shared by every SELECT in this module.
const COLUMNS: &str = "id, title, image_url, cocktail_url, video_url, category, category_key, \
     views, ingredients, ingredient_keys, method, garnish, glass, prep_time_minutes, \
     complexity, alcohol_strength, search_text, is_favorite";

impl Database {
    // ------------------------------------------------------------------
    // Create / update
    // ------------------------------------------------------------------

    /// Upsert a batch of catalog records.
    ///
    /// Conflicting ids overwrite every catalog column but leave
    /// `is_favorite` alone, so re-populating the cache never clobbers the
    /// user's favorites.
    pub fn upsert_cocktails(&self, records: &[CocktailRecord]) -> Result<()> {
        let mut stmt = self.conn().prepare(
            "INSERT INTO cocktails (id, title, image_url, cocktail_url, video_url, category, \
             category_key, views, ingredients, ingredient_keys, method, garnish, glass, \
             prep_time_minutes, complexity, alcohol_strength, search_text, is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 image_url = excluded.image_url,
                 cocktail_url = excluded.cocktail_url,
                 video_url = excluded.video_url,
                 category = excluded.category,
                 category_key = excluded.category_key,
                 views = excluded.views,
                 ingredients = excluded.ingredients,
                 ingredient_keys = excluded.ingredient_keys,
                 method = excluded.method,
                 garnish = excluded.garnish,
                 glass = excluded.glass,
                 prep_time_minutes = excluded.prep_time_minutes,
                 complexity = excluded.complexity,
                 alcohol_strength = excluded.alcohol_strength,
                 search_text = excluded.search_text",
        )?;

        for record in records {
            stmt.execute(params![
                record.id,
                record.title,
                record.image_url,
                record.cocktail_url,
                record.video_url,
                record.category,
                record.category_key,
                record.views,
                serde_json::to_string(&record.ingredients)?,
                serde_json::to_string(&record.ingredient_keys)?,
                record.method,
                record.garnish,
                record.glass,
                record.prep_time_minutes,
                record.complexity.as_key(),
                record.alcohol_strength.as_key(),
                record.search_text,
                record.is_favorite,
            ])?;
        }

        tracing::debug!(count = records.len(), "cocktails upserted");
        Ok(())
    }

    /// Upsert a single record.
    pub fn upsert_cocktail(&self, record: &CocktailRecord) -> Result<()> {
        self.upsert_cocktails(std::slice::from_ref(record))
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single cocktail by slug id.
    pub fn get_cocktail(&self, id: &str) -> Result<CocktailRecord> {
        self.conn()
            .query_row(
                &format!("SELECT {COLUMNS} FROM cocktails WHERE id = ?1"),
                params![id],
                row_to_cocktail,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// List the whole catalog, ordered by title.
    pub fn list_cocktails(&self) -> Result<Vec<CocktailRecord>> {
        self.query_cocktails(
            &format!("SELECT {COLUMNS} FROM cocktails ORDER BY title ASC"),
            params![],
        )
    }

    /// List cocktails in one category, ordered by title.
    pub fn list_cocktails_by_category(&self, category_key: &str) -> Result<Vec<CocktailRecord>> {
        self.query_cocktails(
            &format!(
                "SELECT {COLUMNS} FROM cocktails WHERE category_key = ?1 ORDER BY title ASC"
            ),
            params![category_key],
        )
    }

    /// List the favorited cocktails, ordered by title.
    pub fn list_favorite_cocktails(&self) -> Result<Vec<CocktailRecord>> {
        self.query_cocktails(
            &format!("SELECT {COLUMNS} FROM cocktails WHERE is_favorite = 1 ORDER BY title ASC"),
            params![],
        )
    }

    /// Case-insensitive substring search over title and search blob.
    ///
    /// `instr` keeps the match semantics literal -- no LIKE wildcard
    /// escaping concerns. A query that matches nothing returns an empty
    /// list.
    pub fn search_cocktails(&self, query: &str) -> Result<Vec<CocktailRecord>> {
        self.query_cocktails(
            &format!(
                "SELECT {COLUMNS} FROM cocktails
                 WHERE instr(lower(title), lower(?1)) > 0
                    OR instr(lower(search_text), lower(?1)) > 0
                 ORDER BY title ASC"
            ),
            params![query],
        )
    }

    /// Number of cached catalog rows.
    pub fn count_cocktails(&self) -> Result<u64> {
        let count: u64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM cocktails", [], |row| row.get(0))?;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Favorite flag
    // ------------------------------------------------------------------

    /// Set the favorite flag for one cocktail. Returns `true` if a row
    /// was updated (i.e. the id exists).
    pub fn set_favorite(&self, id: &str, is_favorite: bool) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE cocktails SET is_favorite = ?2 WHERE id = ?1",
            params![id, is_favorite],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete every cached row. Returns the number of rows removed.
    pub fn delete_all_cocktails(&self) -> Result<usize> {
        let affected = self.conn().execute("DELETE FROM cocktails", [])?;
        Ok(affected)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn query_cocktails(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<CocktailRecord>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map(params, row_to_cocktail)?;

        let mut cocktails = Vec::new();
        for row in rows {
            cocktails.push(row?);
        }
        Ok(cocktails)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`CocktailRecord`].
fn row_to_cocktail(row: &rusqlite::Row<'_>) -> rusqlite::Result<CocktailRecord> {
    let ingredients_json: String = row.get(8)?;
    let ingredient_keys_json: String = row.get(9)?;

    let ingredients: Vec<String> = serde_json::from_str(&ingredients_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let ingredient_keys: Vec<String> =
        serde_json::from_str(&ingredient_keys_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let complexity_key: String = row.get(14)?;
    let strength_key: String = row.get(15)?;

    Ok(CocktailRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        image_url: row.get(2)?,
        cocktail_url: row.get(3)?,
        video_url: row.get(4)?,
        category: row.get(5)?,
        category_key: row.get(6)?,
        views: row.get(7)?,
        ingredients,
        ingredient_keys,
        method: row.get(10)?,
        garnish: row.get(11)?,
        glass: row.get(12)?,
        prep_time_minutes: row.get(13)?,
        complexity: Complexity::from_key(&complexity_key),
        alcohol_strength: AlcoholStrength::from_key(&strength_key),
        search_text: row.get(16)?,
        is_favorite: row.get(17)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    fn record(title: &str, category_key: &str) -> CocktailRecord {
        CocktailRecord {
            id: barkeep_shared::slug::slugify(title),
            title: title.to_string(),
            image_url: None,
            cocktail_url: None,
            video_url: None,
            category: "Test".to_string(),
            category_key: category_key.to_string(),
            views: 7,
            ingredients: vec!["White Rum".to_string(), "Mint".to_string()],
            ingredient_keys: vec!["white_rum".to_string(), "mint".to_string()],
            method: "Muddle mint, add rum, top with soda.".to_string(),
            garnish: Some("Mint sprig".to_string()),
            glass: Some("Highball".to_string()),
            prep_time_minutes: 5,
            complexity: Complexity::Simple,
            alcohol_strength: AlcoholStrength::Light,
            search_text: format!("{} white rum mint", title.to_lowercase()),
            is_favorite: false,
        }
    }

    #[test]
    fn upsert_and_read_back() {
        let (_dir, db) = test_db();
        let mojito = record("Mojito", "new_era");

        db.upsert_cocktails(&[mojito.clone()]).unwrap();

        let loaded = db.get_cocktail("mojito").unwrap();
        assert_eq!(loaded, mojito);
    }

    #[test]
    fn upsert_is_idempotent() {
        let (_dir, db) = test_db();
        let records = vec![record("Mojito", "new_era"), record("Negroni", "classics")];

        db.upsert_cocktails(&records).unwrap();
        db.upsert_cocktails(&records).unwrap();

        assert_eq!(db.count_cocktails().unwrap(), 2);
    }

    #[test]
    fn upsert_preserves_favorite_flag() {
        let (_dir, db) = test_db();
        let mojito = record("Mojito", "new_era");

        db.upsert_cocktails(&[mojito.clone()]).unwrap();
        assert!(db.set_favorite("mojito", true).unwrap());

        // Catalog refresh: same id, updated data, is_favorite untouched.
        let mut refreshed = mojito;
        refreshed.views = 99;
        db.upsert_cocktails(&[refreshed]).unwrap();

        let loaded = db.get_cocktail("mojito").unwrap();
        assert_eq!(loaded.views, 99);
        assert!(loaded.is_favorite);
    }

    #[test]
    fn missing_id_is_not_found() {
        let (_dir, db) = test_db();
        assert!(matches!(
            db.get_cocktail("nope"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn favorite_toggle_round_trip() {
        let (_dir, db) = test_db();
        db.upsert_cocktails(&[record("Mojito", "new_era")]).unwrap();

        assert!(db.set_favorite("mojito", true).unwrap());
        let favs = db.list_favorite_cocktails().unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].id, "mojito");

        assert!(db.set_favorite("mojito", false).unwrap());
        assert!(db.list_favorite_cocktails().unwrap().is_empty());
    }

    #[test]
    fn set_favorite_on_unknown_id_is_false() {
        let (_dir, db) = test_db();
        assert!(!db.set_favorite("ghost", true).unwrap());
    }

    #[test]
    fn search_matches_title_and_blob_case_insensitively() {
        let (_dir, db) = test_db();
        db.upsert_cocktails(&[record("Mojito", "new_era"), record("Negroni", "classics")])
            .unwrap();

        // Title match, different case.
        let by_title = db.search_cocktails("MOJI").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "mojito");

        // Blob-only match: "mint" appears in the search text, not titles.
        let by_blob = db.search_cocktails("mint").unwrap();
        assert_eq!(by_blob.len(), 2);

        // No match is an empty list, not an error.
        assert!(db.search_cocktails("zzz").unwrap().is_empty());
    }

    #[test]
    fn list_by_category_filters() {
        let (_dir, db) = test_db();
        db.upsert_cocktails(&[record("Mojito", "new_era"), record("Negroni", "classics")])
            .unwrap();

        let classics = db.list_cocktails_by_category("classics").unwrap();
        assert_eq!(classics.len(), 1);
        assert_eq!(classics[0].id, "negroni");
    }

    #[test]
    fn delete_all_empties_the_table() {
        let (_dir, db) = test_db();
        db.upsert_cocktails(&[record("Mojito", "new_era")]).unwrap();

        assert_eq!(db.delete_all_cocktails().unwrap(), 1);
        assert_eq!(db.count_cocktails().unwrap(), 0);
    }

    #[test]
    fn list_is_ordered_by_title() {
        let (_dir, db) = test_db();
        db.upsert_cocktails(&[record("Negroni", "classics"), record("Mojito", "new_era")])
            .unwrap();

        let all = db.list_cocktails().unwrap();
        assert_eq!(all[0].title, "Mojito");
        assert_eq!(all[1].title, "Negroni");
    }
}
