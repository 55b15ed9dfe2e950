//! The cocktail repository.
//!
//! Orchestrates "read from the local store, populating it from the bundled
//! catalog on first use", merges nothing by hand (the favorite flag lives
//! on the rows themselves), and exposes reads as snapshot streams that
//! re-emit whenever the store changes.

use std::sync::{Arc, Mutex};

use futures::Stream;
use tokio::sync::{watch, OnceCell};

use barkeep_catalog::CatalogLoader;
use barkeep_shared::model::CocktailRecord;
use barkeep_store::{Database, StoreError};

use crate::events::{AppEvent, EventBus};
use crate::Result;

/// Repository over the local store and the bundled catalog.
///
/// Every read lazily triggers first-launch population; the [`OnceCell`]
/// guarantees concurrent first readers trigger it exactly once.
pub struct CocktailRepository {
    db: Arc<Mutex<Database>>,
    loader: Arc<CatalogLoader>,
    events: EventBus,
    populated: OnceCell<()>,
    /// Bumped on every store mutation; snapshot streams re-query on it.
    revision: watch::Sender<u64>,
}

impl CocktailRepository {
    pub fn new(db: Arc<Mutex<Database>>, loader: Arc<CatalogLoader>, events: EventBus) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            db,
            loader,
            events,
            populated: OnceCell::new(),
            revision,
        }
    }

    // ------------------------------------------------------------------
    // First-launch population
    // ------------------------------------------------------------------

    /// Populate the store from the bundled catalog if it is empty.
    ///
    /// Single-flight: concurrent callers await one population. A failed
    /// attempt is not latched, so the UI's retry re-runs it.
    pub async fn ensure_populated(&self) -> Result<()> {
        self.populated
            .get_or_try_init(|| async {
                let count = self.db.lock().unwrap().count_cocktails()?;
                if count > 0 {
                    tracing::debug!(count, "store already populated");
                    return Ok(());
                }

                let catalog = self.loader.load()?;
                self.db.lock().unwrap().upsert_cocktails(&catalog.cocktails)?;

                tracing::info!(count = catalog.cocktails.len(), "store populated from catalog");
                self.bump();
                self.events.emit(AppEvent::CatalogPopulated {
                    count: catalog.cocktails.len(),
                });
                Ok(())
            })
            .await
            .copied()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Stream of the whole catalog.
    pub async fn all_cocktails(&self) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.ensure_populated().await?;
        Ok(self.observe(|db| db.list_cocktails()))
    }

    /// Stream of cocktails whose title or search blob contains `query`,
    /// case-insensitively.
    pub async fn search_cocktails(
        &self,
        query: &str,
    ) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.ensure_populated().await?;
        let query = query.to_string();
        Ok(self.observe(move |db| db.search_cocktails(&query)))
    }

    /// Stream of the favorited cocktails.
    pub async fn favorite_cocktails(&self) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.ensure_populated().await?;
        Ok(self.observe(|db| db.list_favorite_cocktails()))
    }

    /// Stream of one category.
    pub async fn cocktails_by_category(
        &self,
        category_key: &str,
    ) -> Result<impl Stream<Item = Vec<CocktailRecord>>> {
        self.ensure_populated().await?;
        let category_key = category_key.to_string();
        Ok(self.observe(move |db| db.list_cocktails_by_category(&category_key)))
    }

    /// Point read by slug id. An unknown id is `None`, not an error.
    pub async fn cocktail_by_id(&self, id: &str) -> Result<Option<CocktailRecord>> {
        self.ensure_populated().await?;
        match self.db.lock().unwrap().get_cocktail(id) {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Category display strings from the catalog's enum table.
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.ensure_populated().await?;
        Ok(self.loader.load()?.categories.clone())
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Mark a cocktail as favorite. Returns `false` for unknown ids.
    pub async fn add_favorite(&self, id: &str) -> Result<bool> {
        self.set_favorite(id, true).await
    }

    /// Unmark a cocktail as favorite. Returns `false` for unknown ids.
    pub async fn remove_favorite(&self, id: &str) -> Result<bool> {
        self.set_favorite(id, false).await
    }

    /// Flip the favorite flag. Returns the new value, or `None` for an
    /// unknown id.
    pub async fn toggle_favorite(&self, id: &str) -> Result<Option<bool>> {
        self.ensure_populated().await?;

        let current = match self.cocktail_by_id(id).await? {
            Some(record) => record.is_favorite,
            None => return Ok(None),
        };

        self.set_favorite(id, !current).await?;
        Ok(Some(!current))
    }

    async fn set_favorite(&self, id: &str, is_favorite: bool) -> Result<bool> {
        self.ensure_populated().await?;

        let changed = self.db.lock().unwrap().set_favorite(id, is_favorite)?;
        if changed {
            tracing::debug!(id, is_favorite, "favorite updated");
            self.bump();
            self.events.emit(AppEvent::FavoriteChanged {
                id: id.to_string(),
                is_favorite,
            });
        }
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn bump(&self) {
        self.revision.send_modify(|r| *r += 1);
    }

    /// Build a snapshot stream: emit the query result immediately, then
    /// re-emit after every revision bump. A failed re-query logs and
    /// emits an empty list rather than ending the stream.
    fn observe<F>(&self, query: F) -> impl Stream<Item = Vec<CocktailRecord>>
    where
        F: Fn(&Database) -> barkeep_store::Result<Vec<CocktailRecord>> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let rx = self.revision.subscribe();

        futures::stream::unfold(
            (rx, db, query, true),
            |(mut rx, db, query, first)| async move {
                if !first {
                    // Channel closes when the repository is dropped.
                    rx.changed().await.ok()?;
                }

                let snapshot = {
                    let guard = db.lock().unwrap();
                    query(&guard).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "repository query failed");
                        Vec::new()
                    })
                };

                Some((snapshot, (rx, db, query, false)))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::StreamExt;

    use barkeep_catalog::ResourceReader;

    use super::*;

    const CATALOG_JSON: &str = r#"{
        "enums": {"categories": ["Test Drinks"], "ingredients": {}},
        "cocktails": [
            {"title": "Clover Club", "category": "Test Drinks", "category_enum": "test_drinks",
             "ingredients": ["Gin"], "search_text": "clover club gin raspberry"},
            {"title": "Mojito", "category": "Test Drinks", "category_enum": "test_drinks",
             "ingredients": ["White Rum", "Mint"], "search_text": "mojito white rum mint"}
        ]
    }"#;

    struct CountingReader {
        reads: AtomicUsize,
    }

    impl ResourceReader for CountingReader {
        fn read_to_string(&self, _name: &str) -> barkeep_catalog::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(CATALOG_JSON.to_string())
        }
    }

    fn test_repo() -> (tempfile::TempDir, Arc<CocktailRepository>, Arc<CountingReader>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();

        let reader = Arc::new(CountingReader {
            reads: AtomicUsize::new(0),
        });
        let dyn_reader: Arc<dyn ResourceReader> = reader.clone();
        let loader = Arc::new(CatalogLoader::new(dyn_reader));

        let repo = Arc::new(CocktailRepository::new(
            Arc::new(Mutex::new(db)),
            loader,
            EventBus::new(),
        ));
        (dir, repo, reader)
    }

    #[tokio::test]
    async fn first_read_populates_the_store() {
        let (_dir, repo, _reader) = test_repo();

        let stream = repo.all_cocktails().await.unwrap();
        futures::pin_mut!(stream);

        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(repo.db.lock().unwrap().count_cocktails().unwrap(), 2);
    }

    #[tokio::test]
    async fn population_is_single_flight() {
        let (_dir, repo, reader) = test_repo();

        let (a, b) = tokio::join!(repo.ensure_populated(), repo.ensure_populated());
        a.unwrap();
        b.unwrap();

        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
        assert_eq!(repo.db.lock().unwrap().count_cocktails().unwrap(), 2);
    }

    #[tokio::test]
    async fn lookup_by_derived_id() {
        let (_dir, repo, _reader) = test_repo();

        let record = repo.cocktail_by_id("clover_club").await.unwrap().unwrap();
        assert_eq!(record.title, "Clover Club");

        assert!(repo.cocktail_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn favorites_stream_follows_toggles() {
        let (_dir, repo, _reader) = test_repo();

        let stream = repo.favorite_cocktails().await.unwrap();
        futures::pin_mut!(stream);

        assert!(stream.next().await.unwrap().is_empty());

        assert_eq!(repo.toggle_favorite("mojito").await.unwrap(), Some(true));
        let favs = stream.next().await.unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].id, "mojito");

        assert_eq!(repo.toggle_favorite("mojito").await.unwrap(), Some(false));
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_on_unknown_id_is_none() {
        let (_dir, repo, _reader) = test_repo();
        assert_eq!(repo.toggle_favorite("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn search_stream_matches_blob() {
        let (_dir, repo, _reader) = test_repo();

        let stream = repo.search_cocktails("mint").await.unwrap();
        futures::pin_mut!(stream);

        let hits = stream.next().await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "mojito");
    }

    #[tokio::test]
    async fn category_stream_filters() {
        let (_dir, repo, _reader) = test_repo();

        let stream = repo.cocktails_by_category("test_drinks").await.unwrap();
        futures::pin_mut!(stream);
        assert_eq!(stream.next().await.unwrap().len(), 2);

        let stream = repo.cocktails_by_category("nope").await.unwrap();
        futures::pin_mut!(stream);
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn categories_come_from_the_enum_table() {
        let (_dir, repo, _reader) = test_repo();
        assert_eq!(repo.categories().await.unwrap(), vec!["Test Drinks"]);
    }
}
