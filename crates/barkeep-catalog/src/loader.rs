//! Catalog asset access and the process-lifetime parse cache.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use barkeep_shared::constants::CATALOG_ASSET_NAME;

use crate::error::CatalogError;
use crate::parse::{parse_catalog, CatalogDatabase};
use crate::Result;

/// Host-provided access to bundled assets.
///
/// Android resolves these out of the APK asset manager, iOS out of the
/// main bundle; tests and desktop hosts read a plain directory.
pub trait ResourceReader: Send + Sync {
    /// Read the named asset to a string.
    fn read_to_string(&self, name: &str) -> Result<String>;
}

/// [`ResourceReader`] over a filesystem directory.
pub struct DirResourceReader {
    base: PathBuf,
}

impl DirResourceReader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ResourceReader for DirResourceReader {
    fn read_to_string(&self, name: &str) -> Result<String> {
        let path = self.base.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CatalogError::ResourceNotFound(name.to_string()))
            }
            Err(e) => Err(CatalogError::Io(e)),
        }
    }
}

/// Loads and caches the bundled catalog.
///
/// The first successful [`load`](Self::load) parses the asset and pins the
/// result for the process lifetime; later calls are lock-and-clone cheap.
/// A failed load is not cached, so a retry re-reads the asset.
pub struct CatalogLoader {
    reader: Arc<dyn ResourceReader>,
    asset_name: String,
    cache: RwLock<Option<Arc<CatalogDatabase>>>,
}

impl CatalogLoader {
    /// Loader for the default bundled asset.
    pub fn new(reader: Arc<dyn ResourceReader>) -> Self {
        Self::with_asset(reader, CATALOG_ASSET_NAME)
    }

    /// Loader for an explicitly named asset (tests, staged catalogs).
    pub fn with_asset(reader: Arc<dyn ResourceReader>, asset_name: impl Into<String>) -> Self {
        Self {
            reader,
            asset_name: asset_name.into(),
            cache: RwLock::new(None),
        }
    }

    /// Return the parsed catalog, reading and parsing the asset on first
    /// use.
    ///
    /// Two threads racing the first load may both parse; the result is
    /// identical either way and the first writer wins.
    pub fn load(&self) -> Result<Arc<CatalogDatabase>> {
        if let Some(cached) = self.cache.read().unwrap().as_ref() {
            return Ok(Arc::clone(cached));
        }

        let content = self.reader.read_to_string(&self.asset_name)?;
        let parsed = Arc::new(parse_catalog(&content)?);

        let mut cache = self.cache.write().unwrap();
        let stored = cache.get_or_insert_with(|| Arc::clone(&parsed));

        tracing::info!(
            asset = %self.asset_name,
            cocktails = stored.cocktails.len(),
            "catalog loaded"
        );

        Ok(Arc::clone(stored))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Reader that counts how many times the asset was actually read.
    struct CountingReader {
        content: std::sync::Mutex<Option<String>>,
        reads: AtomicUsize,
    }

    impl CountingReader {
        fn new(content: Option<&str>) -> Self {
            Self {
                content: std::sync::Mutex::new(content.map(String::from)),
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl ResourceReader for CountingReader {
        fn read_to_string(&self, name: &str) -> Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.content
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| CatalogError::ResourceNotFound(name.to_string()))
        }
    }

    const TWO_COCKTAILS: &str =
        r#"{"cocktails": [{"title": "Mojito"}, {"title": "Negroni"}]}"#;

    #[test]
    fn second_load_hits_the_cache() {
        let reader = Arc::new(CountingReader::new(Some(TWO_COCKTAILS)));
        let dyn_reader: Arc<dyn ResourceReader> = reader.clone();
        let loader = CatalogLoader::with_asset(dyn_reader, "test.json");

        let first = loader.load().unwrap();
        let second = loader.load().unwrap();

        assert_eq!(first.cocktails.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_asset_is_an_error() {
        let reader: Arc<dyn ResourceReader> = Arc::new(CountingReader::new(None));
        let loader = CatalogLoader::with_asset(reader, "test.json");

        assert!(matches!(
            loader.load(),
            Err(CatalogError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let reader = Arc::new(CountingReader::new(None));
        let dyn_reader: Arc<dyn ResourceReader> = reader.clone();
        let loader = CatalogLoader::with_asset(dyn_reader, "test.json");

        assert!(loader.load().is_err());

        // The asset "appears" (e.g. after a retry-worthy condition clears)
        // and the next load succeeds.
        *reader.content.lock().unwrap() = Some(TWO_COCKTAILS.to_string());
        let db = loader.load().unwrap();
        assert_eq!(db.cocktails.len(), 2);
        assert_eq!(reader.reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dir_reader_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.json"), TWO_COCKTAILS).unwrap();

        let reader: Arc<dyn ResourceReader> = Arc::new(DirResourceReader::new(dir.path()));
        let loader = CatalogLoader::with_asset(reader, "catalog.json");

        assert_eq!(loader.load().unwrap().cocktails.len(), 2);
    }
}
