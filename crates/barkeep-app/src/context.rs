//! The dependency-injection root.
//!
//! Built exactly once by the hosting shell at process start and passed
//! down by reference or `Arc`; nothing in the core reaches for ambient
//! global state.

use std::sync::{Arc, Mutex};

use barkeep_catalog::{CatalogLoader, ResourceReader};
use barkeep_store::Database;

use crate::events::EventBus;
use crate::notify::NotificationCenter;
use crate::platform::prefs::StorePreferences;
use crate::platform::{
    AuthManager, PreferencesManager, PushNotificationManager, ShareManager, UrlOpener,
};
use crate::repository::CocktailRepository;
use crate::usecases::UseCases;

/// Everything the host shell must provide.
pub struct PlatformAdapters {
    /// Bundled-asset access (APK asset manager, iOS main bundle, a plain
    /// directory on desktop).
    pub resources: Arc<dyn ResourceReader>,
    pub auth: Arc<dyn AuthManager>,
    pub push: Arc<dyn PushNotificationManager>,
    pub share: Arc<dyn ShareManager>,
    pub urls: Arc<dyn UrlOpener>,
    /// Optional native preference storage; the store-backed default is
    /// used when absent.
    pub preferences: Option<Arc<dyn PreferencesManager>>,
}

/// The composed application core.
pub struct AppContext {
    pub db: Arc<Mutex<Database>>,
    pub repository: Arc<CocktailRepository>,
    pub use_cases: UseCases,
    pub notifications: Arc<NotificationCenter>,
    pub events: EventBus,
    pub auth: Arc<dyn AuthManager>,
    pub push: Arc<dyn PushNotificationManager>,
    pub share: Arc<dyn ShareManager>,
    pub urls: Arc<dyn UrlOpener>,
    pub preferences: Arc<dyn PreferencesManager>,
}

impl AppContext {
    /// Wire the core together over an opened database.
    pub fn new(db: Database, adapters: PlatformAdapters) -> Self {
        let db = Arc::new(Mutex::new(db));
        let events = EventBus::new();

        let loader = Arc::new(CatalogLoader::new(adapters.resources));
        let repository = Arc::new(CocktailRepository::new(
            Arc::clone(&db),
            loader,
            events.clone(),
        ));
        let use_cases = UseCases::new(Arc::clone(&repository));

        let notifications = Arc::new(NotificationCenter::new(
            Arc::clone(&db),
            Arc::clone(&adapters.push),
            events.clone(),
        ));

        let preferences = adapters
            .preferences
            .unwrap_or_else(|| Arc::new(StorePreferences::new(Arc::clone(&db))));

        Self {
            db,
            repository,
            use_cases,
            notifications,
            events,
            auth: adapters.auth,
            push: adapters.push,
            share: adapters.share,
            urls: adapters.urls,
            preferences,
        }
    }
}
