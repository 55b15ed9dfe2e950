//! Store-backed preference storage, the default when a shell does not
//! supply a native implementation.

use std::sync::{Arc, Mutex};

use barkeep_store::{AppSettings, Database};

use super::PreferencesManager;

pub struct StorePreferences {
    db: Arc<Mutex<Database>>,
}

impl StorePreferences {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

impl PreferencesManager for StorePreferences {
    fn load(&self) -> AppSettings {
        match self.db.lock().unwrap().get_settings() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read settings, using defaults");
                AppSettings::default()
            }
        }
    }

    fn store(&self, settings: &AppSettings) {
        if let Err(e) = self.db.lock().unwrap().set_settings(settings) {
            tracing::error!(error = %e, "failed to persist settings");
        }
    }
}
