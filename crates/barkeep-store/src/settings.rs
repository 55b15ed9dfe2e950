//! App settings and the persisted auth session.
//!
//! Both are small single-row JSON tables: the settings shape changes often
//! enough that a typed column per field would mean a migration per tweak.

use barkeep_shared::model::UserSession;
use rusqlite::params;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::Result;

/// User-tunable application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Master switch for in-app and OS notifications.
    pub notifications_enabled: bool,
    /// Whether the Discover screen rotates a cocktail of the day.
    pub cocktail_of_day_enabled: bool,
    /// Theme preference: "dark", "light", or "system".
    pub theme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            cocktail_of_day_enabled: true,
            theme: "system".into(),
        }
    }
}

impl Database {
    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Read the settings row, falling back to defaults if absent.
    pub fn get_settings(&self) -> Result<AppSettings> {
        let result: std::result::Result<String, _> =
            self.conn()
                .query_row("SELECT json FROM app_settings WHERE id = 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(AppSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the settings row.
    pub fn set_settings(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO app_settings (id, json) VALUES (1, ?1)",
            params![json],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Auth session
    // ------------------------------------------------------------------

    /// Persist the signed-in session for restoration on next launch.
    pub fn save_session(&self, session: &UserSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO auth_session (id, json) VALUES (1, ?1)",
            params![json],
        )?;
        Ok(())
    }

    /// Load the persisted session, if any.
    pub fn load_session(&self) -> Result<Option<UserSession>> {
        let result: std::result::Result<String, _> =
            self.conn()
                .query_row("SELECT json FROM auth_session WHERE id = 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Forget the persisted session (sign-out, account deletion).
    pub fn clear_session(&self) -> Result<()> {
        self.conn().execute("DELETE FROM auth_session", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn settings_default_when_absent() {
        let (_dir, db) = test_db();
        assert_eq!(db.get_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn settings_round_trip() {
        let (_dir, db) = test_db();
        let settings = AppSettings {
            notifications_enabled: false,
            cocktail_of_day_enabled: true,
            theme: "dark".into(),
        };

        db.set_settings(&settings).unwrap();
        assert_eq!(db.get_settings().unwrap(), settings);
    }

    #[test]
    fn session_round_trip_and_clear() {
        let (_dir, db) = test_db();
        assert!(db.load_session().unwrap().is_none());

        let session = UserSession {
            uid: "uid-1".into(),
            email: "amari@example.com".into(),
            display_name: Some("Amari".into()),
            photo_url: None,
        };

        db.save_session(&session).unwrap();
        assert_eq!(db.load_session().unwrap(), Some(session));

        db.clear_session().unwrap();
        assert!(db.load_session().unwrap().is_none());
    }
}
