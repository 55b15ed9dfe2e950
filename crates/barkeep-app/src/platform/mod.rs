//! Platform capability interfaces.
//!
//! Authentication, OS notifications, sharing, URL opening, and preference
//! storage all need platform code. The common layer declares each as an
//! object-safe trait; the Android and iOS shells implement them over their
//! native SDKs and hand them to [`crate::context::AppContext`] at startup.
//! The [`inmem`] implementations serve tests and headless hosts.

pub mod inmem;
pub mod prefs;

use async_trait::async_trait;

use barkeep_shared::model::UserSession;
use barkeep_shared::AuthError;
use barkeep_store::AppSettings;

/// Identity-provider integration.
///
/// Every operation is a single attempt; failures carry the provider's
/// human-readable message and are shown inline. The common layer never
/// retries.
#[async_trait]
pub trait AuthManager: Send + Sync {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserSession, AuthError>;

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserSession, AuthError>;

    /// Exchange a Google ID token (obtained by the shell's credential
    /// picker) for a session.
    async fn sign_in_with_google(&self, id_token: &str) -> Result<UserSession, AuthError>;

    /// Re-authenticate the current user, required by providers before
    /// sensitive operations such as account deletion.
    async fn reauthenticate(&self, password: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn delete_account(&self) -> Result<(), AuthError>;

    /// The provider's current session, if one is live in this process.
    fn current_session(&self) -> Option<UserSession>;
}

/// OS notification posting.
#[async_trait]
pub trait PushNotificationManager: Send + Sync {
    /// Whether the OS notification permission is currently granted.
    async fn permission_granted(&self) -> bool;

    /// Post an OS notification. Callers check
    /// [`permission_granted`](Self::permission_granted) first; without
    /// permission the post is skipped silently, never treated as an error.
    async fn post(&self, title: &str, message: &str);
}

/// Native share sheet.
pub trait ShareManager: Send + Sync {
    fn share_text(&self, text: &str);
}

/// Opening URLs in the system browser.
pub trait UrlOpener: Send + Sync {
    /// Returns `false` if the platform refused the URL.
    fn open(&self, url: &str) -> bool;
}

/// Preference storage.
///
/// Defaults to the store-backed [`prefs::StorePreferences`]; shells may
/// substitute a native implementation (DataStore, UserDefaults).
pub trait PreferencesManager: Send + Sync {
    /// Read the settings, falling back to defaults on any failure.
    fn load(&self) -> AppSettings;

    /// Persist the settings.
    fn store(&self, settings: &AppSettings);
}
