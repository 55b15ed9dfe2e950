//! In-memory capability implementations.
//!
//! Used by tests and by headless hosts (CI smoke runs, the dev REPL).
//! They record what they are asked to do so tests can assert on it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use barkeep_shared::model::UserSession;
use barkeep_shared::AuthError;

use super::{AuthManager, PushNotificationManager, ShareManager, UrlOpener};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Email/password account book plus a Google-token shortcut.
#[derive(Default)]
pub struct InMemoryAuthManager {
    accounts: Mutex<HashMap<String, String>>,
    session: Mutex<Option<UserSession>>,
}

impl InMemoryAuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account (builder-style, for tests).
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        self
    }

    fn make_session(email: &str) -> UserSession {
        UserSession {
            uid: format!("uid-{email}"),
            email: email.to_string(),
            display_name: None,
            photo_url: None,
        }
    }
}

#[async_trait]
impl AuthManager for InMemoryAuthManager {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserSession, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(stored) if stored == password => {
                let session = Self::make_session(email);
                *self.session.lock().unwrap() = Some(session.clone());
                Ok(session)
            }
            Some(_) => Err(AuthError::Provider("Incorrect password".into())),
            None => Err(AuthError::Provider("No account for this email".into())),
        }
    }

    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserSession, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::Provider("Account already exists".into()));
        }
        accounts.insert(email.to_string(), password.to_string());

        let session = Self::make_session(email);
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn sign_in_with_google(&self, id_token: &str) -> Result<UserSession, AuthError> {
        if id_token.is_empty() {
            return Err(AuthError::Cancelled);
        }
        let session = Self::make_session("google-user@example.com");
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn reauthenticate(&self, password: &str) -> Result<(), AuthError> {
        let session = self.session.lock().unwrap();
        let session = session.as_ref().ok_or(AuthError::NoSession)?;

        let accounts = self.accounts.lock().unwrap();
        match accounts.get(&session.email) {
            Some(stored) if stored == password => Ok(()),
            Some(_) => Err(AuthError::Provider("Incorrect password".into())),
            // Google-only accounts have no password on file.
            None => Ok(()),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn delete_account(&self) -> Result<(), AuthError> {
        let mut session = self.session.lock().unwrap();
        let current = session.take().ok_or(AuthError::NoSession)?;
        self.accounts.lock().unwrap().remove(&current.email);
        Ok(())
    }

    fn current_session(&self) -> Option<UserSession> {
        self.session.lock().unwrap().clone()
    }
}

// ---------------------------------------------------------------------------
// Push notifications
// ---------------------------------------------------------------------------

/// Records posts; permission is toggleable from tests.
pub struct InMemoryPushManager {
    permission: AtomicBool,
    pub posted: Mutex<Vec<(String, String)>>,
}

impl InMemoryPushManager {
    pub fn new(permission: bool) -> Self {
        Self {
            permission: AtomicBool::new(permission),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::SeqCst);
    }
}

#[async_trait]
impl PushNotificationManager for InMemoryPushManager {
    async fn permission_granted(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    async fn post(&self, title: &str, message: &str) {
        self.posted
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Share / URLs
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryShareManager {
    pub shared: Mutex<Vec<String>>,
}

impl InMemoryShareManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShareManager for InMemoryShareManager {
    fn share_text(&self, text: &str) {
        self.shared.lock().unwrap().push(text.to_string());
    }
}

#[derive(Default)]
pub struct InMemoryUrlOpener {
    pub opened: Mutex<Vec<String>>,
}

impl InMemoryUrlOpener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UrlOpener for InMemoryUrlOpener {
    fn open(&self, url: &str) -> bool {
        self.opened.lock().unwrap().push(url.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn email_sign_in_checks_the_password() {
        let auth = InMemoryAuthManager::new().with_account("a@b.c", "secret");

        assert!(auth.sign_in_with_email("a@b.c", "wrong").await.is_err());
        let session = auth.sign_in_with_email("a@b.c", "secret").await.unwrap();
        assert_eq!(session.email, "a@b.c");
        assert!(auth.current_session().is_some());
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let auth = InMemoryAuthManager::new().with_account("a@b.c", "secret");
        auth.sign_in_with_email("a@b.c", "secret").await.unwrap();

        auth.sign_out().await.unwrap();
        assert!(auth.current_session().is_none());
    }

    #[tokio::test]
    async fn delete_account_requires_a_session() {
        let auth = InMemoryAuthManager::new();
        assert!(matches!(
            auth.delete_account().await,
            Err(AuthError::NoSession)
        ));
    }

    #[tokio::test]
    async fn empty_google_token_is_a_cancellation() {
        let auth = InMemoryAuthManager::new();
        assert!(matches!(
            auth.sign_in_with_google("").await,
            Err(AuthError::Cancelled)
        ));
    }
}
