//! Auth screen state machine.
//!
//! ```text
//! Unauthenticated -> Loading -> Authenticated(user)
//!                            -> Error(message)      (inline, no retry)
//!                            -> GoogleSignInRequired (shell hand-off)
//! ```
//!
//! `GoogleSignInRequired` exists only because the common layer cannot run
//! the platform credential picker itself: the shell observes the state,
//! runs its picker, and calls [`AuthViewModel::complete_google_sign_in`]
//! with the resulting ID token.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use barkeep_shared::model::UserSession;
use barkeep_store::Database;

use crate::events::{AppEvent, EventBus};
use crate::platform::AuthManager;

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthUiState {
    #[default]
    Unauthenticated,
    Loading,
    Authenticated(UserSession),
    Error(String),
    /// Waiting for the shell to run the platform credential picker.
    GoogleSignInRequired,
}

pub struct AuthViewModel {
    state: Arc<watch::Sender<AuthUiState>>,
    auth: Arc<dyn AuthManager>,
    db: Arc<Mutex<Database>>,
    events: EventBus,
}

impl AuthViewModel {
    pub fn new(auth: Arc<dyn AuthManager>, db: Arc<Mutex<Database>>, events: EventBus) -> Self {
        let (tx, _) = watch::channel(AuthUiState::default());
        Self {
            state: Arc::new(tx),
            auth,
            db,
            events,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthUiState> {
        self.state.subscribe()
    }

    /// Restore a persisted session from the local store, if any.
    pub fn restore_session(&self) {
        match self.db.lock().unwrap().load_session() {
            Ok(Some(session)) => {
                tracing::info!(uid = %session.uid, "session restored");
                self.state.send_replace(AuthUiState::Authenticated(session));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "session restore failed"),
        }
    }

    pub async fn sign_in_with_email(&self, email: &str, password: &str) {
        self.state.send_replace(AuthUiState::Loading);
        let result = self.auth.sign_in_with_email(email, password).await;
        self.finish_sign_in(result);
    }

    pub async fn sign_up_with_email(&self, email: &str, password: &str) {
        self.state.send_replace(AuthUiState::Loading);
        let result = self.auth.sign_up_with_email(email, password).await;
        self.finish_sign_in(result);
    }

    /// Hand off to the shell's Google credential picker.
    pub fn request_google_sign_in(&self) {
        self.state.send_replace(AuthUiState::GoogleSignInRequired);
    }

    /// Called by the shell with the picker's ID token.
    pub async fn complete_google_sign_in(&self, id_token: &str) {
        self.state.send_replace(AuthUiState::Loading);
        let result = self.auth.sign_in_with_google(id_token).await;
        self.finish_sign_in(result);
    }

    /// Called by the shell when the user dismissed the picker.
    pub fn cancel_google_sign_in(&self) {
        self.state.send_replace(AuthUiState::Unauthenticated);
    }

    pub async fn sign_out(&self) {
        if let Err(e) = self.auth.sign_out().await {
            tracing::warn!(error = %e, "provider sign-out failed");
        }
        self.forget_session();
    }

    /// Delete the account at the provider, then locally. Requires a
    /// recent re-authentication; failures surface inline.
    pub async fn delete_account(&self, password: &str) {
        self.state.send_replace(AuthUiState::Loading);

        if let Err(e) = self.auth.reauthenticate(password).await {
            self.state.send_replace(AuthUiState::Error(e.to_string()));
            return;
        }
        if let Err(e) = self.auth.delete_account().await {
            self.state.send_replace(AuthUiState::Error(e.to_string()));
            return;
        }

        self.forget_session();
    }

    fn finish_sign_in(&self, result: Result<UserSession, barkeep_shared::AuthError>) {
        match result {
            Ok(session) => {
                if let Err(e) = self.db.lock().unwrap().save_session(&session) {
                    tracing::warn!(error = %e, "failed to persist session");
                }
                tracing::info!(uid = %session.uid, "signed in");
                self.events.emit(AppEvent::SessionChanged);
                self.state.send_replace(AuthUiState::Authenticated(session));
            }
            Err(e) => {
                self.state.send_replace(AuthUiState::Error(e.to_string()));
            }
        }
    }

    fn forget_session(&self) {
        if let Err(e) = self.db.lock().unwrap().clear_session() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.events.emit(AppEvent::SessionChanged);
        self.state.send_replace(AuthUiState::Unauthenticated);
    }
}

#[cfg(test)]
mod tests {
    use crate::context::testing::test_context;

    use super::*;

    fn auth_vm(ctx: &crate::AppContext) -> AuthViewModel {
        AuthViewModel::new(
            Arc::clone(&ctx.auth),
            Arc::clone(&ctx.db),
            ctx.events.clone(),
        )
    }

    #[tokio::test]
    async fn email_sign_in_reaches_authenticated_and_persists() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.sign_in_with_email("amari@example.com", "secret").await;

        match vm.subscribe().borrow().clone() {
            AuthUiState::Authenticated(session) => {
                assert_eq!(session.email, "amari@example.com")
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }
        assert!(ctx.db.lock().unwrap().load_session().unwrap().is_some());
    }

    #[tokio::test]
    async fn wrong_password_surfaces_the_provider_message() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.sign_in_with_email("amari@example.com", "nope").await;

        assert!(matches!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Error(_)
        ));
    }

    #[tokio::test]
    async fn google_flow_hands_off_and_completes() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.request_google_sign_in();
        assert_eq!(
            vm.subscribe().borrow().clone(),
            AuthUiState::GoogleSignInRequired
        );

        vm.complete_google_sign_in("a-token").await;
        assert!(matches!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn cancelled_google_flow_returns_to_unauthenticated() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.request_google_sign_in();
        vm.cancel_google_sign_in();

        assert_eq!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Unauthenticated
        );
    }

    #[tokio::test]
    async fn sign_out_forgets_the_persisted_session() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.sign_in_with_email("amari@example.com", "secret").await;
        vm.sign_out().await;

        assert_eq!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Unauthenticated
        );
        assert!(ctx.db.lock().unwrap().load_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn restore_picks_up_a_persisted_session() {
        let (_dir, ctx) = test_context();

        {
            let vm = auth_vm(&ctx);
            vm.sign_in_with_email("amari@example.com", "secret").await;
        }

        // Fresh view-model, same store: next launch.
        let vm = auth_vm(&ctx);
        vm.restore_session();
        assert!(matches!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn delete_account_requires_reauthentication() {
        let (_dir, ctx) = test_context();
        let vm = auth_vm(&ctx);

        vm.sign_in_with_email("amari@example.com", "secret").await;

        vm.delete_account("wrong-password").await;
        assert!(matches!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Error(_)
        ));

        vm.delete_account("secret").await;
        assert_eq!(
            vm.subscribe().borrow().clone(),
            AuthUiState::Unauthenticated
        );
    }
}
