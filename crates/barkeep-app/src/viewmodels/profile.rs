//! Profile screen: session header, settings toggles, share/about actions,
//! and the notification badge.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use barkeep_shared::constants::APP_NAME;
use barkeep_shared::model::UserSession;
use barkeep_store::{AppSettings, Database};

use crate::events::{AppEvent, EventBus};
use crate::notify::NotificationCenter;
use crate::platform::{PreferencesManager, ShareManager, UrlOpener};

use super::auth::AuthViewModel;

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUiState {
    pub session: Option<UserSession>,
    pub settings: AppSettings,
    pub unread_notifications: u64,
}

pub struct ProfileViewModel {
    state: Arc<watch::Sender<ProfileUiState>>,
    auth: Arc<AuthViewModel>,
    db: Arc<Mutex<Database>>,
    notifications: Arc<NotificationCenter>,
    preferences: Arc<dyn PreferencesManager>,
    share: Arc<dyn ShareManager>,
    urls: Arc<dyn UrlOpener>,
    events: EventBus,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl ProfileViewModel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth: Arc<AuthViewModel>,
        db: Arc<Mutex<Database>>,
        notifications: Arc<NotificationCenter>,
        preferences: Arc<dyn PreferencesManager>,
        share: Arc<dyn ShareManager>,
        urls: Arc<dyn UrlOpener>,
        events: EventBus,
    ) -> Self {
        let (tx, _) = watch::channel(ProfileUiState::default());
        Self {
            state: Arc::new(tx),
            auth,
            db,
            notifications,
            preferences,
            share,
            urls,
            events,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileUiState> {
        self.state.subscribe()
    }

    /// Load once and keep following session/notification events.
    pub fn start(&self) {
        self.refresh();

        let state = Arc::clone(&self.state);
        let db = Arc::clone(&self.db);
        let notifications = Arc::clone(&self.notifications);
        let mut rx = self.events.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(
                        AppEvent::SessionChanged | AppEvent::NotificationPosted { .. },
                    ) => {
                        let session = db.lock().unwrap().load_session().unwrap_or(None);
                        let unread = notifications.unread_count().unwrap_or(0);
                        state.send_modify(|s| {
                            s.session = session.clone();
                            s.unread_notifications = unread;
                        });
                    }
                    Ok(_) => {}
                    // Missed events: the next relevant one re-reads anyway.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        self.tasks.lock().unwrap().push(handle);
    }

    /// Re-read everything the screen shows.
    pub fn refresh(&self) {
        let session = self.db.lock().unwrap().load_session().unwrap_or(None);
        let settings = self.preferences.load();
        let unread = self.notifications.unread_count().unwrap_or(0);

        self.state.send_replace(ProfileUiState {
            session,
            settings,
            unread_notifications: unread,
        });
    }

    /// Flip the master notification switch.
    pub fn set_notifications_enabled(&self, enabled: bool) {
        let mut settings = self.preferences.load();
        settings.notifications_enabled = enabled;
        self.preferences.store(&settings);
        self.state.send_modify(|s| s.settings = settings);
    }

    /// Invoke the native share sheet with the app blurb.
    pub fn share_app(&self) {
        self.share
            .share_text(&format!("Check out {APP_NAME} for cocktail recipes!"));
    }

    /// Open a URL (source page, about page) in the system browser.
    pub fn open_url(&self, url: &str) {
        if !self.urls.open(url) {
            tracing::warn!(url, "platform refused to open url");
        }
    }

    pub async fn sign_out(&self) {
        self.auth.sign_out().await;
        self.refresh();
    }

    pub async fn delete_account(&self, password: &str) {
        self.auth.delete_account(password).await;
        self.refresh();
    }

    /// Abort all screen-scoped work.
    pub fn close(&self) {
        for task in self.tasks.lock().unwrap().drain(..) {
            task.abort();
        }
    }
}

impl Drop for ProfileViewModel {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use crate::context::testing::test_context;
    use crate::AppContext;

    use super::*;

    fn profile_vm(ctx: &AppContext) -> (Arc<AuthViewModel>, ProfileViewModel) {
        let auth = Arc::new(AuthViewModel::new(
            Arc::clone(&ctx.auth),
            Arc::clone(&ctx.db),
            ctx.events.clone(),
        ));
        let vm = ProfileViewModel::new(
            Arc::clone(&auth),
            Arc::clone(&ctx.db),
            Arc::clone(&ctx.notifications),
            Arc::clone(&ctx.preferences),
            Arc::clone(&ctx.share),
            Arc::clone(&ctx.urls),
            ctx.events.clone(),
        );
        (auth, vm)
    }

    #[tokio::test]
    async fn shows_the_signed_in_session() {
        let (_dir, ctx) = test_context();
        let (auth, vm) = profile_vm(&ctx);

        auth.sign_in_with_email("amari@example.com", "secret").await;
        vm.refresh();

        let state = vm.subscribe().borrow().clone();
        assert_eq!(state.session.unwrap().email, "amari@example.com");
    }

    #[tokio::test]
    async fn notification_toggle_persists() {
        let (_dir, ctx) = test_context();
        let (_auth, vm) = profile_vm(&ctx);

        vm.set_notifications_enabled(false);

        assert!(!vm.subscribe().borrow().settings.notifications_enabled);
        assert!(!ctx.preferences.load().notifications_enabled);
    }

    #[tokio::test]
    async fn sign_out_clears_the_header() {
        let (_dir, ctx) = test_context();
        let (auth, vm) = profile_vm(&ctx);

        auth.sign_in_with_email("amari@example.com", "secret").await;
        vm.sign_out().await;

        assert!(vm.subscribe().borrow().session.is_none());
    }

    #[tokio::test]
    async fn share_and_url_actions_reach_the_adapters() {
        use crate::platform::inmem::{InMemoryShareManager, InMemoryUrlOpener};
        use crate::platform::{ShareManager, UrlOpener};

        let (_dir, ctx) = test_context();
        let auth = Arc::new(AuthViewModel::new(
            Arc::clone(&ctx.auth),
            Arc::clone(&ctx.db),
            ctx.events.clone(),
        ));
        let share = Arc::new(InMemoryShareManager::new());
        let urls = Arc::new(InMemoryUrlOpener::new());
        let dyn_share: Arc<dyn ShareManager> = share.clone();
        let dyn_urls: Arc<dyn UrlOpener> = urls.clone();

        let vm = ProfileViewModel::new(
            auth,
            Arc::clone(&ctx.db),
            Arc::clone(&ctx.notifications),
            Arc::clone(&ctx.preferences),
            dyn_share,
            dyn_urls,
            ctx.events.clone(),
        );

        vm.share_app();
        vm.open_url("https://iba-world.com");

        assert_eq!(share.shared.lock().unwrap().len(), 1);
        assert_eq!(
            urls.opened.lock().unwrap().as_slice(),
            ["https://iba-world.com"]
        );
    }
}
