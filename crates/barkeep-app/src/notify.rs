//! In-app notification center.
//!
//! Notifications live in the local store and render inside the app; OS
//! delivery is a best-effort mirror through the platform adapter. Missing
//! OS permission skips the mirror silently, it never fails the post.

use std::sync::{Arc, Mutex};

use barkeep_shared::model::Notification;
use barkeep_store::Database;

use crate::events::{AppEvent, EventBus};
use crate::platform::PushNotificationManager;
use crate::Result;

pub struct NotificationCenter {
    db: Arc<Mutex<Database>>,
    push: Arc<dyn PushNotificationManager>,
    events: EventBus,
}

impl NotificationCenter {
    pub fn new(
        db: Arc<Mutex<Database>>,
        push: Arc<dyn PushNotificationManager>,
        events: EventBus,
    ) -> Self {
        Self { db, push, events }
    }

    /// Record a notification and mirror it to the OS when allowed.
    ///
    /// The user's master notification switch suppresses the whole post.
    pub async fn post(&self, notification: Notification) -> Result<()> {
        let enabled = {
            let db = self.db.lock().unwrap();
            let enabled = db.get_settings()?.notifications_enabled;
            if enabled {
                db.insert_notification(&notification)?;
            }
            enabled
        };

        if !enabled {
            tracing::debug!(id = %notification.id, "notifications disabled, post dropped");
            return Ok(());
        }

        if self.push.permission_granted().await {
            self.push
                .post(&notification.title, &notification.message)
                .await;
        } else {
            tracing::debug!(id = %notification.id, "no OS permission, mirror skipped");
        }

        self.events.emit(AppEvent::NotificationPosted {
            id: notification.id,
        });
        Ok(())
    }

    /// All notifications, newest first.
    pub fn list(&self) -> Result<Vec<Notification>> {
        Ok(self.db.lock().unwrap().list_notifications()?)
    }

    pub fn unread_count(&self) -> Result<u64> {
        Ok(self.db.lock().unwrap().unread_notification_count()?)
    }

    pub fn mark_read(&self, id: uuid::Uuid) -> Result<bool> {
        Ok(self.db.lock().unwrap().mark_notification_read(id)?)
    }

    pub fn mark_all_read(&self) -> Result<usize> {
        Ok(self.db.lock().unwrap().mark_all_notifications_read()?)
    }

    pub fn clear(&self) -> Result<usize> {
        Ok(self.db.lock().unwrap().clear_notifications()?)
    }
}
