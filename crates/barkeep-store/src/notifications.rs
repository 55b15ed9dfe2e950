//! CRUD operations for the in-app notification center.

use barkeep_shared::model::{Notification, NotificationKind};
use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::Result;

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new notification.
    pub fn insert_notification(&self, notification: &Notification) -> Result<()> {
        self.conn().execute(
            "INSERT INTO notifications (id, title, message, kind, cocktail_id, created_at, is_read)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                notification.id.to_string(),
                notification.title,
                notification.message,
                notification.kind.as_key(),
                notification.cocktail_id,
                notification.created_at.to_rfc3339(),
                notification.is_read,
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List all notifications, newest first.
    pub fn list_notifications(&self) -> Result<Vec<Notification>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, title, message, kind, cocktail_id, created_at, is_read
             FROM notifications
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], row_to_notification)?;

        let mut notifications = Vec::new();
        for row in rows {
            notifications.push(row?);
        }
        Ok(notifications)
    }

    /// Number of unread notifications.
    pub fn unread_notification_count(&self) -> Result<u64> {
        let count: u64 = self.conn().query_row(
            "SELECT COUNT(*) FROM notifications WHERE is_read = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Mark one notification as read. Returns `true` if a row changed.
    pub fn mark_notification_read(&self, id: Uuid) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE notifications SET is_read = 1 WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    /// Mark every notification as read. Returns the number of rows changed.
    pub fn mark_all_notifications_read(&self) -> Result<usize> {
        let affected = self
            .conn()
            .execute("UPDATE notifications SET is_read = 1 WHERE is_read = 0", [])?;
        Ok(affected)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete every notification. Returns the number of rows removed.
    pub fn clear_notifications(&self) -> Result<usize> {
        let affected = self.conn().execute("DELETE FROM notifications", [])?;
        Ok(affected)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Notification`].
fn row_to_notification(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notification> {
    let id_str: String = row.get(0)?;
    let kind_key: String = row.get(3)?;
    let created_str: String = row.get(5)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Notification {
        id,
        title: row.get(1)?,
        message: row.get(2)?,
        kind: NotificationKind::from_key(&kind_key),
        cocktail_id: row.get(4)?,
        created_at,
        is_read: row.get(6)?,
    })
}
