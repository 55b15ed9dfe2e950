//! v001 -- Initial schema creation.
//!
//! Creates the four core tables: `cocktails`, `notifications`,
//! `app_settings`, and `auth_session`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Cocktails (the cached catalog plus the local favorite flag)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS cocktails (
    id                TEXT PRIMARY KEY NOT NULL,  -- slug derived from title
    title             TEXT NOT NULL,
    image_url         TEXT,
    cocktail_url      TEXT,
    video_url         TEXT,
    category          TEXT NOT NULL,
    category_key      TEXT NOT NULL,
    views             INTEGER NOT NULL DEFAULT 0,
    ingredients       TEXT NOT NULL,              -- JSON array of strings
    ingredient_keys   TEXT NOT NULL,              -- JSON array of strings
    method            TEXT NOT NULL,
    garnish           TEXT,
    glass             TEXT,
    prep_time_minutes INTEGER NOT NULL,
    complexity        TEXT NOT NULL,              -- simple | medium | complex
    alcohol_strength  TEXT NOT NULL,              -- non_alcoholic | light | medium | strong
    search_text       TEXT NOT NULL,              -- lowercased search blob
    is_favorite       INTEGER NOT NULL DEFAULT 0  -- boolean 0/1, local user state
);

CREATE INDEX IF NOT EXISTS idx_cocktails_category ON cocktails(category_key);
CREATE INDEX IF NOT EXISTS idx_cocktails_favorite ON cocktails(is_favorite);

-- ----------------------------------------------------------------
-- In-app notification center
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS notifications (
    id          TEXT PRIMARY KEY NOT NULL,        -- UUID v4
    title       TEXT NOT NULL,
    message     TEXT NOT NULL,
    kind        TEXT NOT NULL,                    -- new_cocktail | reminder | system
    cocktail_id TEXT,                             -- nullable ref -> cocktails(id)
    created_at  TEXT NOT NULL,                    -- ISO-8601 / RFC-3339
    is_read     INTEGER NOT NULL DEFAULT 0        -- boolean 0/1
);

CREATE INDEX IF NOT EXISTS idx_notifications_created ON notifications(created_at DESC);

-- ----------------------------------------------------------------
-- App settings (single JSON row)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS app_settings (
    id   INTEGER PRIMARY KEY CHECK (id = 1),
    json TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Persisted auth session (single JSON row)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS auth_session (
    id   INTEGER PRIMARY KEY CHECK (id = 1),
    json TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
