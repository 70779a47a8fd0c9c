//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the snapshot file.

/// SQL schema for the snapshot
pub const SCHEMA_SQL: &str = r#"
-- One row per completed crawl
CREATE TABLE IF NOT EXISTS crawl_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    base_url TEXT NOT NULL,
    pages_crawled INTEGER NOT NULL,
    record_count INTEGER NOT NULL
);

-- The current collection, in discovery order
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES crawl_runs(id),
    position INTEGER NOT NULL,
    text TEXT NOT NULL,
    author_name TEXT NOT NULL,
    author_detail_link TEXT NOT NULL,
    author_about TEXT NOT NULL,
    author_birth_date TEXT NOT NULL,
    author_birth_place TEXT NOT NULL,
    author_birth_century TEXT NOT NULL,
    UNIQUE(run_id, position)
);

CREATE INDEX IF NOT EXISTS idx_quotes_author ON quotes(author_name);

-- Tags of each quote, in keyword order; blank tags are kept
CREATE TABLE IF NOT EXISTS quote_tags (
    quote_id INTEGER NOT NULL REFERENCES quotes(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    tag TEXT NOT NULL,
    PRIMARY KEY (quote_id, position)
);

CREATE INDEX IF NOT EXISTS idx_quote_tags_tag ON quote_tags(tag);
"#;

/// Tables a readable snapshot must contain
pub const REQUIRED_TABLES: [&str; 3] = ["crawl_runs", "quotes", "quote_tags"];

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", get_schema_version())?;
    Ok(())
}

/// Gets the current schema version
///
/// Stored in `PRAGMA user_version` so a later layout change can migrate.
pub fn get_schema_version() -> u32 {
    1
}
