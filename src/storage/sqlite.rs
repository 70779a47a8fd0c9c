//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SnapshotStore
//! trait.

use crate::record::QuoteRecord;
use crate::storage::schema::{initialize_schema, REQUIRED_TABLES};
use crate::storage::traits::{SnapshotStore, StorageError, StorageResult};
use crate::storage::{NewRun, RunRecord};
use crate::ScopeError;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

const RUN_COLUMNS: &str =
    "id, started_at, finished_at, config_hash, base_url, pages_crawled, record_count";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance, creating the file if needed
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite snapshot file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScopeError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScopeError> {
        let conn = Connection::open(path).map_err(StorageError::from)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = DELETE;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )
        .map_err(StorageError::from)?;

        initialize_schema(&conn).map_err(StorageError::from)?;

        Ok(Self { conn })
    }

    /// Opens an existing snapshot read-only
    ///
    /// Never creates a file. The schema is checked up front so a foreign
    /// SQLite file is reported as unreadable rather than failing later.
    pub fn open_existing(path: &Path) -> Result<Self, ScopeError> {
        if !path.is_file() {
            return Err(ScopeError::SnapshotMissing {
                path: path.to_path_buf(),
            });
        }

        let unreadable = |reason: String| ScopeError::SnapshotUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unreadable(e.to_string()))?;

        let storage = Self { conn };
        storage.verify_schema().map_err(|e| unreadable(e.to_string()))?;

        Ok(storage)
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, ScopeError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(StorageError::from)?;
        initialize_schema(&conn).map_err(StorageError::from)?;
        Ok(Self { conn })
    }

    /// Checks that every snapshot table is present
    fn verify_schema(&self) -> StorageResult<()> {
        for table in REQUIRED_TABLES {
            let count: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )?;
            if count == 0 {
                return Err(StorageError::MissingTable(table.to_string()));
            }
        }
        Ok(())
    }

    /// Loads the tags of one quote in keyword order
    fn load_tags(&self, quote_id: i64) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT tag FROM quote_tags WHERE quote_id = ?1 ORDER BY position")?;
        let tags = stmt
            .query_map(params![quote_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(tags)
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        base_url: row.get(4)?,
        pages_crawled: row.get(5)?,
        record_count: row.get::<_, i64>(6)? as u64,
    })
}

/// A quote row before its tags are attached
struct QuoteRow {
    id: i64,
    position: i64,
    text: String,
    author_name: String,
    author_detail_link: String,
    author_about: String,
    author_birth_date: String,
    author_birth_place: String,
    author_birth_century: String,
}

impl SnapshotStore for SqliteStorage {
    fn save_snapshot(&mut self, records: &[QuoteRecord], run: &NewRun) -> StorageResult<i64> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM quote_tags", [])?;
        tx.execute("DELETE FROM quotes", [])?;

        tx.execute(
            "INSERT INTO crawl_runs (started_at, finished_at, config_hash, base_url, pages_crawled, record_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                run.started_at.to_rfc3339(),
                run.finished_at.to_rfc3339(),
                run.config_hash,
                run.base_url,
                run.pages_crawled,
                records.len() as i64,
            ],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut insert_quote = tx.prepare(
                "INSERT INTO quotes (run_id, position, text, author_name, author_detail_link,
                    author_about, author_birth_date, author_birth_place, author_birth_century)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            let mut insert_tag =
                tx.prepare("INSERT INTO quote_tags (quote_id, position, tag) VALUES (?1, ?2, ?3)")?;

            for (position, record) in records.iter().enumerate() {
                insert_quote.execute(params![
                    run_id,
                    position as i64,
                    record.text,
                    record.author_name,
                    record.author_detail_link,
                    record.author_about,
                    record.author_birth_date.format(DATE_FORMAT).to_string(),
                    record.author_birth_place,
                    record.author_birth_century,
                ])?;
                let quote_id = tx.last_insert_rowid();

                for (tag_position, tag) in record.tags.iter().enumerate() {
                    insert_tag.execute(params![quote_id, tag_position as i64, tag])?;
                }
            }
        }

        tx.commit()?;
        Ok(run_id)
    }

    fn load_records(&self) -> StorageResult<Vec<QuoteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, position, text, author_name, author_detail_link, author_about,
                    author_birth_date, author_birth_place, author_birth_century
             FROM quotes
             WHERE run_id = (SELECT MAX(id) FROM crawl_runs)
             ORDER BY position",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(QuoteRow {
                    id: row.get(0)?,
                    position: row.get(1)?,
                    text: row.get(2)?,
                    author_name: row.get(3)?,
                    author_detail_link: row.get(4)?,
                    author_about: row.get(5)?,
                    author_birth_date: row.get(6)?,
                    author_birth_place: row.get(7)?,
                    author_birth_century: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let author_birth_date = NaiveDate::parse_from_str(&row.author_birth_date, DATE_FORMAT)
                .map_err(|e| StorageError::CorruptRecord {
                    position: row.position,
                    message: format!("birth date '{}': {}", row.author_birth_date, e),
                })?;

            records.push(QuoteRecord {
                tags: self.load_tags(row.id)?,
                text: row.text,
                author_name: row.author_name,
                author_detail_link: row.author_detail_link,
                author_about: row.author_about,
                author_birth_date,
                author_birth_place: row.author_birth_place,
                author_birth_century: row.author_birth_century,
            });
        }

        Ok(records)
    }

    fn latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let run = self
            .conn
            .query_row(
                &format!("SELECT {} FROM crawl_runs ORDER BY id DESC LIMIT 1", RUN_COLUMNS),
                [],
                run_from_row,
            )
            .optional()?;
        Ok(run)
    }

    fn list_runs(&self) -> StorageResult<Vec<RunRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM crawl_runs ORDER BY id DESC", RUN_COLUMNS))?;
        let runs = stmt
            .query_map([], run_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }
}
