//! Storage module for the quote snapshot
//!
//! This module persists the normalized collection and reads it back:
//! - SQLite snapshot initialization and schema management
//! - Atomic replacement of the stored collection after each crawl
//! - Crawl run metadata (timestamps, config hash, counts)
//! - Read-only loading with "missing" and "unreadable" distinguished

mod schema;
mod sqlite;
mod traits;

pub use schema::{get_schema_version, initialize_schema};
pub use sqlite::SqliteStorage;
pub use traits::{SnapshotStore, StorageError, StorageResult};

use crate::record::QuoteRecord;
use crate::ScopeError;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Metadata describing a crawl about to be stored
#[derive(Debug, Clone)]
pub struct NewRun {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,
    pub base_url: String,
    pub pages_crawled: u32,
}

/// A stored crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: String,
    pub config_hash: String,
    pub base_url: String,
    pub pages_crawled: u32,
    pub record_count: u64,
}

impl RunRecord {
    /// Wall-clock duration of the crawl, if both timestamps parse
    pub fn duration_seconds(&self) -> Option<i64> {
        let started = self.started_at.parse::<DateTime<Utc>>().ok()?;
        let finished = self.finished_at.parse::<DateTime<Utc>>().ok()?;
        Some((finished - started).num_seconds())
    }
}

/// A loaded snapshot: the collection plus the run that produced it
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub run: RunRecord,
    pub records: Vec<QuoteRecord>,
    /// Every crawl recorded in the file, newest first
    pub history: Vec<RunRecord>,
}

/// Creates or opens a snapshot database for writing
///
/// # Arguments
///
/// * `path` - Path to the SQLite snapshot file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(ScopeError)` - Failed to open or initialize the file
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScopeError> {
    SqliteStorage::new(path)
}

/// Loads the snapshot at `path` for a read-only session
///
/// A missing file yields `ScopeError::SnapshotMissing`; a file that is not a
/// snapshot, has no completed crawl, or holds a corrupt row yields
/// `ScopeError::SnapshotUnreadable`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, ScopeError> {
    let storage = SqliteStorage::open_existing(path)?;
    let unreadable = |e: StorageError| ScopeError::SnapshotUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let run = storage
        .latest_run()
        .map_err(unreadable)?
        .ok_or_else(|| unreadable(StorageError::EmptySnapshot))?;
    let records = storage.load_records().map_err(unreadable)?;
    let history = storage.list_runs().map_err(unreadable)?;

    tracing::debug!(
        "Loaded {} records from run {} ({})",
        records.len(),
        run.id,
        path.display()
    );

    Ok(Snapshot {
        run,
        records,
        history,
    })
}
