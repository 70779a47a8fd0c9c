//! Storage traits and error types
//!
//! This module defines the trait interface for snapshot backends and
//! associated error types.

use crate::record::QuoteRecord;
use crate::storage::{NewRun, RunRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Snapshot holds no completed crawl")]
    EmptySnapshot,

    #[error("Snapshot is missing table '{0}'")]
    MissingTable(String),

    #[error("Corrupt record at position {position}: {message}")]
    CorruptRecord { position: i64, message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for snapshot backend implementations
///
/// A backend holds exactly one collection at a time. Saving replaces it as a
/// whole; there is no partial update.
pub trait SnapshotStore {
    /// Replaces the stored collection and records the run
    ///
    /// # Arguments
    ///
    /// * `records` - The collection in discovery order
    /// * `run` - Metadata of the crawl that produced it
    ///
    /// # Returns
    ///
    /// The ID of the newly recorded run
    fn save_snapshot(&mut self, records: &[QuoteRecord], run: &NewRun) -> StorageResult<i64>;

    /// Loads the stored collection in discovery order
    fn load_records(&self) -> StorageResult<Vec<QuoteRecord>>;

    /// Gets the most recent run
    fn latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Gets every recorded run, newest first
    fn list_runs(&self) -> StorageResult<Vec<RunRecord>>;
}
