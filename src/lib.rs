//! Quote-Scope: a quotation harvester and dashboard
//!
//! This crate crawls a paginated quotations site, joins every quote with
//! its author's biography, derives a birth-century classification, stores
//! the collection as a snapshot and serves filter/aggregate queries over it.

pub mod config;
pub mod crawler;
pub mod dashboard;
pub mod output;
pub mod query;
pub mod record;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Quote-Scope operations
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Invalid birth date '{value}' on {url}")]
    InvalidDate { url: String, value: String },

    #[error("Snapshot not found at {}", path.display())]
    SnapshotMissing { path: PathBuf },

    #[error("Snapshot at {} could not be read: {reason}", path.display())]
    SnapshotUnreadable { path: PathBuf, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScopeError {
    /// Returns true if the error means the snapshot cannot be used
    ///
    /// Callers answer these with a "run the crawl first" instruction.
    pub fn is_snapshot_unavailable(&self) -> bool {
        matches!(
            self,
            Self::SnapshotMissing { .. } | Self::SnapshotUnreadable { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Quote-Scope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use query::{query, FilterSpec, QueryResult};
pub use record::{normalize, QuoteRecord};
