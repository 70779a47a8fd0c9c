//! Output module for exports and reports
//!
//! This module handles:
//! - The flat CSV export of a collection
//! - Markdown and plain-text reports of a query result
//! - Snapshot statistics for the `stats` command

mod csv;
mod markdown;
pub mod stats;

pub use csv::{csv_header, format_csv_row, write_csv, write_csv_to};
pub use markdown::{format_query_markdown, write_query_markdown};
pub use stats::{format_query_text, print_statistics, SnapshotStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
