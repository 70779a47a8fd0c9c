//! Crawler module for harvesting quotes
//!
//! This module contains the crawl-and-normalize pipeline:
//! - HTTP fetching with a per-request timeout
//! - Field extraction from listing and author pages
//! - The sequential pagination loop
//! - Normalization, snapshot write and CSV export

mod coordinator;
mod extractor;
mod fetcher;

pub use coordinator::{CrawlOutcome, Crawler};
pub use extractor::{
    extract_author, extract_listing, ExtractError, ListingPage, BIRTH_DATE_FORMAT,
};
pub use fetcher::{build_http_client, fetch_page};

use crate::config::Config;
use crate::output::write_csv;
use crate::query::{count_distinct_authors, count_distinct_tags};
use crate::record::{normalize, QuoteRecord};
use crate::storage::{open_storage, NewRun, SnapshotStore};
use crate::ScopeError;
use chrono::Utc;
use std::path::PathBuf;

/// What a completed crawl produced
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub run_id: i64,
    pub pages_crawled: u32,
    pub record_count: usize,
    pub author_count: usize,
    pub tag_count: usize,
    pub skipped_authors: usize,
    pub stopped_at_cap: bool,
    pub snapshot_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Crawls the configured site and returns the normalized collection
///
/// Nothing is written; see [`crawl`] for the full pipeline.
pub async fn collect(config: &Config) -> Result<(Vec<QuoteRecord>, CrawlOutcome), ScopeError> {
    let crawler = Crawler::new(&config.site.base_url, &config.crawler)?;
    let mut outcome = crawler.crawl_raw().await?;
    let raw = std::mem::take(&mut outcome.records);
    let records = normalize(raw, &config.crawler.century_word);
    Ok((records, outcome))
}

/// Runs a complete crawl operation
///
/// This is the main entry point for a crawl. It will:
/// 1. Walk every listing page and its authors
/// 2. Normalize the raw records (century label derived here)
/// 3. Replace the stored snapshot in one transaction
/// 4. Write the CSV export
///
/// Any crawl failure aborts before the snapshot is touched.
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `config_hash` - Identity of the configuration, stored with the run
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed and was persisted
/// * `Err(ScopeError)` - Crawl or persistence failed
///
/// # Example
///
/// ```no_run
/// use quote_scope::config::load_or_default;
/// use quote_scope::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (config, hash) = load_or_default(None)?;
/// let summary = crawl(&config, &hash).await?;
/// println!("{} quotes", summary.record_count);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, config_hash: &str) -> Result<CrawlSummary, ScopeError> {
    let started_at = Utc::now();
    let (records, outcome) = collect(config).await?;
    let finished_at = Utc::now();

    let subset: Vec<&QuoteRecord> = records.iter().collect();
    let author_count = count_distinct_authors(&subset);
    let tag_count = count_distinct_tags(&subset);

    tracing::info!(
        "Crawl finished: {} quotes, {} authors, {} tags over {} pages",
        records.len(),
        author_count,
        tag_count,
        outcome.pages_crawled
    );

    let snapshot_path = PathBuf::from(&config.output.snapshot_path);
    let mut storage = open_storage(&snapshot_path)?;
    let run_id = storage.save_snapshot(
        &records,
        &NewRun {
            started_at,
            finished_at,
            config_hash: config_hash.to_string(),
            base_url: config.site.base_url.clone(),
            pages_crawled: outcome.pages_crawled,
        },
    )?;
    tracing::info!("Saved snapshot run {} to {}", run_id, snapshot_path.display());

    let csv_path = PathBuf::from(&config.output.csv_path);
    write_csv(&csv_path, &records)?;
    tracing::info!("Wrote CSV export to {}", csv_path.display());

    Ok(CrawlSummary {
        run_id,
        pages_crawled: outcome.pages_crawled,
        record_count: records.len(),
        author_count,
        tag_count,
        skipped_authors: outcome.skipped_authors,
        stopped_at_cap: outcome.stopped_at_cap,
        snapshot_path,
        csv_path,
    })
}
