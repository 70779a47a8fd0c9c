//! Crawler coordinator - the sequential crawl loop
//!
//! This module walks the listing pages one at a time:
//! - Fetching `{base}/page/{n}/` and extracting its quote blocks
//! - Fetching each quote's author page (optionally through a per-run cache)
//! - Stopping at the last page or at the configured page cap
//!
//! Page index, accumulator and author cache are local to one `crawl_raw`
//! call, so a `Crawler` can be reused.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{extract_author, extract_listing, ExtractError};
use crate::crawler::{build_http_client, fetch_page};
use crate::record::{AuthorDetails, RawQuote, RawRecord};
use crate::ScopeError;
use reqwest::Client;
use std::collections::HashMap;
use url::Url;

/// Result of walking the site, before normalization
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Joined quote/author records in discovery order
    pub records: Vec<RawRecord>,

    /// Listing pages fetched and extracted
    pub pages_crawled: u32,

    /// True when the page cap ended the crawl while a next page existed
    pub stopped_at_cap: bool,

    /// Quotes dropped because their author page failed
    pub skipped_authors: usize,
}

/// Drives pagination and author lookups against one site
pub struct Crawler {
    client: Client,
    base_url: String,
    config: CrawlerConfig,
}

impl Crawler {
    /// Creates a crawler for `base_url`
    ///
    /// The URL must parse; a trailing slash is dropped so page and author
    /// paths can be appended directly.
    pub fn new(base_url: &str, config: &CrawlerConfig) -> Result<Self, ScopeError> {
        Url::parse(base_url)?;
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            config: config.clone(),
        })
    }

    /// The origin every request is built from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of listing page `index` (1-based)
    pub fn page_url(&self, index: u32) -> String {
        format!("{}/page/{}/", self.base_url, index)
    }

    /// URL of an author page given its site-relative link
    pub fn author_url(&self, link: &str) -> String {
        format!("{}{}", self.base_url, link)
    }

    /// Walks every listing page and joins each quote with its author
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Records in page-then-block order
    /// * `Err(ScopeError)` - The first page failure, or the first author
    ///   failure unless `skip-failed-authors` is set
    pub async fn crawl_raw(&self) -> Result<CrawlOutcome, ScopeError> {
        let mut outcome = CrawlOutcome::default();
        let mut author_cache: HashMap<String, AuthorDetails> = HashMap::new();
        let mut page_index: u32 = 1;

        tracing::info!("Starting crawl of {}", self.base_url);

        loop {
            let url = self.page_url(page_index);
            let html = fetch_page(&self.client, &url).await?;
            let listing = extract_listing(&html).map_err(|e| extraction_error(&url, e))?;

            tracing::info!("Page {}: {} quotes", page_index, listing.quotes.len());

            for quote in listing.quotes {
                match self.author_for(&quote, &mut author_cache).await {
                    Ok(author) => outcome.records.push(RawRecord { quote, author }),
                    Err(e) if self.config.skip_failed_authors => {
                        tracing::warn!(
                            "Skipping quote by {} (author page failed: {})",
                            quote.author_name,
                            e
                        );
                        outcome.skipped_authors += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            outcome.pages_crawled += 1;

            if !listing.has_next {
                tracing::debug!("No next marker on page {}, pagination complete", page_index);
                break;
            }

            if page_index >= self.config.max_pages {
                tracing::warn!(
                    "Reached max-pages cap ({}) with more pages available; stopping",
                    self.config.max_pages
                );
                outcome.stopped_at_cap = true;
                break;
            }

            page_index += 1;
        }

        Ok(outcome)
    }

    /// Fetches the author page for `quote`, consulting the cache when enabled
    async fn author_for(
        &self,
        quote: &RawQuote,
        cache: &mut HashMap<String, AuthorDetails>,
    ) -> Result<AuthorDetails, ScopeError> {
        if self.config.author_cache {
            if let Some(details) = cache.get(&quote.author_detail_link) {
                tracing::debug!("Using cached author page for {}", quote.author_name);
                return Ok(details.clone());
            }
        }

        let url = self.author_url(&quote.author_detail_link);
        let html = fetch_page(&self.client, &url).await?;
        let details = extract_author(&html).map_err(|e| extraction_error(&url, e))?;

        if self.config.author_cache {
            cache.insert(quote.author_detail_link.clone(), details.clone());
        }

        Ok(details)
    }
}

/// Attaches the page URL to an extraction failure
fn extraction_error(url: &str, error: ExtractError) -> ScopeError {
    match error {
        ExtractError::InvalidDate(value) => ScopeError::InvalidDate {
            url: url.to_string(),
            value,
        },
        other => ScopeError::Parse {
            url: url.to_string(),
            message: other.to_string(),
        },
    }
}
