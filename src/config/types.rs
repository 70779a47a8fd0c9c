use crate::query::QueryLimits;
use crate::record::DEFAULT_CENTURY_WORD;
use serde::Deserialize;

/// Main configuration structure for Quote-Scope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub dashboard: DashboardConfig,
}

/// The site being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin of the quotations site, without a trailing path
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Upper bound on listing pages visited in one run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Fetch each author page once per run instead of once per quote
    #[serde(rename = "author-cache")]
    pub author_cache: bool,

    /// Drop a quote whose author page fails instead of aborting the crawl
    #[serde(rename = "skip-failed-authors")]
    pub skip_failed_authors: bool,

    /// Word used in century labels ("century XIX", "siglo XIX")
    #[serde(rename = "century-word")]
    pub century_word: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 1000,
            request_timeout: 30,
            author_cache: false,
            skip_failed_authors: false,
            century_word: DEFAULT_CENTURY_WORD.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite snapshot file
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: String,

    /// Path to the flat CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "quotes_data.db".to_string(),
            csv_path: "quotes_data.csv".to_string(),
        }
    }
}

/// Dashboard and report sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of authors in the top-authors view
    #[serde(rename = "top-authors")]
    pub top_authors: usize,

    /// Number of tags in the top-tags view
    #[serde(rename = "top-tags")]
    pub top_tags: usize,

    /// Number of quotes listed under the charts
    #[serde(rename = "preview-records")]
    pub preview_records: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let limits = QueryLimits::default();
        Self {
            top_authors: limits.top_authors,
            top_tags: limits.top_tags,
            preview_records: limits.preview_records,
        }
    }
}

impl DashboardConfig {
    /// Converts the dashboard sizing into query limits
    pub fn limits(&self) -> QueryLimits {
        QueryLimits {
            top_authors: self.top_authors,
            top_tags: self.top_tags,
            preview_records: self.preview_records,
        }
    }
}
