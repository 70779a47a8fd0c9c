//! Query engine over the quote collection
//!
//! A query narrows the collection with a [`FilterSpec`] and summarizes the
//! surviving records. It never mutates the collection and has no failure
//! modes: a filter matching nothing produces an empty, zero-valued result.
//!
//! # Components
//!
//! - `filter`: filter spec and the three narrowing stages
//! - `aggregate`: count-by-key views over a filtered subset

mod aggregate;
mod filter;

pub use aggregate::{
    author_options, century_distribution, count_distinct_authors, count_distinct_tags,
    tag_options, top_authors, top_tags,
};
pub use filter::{apply_filter, FilterSpec, ALL};

use crate::record::QuoteRecord;

/// Size limits applied to the aggregate views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub top_authors: usize,
    pub top_tags: usize,
    pub preview_records: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            top_authors: 10,
            top_tags: 15,
            preview_records: 20,
        }
    }
}

/// Everything a dashboard needs to render one filter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Number of records that passed the filter
    pub total_quotes: usize,

    /// Distinct author names in the filtered subset
    pub total_authors: usize,

    /// Distinct non-blank tags in the filtered subset
    pub total_tags: usize,

    /// Most quoted authors, count descending, ties in first-seen order
    pub top_authors: Vec<(String, usize)>,

    /// Most used non-blank tags, count descending, ties in first-seen order
    pub top_tags: Vec<(String, usize)>,

    /// Records per century label, label ascending
    pub century_distribution: Vec<(String, usize)>,

    /// Leading records of the filtered subset, in collection order
    pub preview_records: Vec<QuoteRecord>,
}

impl QueryResult {
    /// Returns true if no record matched
    pub fn is_empty(&self) -> bool {
        self.total_quotes == 0
    }
}

/// Runs a query with the default limits (10 authors, 15 tags, 20 records)
pub fn query(collection: &[QuoteRecord], filter: &FilterSpec) -> QueryResult {
    query_with_limits(collection, filter, QueryLimits::default())
}

/// Runs a query with explicit view limits
///
/// # Arguments
///
/// * `collection` - The full, unfiltered collection
/// * `filter` - Search text, author selector and tag selector
/// * `limits` - Sizes of the top-N views and the preview list
///
/// # Returns
///
/// A fully populated `QueryResult`; empty subsets give zero counts and empty
/// lists
pub fn query_with_limits(
    collection: &[QuoteRecord],
    filter: &FilterSpec,
    limits: QueryLimits,
) -> QueryResult {
    let subset = apply_filter(collection, filter);

    QueryResult {
        total_quotes: subset.len(),
        total_authors: count_distinct_authors(&subset),
        total_tags: count_distinct_tags(&subset),
        top_authors: top_authors(&subset, limits.top_authors),
        top_tags: top_tags(&subset, limits.top_tags),
        century_distribution: century_distribution(&subset),
        preview_records: subset
            .iter()
            .take(limits.preview_records)
            .map(|record| (*record).clone())
            .collect(),
    }
}
