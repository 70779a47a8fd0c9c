//! Record types produced by the crawl pipeline
//!
//! Raw types mirror what the extractor pulls out of a page. `QuoteRecord`
//! is the normalized, immutable unit of the collection.

use chrono::NaiveDate;

/// One quote block from a listing page, before the author page is visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    /// The quotation body
    pub text: String,

    /// Author display name
    pub author_name: String,

    /// Site-relative link to the author page (e.g. `/author/Albert-Einstein`)
    pub author_detail_link: String,

    /// Comma-split keywords; may contain empty strings
    pub tags: Vec<String>,
}

/// Metadata extracted from an author detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDetails {
    /// Biography with surrounding whitespace and backslashes removed
    pub about: String,

    /// Parsed birth date
    pub birth_date: NaiveDate,

    /// Birth place with the first "in " removed
    pub birth_place: String,
}

/// A quote joined with its author's details, not yet normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub quote: RawQuote,
    pub author: AuthorDetails,
}

/// A normalized quote record
///
/// `author_birth_century` is computed once during normalization and then
/// carried as stored data; queries never re-derive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    pub text: String,
    pub author_name: String,
    pub author_detail_link: String,
    pub tags: Vec<String>,
    pub author_about: String,
    pub author_birth_date: NaiveDate,
    pub author_birth_place: String,
    pub author_birth_century: String,
}

impl QuoteRecord {
    /// Returns the tags that carry content (non-empty after trimming)
    pub fn visible_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !tag.trim().is_empty())
    }

    /// Returns true if the record holds exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
