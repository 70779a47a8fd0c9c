//! Filter spec and the narrowing stages of a query

use crate::record::QuoteRecord;

/// Selector value meaning "do not filter on this field"
pub const ALL: &str = "all";

/// Search text, author selector and tag selector driving a query
///
/// Author and tag selectors store `None` for "all"; the constructor folds
/// `"all"`, empty strings and missing values together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    search_text: Option<String>,
    author: Option<String>,
    tag: Option<String>,
}

impl FilterSpec {
    /// Builds a filter spec from raw dashboard inputs
    pub fn new(search_text: Option<&str>, author: Option<&str>, tag: Option<&str>) -> Self {
        Self {
            search_text: search_text
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            author: selector(author),
            tag: selector(tag),
        }
    }

    /// Free-text search, if any
    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    /// Selected author, or `None` for all authors
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Selected tag, or `None` for all tags
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns true if the spec keeps every record
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_none() && self.author.is_none() && self.tag.is_none()
    }

    /// Returns true if a record passes all three stages
    pub fn matches(&self, record: &QuoteRecord) -> bool {
        self.matches_search(record) && self.matches_author(record) && self.matches_tag(record)
    }

    fn matches_search(&self, record: &QuoteRecord) -> bool {
        match &self.search_text {
            Some(needle) => {
                let needle = needle.to_lowercase();
                record.text.to_lowercase().contains(&needle)
                    || record.author_name.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    fn matches_author(&self, record: &QuoteRecord) -> bool {
        self.author
            .as_deref()
            .map_or(true, |author| record.author_name == author)
    }

    fn matches_tag(&self, record: &QuoteRecord) -> bool {
        self.tag.as_deref().map_or(true, |tag| record.has_tag(tag))
    }
}

fn selector(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(str::to_string)
}

/// Applies the search, author and tag stages in order
///
/// # Returns
///
/// References to the matching records, in collection order
pub fn apply_filter<'a>(collection: &'a [QuoteRecord], filter: &FilterSpec) -> Vec<&'a QuoteRecord> {
    if filter.is_unfiltered() {
        return collection.iter().collect();
    }

    let mut subset: Vec<&QuoteRecord> = collection.iter().collect();

    if filter.search_text.is_some() {
        subset.retain(|record| filter.matches_search(record));
    }
    if filter.author.is_some() {
        subset.retain(|record| filter.matches_author(record));
    }
    if filter.tag.is_some() {
        subset.retain(|record| filter.matches_tag(record));
    }

    subset
}
