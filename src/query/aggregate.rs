//! Count-by-key views over a filtered subset

use crate::record::QuoteRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Counts keys, keeping the order in which each key first appeared
fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }

    counts
}

/// Sorts by count descending (stable, so ties keep first-seen order) and
/// keeps the first `limit` entries
fn top_n(mut counts: Vec<(String, usize)>, limit: usize) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// Number of distinct author names
pub fn count_distinct_authors(subset: &[&QuoteRecord]) -> usize {
    subset
        .iter()
        .map(|record| record.author_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct non-blank tags across all records
pub fn count_distinct_tags(subset: &[&QuoteRecord]) -> usize {
    subset
        .iter()
        .flat_map(|record| record.visible_tags())
        .collect::<HashSet<_>>()
        .len()
}

/// Most quoted authors, up to `limit`
pub fn top_authors(subset: &[&QuoteRecord], limit: usize) -> Vec<(String, usize)> {
    let counts = count_in_order(subset.iter().map(|record| record.author_name.as_str()));
    top_n(counts, limit)
}

/// Most used tags, up to `limit`; a record contributes once per tag it holds
pub fn top_tags(subset: &[&QuoteRecord], limit: usize) -> Vec<(String, usize)> {
    let counts = count_in_order(subset.iter().flat_map(|record| record.visible_tags()));
    top_n(counts, limit)
}

/// Records per century label, ordered by label
pub fn century_distribution(subset: &[&QuoteRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in subset {
        *counts
            .entry(record.author_birth_century.as_str())
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// Sorted distinct author names, for an author selector
pub fn author_options(collection: &[QuoteRecord]) -> Vec<String> {
    collection
        .iter()
        .map(|record| record.author_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct non-blank tags, for a tag selector
pub fn tag_options(collection: &[QuoteRecord]) -> Vec<String> {
    collection
        .iter()
        .flat_map(|record| record.visible_tags())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
