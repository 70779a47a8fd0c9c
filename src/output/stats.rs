//! Statistics and plain-text reports over a loaded snapshot
//!
//! This module provides the `stats` overview and the terminal rendering of a
//! query result used by the `query` command.

use crate::query::{
    author_options, century_distribution, count_distinct_authors, count_distinct_tags, top_tags,
    FilterSpec, QueryResult,
};
use crate::output::OutputResult;
use crate::storage::{RunRecord, Snapshot};
use std::fmt::Write;

/// Snapshot statistics summary
#[derive(Debug, Clone)]
pub struct SnapshotStatistics {
    /// Id of the crawl run that produced the snapshot
    pub run_id: i64,

    /// Crawl start and finish (RFC 3339)
    pub started_at: String,
    pub finished_at: String,

    /// Crawl wall-clock time, when both timestamps parse
    pub duration_seconds: Option<i64>,

    /// Site the snapshot was crawled from
    pub base_url: String,

    /// Hash of the configuration used for the crawl
    pub config_hash: String,

    /// Listing pages fetched
    pub pages_crawled: u32,

    /// Number of quotes in the collection
    pub total_quotes: usize,

    /// Distinct author names
    pub total_authors: usize,

    /// Distinct non-blank tags
    pub total_tags: usize,

    /// Quotes whose tag list carries no visible tag
    pub untagged_quotes: usize,

    /// Quotes per birth century, label ascending
    pub centuries: Vec<(String, usize)>,

    /// Five most used tags
    pub leading_tags: Vec<(String, usize)>,

    /// Every crawl stored in the snapshot file, newest first
    pub history: Vec<RunRecord>,
}

impl SnapshotStatistics {
    /// Computes statistics for a loaded snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let subset: Vec<_> = snapshot.records.iter().collect();

        Self {
            run_id: snapshot.run.id,
            started_at: snapshot.run.started_at.clone(),
            finished_at: snapshot.run.finished_at.clone(),
            duration_seconds: snapshot.run.duration_seconds(),
            base_url: snapshot.run.base_url.clone(),
            config_hash: snapshot.run.config_hash.clone(),
            pages_crawled: snapshot.run.pages_crawled,
            total_quotes: subset.len(),
            total_authors: count_distinct_authors(&subset),
            total_tags: count_distinct_tags(&subset),
            untagged_quotes: subset
                .iter()
                .filter(|record| record.visible_tags().next().is_none())
                .count(),
            centuries: century_distribution(&subset),
            leading_tags: top_tags(&subset, 5),
            history: snapshot.history.clone(),
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &SnapshotStatistics) {
    println!("=== Snapshot Statistics ===\n");

    println!("Crawl Run {}:", stats.run_id);
    println!("  Site: {}", stats.base_url);
    println!("  Started: {}", stats.started_at);
    println!("  Finished: {}", stats.finished_at);
    if let Some(duration) = stats.duration_seconds {
        println!("  Duration: {} seconds", duration);
    }
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Config hash: {}", stats.config_hash);
    println!();

    println!("Collection:");
    println!("  Quotes: {}", stats.total_quotes);
    println!("  Authors: {}", stats.total_authors);
    println!("  Tags: {}", stats.total_tags);
    println!("  Quotes without tags: {}", stats.untagged_quotes);
    println!();

    if !stats.centuries.is_empty() {
        println!("Birth Centuries:");
        for (label, count) in &stats.centuries {
            let percentage = if stats.total_quotes > 0 {
                (*count as f64 / stats.total_quotes as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", label, count, percentage);
        }
        println!();
    }

    if !stats.leading_tags.is_empty() {
        println!("Leading Tags:");
        for (tag, count) in &stats.leading_tags {
            println!("  {}: {}", tag, count);
        }
    }

    if stats.history.len() > 1 {
        println!();
        println!("Crawl History:");
        for run in &stats.history {
            println!(
                "  Run {}: {} quotes, {} pages, finished {}",
                run.id, run.record_count, run.pages_crawled, run.finished_at
            );
        }
    }
}

/// Renders a query result for the terminal
///
/// When an author filter matches nothing and names no known author, the
/// known names are listed.
pub fn format_query_text(
    result: &QueryResult,
    filter: &FilterSpec,
    snapshot: &Snapshot,
) -> OutputResult<String> {
    let mut out = String::new();

    writeln!(out, "=== Query Result ===\n")?;
    writeln!(
        out,
        "Filter: search={} author={} tag={}",
        filter.search_text().unwrap_or("-"),
        filter.author().unwrap_or("all"),
        filter.tag().unwrap_or("all")
    )?;
    writeln!(
        out,
        "Totals: {} quotes, {} authors, {} tags\n",
        result.total_quotes, result.total_authors, result.total_tags
    )?;

    if result.is_empty() {
        writeln!(out, "No quotes match this filter.")?;
        if let Some(author) = filter.author() {
            let known = author_options(&snapshot.records);
            if !known.iter().any(|name| name == author) {
                writeln!(out, "Known authors: {}", known.join(", "))?;
            }
        }
        return Ok(out);
    }

    let sections = [
        ("Top Authors", &result.top_authors),
        ("Top Tags", &result.top_tags),
        ("Birth Centuries", &result.century_distribution),
    ];
    for (heading, rows) in sections {
        writeln!(out, "{}:", heading)?;
        for (key, count) in rows.iter() {
            writeln!(out, "  {:<30} {}", key, count)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Quotes ({} shown):", result.preview_records.len())?;
    for record in &result.preview_records {
        writeln!(out, "  {}", record.text)?;
        writeln!(
            out,
            "    -- {} ({})",
            record.author_name, record.author_birth_century
        )?;
    }

    Ok(out)
}
