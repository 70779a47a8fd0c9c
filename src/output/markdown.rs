//! Markdown query reports
//!
//! Renders a `QueryResult` together with the filter that produced it, for
//! the `query --markdown` command.

use crate::output::OutputResult;
use crate::query::{FilterSpec, QueryResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of a query result
///
/// # Arguments
///
/// * `result` - The query result to render
/// * `filter` - The filter that produced it
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_query_markdown(
    result: &QueryResult,
    filter: &FilterSpec,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_query_markdown(result, filter);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn count_table(md: &mut String, heading: &str, column: &str, rows: &[(String, usize)]) {
    md.push_str(&format!("## {}\n\n", heading));
    if rows.is_empty() {
        md.push_str("_None_\n\n");
        return;
    }
    md.push_str(&format!("| {} | Quotes |\n", column));
    md.push_str("|---|---|\n");
    for (key, count) in rows {
        md.push_str(&format!("| {} | {} |\n", escape_cell(key), count));
    }
    md.push('\n');
}

/// Formats a query result as markdown
pub fn format_query_markdown(result: &QueryResult, filter: &FilterSpec) -> String {
    let mut md = String::new();

    md.push_str("# Quote-Scope Query Report\n\n");

    md.push_str("## Filter\n\n");
    md.push_str(&format!(
        "- **Search**: {}\n",
        filter.search_text().unwrap_or("(none)")
    ));
    md.push_str(&format!("- **Author**: {}\n", filter.author().unwrap_or("all")));
    md.push_str(&format!("- **Tag**: {}\n\n", filter.tag().unwrap_or("all")));

    md.push_str("## Totals\n\n");
    md.push_str(&format!("- **Quotes**: {}\n", result.total_quotes));
    md.push_str(&format!("- **Authors**: {}\n", result.total_authors));
    md.push_str(&format!("- **Tags**: {}\n\n", result.total_tags));

    count_table(&mut md, "Top Authors", "Author", &result.top_authors);
    count_table(&mut md, "Top Tags", "Tag", &result.top_tags);
    count_table(
        &mut md,
        "Birth Century Distribution",
        "Century",
        &result.century_distribution,
    );

    md.push_str("## Quotes\n\n");
    if result.preview_records.is_empty() {
        md.push_str("_No quotes match this filter._\n");
    }
    for record in &result.preview_records {
        md.push_str(&format!("> {}\n>\n", record.text));
        md.push_str(&format!(
            "> **{}** ({}, born {} in {})\n",
            record.author_name,
            record.author_birth_century,
            record.author_birth_date.format("%Y-%m-%d"),
            record.author_birth_place
        ));
        let tags: Vec<&str> = record.visible_tags().collect();
        if !tags.is_empty() {
            md.push_str(&format!(">\n> Tags: {}\n", tags.join(", ")));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::query;
    use crate::record::QuoteRecord;
    use chrono::NaiveDate;

    fn sample() -> Vec<QuoteRecord> {
        vec![QuoteRecord {
            text: "“Be yourself; everyone else is already taken.”".to_string(),
            author_name: "Oscar Wilde".to_string(),
            author_detail_link: "/author/Oscar-Wilde".to_string(),
            tags: vec!["be-yourself".to_string(), "".to_string()],
            author_about: String::new(),
            author_birth_date: NaiveDate::from_ymd_opt(1854, 10, 16).unwrap(),
            author_birth_place: "Dublin, Ireland".to_string(),
            author_birth_century: "century XIX".to_string(),
        }]
    }

    #[test]
    fn test_report_sections() {
        let records = sample();
        let filter = FilterSpec::new(Some("yourself"), None, None);
        let md = format_query_markdown(&query(&records, &filter), &filter);

        assert!(md.starts_with("# Quote-Scope Query Report"));
        assert!(md.contains("- **Search**: yourself"));
        assert!(md.contains("- **Author**: all"));
        assert!(md.contains("- **Quotes**: 1"));
        assert!(md.contains("| Oscar Wilde | 1 |"));
        assert!(md.contains("| century XIX | 1 |"));
        assert!(md.contains("Tags: be-yourself\n"));
    }

    #[test]
    fn test_report_empty_result() {
        let records = sample();
        let filter = FilterSpec::new(None, Some("Nobody"), None);
        let md = format_query_markdown(&query(&records, &filter), &filter);

        assert!(md.contains("- **Quotes**: 0"));
        assert!(md.contains("_None_"));
        assert!(md.contains("_No quotes match this filter._"));
    }

    #[test]
    fn test_write_query_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        let records = sample();
        let filter = FilterSpec::default();
        write_query_markdown(&query(&records, &filter), &filter, &path).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("Oscar Wilde"));
    }
}
