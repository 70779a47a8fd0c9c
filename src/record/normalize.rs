//! Normalization of raw crawl output into `QuoteRecord`s

use crate::record::century::century_label;
use crate::record::types::{QuoteRecord, RawRecord};
use chrono::Datelike;

/// Normalizes a single raw record, deriving its century label
pub fn normalize_record(raw: RawRecord, century_word: &str) -> QuoteRecord {
    let RawRecord { quote, author } = raw;
    let author_birth_century = century_label(author.birth_date.year(), century_word);

    QuoteRecord {
        text: quote.text,
        author_name: quote.author_name,
        author_detail_link: quote.author_detail_link,
        tags: quote.tags,
        author_about: author.about,
        author_birth_date: author.birth_date,
        author_birth_place: author.birth_place,
        author_birth_century,
    }
}

/// Normalizes a collection of raw records, preserving order
///
/// # Arguments
///
/// * `raw` - Records in crawl discovery order
/// * `century_word` - Word used in the century label
///
/// # Returns
///
/// The normalized records, one per input, in the same order
pub fn normalize(raw: Vec<RawRecord>, century_word: &str) -> Vec<QuoteRecord> {
    raw.into_iter()
        .map(|record| normalize_record(record, century_word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AuthorDetails, RawQuote, DEFAULT_CENTURY_WORD};
    use chrono::NaiveDate;

    fn raw(author: &str, year: i32) -> RawRecord {
        RawRecord {
            quote: RawQuote {
                text: format!("Quote by {}", author),
                author_name: author.to_string(),
                author_detail_link: format!("/author/{}", author),
                tags: vec!["life".to_string()],
            },
            author: AuthorDetails {
                about: "Bio".to_string(),
                birth_date: NaiveDate::from_ymd_opt(year, 3, 14).unwrap(),
                birth_place: "Ulm, Germany".to_string(),
            },
        }
    }

    #[test]
    fn test_normalize_derives_century() {
        let record = normalize_record(raw("Einstein", 1879), DEFAULT_CENTURY_WORD);
        assert_eq!(record.author_birth_century, "century XIX");
        assert_eq!(record.author_birth_place, "Ulm, Germany");
        assert_eq!(record.tags, vec!["life".to_string()]);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let records = normalize(
            vec![raw("A", 1850), raw("B", 1950), raw("C", 1564)],
            DEFAULT_CENTURY_WORD,
        );
        let authors: Vec<&str> = records.iter().map(|r| r.author_name.as_str()).collect();
        assert_eq!(authors, vec!["A", "B", "C"]);
        assert_eq!(records[2].author_birth_century, "century XVI");
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(Vec::new(), DEFAULT_CENTURY_WORD).is_empty());
    }
}
