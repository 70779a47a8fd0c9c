//! Field extraction from quote listing pages and author pages
//!
//! Listing pages hold `div.quote` blocks and, unless they are the last page,
//! an `li.next` pagination marker. Author pages hold the biography and the
//! birth date and place.
//!
//! Extraction is strict: an expected element that is absent is an error.
//! The only lenient field is the keyword list, whose split is reproduced
//! as is (an empty keyword list yields a single empty tag).

use crate::record::{AuthorDetails, RawQuote};
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Birth dates on author pages look like "March 14, 1879"
pub const BIRTH_DATE_FORMAT: &str = "%B %d, %Y";

/// Errors raised while pulling fields out of a page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing element '{0}'")]
    Missing(String),

    #[error("missing attribute '{attr}' on '{selector}'")]
    MissingAttribute { selector: String, attr: String },

    #[error("unparseable birth date '{0}'")]
    InvalidDate(String),

    #[error("invalid selector '{0}'")]
    Selector(String),
}

/// Everything extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Quote blocks in page order
    pub quotes: Vec<RawQuote>,

    /// Whether a next-page marker is present
    pub has_next: bool,
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

/// Returns the first element matching `css` under `scope`
fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ExtractError> {
    scope
        .select(&selector(css)?)
        .next()
        .ok_or_else(|| ExtractError::Missing(css.to_string()))
}

/// Returns the full text content of the first element matching `css`
fn first_text(scope: ElementRef<'_>, css: &str) -> Result<String, ExtractError> {
    Ok(first(scope, css)?.text().collect())
}

/// Returns an attribute of the first element matching `css`
fn first_attr<'a>(scope: ElementRef<'a>, css: &str, attr: &str) -> Result<&'a str, ExtractError> {
    first(scope, css)?
        .value()
        .attr(attr)
        .ok_or_else(|| ExtractError::MissingAttribute {
            selector: css.to_string(),
            attr: attr.to_string(),
        })
}

/// Splits a keywords attribute the way the site encodes it
///
/// `"life,love"` gives `["life", "love"]`; `""` gives `[""]`.
pub fn split_keywords(content: &str) -> Vec<String> {
    content.split(',').map(str::to_string).collect()
}

/// Removes the first "in " from a born-location text
///
/// `"in Ulm, Germany"` gives `"Ulm, Germany"`. Later occurrences are kept.
pub fn strip_location_prefix(location: &str) -> String {
    location.replacen("in ", "", 1)
}

/// Cleans an author description: trims it and drops every backslash
pub fn clean_description(description: &str) -> String {
    description.trim().replace('\\', "")
}

/// Parses a "Month DD, YYYY" birth date
pub fn parse_birth_date(text: &str) -> Result<NaiveDate, ExtractError> {
    NaiveDate::parse_from_str(text.trim(), BIRTH_DATE_FORMAT)
        .map_err(|_| ExtractError::InvalidDate(text.to_string()))
}

/// Extracts one quote block
fn extract_quote(block: ElementRef<'_>) -> Result<RawQuote, ExtractError> {
    Ok(RawQuote {
        text: first_text(block, "span.text")?,
        author_name: first_text(block, "small.author")?,
        author_detail_link: first_attr(block, "a", "href")?.to_string(),
        tags: split_keywords(first_attr(block, "meta.keywords", "content")?),
    })
}

/// Extracts every quote block and the pagination marker from a listing page
///
/// # Arguments
///
/// * `html` - The listing page body
///
/// # Returns
///
/// * `Ok(ListingPage)` - Quotes in page order plus the next-page flag
/// * `Err(ExtractError)` - A quote block lacked an expected element
///
/// # Example
///
/// ```
/// use quote_scope::crawler::extract_listing;
///
/// let html = r#"<div class="quote">
///     <span class="text">“Hello”</span>
///     <small class="author">Someone</small>
///     <a href="/author/Someone">(about)</a>
///     <meta class="keywords" content="greeting">
/// </div>"#;
/// let page = extract_listing(html).unwrap();
/// assert_eq!(page.quotes.len(), 1);
/// assert!(!page.has_next);
/// ```
pub fn extract_listing(html: &str) -> Result<ListingPage, ExtractError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let quotes = root
        .select(&selector("div.quote")?)
        .map(extract_quote)
        .collect::<Result<Vec<_>, _>>()?;

    let has_next = root.select(&selector("li.next")?).next().is_some();

    Ok(ListingPage { quotes, has_next })
}

/// Extracts biography, birth date and birth place from an author page
pub fn extract_author(html: &str) -> Result<AuthorDetails, ExtractError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let about = clean_description(&first_text(root, "div.author-description")?);
    let birth_date = parse_birth_date(&first_text(root, "span.author-born-date")?)?;
    let birth_place = strip_location_prefix(&first_text(root, "span.author-born-location")?);

    Ok(AuthorDetails {
        about,
        birth_date,
        birth_place,
    })
}
