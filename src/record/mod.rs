//! Record module for the quote collection
//!
//! This module defines the data model shared by the crawler, the snapshot
//! store and the query engine.
//!
//! # Components
//!
//! - `RawQuote` / `AuthorDetails` / `RawRecord`: un-normalized crawl output
//! - `QuoteRecord`: one quotation plus its author's metadata
//! - `century_label`: birth-year to Roman-numeral century classification
//! - `normalize`: turns raw records into `QuoteRecord`s

mod century;
mod normalize;
mod types;

// Re-export main types
pub use century::{century_label, century_of_year, to_roman, DEFAULT_CENTURY_WORD};
pub use normalize::{normalize, normalize_record};
pub use types::{AuthorDetails, QuoteRecord, RawQuote, RawRecord};
