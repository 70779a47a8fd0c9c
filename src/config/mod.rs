//! Configuration module for Quote-Scope
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so running without a file is valid.
//!
//! # Example
//!
//! ```no_run
//! use quote_scope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quote-scope.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DashboardConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_content, load_config, load_config_with_hash, load_or_default,
};
pub use validation::validate;
