use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use quote_scope::config::load_config;
///
/// let config = load_config(Path::new("quote-scope.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Computes a hex-encoded SHA-256 hash of a configuration text
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is stored with each snapshot so a later reader can tell which
/// configuration produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Loads the configuration at `path`, or the built-in defaults when no path
/// is given
///
/// The defaults hash as the empty document.
pub fn load_or_default(path: Option<&Path>) -> Result<(Config, String), ConfigError> {
    match path {
        Some(path) => load_config_with_hash(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok((config, hash_content("")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[site]
base-url = "https://quotes.example.com"

[crawler]
max-pages = 5
request-timeout = 10
author-cache = true
skip-failed-authors = true
century-word = "siglo"

[output]
snapshot-path = "./test.db"
csv-path = "./test.csv"

[dashboard]
top-authors = 5
top-tags = 8
preview-records = 12
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://quotes.example.com");
        assert_eq!(config.crawler.max_pages, 5);
        assert!(config.crawler.author_cache);
        assert!(config.crawler.skip_failed_authors);
        assert_eq!(config.crawler.century_word, "siglo");
        assert_eq!(config.output.csv_path, "./test.csv");
        assert_eq!(config.dashboard.limits().top_tags, 8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = create_temp_config("[crawler]\nmax-pages = 3\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_pages, 3);
        assert_eq!(config.crawler.request_timeout, 30);
        assert!(!config.crawler.author_cache);
        assert_eq!(config.crawler.century_word, "century");
        assert_eq!(config.site.base_url, "https://quotes.toscrape.com");
        assert_eq!(config.output.snapshot_path, "quotes_data.db");
        assert_eq!(config.dashboard.top_authors, 10);
        assert_eq!(config.dashboard.top_tags, 15);
        assert_eq!(config.dashboard.preview_records, 20);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/quote-scope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nmax-pages = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let (config, hash) = load_or_default(None).unwrap();
        assert_eq!(config.crawler.max_pages, 1000);
        assert_eq!(hash, hash_content(""));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("[crawler]\nmax-pages = 1\n");
        let file2 = create_temp_config("[crawler]\nmax-pages = 2\n");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
        assert_eq!(hash1, compute_config_hash(file1.path()).unwrap());
    }
}
