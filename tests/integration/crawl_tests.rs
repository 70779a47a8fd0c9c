//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small quotes site and run the crawl
//! pipeline end-to-end against it.

use chrono::NaiveDate;
use quote_scope::config::Config;
use quote_scope::crawler::{crawl, Crawler};
use quote_scope::query::{query, FilterSpec};
use quote_scope::storage::load_snapshot;
use quote_scope::ScopeError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One quote block on a listing page
struct QuoteFixture {
    text: &'static str,
    author: &'static str,
    slug: &'static str,
    keywords: &'static str,
}

const EINSTEIN: QuoteFixture = QuoteFixture {
    text: "“The world as we have created it is a process of our thinking.”",
    author: "Albert Einstein",
    slug: "Albert-Einstein",
    keywords: "change,deep-thoughts,thinking,world",
};

const ROWLING: QuoteFixture = QuoteFixture {
    text: "“It is our choices, Harry, that show what we truly are.”",
    author: "J.K. Rowling",
    slug: "J-K-Rowling",
    keywords: "abilities,choices",
};

const AUSTEN: QuoteFixture = QuoteFixture {
    text: "“The person, be it gentleman or lady, who has not pleasure in a good novel, must be intolerably stupid.”",
    author: "Jane Austen",
    slug: "Jane-Austen",
    keywords: "",
};

fn listing_page(quotes: &[&QuoteFixture], has_next: bool) -> String {
    let mut html = String::from("<html><body><div class=\"container\">");
    for quote in quotes {
        html.push_str(&format!(
            r#"<div class="quote">
                <span class="text">{}</span>
                <span>by <small class="author">{}</small>
                <a href="/author/{}">(about)</a></span>
                <div class="tags">Tags: <meta class="keywords" content="{}" /></div>
            </div>"#,
            quote.text, quote.author, quote.slug, quote.keywords
        ));
    }
    html.push_str("<nav><ul class=\"pager\">");
    if has_next {
        html.push_str(r##"<li class="next"><a href="#">Next</a></li>"##);
    }
    html.push_str("</ul></nav></div></body></html>");
    html
}

fn author_page(born: &str, location: &str, description: &str) -> String {
    format!(
        r#"<html><body><div class="author-details">
            <p><strong>Born:</strong> <span class="author-born-date">{}</span>
            <span class="author-born-location">{}</span></p>
            <div class="author-description">
                {}
            </div>
        </div></body></html>"#,
        born, location, description
    )
}

async fn mount_page(server: &MockServer, index: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{}/", index)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_author(server: &MockServer, slug: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/author/{}", slug)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn mount_standard_authors(server: &MockServer, einstein: u64, rowling: u64, austen: u64) {
    mount_author(
        server,
        EINSTEIN.slug,
        author_page("March 14, 1879", "in Ulm, Germany", "Born in Ulm."),
        einstein,
    )
    .await;
    mount_author(
        server,
        ROWLING.slug,
        author_page(
            "July 31, 1965",
            "in Yate, South Gloucestershire, England, The United Kingdom",
            "See also: Robert Galbraith",
        ),
        rowling,
    )
    .await;
    mount_author(
        server,
        AUSTEN.slug,
        author_page(
            "December 16, 1775",
            "in Steventon Rectory, Hampshire, The United Kingdom",
            "Jane Austen was an English novelist.",
        ),
        austen,
    )
    .await;
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.site.base_url = server.uri();
    config
}

#[tokio::test]
async fn test_pagination_in_discovery_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING], true)).await;
    mount_page(&server, 2, listing_page(&[&AUSTEN], false)).await;
    mount_standard_authors(&server, 1, 1, 1).await;

    let config = config_for(&server);
    let crawler = Crawler::new(&config.site.base_url, &config.crawler).unwrap();
    let outcome = crawler.crawl_raw().await.unwrap();

    assert_eq!(outcome.pages_crawled, 2);
    assert!(!outcome.stopped_at_cap);
    assert_eq!(outcome.skipped_authors, 0);

    let authors: Vec<_> = outcome
        .records
        .iter()
        .map(|r| r.quote.author_name.as_str())
        .collect();
    assert_eq!(authors, vec!["Albert Einstein", "J.K. Rowling", "Jane Austen"]);

    let einstein = &outcome.records[0];
    assert_eq!(einstein.quote.author_detail_link, "/author/Albert-Einstein");
    assert_eq!(
        einstein.quote.tags,
        vec!["change", "deep-thoughts", "thinking", "world"]
    );
    assert_eq!(
        einstein.author.birth_date,
        NaiveDate::from_ymd_opt(1879, 3, 14).unwrap()
    );
    assert_eq!(einstein.author.birth_place, "Ulm, Germany");
    assert_eq!(einstein.author.about, "Born in Ulm.");

    assert_eq!(outcome.records[2].quote.tags, vec![String::new()]);
}

#[tokio::test]
async fn test_author_page_fetched_per_quote() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING, &EINSTEIN], false)).await;
    mount_standard_authors(&server, 2, 1, 0).await;

    let config = config_for(&server);
    let (records, _) = quote_scope::crawler::collect(&config).await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_author_cache_fetches_each_author_once() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING, &EINSTEIN], false)).await;
    mount_standard_authors(&server, 1, 1, 0).await;

    let mut config = config_for(&server);
    config.crawler.author_cache = true;
    let (records, _) = quote_scope::crawler::collect(&config).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], records[2]);
}

#[tokio::test]
async fn test_page_failure_aborts() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN], true)).await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_standard_authors(&server, 1, 0, 0).await;

    let config = config_for(&server);
    let err = quote_scope::crawler::collect(&config).await.unwrap_err();
    match err {
        ScopeError::HttpStatus { url, status } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/page/2/"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_author_failure_aborts_by_default() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING], false)).await;
    mount_author(
        &server,
        EINSTEIN.slug,
        author_page("March 14, 1879", "in Ulm, Germany", "Born in Ulm."),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/author/J-K-Rowling"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let err = quote_scope::crawler::collect(&config).await.unwrap_err();
    assert!(matches!(err, ScopeError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_skip_failed_authors_drops_quote() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING, &AUSTEN], false)).await;
    mount_author(
        &server,
        EINSTEIN.slug,
        author_page("March 14, 1879", "in Ulm, Germany", "Born in Ulm."),
        1,
    )
    .await;
    mount_author(
        &server,
        ROWLING.slug,
        author_page("sometime in 1965", "in Yate", "Unparseable date."),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/author/Jane-Austen"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.crawler.skip_failed_authors = true;

    let crawler = Crawler::new(&config.site.base_url, &config.crawler).unwrap();
    let outcome = crawler.crawl_raw().await.unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].quote.author_name, "Albert Einstein");
    assert_eq!(outcome.skipped_authors, 2);
}

#[tokio::test]
async fn test_invalid_birth_date_aborts() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&ROWLING], false)).await;
    mount_author(
        &server,
        ROWLING.slug,
        author_page("31/07/1965", "in Yate", "Bad date format."),
        1,
    )
    .await;

    let config = config_for(&server);
    let err = quote_scope::crawler::collect(&config).await.unwrap_err();
    match err {
        ScopeError::InvalidDate { url, value } => {
            assert!(url.ends_with("/author/J-K-Rowling"));
            assert_eq!(value, "31/07/1965");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_listing_without_author_element_aborts() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        r#"<div class="quote"><span class="text">Orphan</span>
            <a href="/author/nobody">(about)</a>
            <meta class="keywords" content="x"></div>"#
            .to_string(),
    )
    .await;

    let config = config_for(&server);
    let err = quote_scope::crawler::collect(&config).await.unwrap_err();
    assert!(matches!(err, ScopeError::Parse { .. }));
}

#[tokio::test]
async fn test_page_cap_stops_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN], true)).await;
    mount_page(&server, 2, listing_page(&[&ROWLING], true)).await;
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[&AUSTEN], false)))
        .expect(0)
        .mount(&server)
        .await;
    mount_standard_authors(&server, 1, 1, 0).await;

    let mut config = config_for(&server);
    config.crawler.max_pages = 2;

    let crawler = Crawler::new(&config.site.base_url, &config.crawler).unwrap();
    let outcome = crawler.crawl_raw().await.unwrap();

    assert_eq!(outcome.pages_crawled, 2);
    assert!(outcome.stopped_at_cap);
    assert_eq!(outcome.records.len(), 2);
}

#[tokio::test]
async fn test_full_pipeline_writes_snapshot_and_csv() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&EINSTEIN, &ROWLING], true)).await;
    mount_page(&server, 2, listing_page(&[&AUSTEN], false)).await;
    mount_standard_authors(&server, 1, 1, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&server);
    config.output.snapshot_path = dir.path().join("quotes.db").display().to_string();
    config.output.csv_path = dir.path().join("quotes.csv").display().to_string();

    let summary = crawl(&config, "test-hash").await.unwrap();
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.author_count, 3);
    assert_eq!(summary.tag_count, 6);
    assert_eq!(summary.pages_crawled, 2);

    let snapshot = load_snapshot(&summary.snapshot_path).unwrap();
    assert_eq!(snapshot.run.id, summary.run_id);
    assert_eq!(snapshot.run.config_hash, "test-hash");
    assert_eq!(snapshot.run.pages_crawled, 2);
    assert_eq!(snapshot.run.record_count, 3);
    assert_eq!(snapshot.records.len(), 3);

    let centuries: Vec<_> = snapshot
        .records
        .iter()
        .map(|r| r.author_birth_century.as_str())
        .collect();
    assert_eq!(centuries, vec!["century XIX", "century XX", "century XVIII"]);
    assert_eq!(snapshot.records[2].tags, vec![String::new()]);

    let csv = std::fs::read_to_string(&summary.csv_path).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("text,author_name,"));
    assert!(lines[1].contains("\"change,deep-thoughts,thinking,world\""));
    assert!(lines[1].contains("1879-03-14"));

    let result = query(&snapshot.records, &FilterSpec::new(None, None, Some("choices")));
    assert_eq!(result.total_quotes, 1);
    assert_eq!(result.top_authors, vec![("J.K. Rowling".to_string(), 1)]);
}

#[tokio::test]
async fn test_failed_crawl_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("quotes.db");

    let good = MockServer::start().await;
    mount_page(&good, 1, listing_page(&[&EINSTEIN], false)).await;
    mount_standard_authors(&good, 1, 0, 0).await;

    let mut config = config_for(&good);
    config.output.snapshot_path = snapshot_path.display().to_string();
    config.output.csv_path = dir.path().join("quotes.csv").display().to_string();
    crawl(&config, "first").await.unwrap();

    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;
    config.site.base_url = broken.uri();
    assert!(crawl(&config, "second").await.is_err());

    let snapshot = load_snapshot(&snapshot_path).unwrap();
    assert_eq!(snapshot.run.config_hash, "first");
    assert_eq!(snapshot.records.len(), 1);
}

#[tokio::test]
async fn test_siglo_century_word() {
    let server = MockServer::start().await;
    mount_page(&server, 1, listing_page(&[&AUSTEN], false)).await;
    mount_standard_authors(&server, 0, 0, 1).await;

    let mut config = config_for(&server);
    config.crawler.century_word = "siglo".to_string();
    let (records, _) = quote_scope::crawler::collect(&config).await.unwrap();

    assert_eq!(records[0].author_birth_century, "siglo XVIII");
}
