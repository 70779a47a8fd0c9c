//! Integration tests for the command-line binary
//!
//! These tests run the built `quote-scope` executable against a temporary
//! configuration and check exit status and output.

use chrono::{NaiveDate, TimeZone, Utc};
use quote_scope::record::QuoteRecord;
use quote_scope::storage::{NewRun, SnapshotStore, SqliteStorage};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const REMEDIATION: &str = "Run `quote-scope crawl` first";

/// A temporary directory holding a config that points at `quotes.db`
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("quote-scope.toml");
        let toml = format!(
            "[output]\nsnapshot-path = {:?}\ncsv-path = {:?}\n",
            dir.path().join("quotes.db").display().to_string(),
            dir.path().join("quotes.csv").display().to_string(),
        );
        std::fs::write(&config, toml).unwrap();
        Self { dir, config }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("quotes.db")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_quote-scope"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .unwrap()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_snapshot_unavailable(output: &Output) {
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(output));
    assert!(
        stderr(output).contains(REMEDIATION),
        "stderr: {}",
        stderr(output)
    );
}

fn write_snapshot(path: &Path) {
    let record = QuoteRecord {
        text: "“A day without sunshine is like, you know, night.”".to_string(),
        author_name: "Steve Martin".to_string(),
        author_detail_link: "/author/Steve-Martin".to_string(),
        tags: vec!["humor".to_string(), "obvious".to_string()],
        author_about: "Comedian and writer.".to_string(),
        author_birth_date: NaiveDate::from_ymd_opt(1945, 8, 14).unwrap(),
        author_birth_place: "Waco, Texas, The United States".to_string(),
        author_birth_century: "century XX".to_string(),
    };
    let run = NewRun {
        started_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        finished_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 9).unwrap(),
        config_hash: "cli".to_string(),
        base_url: "https://quotes.toscrape.com".to_string(),
        pages_crawled: 1,
    };

    let mut storage = SqliteStorage::new(path).unwrap();
    storage.save_snapshot(&[record], &run).unwrap();
}

#[test]
fn test_stats_without_snapshot() {
    let workspace = Workspace::new();
    let output = workspace.run(&["stats"]);

    assert_snapshot_unavailable(&output);
    assert!(stderr(&output).contains("quotes.db"));
    assert!(!workspace.snapshot_path().exists());
}

#[test]
fn test_query_without_snapshot() {
    let workspace = Workspace::new();
    let output = workspace.run(&["query", "--author", "Steve Martin"]);

    assert_snapshot_unavailable(&output);
    assert!(stdout(&output).is_empty());
    assert!(!workspace.snapshot_path().exists());
}

#[test]
fn test_export_and_dashboard_without_snapshot() {
    let workspace = Workspace::new();

    assert_snapshot_unavailable(&workspace.run(&["export"]));
    assert_snapshot_unavailable(&workspace.run(&["dashboard"]));
    assert!(!workspace.dir.path().join("quotes.csv").exists());
}

#[test]
fn test_stats_on_garbage_file() {
    let workspace = Workspace::new();
    std::fs::write(workspace.snapshot_path(), vec![b'x'; 4096]).unwrap();

    let output = workspace.run(&["stats"]);
    assert_snapshot_unavailable(&output);

    let output = workspace.run(&["query"]);
    assert_snapshot_unavailable(&output);
}

#[test]
fn test_stats_and_query_on_stored_snapshot() {
    let workspace = Workspace::new();
    write_snapshot(&workspace.snapshot_path());

    let output = workspace.run(&["stats"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Quotes: 1"));

    let output = workspace.run(&["query", "--tag", "humor"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Totals: 1 quotes, 1 authors, 2 tags"));
    assert!(!stderr(&output).contains(REMEDIATION));
}
