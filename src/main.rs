//! Quote-Scope main entry point
//!
//! This is the command-line interface for harvesting quotes and exploring
//! the stored snapshot.

use clap::{Parser, Subcommand};
use quote_scope::config::{load_or_default, validate, Config};
use quote_scope::crawler::crawl;
use quote_scope::output::{
    format_query_text, print_statistics, write_csv, write_query_markdown, SnapshotStatistics,
};
use quote_scope::query::query_with_limits;
use quote_scope::storage::{load_snapshot, Snapshot};
use quote_scope::{dashboard, FilterSpec, ScopeError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quote-Scope: a quotation harvester and dashboard
///
/// Quote-Scope crawls a paginated quotations site, joins every quote with
/// its author's biography, stores the collection as a snapshot and lets you
/// filter and summarize it from the terminal.
#[derive(Parser, Debug)]
#[command(name = "quote-scope")]
#[command(version = "1.0.0")]
#[command(about = "A quotation harvester and dashboard", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site, store the snapshot and write the CSV export
    Crawl {
        /// Override the configured site origin
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Open the interactive dashboard over the stored snapshot
    Dashboard,

    /// Print a filtered report over the stored snapshot
    Query {
        /// Case-insensitive text to find in quotes or author names
        #[arg(long)]
        search: Option<String>,

        /// Exact author name ("all" for every author)
        #[arg(long)]
        author: Option<String>,

        /// Exact tag ("all" for every tag)
        #[arg(long)]
        tag: Option<String>,

        /// Also write the report as markdown to this file
        #[arg(long, value_name = "FILE")]
        markdown: Option<PathBuf>,
    },

    /// Write the CSV export from the stored snapshot
    Export {
        /// Destination file (defaults to the configured csv-path)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show snapshot metadata and collection statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The dashboard owns the terminal, so only errors are logged while it runs
    let interactive = matches!(cli.command, Command::Dashboard);
    setup_logging(cli.verbose, cli.quiet || interactive);

    let (config, config_hash) = match load_or_default(cli.config.as_deref()) {
        Ok((cfg, hash)) => {
            match &cli.config {
                Some(path) => tracing::info!(
                    "Configuration loaded from {} (hash: {})",
                    path.display(),
                    hash
                ),
                None => tracing::debug!("No config file given, using defaults"),
            }
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let result = match cli.command {
        Command::Crawl { base_url } => handle_crawl(config, &config_hash, base_url).await,
        Command::Dashboard => handle_dashboard(&config).await,
        Command::Query {
            search,
            author,
            tag,
            markdown,
        } => handle_query(
            &config,
            FilterSpec::new(search.as_deref(), author.as_deref(), tag.as_deref()),
            markdown.as_deref(),
        ),
        Command::Export { output } => handle_export(&config, output.as_deref()),
        Command::Stats => handle_stats(&config),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_snapshot_unavailable() => {
            eprintln!("{}", e);
            eprintln!("Run `quote-scope crawl` first to create the snapshot.");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_scope=info,warn"),
            1 => EnvFilter::new("quote_scope=debug,info"),
            2 => EnvFilter::new("quote_scope=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the snapshot named by the configuration
fn open_snapshot(config: &Config) -> Result<Snapshot, ScopeError> {
    let path = Path::new(&config.output.snapshot_path);
    tracing::debug!("Loading snapshot from {}", path.display());
    load_snapshot(path)
}

/// Handles the crawl command
async fn handle_crawl(
    mut config: Config,
    config_hash: &str,
    base_url: Option<String>,
) -> Result<(), ScopeError> {
    if let Some(base_url) = base_url {
        config.site.base_url = base_url;
        validate(&config)?;
    }

    tracing::info!(
        "Max pages: {}, author cache: {}, skip failed authors: {}",
        config.crawler.max_pages,
        config.crawler.author_cache,
        config.crawler.skip_failed_authors
    );

    let summary = crawl(&config, config_hash).await?;

    if summary.stopped_at_cap {
        tracing::warn!("Crawl stopped at the page cap; the snapshot is partial");
    }
    if summary.skipped_authors > 0 {
        tracing::warn!(
            "{} quotes were dropped because their author page failed",
            summary.skipped_authors
        );
    }

    println!(
        "✓ {} quotes from {} authors ({} tags) over {} pages",
        summary.record_count, summary.author_count, summary.tag_count, summary.pages_crawled
    );
    println!("✓ Snapshot: {}", summary.snapshot_path.display());
    println!("✓ CSV: {}", summary.csv_path.display());

    Ok(())
}

/// Handles the dashboard command
async fn handle_dashboard(config: &Config) -> Result<(), ScopeError> {
    let snapshot = open_snapshot(config)?;
    dashboard::run(snapshot.records, config.dashboard.limits()).await
}

/// Handles the query command: prints the report, optionally as markdown too
fn handle_query(
    config: &Config,
    filter: FilterSpec,
    markdown: Option<&Path>,
) -> Result<(), ScopeError> {
    let snapshot = open_snapshot(config)?;
    let result = query_with_limits(&snapshot.records, &filter, config.dashboard.limits());

    print!("{}", format_query_text(&result, &filter, &snapshot)?);

    if let Some(path) = markdown {
        write_query_markdown(&result, &filter, path)?;
        println!("\n✓ Report written to: {}", path.display());
    }

    Ok(())
}

/// Handles the export command
fn handle_export(config: &Config, output: Option<&Path>) -> Result<(), ScopeError> {
    let snapshot = open_snapshot(config)?;
    let path = output.unwrap_or_else(|| Path::new(&config.output.csv_path));

    write_csv(path, &snapshot.records)?;
    println!(
        "✓ Exported {} quotes to: {}",
        snapshot.records.len(),
        path.display()
    );

    Ok(())
}

/// Handles the stats command
fn handle_stats(config: &Config) -> Result<(), ScopeError> {
    let snapshot = open_snapshot(config)?;
    println!("Snapshot: {}\n", config.output.snapshot_path);
    print_statistics(&SnapshotStatistics::from_snapshot(&snapshot));
    Ok(())
}
